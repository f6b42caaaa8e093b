use std::collections::HashMap;

use parking_lot::Mutex;

use crate::env::Direction;
use crate::game::Board;

/// Transposition table of full depth search results.
///
/// Entries are never evicted; the table lives as long as its owner.
/// The mutex is only taken for single lookups and inserts.
#[derive(Debug, Default)]
pub struct Memo {
    table: Mutex<HashMap<Board, (Direction, f64)>>,
}

impl Memo {
    pub fn new() -> Memo {
        Memo::default()
    }

    pub fn get(&self, board: &Board) -> Option<(Direction, f64)> {
        self.table.lock().get(board).copied()
    }

    pub fn insert(&self, board: Board, result: (Direction, f64)) {
        self.table.lock().insert(board, result);
    }

    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of all entries, e.g. for dumping a warmed up table.
    pub fn entries(&self) -> Vec<(Board, (Direction, f64))> {
        self.table.lock().iter().map(|(b, r)| (*b, *r)).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn memo_lookup() {
        let memo = Memo::new();
        let board = Board::new().mark(0, Cell::You).mark(63, Cell::Opponent);
        assert!(memo.is_empty());
        assert_eq!(memo.get(&board), None);

        memo.insert(board, (Direction::Down, 12.5));
        assert_eq!(memo.get(&board), Some((Direction::Down, 12.5)));
        assert_eq!(memo.get(&board.rotate()), None);
        assert_eq!(memo.len(), 1);
        assert_eq!(memo.entries(), vec![(board, (Direction::Down, 12.5))]);
    }
}
