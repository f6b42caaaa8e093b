use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicUsize};

use log::{debug, trace};

use super::{longest_path, Cancel, DeadlineExceeded, Memo, SearchConfig};
use crate::env::Direction;
use crate::game::{Board, Cell, Walls};

/// Depth limited search over simultaneous moves of both agents.
///
/// This is not minimax: the opponent's move is unknown, so each of our moves
/// is scored by a weighted sum over all opponent responses. Once the agents
/// are separated the outcome is decided by comparing the estimated longest
/// paths of both agents.
///
/// Full depth results of root calls are stored in the shared `Memo`, every
/// call reads from it.
pub struct Search<'a> {
    config: &'a SearchConfig,
    memo: &'a Memo,
    cancel: Cancel,
    expansions: AtomicUsize,
}

impl<'a> Search<'a> {
    pub fn new(config: &'a SearchConfig, memo: &'a Memo) -> Search<'a> {
        Search {
            config,
            memo,
            cancel: Cancel::default(),
            expansions: AtomicUsize::new(0),
        }
    }

    /// Aborts the search with `DeadlineExceeded` once `cancel` is triggered.
    pub fn with_cancel(mut self, cancel: Cancel) -> Search<'a> {
        self.cancel = cancel;
        self
    }

    /// Number of nodes that were not answered by the memo.
    pub fn expansions(&self) -> usize {
        self.expansions.load(atomic::Ordering::Relaxed)
    }

    /// Evaluates `board` with the full configured depth.
    pub fn evaluate(&self, board: &Board) -> Result<(Direction, f64), DeadlineExceeded> {
        self.evaluate_at(board, self.config.depth)
    }

    /// Evaluates `board` as root call with the given depth.
    /// Only full depth results are memoized.
    pub fn evaluate_at(
        &self,
        board: &Board,
        depth: i32,
    ) -> Result<(Direction, f64), DeadlineExceeded> {
        let result = self.evaluate_rec(board, depth, true)?;
        debug!(
            "evaluate depth={} -> {:?} ({} expansions, {} memoized)",
            depth,
            result,
            self.expansions(),
            self.memo.len()
        );
        Ok(result)
    }

    fn evaluate_rec(
        &self,
        board: &Board,
        depth: i32,
        root: bool,
    ) -> Result<(Direction, f64), DeadlineExceeded> {
        self.cancel.check()?;

        if depth <= 0 {
            return Ok((Direction::Up, 0.0));
        }
        if let Some(result) = self.memo.get(board) {
            return Ok(result);
        }
        self.expansions.fetch_add(1, atomic::Ordering::Relaxed);

        let result = if board.can_reach() {
            self.evaluate_live(board, depth)?
        } else {
            self.evaluate_separated(board)
        };

        if root && depth >= self.config.depth {
            self.memo.insert(*board, result);
        }
        Ok(result)
    }

    /// Both agents can no longer interact, compare their remaining space.
    fn evaluate_separated(&self, board: &Board) -> (Direction, f64) {
        let budget = self.config.path_budget;
        let (dir, you) = longest_path(board, Cell::You, budget);
        let (_, opponent) = longest_path(board, Cell::Opponent, budget);

        let score = match you.cmp(&opponent) {
            Ordering::Greater => self.config.win,
            Ordering::Equal => self.config.tie,
            Ordering::Less => self.config.loss,
        };
        trace!("separated you={} opponent={} -> {}", you, opponent, score);
        (dir, score)
    }

    fn evaluate_live(
        &self,
        board: &Board,
        depth: i32,
    ) -> Result<(Direction, f64), DeadlineExceeded> {
        let you = board.you();
        let opponent = board.opponent();

        let mut best: Option<(Direction, f64)> = None;
        for (dir, p) in board.moves(you, Walls::MOVE) {
            let after = board.moved(Cell::You, p);

            // Opponent moves are generated on the board before our move.
            let mut score = 0.0;
            for (_, q) in board.moves(opponent, Walls::MOVE) {
                if p == q {
                    score += self.config.collision;
                } else {
                    let next = after.moved(Cell::Opponent, q);
                    let (_, child) = self.evaluate_rec(&next, depth - 2, false)?;
                    score += self.config.opponent_weight * child;
                }
            }

            if best.map_or(true, |(_, max)| score > max) {
                best = Some((dir, score));
            }
        }

        Ok(best.unwrap_or((Direction::Up, self.config.no_move)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use Direction::*;

    fn config(depth: i32) -> SearchConfig {
        SearchConfig {
            depth,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn separated_larger_room() {
        let board = Board::parse(
            r#"
            P . . . x x x x
            . . . . x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x O ."#,
        )
        .unwrap();
        assert!(!board.can_reach());

        let config = config(12);
        let memo = Memo::new();
        let search = Search::new(&config, &memo);
        assert_eq!(search.evaluate(&board), Ok((Down, 100.0)));
        // swapped we are in the small room
        assert_eq!(search.evaluate(&board.swap_agents()), Ok((Right, -10000.0)));
    }

    #[test]
    fn separated_equal_rooms() {
        let board = Board::parse(
            r#"
            P . x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x O ."#,
        )
        .unwrap();

        let config = config(12);
        let memo = Memo::new();
        let search = Search::new(&config, &memo);
        assert_eq!(search.evaluate(&board), Ok((Right, -100.0)));
    }

    #[test]
    fn forced_collision() {
        let board = Board::parse(
            r#"
            x x x x x x x x
            x P . O x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x"#,
        )
        .unwrap();
        assert!(board.can_reach());

        let config = config(12);
        let memo = Memo::new();
        let search = Search::new(&config, &memo);
        assert_eq!(search.evaluate(&board), Ok((Right, -100.0)));
    }

    #[test]
    fn no_move_available() {
        let board = Board::parse(
            r#"
            x x x x x x x x
            x P O . . . x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x
            x x x x x x x x"#,
        )
        .unwrap();
        assert!(board.can_reach());

        let config = config(12);
        let memo = Memo::new();
        let search = Search::new(&config, &memo);
        assert_eq!(search.evaluate(&board), Ok((Up, -1.0)));
    }

    #[test]
    fn depth_exhausted() {
        let board = Board::parse(
            r#"
            P . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . O"#,
        )
        .unwrap();

        let config = config(12);
        let memo = Memo::new();
        let search = Search::new(&config, &memo);
        assert_eq!(search.evaluate_at(&board, 0), Ok((Up, 0.0)));
        assert_eq!(search.evaluate_at(&board, -3), Ok((Up, 0.0)));
        assert_eq!(search.expansions(), 0);
    }

    #[test]
    fn legal_directions() {
        let boards = [
            r#"
            P . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . O"#,
            r#"
            x x x . . . . .
            x P . . . . . .
            x x . . . . . .
            . . . . . . . .
            . . . . O . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . ."#,
            r#"
            . . . . . . . x
            . . . . . . P x
            . . . . . . x x
            . . . . . . . .
            . . . x x . . .
            . . . x O . . .
            . . . x . . . .
            . . . . . . . ."#,
            r#"
            . . . . . . . .
            . . . . . . . .
            . . . x x x . .
            . . . P O . . .
            . . . x x x . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . ."#,
        ];

        let config = config(6);
        for txt in boards {
            let board = Board::parse(txt).unwrap();
            let memo = Memo::new();
            let (dir, _) = Search::new(&config, &memo).evaluate(&board).unwrap();
            let legal: Vec<Direction> = board
                .moves(board.you(), Walls::MOVE)
                .map(|(d, _)| d)
                .collect();
            assert!(!legal.is_empty());
            assert!(legal.contains(&dir), "{:?} not in {:?}\n{:?}", dir, legal, board);
        }
    }

    #[test]
    fn avoids_dead_end() {
        // Up enters a pocket of a single cell, Down leads to the open board.
        let board = Board::parse(
            r#"
            x . x . . . . .
            x P x . . . . .
            x . x . . . . .
            x . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . O"#,
        )
        .unwrap();

        let config = config(6);
        let memo = Memo::new();
        let (dir, _) = Search::new(&config, &memo).evaluate(&board).unwrap();
        assert_eq!(dir, Down);
    }

    #[test]
    fn memo_transparency() {
        let board = Board::parse(
            r#"
            P . . . . . . .
            . . . . . . . .
            . . x . . . . .
            . . . . . . . .
            . . . . . x . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . O"#,
        )
        .unwrap();

        let config = config(6);
        let memo = Memo::new();

        let first = Search::new(&config, &memo);
        let a = first.evaluate(&board).unwrap();
        assert!(first.expansions() > 0);
        assert_eq!(memo.get(&board), Some(a));
        // sub calls never write
        assert_eq!(memo.len(), 1);

        let second = Search::new(&config, &memo);
        let b = second.evaluate(&board).unwrap();
        assert_eq!(a, b);
        assert_eq!(second.expansions(), 0);
    }

    #[test]
    fn reduced_depth_is_not_memoized() {
        let board = Board::parse(
            r#"
            P . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . O"#,
        )
        .unwrap();

        let config = config(6);
        let memo = Memo::new();
        let search = Search::new(&config, &memo);
        search.evaluate_at(&board, config.fallback_depth()).unwrap();
        assert!(memo.is_empty());
    }

    #[test]
    fn cancelled_search() {
        let board = Board::parse(
            r#"
            P . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . O"#,
        )
        .unwrap();

        let config = config(6);
        let memo = Memo::new();
        let cancel = Cancel::default();
        cancel.cancel();
        let search = Search::new(&config, &memo).with_cancel(cancel);
        assert_eq!(search.evaluate(&board), Err(DeadlineExceeded));
        assert!(memo.is_empty());
    }

    #[test]
    fn same_board_same_result() {
        let board = Board::parse(
            r#"
            . . . . . . . .
            . P . . . . . .
            . . . x x . . .
            . . . . . . . .
            . . . . . . . .
            . . . x . . O .
            . . . . . . . .
            . . . . . . . ."#,
        )
        .unwrap();

        let config = config(6);
        let a = Search::new(&config, &Memo::new()).evaluate(&board).unwrap();
        let b = Search::new(&config, &Memo::new()).evaluate(&board).unwrap();
        assert_eq!(a, b);
    }
}
