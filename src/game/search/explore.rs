use log::info;

use super::{DeadlineExceeded, Search};
use crate::env::Direction;
use crate::game::{step, Board, Cell, Walls};

impl<'a> Search<'a> {
    /// Walks the predicted lines of play starting at `board`, evaluating
    /// every visited position at full depth and thereby filling the memo.
    ///
    /// At each position our predicted move is played and every opponent
    /// response is followed, up to `lines` of our own moves. Lines whose
    /// score exceeds `threshold` are considered decided and not extended.
    /// Returns the number of evaluated positions.
    pub fn explore(
        &self,
        board: &Board,
        lines: usize,
        threshold: f64,
        visit: &mut impl FnMut(&Board, (Direction, f64)),
    ) -> Result<usize, DeadlineExceeded> {
        if lines == 0 {
            return Ok(0);
        }

        let result = self.evaluate(board)?;
        visit(board, result);
        let mut evaluated = 1;

        let (dir, score) = result;
        let you = board.you();
        if score > threshold || !board.move_is_valid(you, dir) {
            return Ok(evaluated);
        }

        // The opponent answers on the board where we already moved.
        let after = board.moved(Cell::You, step(you, dir));
        for (_, q) in after.moves(after.opponent(), Walls::MOVE) {
            let next = after.moved(Cell::Opponent, q);
            evaluated += self.explore(&next, lines - 1, threshold, visit)?;
        }

        if lines > 1 {
            info!("explored {} lines below {:?}: {}", lines, dir, evaluated);
        }
        Ok(evaluated)
    }
}
