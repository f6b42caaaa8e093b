use crate::env::Direction;
use crate::game::{Board, Cell, Walls};

/// Estimates how many more moves `agent` can make on its own.
///
/// Depth first search over the agent's moves, bounded by `budget`. Returns
/// the first direction reaching the longest path and that path's length.
/// Exact longest paths are NP-hard, so this is only an estimate: the
/// result never exceeds `budget` and the search stops as soon as a path of
/// that length has been found. The other agent is treated as an obstacle.
pub fn longest_path(board: &Board, agent: Cell, budget: i32) -> (Direction, usize) {
    if budget <= 0 {
        return (Direction::Up, 0);
    }

    let mut best = (Direction::Up, 0);
    for (d, p) in board.moves(board.find(agent), Walls::MOVE) {
        let (_, len) = longest_path(&board.moved(agent, p), agent, budget - 1);
        if len + 1 > best.1 {
            best = (d, len + 1);
        }
        if best.1 >= budget as usize {
            break;
        }
    }
    best
}
