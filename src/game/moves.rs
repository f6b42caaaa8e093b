use super::{Board, Walls, CELLS, SENTINEL, WIDTH};
use crate::env::Direction;

/// Destination of a move from `p`, or the sentinel when leaving the board.
pub fn step(p: usize, dir: Direction) -> usize {
    if p >= CELLS {
        return SENTINEL;
    }
    match dir {
        Direction::Up if p >= WIDTH => p - WIDTH,
        Direction::Down if p < CELLS - WIDTH => p + WIDTH,
        Direction::Right if p % WIDTH != WIDTH - 1 => p + 1,
        Direction::Left if p % WIDTH != 0 => p - 1,
        _ => SENTINEL,
    }
}

impl Board {
    /// Returns all moves from `p` whose destination is not part of `walls`.
    pub fn moves(&self, p: usize, walls: Walls) -> Moves {
        Moves {
            board: self,
            p,
            walls,
            dir: 0,
        }
    }

    /// Returns if `dir` is a legal move for the agent at `p`.
    pub fn move_is_valid(&self, p: usize, dir: Direction) -> bool {
        !Walls::MOVE.contains(self[step(p, dir)])
    }
}

/// Iterator over the available moves and their destinations.
pub struct Moves<'a> {
    board: &'a Board,
    p: usize,
    walls: Walls,
    dir: u8,
}

impl<'a> Iterator for Moves<'a> {
    type Item = (Direction, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.dir < 4 {
            let d = Direction::from(self.dir);
            self.dir += 1;
            let target = step(self.p, d);
            if !self.walls.contains(self.board[target]) {
                return Some((d, target));
            }
        }
        None
    }
}
