use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Board, CELLS};

/// Letter of the player that sees the board rotated by 180°.
pub const SECOND_PLAYER: char = 'B';

/// Returns if `player` views the board in the rotated frame.
pub fn is_second_player(player: char) -> bool {
    player.eq_ignore_ascii_case(&SECOND_PLAYER)
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    /// All directions in the order they are generated and searched.
    pub fn iter() -> impl Iterator<Item = Direction> {
        [
            Direction::Up,
            Direction::Down,
            Direction::Right,
            Direction::Left,
        ]
        .iter()
        .copied()
    }

    /// The same move seen from the opposite side of the board.
    pub fn rotate(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Right => 'R',
            Direction::Left => 'L',
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Up
    }
}

impl From<u8> for Direction {
    fn from(v: u8) -> Direction {
        match v {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Right,
            3 => Direction::Left,
            _ => panic!("Invalid direction"),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Input of a single move decision.
///
/// `map` holds the 64 cells in row-major order. The player letters mark the
/// current positions, their lowercase variants the trails.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub map: String,
    pub me: char,
    pub opponent: char,
}

impl MoveRequest {
    pub fn new(map: impl Into<String>, me: char, opponent: char) -> MoveRequest {
        MoveRequest {
            map: map.into(),
            me,
            opponent,
        }
    }

    /// Validates the request and returns the normalized board.
    pub fn board(&self) -> Result<Board, InputError> {
        if self.me.eq_ignore_ascii_case(&self.opponent) {
            return Err(InputError::SamePlayer(self.me));
        }

        let cells = self.map.chars().filter(|c| !c.is_whitespace());
        let len = cells.clone().count();
        if len != CELLS {
            return Err(InputError::BoardSize(len));
        }

        for player in [self.me, self.opponent] {
            let count = cells.clone().filter(|&c| c == player).count();
            if count != 1 {
                return Err(InputError::PlayerCount { player, count });
            }
        }

        Ok(Board::normalize(&self.map, self.me, self.opponent))
    }

    /// Translates a direction of the normalized board back into the frame of
    /// the requesting player.
    pub fn relabel(&self, dir: Direction) -> Direction {
        if is_second_player(self.me) {
            dir.rotate()
        } else {
            dir
        }
    }
}

/// Malformed move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    BoardSize(usize),
    PlayerCount { player: char, count: usize },
    SamePlayer(char),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::BoardSize(len) => {
                write!(f, "expected {} cells but the map has {}", CELLS, len)
            }
            InputError::PlayerCount { player, count } => {
                write!(f, "player {:?} occupies {} cells instead of 1", player, count)
            }
            InputError::SamePlayer(player) => {
                write!(f, "both players use the letter {:?}", player)
            }
        }
    }
}

impl std::error::Error for InputError {}
