/// Represents a single tile of the board
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    Free,
    /// The searching agent
    You,
    /// The adversary
    Opponent,
    /// Trail, terrain or the off-board sentinel
    Blocked,
}

impl Cell {
    /// Maps a raw map character onto a cell, relative to the two player letters.
    pub fn from_raw(c: char, you: char, opponent: char) -> Cell {
        if c == you {
            Cell::You
        } else if c == opponent {
            Cell::Opponent
        } else if c.is_alphabetic() {
            // trails (lowercase player letters) and any other terrain letter
            Cell::Blocked
        } else {
            Cell::Free
        }
    }
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::Free
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Cell::Free => write!(f, "."),
            Cell::You => write!(f, "P"),
            Cell::Opponent => write!(f, "O"),
            Cell::Blocked => write!(f, "x"),
        }
    }
}

/// Set of cells a move may not enter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Walls(u8);

impl Walls {
    /// Regular move legality: trails and both agents block.
    pub const MOVE: Walls = Walls::of(&[Cell::Blocked, Cell::You, Cell::Opponent]);
    /// Connectivity: the opponent's current cell is traversable.
    pub const REACH: Walls = Walls::of(&[Cell::Blocked, Cell::You]);

    pub const fn of(cells: &[Cell]) -> Walls {
        let mut bits = 0;
        let mut i = 0;
        while i < cells.len() {
            bits |= 1 << cells[i] as u8;
            i += 1;
        }
        Walls(bits)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.0 & (1 << cell as u8) != 0
    }
}
