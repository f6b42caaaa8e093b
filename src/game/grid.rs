use std::fmt;
use std::ops::Index;

use owo_colors::OwoColorize;

use super::Cell;
use crate::env::is_second_player;

pub const WIDTH: usize = 8;
pub const HEIGHT: usize = 8;
/// Number of real cells.
pub const CELLS: usize = WIDTH * HEIGHT;
/// Shared off-board position, always blocked.
pub const SENTINEL: usize = CELLS;

/// The board as seen by the searching agent: 64 cells in row-major order
/// (row 0 at the top) followed by the sentinel.
///
/// The cell sequence is also the transposition key of the search.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELLS + 1],
}

impl Board {
    /// Board without any agent or trail.
    pub fn new() -> Board {
        let mut cells = [Cell::Free; CELLS + 1];
        cells[SENTINEL] = Cell::Blocked;
        Board { cells }
    }

    /// Relabels a raw map so that `you` becomes `Cell::You` and `opponent`
    /// becomes `Cell::Opponent`.
    ///
    /// The second player sees the board rotated by 180°, so its map is read
    /// backwards. Whitespace is ignored, missing cells stay free and surplus
    /// cells are dropped.
    pub fn normalize(map: &str, you: char, opponent: char) -> Board {
        let raw: Vec<char> = map.chars().filter(|c| !c.is_whitespace()).collect();
        let raw = &raw[..raw.len().min(CELLS)];

        let mut board = Board::new();
        let cells = raw.iter().map(|&c| Cell::from_raw(c, you, opponent));
        if is_second_player(you) {
            for (i, cell) in cells.enumerate() {
                board.cells[CELLS - 1 - i] = cell;
            }
        } else {
            for (i, cell) in cells.enumerate() {
                board.cells[i] = cell;
            }
        }
        board
    }

    /// Rotates the real cells by 180°.
    pub fn rotate(&self) -> Board {
        let mut board = *self;
        board.cells[..CELLS].reverse();
        board
    }

    /// Exchanges the roles of both agents.
    pub fn swap_agents(&self) -> Board {
        let mut board = *self;
        for cell in &mut board.cells {
            *cell = match *cell {
                Cell::You => Cell::Opponent,
                Cell::Opponent => Cell::You,
                c => c,
            };
        }
        board
    }

    /// Returns a copy with `cell` at `p`. The sentinel cannot be overwritten.
    #[must_use]
    pub fn mark(&self, p: usize, cell: Cell) -> Board {
        let mut board = *self;
        if p < CELLS {
            board.cells[p] = cell;
        }
        board
    }

    /// Moves `agent` to `to`, leaving a trail on its previous cell.
    #[must_use]
    pub fn moved(&self, agent: Cell, to: usize) -> Board {
        self.mark(self.find(agent), Cell::Blocked).mark(to, agent)
    }

    /// Position of the first cell equal to `cell` or the sentinel.
    pub fn find(&self, cell: Cell) -> usize {
        self.cells[..CELLS]
            .iter()
            .position(|&c| c == cell)
            .unwrap_or(SENTINEL)
    }

    pub fn you(&self) -> usize {
        self.find(Cell::You)
    }

    pub fn opponent(&self) -> usize {
        self.find(Cell::Opponent)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells[..CELLS].iter().filter(|&&c| c == cell).count()
    }

    /// Parses the textual representation used in tests.
    ///
    /// `.` is free, `P`/`0` the searching agent, `O`/`1` the opponent and
    /// everything else is blocked.
    pub fn parse(txt: &str) -> Option<Board> {
        let raw: Vec<Cell> = txt
            .split_whitespace()
            .flat_map(|s| s.chars())
            .map(|c| match c {
                '.' => Cell::Free,
                'P' | '0' => Cell::You,
                'O' | '1' => Cell::Opponent,
                _ => Cell::Blocked,
            })
            .collect();

        if raw.len() != CELLS {
            return None;
        }

        let mut board = Board::new();
        board.cells[..CELLS].copy_from_slice(&raw);
        Some(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Index<usize> for Board {
    type Output = Cell;

    fn index(&self, p: usize) -> &Self::Output {
        &self.cells[p]
    }
}

/// Compact single line form, including the sentinel.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{:?}", cell)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in self.cells[..CELLS].chunks(WIDTH) {
            write!(f, "  ")?;
            for cell in row {
                match cell {
                    Cell::Free => write!(f, "{:?} ", cell.bright_black())?,
                    Cell::You => write!(f, "{:?} ", cell.green())?,
                    Cell::Opponent => write!(f, "{:?} ", cell.yellow())?,
                    Cell::Blocked => write!(f, "{:?} ", cell)?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
