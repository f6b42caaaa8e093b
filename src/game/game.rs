use std::fmt::{self, Debug};

use owo_colors::OwoColorize;

use super::{step, CELLS, SENTINEL, WIDTH};
use crate::env::{Direction, MoveRequest};

/// Player letters, the first one starts in the top left corner.
pub const PLAYERS: [char; 2] = ['A', 'B'];
/// Raw map character of an unoccupied cell.
pub const FREE: char = '*';

/// The outcome of a simulated game.
/// If the game did not end the outcome is `None`.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Outcome {
    None,
    Match,
    Winner(u8),
}

/// Complete state of a duel between two players on the raw map.
///
/// Heads are stored as the uppercase player letters, trails as their
/// lowercase variants.
#[derive(Clone)]
pub struct Game {
    cells: [char; CELLS],
    /// Current positions, `SENTINEL` once eliminated.
    heads: [usize; 2],
    pub turn: usize,
}

impl Game {
    /// New game with both players in opposite corners.
    pub fn new() -> Game {
        let mut game = Game {
            cells: [FREE; CELLS],
            heads: [0, CELLS - 1],
            turn: 0,
        };
        for (i, &p) in game.heads.iter().enumerate() {
            game.cells[p] = PLAYERS[i];
        }
        game
    }

    /// Loads a game from a raw map, e.g. `A**...**B`.
    pub fn from_map(map: &str) -> Option<Game> {
        let raw: Vec<char> = map.chars().filter(|c| !c.is_whitespace()).collect();
        if raw.len() != CELLS {
            return None;
        }

        let mut cells = [FREE; CELLS];
        cells.copy_from_slice(&raw);
        let mut heads = [SENTINEL; 2];
        for (i, player) in PLAYERS.iter().enumerate() {
            heads[i] = cells.iter().position(|c| c == player).unwrap_or(SENTINEL);
        }
        Some(Game {
            cells,
            heads,
            turn: 0,
        })
    }

    /// The raw map in row-major order.
    pub fn map(&self) -> String {
        self.cells.iter().collect()
    }

    /// Move request of the given player.
    pub fn request(&self, player: usize) -> MoveRequest {
        MoveRequest::new(self.map(), PLAYERS[player], PLAYERS[1 - player])
    }

    pub fn is_alive(&self, player: usize) -> bool {
        self.heads[player] < CELLS
    }

    /// Returns if the game has ended and which player is the winner or if
    /// the game was a match.
    pub fn outcome(&self) -> Outcome {
        match (self.is_alive(0), self.is_alive(1)) {
            (true, true) => Outcome::None,
            (true, false) => Outcome::Winner(0),
            (false, true) => Outcome::Winner(1),
            (false, false) => Outcome::Match,
        }
    }

    /// Executes the moves of both players simultaneously.
    ///
    /// A player is eliminated when leaving the board or entering anything
    /// but a free cell. Entering the same cell eliminates both.
    pub fn step(&mut self, moves: [Direction; 2]) {
        let mut targets = [SENTINEL; 2];
        for player in 0..2 {
            if self.is_alive(player) {
                let target = step(self.heads[player], moves[player]);
                if target < CELLS && self.cells[target] == FREE {
                    targets[player] = target;
                }
            }
        }
        if targets[0] == targets[1] {
            targets = [SENTINEL; 2];
        }

        for player in 0..2 {
            let head = self.heads[player];
            if head < CELLS {
                self.cells[head] = PLAYERS[player].to_ascii_lowercase();
            }
            if targets[player] < CELLS {
                self.cells[targets[player]] = PLAYERS[player];
            }
            self.heads[player] = targets[player];
        }
        self.turn += 1;
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Game {{")?;
        writeln!(f, "  turn: {}", self.turn)?;
        for row in self.cells.chunks(WIDTH) {
            write!(f, "  ")?;
            for &c in row {
                match c {
                    FREE => write!(f, "{} ", '.'.bright_black())?,
                    'A' | 'a' => write!(f, "{} ", c.green())?,
                    'B' | 'b' => write!(f, "{} ", c.yellow())?,
                    _ => write!(f, "{} ", c)?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::Cell;
    use Direction::*;

    #[test]
    fn initial_requests() {
        let game = Game::new();
        let map = game.map();
        assert_eq!(map.len(), CELLS);
        assert!(map.starts_with('A'));
        assert!(map.ends_with('B'));

        // both players see themselves in the top left corner
        for player in 0..2 {
            let board = game.request(player).board().unwrap();
            assert_eq!(board.you(), 0);
            assert_eq!(board.opponent(), CELLS - 1);
        }
    }

    #[test]
    fn trails() {
        let mut game = Game::new();
        game.step([Right, Left]);
        game.step([Down, Up]);
        assert_eq!(game.outcome(), Outcome::None);
        assert_eq!(game.turn, 2);

        let map: Vec<char> = game.map().chars().collect();
        assert_eq!(map[0], 'a');
        assert_eq!(map[1], 'a');
        assert_eq!(map[9], 'A');
        assert_eq!(map[63], 'b');
        assert_eq!(map[62], 'b');
        assert_eq!(map[54], 'B');

        let board = game.request(0).board().unwrap();
        assert_eq!(board.you(), 9);
        assert_eq!(board[1], Cell::Blocked);
        // the second player sees the rotated board
        let board = game.request(1).board().unwrap();
        assert_eq!(board.you(), 9);
        assert_eq!(board[0], Cell::Blocked);
    }

    #[test]
    fn leaving_the_board() {
        let mut game = Game::new();
        game.step([Up, Left]);
        assert_eq!(game.outcome(), Outcome::Winner(1));
        assert!(!game.is_alive(0));
        assert_eq!(game.map().chars().next(), Some('a'));
    }

    #[test]
    fn entering_a_trail() {
        let mut game = Game::new();
        game.step([Right, Up]);
        game.step([Left, Up]);
        assert_eq!(game.outcome(), Outcome::Winner(1));
    }

    #[test]
    fn same_target_is_a_match() {
        let mut game = Game::from_map(
            "********\
             *A*B****\
             ********\
             ********\
             ********\
             ********\
             ********\
             ********",
        )
        .unwrap();
        game.step([Right, Left]);
        assert_eq!(game.outcome(), Outcome::Match);
    }

    #[test]
    fn swapping_cells_is_a_match() {
        let mut game = Game::from_map(
            "********\
             *AB*****\
             ********\
             ********\
             ********\
             ********\
             ********\
             ********",
        )
        .unwrap();
        game.step([Right, Left]);
        assert_eq!(game.outcome(), Outcome::Match);
    }

    #[test]
    fn invalid_map() {
        assert!(Game::from_map("A*B").is_none());
    }
}
