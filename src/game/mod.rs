mod cell;
pub use cell::*;
mod grid;
pub use grid::*;
mod moves;
pub use moves::*;
mod floodfill;
mod game;
pub use game::*;

pub mod search;
