use rand::{rngs::SmallRng, seq::IteratorRandom, SeedableRng};

use crate::env::{Direction, InputError, MoveRequest};
use crate::game::Walls;

/// Picks a random legal move.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RandomAgent;

impl RandomAgent {
    pub async fn step(&self, request: &MoveRequest) -> Result<Direction, InputError> {
        let board = request.board()?;
        let mut rng = SmallRng::from_entropy();
        let dir = board
            .moves(board.you(), Walls::MOVE)
            .map(|(d, _)| d)
            .choose(&mut rng)
            .unwrap_or(Direction::Up);
        Ok(request.relabel(dir))
    }
}
