mod duel;
pub use duel::*;
mod explore;
mod longest_path;
pub use longest_path::*;
mod memo;
pub use memo::*;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Tunable parameters of the duel search.
///
/// Only the relative order of the scores matters:
/// `loss < tie = collision < no_move < 0 < win`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Full search depth in plies (one ply per agent move).
    pub depth: i32,
    /// Lookahead of the longest path estimation once the agents are separated.
    pub path_budget: i32,
    /// Weight of each opponent response in the sum over responses.
    pub opponent_weight: f64,
    /// Separated and our estimated space is larger.
    pub win: f64,
    /// Separated with equal space.
    pub tie: f64,
    /// Separated and our estimated space is smaller.
    pub loss: f64,
    /// Both agents enter the same cell.
    pub collision: f64,
    /// Initial score of a node, kept if no move is available.
    pub no_move: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 12,
            path_budget: 20,
            opponent_weight: 0.2,
            win: 100.0,
            tie: -100.0,
            loss: -10000.0,
            collision: -100.0,
            no_move: -1.0,
        }
    }
}

impl SearchConfig {
    /// Depth of the retry after the deadline has been exceeded.
    pub fn fallback_depth(&self) -> i32 {
        self.depth - 2
    }
}

/// The search has been cancelled because its deadline passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineExceeded;

impl fmt::Display for DeadlineExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "search deadline exceeded")
    }
}

impl std::error::Error for DeadlineExceeded {}

/// Cooperative cancellation token, shared between the timer and the search.
#[derive(Debug, Clone, Default)]
pub struct Cancel(Arc<AtomicBool>);

impl Cancel {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Fails if the token has been cancelled.
    pub fn check(&self) -> Result<(), DeadlineExceeded> {
        if self.is_cancelled() {
            Err(DeadlineExceeded)
        } else {
            Ok(())
        }
    }
}
