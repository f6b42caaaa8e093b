use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{error, info, warn};
use tokio::task::{self, JoinHandle};
use tokio::time;

use crate::env::{Direction, InputError, MoveRequest};
use crate::game::search::{Cancel, DeadlineExceeded, Memo, Search, SearchConfig};
use crate::game::{Board, Walls};

/// Agent running the duel search under a deadline.
///
/// The memo is shared by all clones of this agent and persists across
/// decisions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DuelAgent {
    #[serde(flatten)]
    pub search: SearchConfig,
    /// Deadline of the full depth search.
    pub timeout_ms: u64,
    #[serde(skip)]
    memo: Arc<Memo>,
}

impl Default for DuelAgent {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            timeout_ms: 1000,
            memo: Arc::new(Memo::new()),
        }
    }
}

/// Result of a single move decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub dir: Direction,
    pub score: f64,
    /// Depth of the search that produced this decision.
    pub depth: i32,
}

impl DuelAgent {
    pub fn new(search: SearchConfig, timeout: Duration) -> DuelAgent {
        DuelAgent {
            search,
            timeout_ms: timeout.as_millis() as _,
            memo: Arc::new(Memo::new()),
        }
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    pub async fn step(&self, request: &MoveRequest) -> Result<Direction, InputError> {
        let board = request.board()?;
        let decision = self.decide(&board).await;
        Ok(request.relabel(decision.dir))
    }

    /// Runs the full depth search and falls back to a shallower one if it
    /// does not finish in time.
    ///
    /// The timed out search is cancelled and awaited before the fallback
    /// starts, so both never run concurrently. The fallback is not bounded
    /// by a deadline.
    pub async fn decide(&self, board: &Board) -> Decision {
        let start = Instant::now();
        let depth = self.search.depth;

        let cancel = Cancel::default();
        let mut worker = self.spawn_search(board, depth, cancel.clone());

        let timeout = Duration::from_millis(self.timeout_ms);
        let primary = match time::timeout(timeout, &mut worker).await {
            Ok(Ok(Ok((dir, score)))) => Some(Decision { dir, score, depth }),
            Ok(Ok(Err(DeadlineExceeded))) => None,
            Ok(Err(e)) => {
                error!("search worker failed: {}", e);
                None
            }
            Err(_) => {
                cancel.cancel();
                // wait for the worker to unwind, its result is dropped
                let _ = worker.await;
                warn!(
                    "deadline of {}ms exceeded at depth {}, retrying at {}",
                    self.timeout_ms,
                    depth,
                    self.search.fallback_depth()
                );
                None
            }
        };

        let decision = match primary {
            Some(decision) => decision,
            None => self.fallback(board).await,
        };

        info!(
            ">>> duel {} {:?}ms {:?} ({} memoized)",
            decision.depth,
            start.elapsed().as_millis(),
            decision,
            self.memo.len()
        );
        decision
    }

    async fn fallback(&self, board: &Board) -> Decision {
        let depth = self.search.fallback_depth();
        match self.spawn_search(board, depth, Cancel::default()).await {
            Ok(Ok((dir, score))) => Decision { dir, score, depth },
            Ok(Err(e)) => {
                error!("fallback search failed: {}", e);
                self.first_move(board)
            }
            Err(e) => {
                error!("fallback worker failed: {}", e);
                self.first_move(board)
            }
        }
    }

    fn first_move(&self, board: &Board) -> Decision {
        let dir = board
            .moves(board.you(), Walls::MOVE)
            .map(|(d, _)| d)
            .next()
            .unwrap_or_default();
        Decision {
            dir,
            score: self.search.no_move,
            depth: 0,
        }
    }

    fn spawn_search(
        &self,
        board: &Board,
        depth: i32,
        cancel: Cancel,
    ) -> JoinHandle<Result<(Direction, f64), DeadlineExceeded>> {
        let board = *board;
        let config = self.search.clone();
        let memo = self.memo.clone();
        task::spawn_blocking(move || {
            Search::new(&config, &memo)
                .with_cancel(cancel)
                .evaluate_at(&board, depth)
        })
    }
}
