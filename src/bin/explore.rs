use anyhow::Context;
use clap::Parser;
use log::info;

use trailblazer::env::MoveRequest;
use trailblazer::game::search::{Memo, Search, SearchConfig};
use trailblazer::game::Game;
use trailblazer::logging;

/// Evaluate the predicted lines of play starting at a position.
///
/// Every visited position is searched at full depth, which fills the memo.
/// The memo can be printed as JSON lines.
#[derive(Parser)]
#[command(name = "trailblazer explore")]
struct Opts {
    /// Search configuration as JSON.
    #[arg(long, default_value = "{}", value_parser = parse_config)]
    config: SearchConfig,
    /// Starting position, defaults to the opening.
    #[arg(value_parser = parse_request)]
    request: Option<MoveRequest>,
    /// Number of own moves to follow.
    #[arg(short, long, default_value_t = 10)]
    lines: usize,
    /// Lines scoring above this are not followed.
    #[arg(short, long, default_value_t = 20.0)]
    threshold: f64,
    /// Print the memo as JSON lines.
    #[arg(long)]
    dump: bool,
}

fn parse_config(s: &str) -> Result<SearchConfig, serde_json::Error> {
    serde_json::from_str(s)
}

fn parse_request(s: &str) -> Result<MoveRequest, serde_json::Error> {
    serde_json::from_str(s)
}

fn main() -> anyhow::Result<()> {
    logging();

    let Opts {
        config,
        request,
        lines,
        threshold,
        dump,
    } = Opts::parse();

    let request = request.unwrap_or_else(|| Game::new().request(0));
    let board = request.board().context("invalid start position")?;

    let memo = Memo::new();
    let search = Search::new(&config, &memo);
    let evaluated = search.explore(&board, lines, threshold, &mut |board, result| {
        info!("{:?} {:?}", board, result);
    })?;
    info!(
        "evaluated {} positions, {} memoized, {} expansions",
        evaluated,
        memo.len(),
        search.expansions()
    );

    if dump {
        for (board, (dir, score)) in memo.entries() {
            let line = serde_json::json!({
                "board": board.to_string(),
                "dir": dir.to_string(),
                "score": score,
            });
            println!("{}", line);
        }
    }
    Ok(())
}
