use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

use trailblazer::agents::*;
use trailblazer::env::MoveRequest;
use trailblazer::logging;

/// Decide a single move for a request.
#[derive(Parser)]
#[command(name = "trailblazer move")]
struct Opts {
    /// Agent configuration.
    #[arg(long, default_value_t)]
    config: Agent,
    /// JSON move request, e.g. {"map": "A***...**B", "me": "A", "opponent": "B"}.
    #[arg(value_parser = parse_request)]
    request: Option<MoveRequest>,
    /// File containing the JSON move request.
    #[arg(long, conflicts_with = "request")]
    file: Option<PathBuf>,
}

fn parse_request(s: &str) -> Result<MoveRequest, serde_json::Error> {
    serde_json::from_str(s)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging();

    let Opts {
        config,
        request,
        file,
    } = Opts::parse();

    let request = match (request, file) {
        (Some(request), _) => request,
        (None, Some(file)) => {
            let data = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            serde_json::from_str(&data).context("parsing request")?
        }
        (None, None) => bail!("either a request or --file is required"),
    };

    info!("{:?}", request.board()?);

    let dir = config.step(&request).await?;
    println!("{}", dir);
    Ok(())
}
