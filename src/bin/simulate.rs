use std::time::Instant;

use anyhow::ensure;
use clap::Parser;
use log::info;
use owo_colors::OwoColorize;

use trailblazer::agents::*;
use trailblazer::env::Direction;
use trailblazer::game::*;
use trailblazer::logging;

/// Simulate games between two agents.
#[derive(Parser)]
#[command(name = "trailblazer simulator")]
struct Opts {
    /// Number of games.
    #[arg(short, long, default_value_t = 1)]
    game_count: usize,
    /// Print every turn.
    #[arg(short, long)]
    verbose: bool,
    /// Agent configurations, the first one plays `A`.
    agents: Vec<Agent>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging();

    let Opts {
        game_count,
        verbose,
        mut agents,
    } = Opts::parse();

    ensure!(agents.len() <= 2, "Only up to 2 agents are supported");
    while agents.len() < 2 {
        agents.push(Agent::default());
    }

    let start = Instant::now();

    let mut results = [0; 3];
    for i in 0..game_count {
        let outcome = play_game(&agents, verbose).await?;
        match outcome {
            Outcome::Winner(p) => results[p as usize] += 1,
            _ => results[2] += 1,
        }
        println!(
            "{}: {} {:?} {}ms",
            "Finish Game".bright_green(),
            i,
            outcome,
            start.elapsed().as_millis()
        );
    }

    println!(
        "Result: A {} / B {} / draw {} of {}",
        results[0], results[1], results[2], game_count
    );
    Ok(())
}

async fn play_game(agents: &[Agent], verbose: bool) -> anyhow::Result<Outcome> {
    let mut game = Game::new();

    if verbose {
        println!("init: {:?}", game);
    }

    loop {
        let mut moves = [Direction::Up; 2];
        for (player, agent) in agents.iter().enumerate() {
            moves[player] = agent.step(&game.request(player)).await?;
        }
        if verbose {
            println!("Moves: {:?}", moves);
        }
        game.step(moves);

        if verbose {
            println!("{:?}", game);
        }

        let outcome = game.outcome();
        if outcome != Outcome::None {
            info!("game: {:?} after {} turns", outcome, game.turn);
            return Ok(outcome);
        }
    }
}
