//! Actor - console driver for the playout engine
//!
//! Runs in one of two modes:
//! 1. `play`: plays episodes of the chosen game, printing each move
//! 2. `bench`: compares MCTS iteration budgets over many games
//!
//! Aggregate stats are written to `<data_dir>/actor_stats.json` on exit.

use anyhow::Result;
use clap::Parser;
use engine_core::Game;
use engine_games::GameId;
use games_balatro::Balatro;
use games_blackjack::Blackjack;
use games_tictactoe::TicTacToe;
use std::fmt;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

mod actor;
mod config;
mod mcts_policy;
mod policy;
mod stats;

use crate::actor::Actor;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

async fn run_actor<G>(config: Config, game: G) -> Result<()>
where
    G: Game,
    G::State: fmt::Display,
{
    let actor = Arc::new(Actor::new(config, game)?);

    // Setup graceful shutdown
    let shutdown_actor = Arc::clone(&actor);
    let shutdown_handle = tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received, stopping actor...");
                shutdown_actor.shutdown();
            }
            Err(e) => warn!("Failed to listen for ctrl+c: {}", e),
        }
    });

    let result = actor.run().await;
    shutdown_handle.abort();
    result
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let max_episode_description = if config.max_episodes < 0 {
        "unlimited".to_string()
    } else {
        config.max_episodes.to_string()
    };
    info!(
        mode = ?config.mode,
        max_episodes = config.max_episodes,
        "Actor will run {} episodes", max_episode_description
    );

    let game_id = config.game_id()?;
    info!(
        stats_path = %config.stats_path().display(),
        "Starting actor for environment {}", game_id
    );

    let result = match game_id {
        GameId::TicTacToe => run_actor(config, TicTacToe::new()).await,
        GameId::Blackjack => run_actor(config, Blackjack::new()).await,
        GameId::Balatro => run_actor(config, Balatro::new()).await,
    };

    match result {
        Ok(()) => {
            info!("Actor completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Actor failed: {}", e);
            Err(e)
        }
    }
}
