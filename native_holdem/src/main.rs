//! Main entry point for the hold'em table.

use native_holdem::{bot::BotController, cli, config, pretty, Game, GameSettings, HandRanker};

use anyhow::Context;
use clap::Parser;
use config::Config;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Parse CLI args, seat the bots and play until the table breaks up.
///
/// Usage:
///   holdem-table [--config PATH] [--hands N] [--seed S]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::TableCli::parse();

    // debug: everything at DEBUG with source locations
    // otherwise: our crates at INFO, everything else at WARN
    let log_filter = if cli.debug {
        "debug".to_string()
    } else {
        "native_holdem=info,holdem_shared=info,warn".to_string()
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(cli.debug)
        .with_thread_ids(cli.debug)
        .with_file(cli.debug)
        .with_line_number(cli.debug)
        .init();

    let config_path: PathBuf = cli.config.clone();

    let mut cfg = Config::load_or_create(&config_path)
        .with_context(|| format!("loading or creating config '{}'", config_path.display()))?;

    // Apply CLI overrides in-memory (non-persistent by default)
    let changed = cli.apply(&mut cfg);
    cfg.validate()
        .with_context(|| format!("invalid table settings in '{}'", config_path.display()))?;

    if changed && cli.persist {
        cfg.save(&config_path)
            .with_context(|| format!("saving updated config '{}'", config_path.display()))?;
    }

    tracing::info!(
        config = %config_path.display(),
        bots = cfg.bots,
        small_blind = cfg.small_blind,
        stack = cfg.starting_stack,
        "starting table"
    );

    let settings = GameSettings::from(&cfg);
    let mut game = Game::new(settings, BotController::from_config(&cfg), HandRanker);
    let summaries = game.run(cfg.max_hands).await.context("table stopped on a broken invariant")?;

    let color = std::io::stdout().is_terminal();
    for summary in &summaries {
        println!("{}", pretty::format_summary(summary));
    }
    println!("{}", pretty::format_table(&game.snapshot(), color));
    tracing::info!(
        hands = summaries.len(),
        released = game.controller().released().len(),
        invalid_actions = game.controller().invalid_actions(),
        "table closed"
    );

    if cli.json {
        let json = serde_json::to_string_pretty(&game.snapshot())
            .context("serializing table snapshot")?;
        println!("{json}");
    }
    Ok(())
}
