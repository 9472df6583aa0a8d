use clap::Parser;
use std::path::PathBuf;

/// Table CLI for holdem-table
#[derive(Parser, Debug, Clone)]
#[command(name = "holdem-table", version, about = "Texas Hold'em table with bot players")]
pub struct TableCli {
    /// Path to config file
    #[arg(long, default_value = "holdem-table.toml")]
    pub config: PathBuf,

    /// Small blind (overrides config)
    #[arg(long)]
    pub small_blind: Option<u32>,

    /// Starting stack for newly seated players (overrides config)
    #[arg(long)]
    pub stack: Option<u32>,

    /// Seed for the sequence of deals (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of bot players (overrides config)
    #[arg(long)]
    pub bots: Option<usize>,

    /// Stop after this many hands (overrides config)
    #[arg(long)]
    pub hands: Option<usize>,

    /// Persist CLI overrides back to the config file
    #[arg(long, default_value_t = false)]
    pub persist: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Print the final table snapshot as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl TableCli {
    /// Apply overrides in memory. Returns whether anything changed.
    pub fn apply(&self, cfg: &mut crate::config::Config) -> bool {
        let before = cfg.clone();
        if let Some(v) = self.small_blind {
            cfg.small_blind = v;
        }
        if let Some(v) = self.stack {
            cfg.starting_stack = v;
        }
        if let Some(v) = self.seed {
            cfg.seed = Some(v);
        }
        if let Some(v) = self.bots {
            cfg.bots = v;
        }
        if let Some(v) = self.hands {
            cfg.max_hands = Some(v);
        }
        *cfg != before
    }
}
