use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{bail, Context, Result};

use crate::game::{GameSettings, MAX_SEATS};

/// Table configuration persisted as TOML.
///
/// Fields:
/// - small_blind: the big blind is always twice this
/// - starting_stack: chips given to every newly seated player
/// - seed: fixes the sequence of deals; absent means entropy
/// - bots: number of bot players waiting for a seat
/// - bot_delay_ms: (min, max) simulated think time per bot decision
/// - action_timeout_ms: longest the table waits for any decision
/// - max_hands: stop after this many hands; absent means until one player is left
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub small_blind: u32,
    pub starting_stack: u32,
    pub seed: Option<u64>,
    pub bots: usize,
    pub bot_delay_ms: (u64, u64),
    pub action_timeout_ms: u64,
    pub max_hands: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            small_blind: 10,
            starting_stack: 500,
            seed: None,
            bots: 4,
            bot_delay_ms: (50, 250),
            action_timeout_ms: 2_000,
            max_hands: None,
        }
    }
}

impl Config {
    /// Load configuration from `path`. If the file does not exist, create it
    /// with reasonable defaults and return the default config.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)
                .with_context(|| format!("reading config file '{}'", path.display()))?;
            let cfg: Config = toml::from_str(&s)
                .with_context(|| format!("parsing TOML config '{}'", path.display()))?;
            Ok(cfg)
        } else {
            let cfg = Config::default();
            cfg.save(path)
                .with_context(|| format!("writing default config to '{}'", path.display()))?;
            Ok(cfg)
        }
    }

    /// Save the current config state back to the provided path (overwrites).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating config directory '{}'", parent.display()))?;
            }
        }
        let toml_text = toml::to_string_pretty(&self)
            .with_context(|| "serializing config to TOML")?;
        fs::write(path, toml_text)
            .with_context(|| format!("writing config to '{}'", path.display()))?;
        Ok(())
    }

    pub fn big_blind(&self) -> u32 {
        self.small_blind.saturating_mul(2)
    }

    /// Reject settings the table cannot play with.
    pub fn validate(&self) -> Result<()> {
        if self.small_blind == 0 {
            bail!("small_blind must be greater than zero");
        }
        if self.small_blind > u32::MAX / 2 {
            bail!("small_blind {} leaves no room for the big blind", self.small_blind);
        }
        // every chip on a full table has to fit a single pot
        if u64::from(self.starting_stack) * MAX_SEATS as u64 > u64::from(u32::MAX) {
            bail!(
                "starting_stack {} is too large for {} seats",
                self.starting_stack,
                MAX_SEATS
            );
        }
        if self.starting_stack < self.big_blind() {
            bail!(
                "starting_stack {} cannot cover the big blind {}",
                self.starting_stack,
                self.big_blind()
            );
        }
        let (lo, hi) = self.bot_delay_ms;
        if lo > hi {
            bail!("bot_delay_ms range ({lo}, {hi}) is inverted");
        }
        Ok(())
    }
}

impl From<&Config> for GameSettings {
    fn from(cfg: &Config) -> Self {
        GameSettings {
            small_blind: cfg.small_blind,
            starting_stack: cfg.starting_stack,
            seed: cfg.seed,
        }
    }
}
