//! Runtime configuration read from the environment

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::LevelFilter;

pub const DEFAULT_SCORES_PATH: &str = "blockfall-scores.json";

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// RNG seed for the piece sequence
    pub seed: u32,
    /// JSON file holding the high-score list
    pub scores_path: PathBuf,
    /// Log file; `None` disables logging
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl GameConfig {
    /// Read `BLOCKFALL_*` variables, falling back to defaults for anything
    /// missing or unparsable
    pub fn from_env() -> Self {
        let seed = env::var("BLOCKFALL_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(time_seed);

        let scores_path = non_empty_var("BLOCKFALL_SCORES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_PATH));

        let log_path = non_empty_var("BLOCKFALL_LOG_PATH").map(PathBuf::from);

        let log_level = non_empty_var("BLOCKFALL_LOG_LEVEL")
            .and_then(|s| parse_level(&s))
            .unwrap_or(LevelFilter::Info);

        Self {
            seed,
            scores_path,
            log_path,
            log_level,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: time_seed(),
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            log_path: None,
            log_level: LevelFilter::Info,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse `error|warn|info|debug|trace|off`, any case
pub fn parse_level(s: &str) -> Option<LevelFilter> {
    s.trim().parse().ok()
}

fn time_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    (nanos ^ (nanos >> 32)) as u32
}
