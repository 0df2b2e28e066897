use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::TermInt;

pub const MIN_BOARD_SIZE: TermInt = 6;
pub const MAX_BOARD_SIZE: TermInt = 48;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub board_size: TermInt,
    /// Length of one scheduler beat.
    pub beat: Duration,
    /// Beats per movement window.
    pub difficulty: u64,
    /// Scores above this move twice per window.
    pub fast_after: u32,
    /// Minimum sleep per loop iteration.
    pub frame_sleep: Duration,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            board_size: 16,
            beat: Duration::from_millis(100),
            difficulty: 4,
            fast_after: 8,
            frame_sleep: Duration::from_millis(5),
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `SNAKE_*` variables looked up through `lookup`,
    /// keeping the defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(size) = parse_var(&lookup, "SNAKE_BOARD_SIZE")? {
            config.board_size = size;
        }
        if let Some(ms) = parse_var(&lookup, "SNAKE_BEAT_MS")? {
            config.beat = Duration::from_millis(ms);
        }
        if let Some(difficulty) = parse_var(&lookup, "SNAKE_DIFFICULTY")? {
            config.difficulty = difficulty;
        }
        if let Some(score) = parse_var(&lookup, "SNAKE_FAST_AFTER")? {
            config.fast_after = score;
        }
        if let Some(ms) = parse_var(&lookup, "SNAKE_FRAME_MS")? {
            config.frame_sleep = Duration::from_millis(ms);
        }
        config.seed = parse_var(&lookup, "SNAKE_SEED")?;
        config.log_file = lookup("SNAKE_LOG_FILE").filter(|p| !p.is_empty()).map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            bail!(
                "SNAKE_BOARD_SIZE must be between {} and {}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
            );
        }
        if self.difficulty == 0 {
            bail!("SNAKE_DIFFICULTY must be at least 1");
        }
        if self.beat.is_zero() {
            bail!("SNAKE_BEAT_MS must be at least 1");
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
    }
}
