//! Runtime configuration from environment variables.
//!
//! The harness takes no command-line flags. Every setting has the reference
//! default and can be overridden through the environment or a `.env` file.

use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::bail;
use log::{warn, LevelFilter};

use crate::sweep::SweepConfig;

pub const ENV_EXECUTABLE: &str = "MEMBENCH_EXECUTABLE";
pub const ENV_TRIALS: &str = "MEMBENCH_TRIALS";
pub const ENV_SEED: &str = "MEMBENCH_SEED";
pub const ENV_MIN_MIB: &str = "MEMBENCH_MIN_MIB";
pub const ENV_MAX_MIB: &str = "MEMBENCH_MAX_MIB";
pub const ENV_STRATEGIES: &str = "MEMBENCH_STRATEGIES";
pub const ENV_OUTPUT_DIR: &str = "MEMBENCH_OUTPUT_DIR";
pub const ENV_LOG_LEVEL: &str = "MEMBENCH_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "MEMBENCH_LOG_FILE";

const DEFAULT_EXECUTABLE: &str = "./benchmark";

#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    pub executable: PathBuf,
    pub sweep: SweepConfig,
    pub output_dir: PathBuf,
    pub log_level: LevelFilter,
    pub log_file: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            sweep: SweepConfig::reference(),
            output_dir: PathBuf::from("."),
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl HarnessConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable values fall back to
    /// the default with a warning; an inverted size range is an error.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = HarnessConfig::default();
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let sweep = SweepConfig {
            trials: parsed_or(ENV_TRIALS, get(ENV_TRIALS), defaults.sweep.trials),
            seed: parsed_or(ENV_SEED, get(ENV_SEED), defaults.sweep.seed),
            min_mib: parsed_or(ENV_MIN_MIB, get(ENV_MIN_MIB), defaults.sweep.min_mib),
            max_mib: parsed_or(ENV_MAX_MIB, get(ENV_MAX_MIB), defaults.sweep.max_mib),
            strategies: match get(ENV_STRATEGIES) {
                Some(raw) => parse_strategy_range(&raw).unwrap_or_else(|| {
                    warn!("Ignoring invalid {ENV_STRATEGIES}={raw:?}");
                    defaults.sweep.strategies.clone()
                }),
                None => defaults.sweep.strategies.clone(),
            },
        };

        if sweep.min_mib > sweep.max_mib {
            bail!(
                "{ENV_MIN_MIB} ({}) must not exceed {ENV_MAX_MIB} ({})",
                sweep.min_mib,
                sweep.max_mib
            );
        }
        if sweep.max_bytes().is_none() {
            bail!(
                "{ENV_MAX_MIB} ({}) is too large to express in bytes",
                sweep.max_mib
            );
        }

        let log_level = match get(ENV_LOG_LEVEL) {
            Some(raw) => parse_log_level(&raw).unwrap_or_else(|| {
                warn!("Ignoring invalid {ENV_LOG_LEVEL}={raw:?}");
                defaults.log_level
            }),
            None => defaults.log_level,
        };

        let log_file = get(ENV_LOG_FILE).filter(|value| !value.eq_ignore_ascii_case("none"));

        Ok(Self {
            executable: get(ENV_EXECUTABLE)
                .map(PathBuf::from)
                .unwrap_or(defaults.executable),
            sweep,
            output_dir: get(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            log_level,
            log_file,
        })
    }
}

/// Log level straight from the environment, for setting up the logger before
/// the rest of the configuration is read.
pub fn resolve_log_level() -> LevelFilter {
    env::var(ENV_LOG_LEVEL)
        .ok()
        .as_deref()
        .map(str::trim)
        .and_then(parse_log_level)
        .unwrap_or(LevelFilter::Info)
}

pub fn resolve_log_file() -> Option<String> {
    env::var(ENV_LOG_FILE)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("none"))
}

fn parsed_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {key}={value:?}");
            default
        }),
        None => default,
    }
}

pub fn parse_log_level(value: &str) -> Option<LevelFilter> {
    match value.to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Accepts `lo..=hi`, `lo..hi` (exclusive end) or a single id.
pub fn parse_strategy_range(value: &str) -> Option<RangeInclusive<u32>> {
    let range: RangeInclusive<u32> = if let Some((lo, hi)) = value.split_once("..=") {
        lo.trim().parse().ok()?..=hi.trim().parse().ok()?
    } else if let Some((lo, hi)) = value.split_once("..") {
        let hi: u32 = hi.trim().parse().ok()?;
        lo.trim().parse().ok()?..=hi.checked_sub(1)?
    } else {
        let id = value.trim().parse().ok()?;
        id..=id
    };
    (!range.is_empty()).then_some(range)
}
