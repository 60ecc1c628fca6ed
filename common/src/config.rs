//! Configuration parsing – reads a `KEY=VALUE` file (`cabana.conf`).
//!
//! Lines starting with `#` are comments, values may be double-quoted and
//! unknown keys are ignored. A missing file yields the defaults so the
//! dashboard can start on a fresh machine.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::pricing::Rates;
use crate::timeline::LayoutMetrics;

/// Application configuration shared by the web server and its tooling.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // ── storage ──────────────────────────────────────────────────────
    pub db_path: PathBuf,

    // ── dashboard ────────────────────────────────────────────────────
    /// How far ahead (days) the upcoming-arrivals panel looks.
    pub upcoming_window_days: u32,
    /// Browser refresh interval for the reservation snapshot (seconds).
    pub poll_interval_secs: u64,

    // ── timeline geometry (pixels) ───────────────────────────────────
    pub metrics: LayoutMetrics,

    // ── pricing (CLP per night) ──────────────────────────────────────
    pub rates: Rates,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: PathBuf::from("data/reservations.db"),
            upcoming_window_days: 7,
            poll_interval_secs: 5,
            metrics: LayoutMetrics::default(),
            rates: Rates::default(),
        }
    }
}

impl Config {
    /// Default config path.
    pub fn default_path() -> &'static str {
        "/etc/cabana/cabana.conf"
    }

    /// Path from `CABANA_CONFIG`, falling back to [`Config::default_path`].
    pub fn resolve_path() -> PathBuf {
        std::env::var("CABANA_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(Self::default_path()))
    }
}

/// Load the configuration at `path`, or the defaults if it does not exist.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    load(path)
}

/// Parse a `KEY=VALUE` configuration file.
pub fn load(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config: {}", path.display()))?;

    let config = from_str(&text);
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Build a [`Config`] from file contents, defaulting every missing or
/// unparsable key.
pub fn from_str(text: &str) -> Config {
    let map = parse_conf(text);
    let defaults = Config::default();

    let get = |key: &str| -> Option<String> { map.get(key).cloned() };
    let get_u32 = |key: &str, default: u32| -> u32 {
        get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    };
    let get_u64 = |key: &str, default: u64| -> u64 {
        get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    };

    let m = defaults.metrics;
    let r = defaults.rates;

    Config {
        db_path: get("DB_PATH")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path),
        upcoming_window_days: get_u32("UPCOMING_WINDOW_DAYS", defaults.upcoming_window_days),
        poll_interval_secs: get_u64("POLL_INTERVAL_SECS", defaults.poll_interval_secs).max(1),
        metrics: LayoutMetrics {
            header_height: get_u32("WEEK_HEADER_HEIGHT", m.header_height),
            bar_height: get_u32("BAR_HEIGHT", m.bar_height),
            bar_gap: get_u32("BAR_GAP", m.bar_gap),
            min_height: get_u32("MIN_WEEK_HEIGHT", m.min_height),
        },
        rates: Rates {
            adult_low: get_u64("ADULT_RATE_LOW", r.adult_low),
            adult_high: get_u64("ADULT_RATE_HIGH", r.adult_high),
            child: get_u64("CHILD_RATE", r.child),
            deposit_percent: get_u32("DEPOSIT_PERCENT", r.deposit_percent).min(100),
        },
    }
}

/// Parse `KEY=VALUE` lines into a map, stripping optional double-quotes.
fn parse_conf(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            let key = key.trim();
            let val = val.trim().trim_matches('"');
            map.insert(key.to_string(), val.to_string());
        }
    }
    map
}

// ─── tests ───────────────────────────────────────────────────────────────
