//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_CURRENCY, DEFAULT_PAGE_SIZE, SAVING_INDICATOR_MIN, SEARCH_DEBOUNCE,
};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Runtime configuration for gridkit front ends.
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// Dataset file to open; `None` selects the built-in demo dataset.
    pub dataset_path: Option<String>,
    pub page_size: usize,
    pub currency: String,
    pub search_debounce_ms: u64,
    pub saving_indicator_ms: u64,
    pub enable_pinning: bool,
    pub analytics_token: Option<String>,
    pub analytics_enabled: bool,
    /// Artificial latency applied by the save worker (manual testing aid).
    pub save_latency_ms: u64,
    /// Percentage of saves the worker rejects on purpose (0-100).
    pub save_failure_rate: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            currency: DEFAULT_CURRENCY.to_string(),
            search_debounce_ms: SEARCH_DEBOUNCE.as_millis() as u64,
            saving_indicator_ms: SAVING_INDICATOR_MIN.as_millis() as u64,
            enable_pinning: true,
            analytics_token: None,
            analytics_enabled: false,
            save_latency_ms: 0,
            save_failure_rate: 0,
        }
    }
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    None
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env_flag_or(name, false)
}

fn env_flag_or(name: &str, default: bool) -> bool {
    let Ok(value) = env::var(name) else {
        return default;
    };
    parse_env_flag(&value).unwrap_or_else(|| {
        warn!(var = name, %value, default, "unrecognized flag value; using default");
        default
    })
}

fn env_parsed<T: FromStr>(name: &str) -> Option<T> {
    env::var(name)
        .ok()
        .and_then(|raw| parse_env_value(name, &raw))
}

/// Parses a trimmed env value, warning when a set variable is malformed.
fn parse_env_value<T: FromStr>(name: &str, raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = trimmed, "invalid value; using default");
            None
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl GridConfig {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`GridConfig`] with defaults applied when env vars are missing
    /// or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dataset_path: non_empty_env("GRIDKIT_DATASET").map(expand_tilde),
            page_size: env_parsed::<usize>("GRIDKIT_PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(defaults.page_size),
            currency: non_empty_env("GRIDKIT_CURRENCY")
                .map(|code| code.to_ascii_uppercase())
                .unwrap_or(defaults.currency),
            search_debounce_ms: env_parsed("GRIDKIT_SEARCH_DEBOUNCE_MS")
                .unwrap_or(defaults.search_debounce_ms),
            saving_indicator_ms: env_parsed("GRIDKIT_SAVING_INDICATOR_MS")
                .unwrap_or(defaults.saving_indicator_ms),
            enable_pinning: env_flag_or("GRIDKIT_ENABLE_PINNING", defaults.enable_pinning),
            analytics_token: non_empty_env("GRIDKIT_ANALYTICS_TOKEN"),
            analytics_enabled: env_flag_enabled("GRIDKIT_ANALYTICS_ENABLED"),
            save_latency_ms: env_parsed("GRIDKIT_SAVE_LATENCY_MS")
                .unwrap_or(defaults.save_latency_ms),
            save_failure_rate: env_parsed::<u8>("GRIDKIT_SAVE_FAILURE_RATE")
                .map(|rate| rate.min(100))
                .unwrap_or(defaults.save_failure_rate),
        }
    }

    /// Minimum duration of the "Saving..." indicator.
    pub fn saving_indicator(&self) -> Duration {
        Duration::from_millis(self.saving_indicator_ms)
    }

    /// Debounce window for the global search input.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
        assert_eq!(parse_env_flag("enabled"), None);
    }

    #[test]
    fn defaults_match_documented_timings() {
        let config = GridConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.currency, "USD");
        assert_eq!(config.saving_indicator(), Duration::from_millis(300));
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert!(config.enable_pinning);
        assert!(!config.analytics_enabled);
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        assert_eq!(parse_env_value::<usize>("GRIDKIT_PAGE_SIZE", " 25 "), Some(25));
        assert_eq!(parse_env_value::<usize>("GRIDKIT_PAGE_SIZE", "ten"), None);
        assert_eq!(parse_env_value::<u8>("GRIDKIT_SAVE_FAILURE_RATE", "300"), None);
        assert_eq!(parse_env_value::<u64>("GRIDKIT_SAVE_LATENCY_MS", ""), None);
    }

    #[test]
    fn expand_tilde_leaves_plain_paths_alone() {
        assert_eq!(expand_tilde("/tmp/data.json".to_string()), "/tmp/data.json");
        assert_eq!(expand_tilde("data.json".to_string()), "data.json");
    }
}
