//! Configuration module for the review kiosk.
//!
//! This module handles parsing configuration from environment variables.
//! Command-line flags parsed in `main.rs` override the values loaded here.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `REVIEW_PLACE_ID` | No | `PLACE_ID` | Review platform place identifier |
//! | `REVIEW_BRAND` | No | `Pietra Fina` | Brand shown on the splash screen |
//! | `REVIEW_SPLASH` | No | `true` | Set to `false` to skip the splash screen |
//! | `REVIEW_SPLASH_MS` | No | 1800 | Splash duration in milliseconds |
//! | `REVIEW_SUBMIT_DELAY_MS` | No | 1000 | Simulated submission delay in milliseconds |
//! | `REVIEW_OUTPUT` | No | - | JSON Lines file that receives submitted reviews |
//! | `REVIEW_LOG_FILE` | No | - | File that receives log output |
//!
//! # Example
//!
//! ```no_run
//! use review_kiosk::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("Place: {}", config.place_id);
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::form::{WidgetConfig, DEFAULT_PLACE_ID, DEFAULT_SPLASH_MS, DEFAULT_SUBMIT_DELAY_MS};

/// Brand name used when `REVIEW_BRAND` is unset.
pub const DEFAULT_BRAND: &str = "Pietra Fina";

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Configuration for the review kiosk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Review platform place identifier.
    pub place_id: String,

    /// Brand name shown on the splash screen.
    pub brand: String,

    /// Whether the splash screen is shown on start.
    pub splash_enabled: bool,

    /// How long the splash screen stays up.
    pub splash_duration: Duration,

    /// Simulated submission delay.
    pub submit_delay: Duration,

    /// Optional JSON Lines file receiving each submitted review.
    pub output: Option<PathBuf>,

    /// Optional file receiving log output. Logging is disabled when `None`
    /// so log lines never draw over the terminal UI.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            place_id: DEFAULT_PLACE_ID.to_string(),
            brand: DEFAULT_BRAND.to_string(),
            splash_enabled: true,
            splash_duration: Duration::from_millis(DEFAULT_SPLASH_MS),
            submit_delay: Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
            output: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `REVIEW_SPLASH` is set but is not a recognised boolean
    /// - `REVIEW_SPLASH_MS` is set but is not a positive integer
    /// - `REVIEW_SUBMIT_DELAY_MS` is set but is not a non-negative integer
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let place_id = non_empty_var("REVIEW_PLACE_ID").unwrap_or(defaults.place_id);
        let brand = non_empty_var("REVIEW_BRAND").unwrap_or(defaults.brand);

        let splash_enabled = match env::var("REVIEW_SPLASH") {
            Ok(val) => parse_bool("REVIEW_SPLASH", &val)?,
            Err(_) => defaults.splash_enabled,
        };

        let splash_duration = match env::var("REVIEW_SPLASH_MS") {
            Ok(val) => {
                let ms = parse_millis("REVIEW_SPLASH_MS", &val)?;
                if ms == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "REVIEW_SPLASH_MS".to_string(),
                        message: "splash duration must be greater than 0 (use REVIEW_SPLASH=false to disable)"
                            .to_string(),
                    });
                }
                Duration::from_millis(ms)
            }
            Err(_) => defaults.splash_duration,
        };

        let submit_delay = match env::var("REVIEW_SUBMIT_DELAY_MS") {
            Ok(val) => Duration::from_millis(parse_millis("REVIEW_SUBMIT_DELAY_MS", &val)?),
            Err(_) => defaults.submit_delay,
        };

        let output = non_empty_var("REVIEW_OUTPUT").map(PathBuf::from);
        let log_file = non_empty_var("REVIEW_LOG_FILE").map(PathBuf::from);

        Ok(Self {
            place_id,
            brand,
            splash_enabled,
            splash_duration,
            submit_delay,
            output,
            log_file,
        })
    }

    /// Settings for the review component.
    #[must_use]
    pub fn widget_config(&self) -> WidgetConfig {
        WidgetConfig {
            place_id: self.place_id.clone(),
            splash: self.splash_enabled.then_some(self.splash_duration),
            submit_delay: self.submit_delay,
        }
    }
}

/// Reads `key`, treating unset and whitespace-only values alike.
///
/// The value is returned as set; it is not trimmed.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.trim().is_empty())
}

fn parse_bool(key: &str, val: &str) -> Result<bool, ConfigError> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected boolean, got '{other}'"),
        }),
    }
}

fn parse_millis(key: &str, val: &str) -> Result<u64, ConfigError> {
    val.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected milliseconds as integer, got '{val}'"),
        })
}
