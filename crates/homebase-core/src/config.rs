//! Recorder configuration
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! username = "username"
//! password = "password"
//! days = 2
//!
//! # Records any program named 'Boardwalk Empire'
//! [[series]]
//! title = "Boardwalk Empire"
//!
//! # Dagsrevyen on nrktv1, Sundays only
//! [[series]]
//! title = "Dagsrevyen"
//! channel = "nrktv1"
//! dow = 0
//! ```
//!
//! `HOMEBASE_USERNAME` and `HOMEBASE_PASSWORD` override the file values.

use std::path::Path;

use serde::Deserialize;

use crate::client::{request_interval, ClientConfig, HOMEBASE_BASE_URL};
use crate::error::{HomebaseError, Result};
use crate::selector::Selector;
use crate::session::Credentials;

pub const USERNAME_ENV: &str = "HOMEBASE_USERNAME";
pub const PASSWORD_ENV: &str = "HOMEBASE_PASSWORD";

fn default_days() -> f64 {
    1.0
}

/// Credentials, horizon and series selectors for a run
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Default horizon in days
    #[serde(default = "default_days")]
    pub days: f64,
    /// Selectors, in order; a program matching any of them is recorded
    #[serde(default)]
    pub series: Vec<Selector>,
    /// Service root, defaults to `https://min.homebase.no`
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub requests_per_second: Option<f64>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load and validate a configuration file, applying environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HomebaseError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config = Self::parse(&content)?;
        config.apply_overrides(
            std::env::var(USERNAME_ENV).ok(),
            std::env::var(PASSWORD_ENV).ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML text without looking at the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = Self::parse(content)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| HomebaseError::Config(e.to_string()))
    }

    /// Replace credentials with non-empty override values
    pub fn apply_overrides(&mut self, username: Option<String>, password: Option<String>) {
        if let Some(username) = username.filter(|u| !u.is_empty()) {
            self.username = username;
        }
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            self.password = password;
        }
    }

    /// Presence checks only; the selectors are not checked against the
    /// channels the service actually has.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(HomebaseError::Config("username is missing".to_string()));
        }
        if self.password.is_empty() {
            return Err(HomebaseError::Config("password is missing".to_string()));
        }
        if !self.days.is_finite() || self.days <= 0.0 {
            return Err(HomebaseError::Config(format!(
                "days must be a positive number, got {}",
                self.days
            )));
        }
        if let Some(rps) = self.requests_per_second {
            request_interval(rps)?;
        }
        for (i, selector) in self.series.iter().enumerate() {
            if let Some(dow) = selector.dow {
                if dow > 6 {
                    return Err(HomebaseError::Config(format!(
                        "series[{}]: dow must be 0 (Sunday) to 6 (Saturday), got {}",
                        i, dow
                    )));
                }
            }
            if selector.is_unconstrained() {
                tracing::warn!("series[{}] has no constraints and matches every program", i);
            }
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    pub fn client_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| HOMEBASE_BASE_URL.to_string()),
            requests_per_second: self.requests_per_second.unwrap_or(defaults.requests_per_second),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }
}
