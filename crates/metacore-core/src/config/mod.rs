//! Configuration and named constants.
//!
//! This module contains:
//! - `Config` - runtime policy loaded from a JSON file
//! - Scoring, input and policy constants

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Scoring constants.
pub mod scoring {
    /// After-cut score credited to notes that have no after-cut rating.
    ///
    /// Whether such notes should instead be left out of the post-swing
    /// average is undecided, so the value is only a default for
    /// `Config::fixed_after_cut_score`.
    pub const FIXED_AFTER_CUT_SCORE: u32 = 30;

    /// Modifier penalty applied when energy reaches zero with no-fail active.
    pub const NO_FAIL_PENALTY: f32 = 0.5;
}

/// Input polling constants.
pub mod input {
    /// Highest button id polled each frame (inclusive).
    pub const BUTTONS_MAX: u8 = 8;
}

/// Policy constants.
pub mod policy {
    /// Requester id used for requests made on behalf of the base game.
    pub const BASE_GAME_ID: &str = "base_game";
}

/// Scheduler constants.
pub mod scheduler {
    /// Maximum continuation passes per tick before deferring to the next tick.
    pub const PENDING_POLL_LIMIT: usize = 64;
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// After-cut score used for notes whose max after-cut score is 0.
    /// `None` leaves those notes out of the post-swing average.
    pub fixed_after_cut_score: Option<u32>,
    /// Negative modifier applied when no-fail prevents a failure.
    pub no_fail_penalty: f32,
    /// Continuation passes per scheduler tick.
    pub pending_poll_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixed_after_cut_score: Some(scoring::FIXED_AFTER_CUT_SCORE),
            no_fail_penalty: scoring::NO_FAIL_PENALTY,
            pending_poll_limit: scheduler::PENDING_POLL_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from JSON text; missing fields take their defaults
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.no_fail_penalty.is_finite() || self.no_fail_penalty < 0.0 {
            return Err(Error::ConfigParse(format!(
                "no_fail_penalty must be a non-negative number, got {}",
                self.no_fail_penalty
            )));
        }
        if self.pending_poll_limit == 0 {
            return Err(Error::ConfigParse(
                "pending_poll_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fixed_after_cut_score, Some(30));
        assert!((config.no_fail_penalty - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.pending_poll_limit, 64);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json_str(r#"{ "fixed_after_cut_score": null }"#).unwrap();
        assert_eq!(config.fixed_after_cut_score, None);
        assert!((config.no_fail_penalty - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_negative_penalty() {
        let result = Config::from_json_str(r#"{ "no_fail_penalty": -1.0 }"#);
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = Config::from_json_str("{ not json");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "fixed_after_cut_score": 20, "no_fail_penalty": 0.25 }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.fixed_after_cut_score, Some(20));
        assert!((config.no_fail_penalty - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/metacore.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
