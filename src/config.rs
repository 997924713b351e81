//! Engine configuration
//!
//! Loaded from JSON; every field has a default so an empty object is a
//! valid configuration.

use std::fs;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::cognitive::baseline::DEFAULT_BASELINE_WINDOW;
use crate::cognitive::types::AdaptationMode;
use crate::error::CognitionError;

/// Tunables a host may set without touching classification constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How strongly state-specific tokens are applied
    pub adaptation_mode: AdaptationMode,
    /// Number of past windows averaged into the rolling baseline
    pub baseline_window: usize,
    /// Restrict each evaluation to samples this recent; all samples when unset
    pub window_minutes: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            adaptation_mode: AdaptationMode::default(),
            baseline_window: DEFAULT_BASELINE_WINDOW,
            window_minutes: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate configuration JSON
    pub fn from_json(json: &str) -> Result<Self, CognitionError> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| CognitionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self, CognitionError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), CognitionError> {
        if self.baseline_window == 0 {
            return Err(CognitionError::InvalidConfig(
                "baseline_window must be at least 1".to_string(),
            ));
        }
        if self.window_minutes == Some(0) {
            return Err(CognitionError::InvalidConfig(
                "window_minutes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Evaluation window as a duration, if one is configured
    pub fn window(&self) -> Option<Duration> {
        self.window_minutes
            .map(|minutes| Duration::minutes(i64::from(minutes)))
    }
}
