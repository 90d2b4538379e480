mod errors;

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::EpochSeconds;

pub use errors::ConfigError;

pub const DEFAULT_WINDOW_SECONDS: EpochSeconds = 24 * 60 * 60;
pub const DEFAULT_HIGH_RISK_JURISDICTIONS: [&str; 3] = ["IRN", "AFG", "PRK"];

/// Policy knobs of the enrichment pipeline.
///
/// Every field has a default, so a config file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sender jurisdiction codes flagged as high risk. Matched exactly, case-sensitive.
    pub high_risk_jurisdictions: BTreeSet<String>,
    /// Exclusive lower bound of the structuring band.
    pub structuring_lower: Decimal,
    /// Exclusive upper bound of the structuring band.
    pub structuring_upper: Decimal,
    /// Length of the trailing rolling window.
    pub window_seconds: EpochSeconds
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            high_risk_jurisdictions: DEFAULT_HIGH_RISK_JURISDICTIONS.iter().map(|code| code.to_string()).collect(),
            structuring_lower: Decimal::from(9_000),
            structuring_upper: Decimal::from(10_000),
            window_seconds: DEFAULT_WINDOW_SECONDS
        }
    }
}

impl PipelineConfig {
    /// Loads and validates a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|error| ConfigError::io(path, error))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;

        config.validate()?;

        Ok(config)
    }

    /// # Errors
    /// Returns `ConfigError` if the structuring band is empty or the window is not positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.structuring_lower >= self.structuring_upper {
            return Err(ConfigError::InvalidStructuringBounds {
                lower: self.structuring_lower,
                upper: self.structuring_upper
            })
        }

        if self.window_seconds <= 0 {
            return Err(ConfigError::InvalidWindow { window_seconds: self.window_seconds })
        }

        Ok(())
    }
}
