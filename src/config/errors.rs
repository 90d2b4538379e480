use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::EpochSeconds;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file [{path}] could not be read: {source}")]
    Io {
        path: String,
        source: std::io::Error
    },
    #[error("Config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Structuring bounds are empty: lower [{lower}] must be below upper [{upper}]")]
    InvalidStructuringBounds {
        lower: Decimal,
        upper: Decimal
    },
    #[error("Rolling window must be positive, got [{window_seconds}] seconds")]
    InvalidWindow {
        window_seconds: EpochSeconds
    }
}

impl ConfigError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source
        }
    }
}
