//! Errors raised while validating a configuration or generating a round.

use crate::consts::{MAX_FIELD_CELLS, MIN_BUILDINGS};

/// Errors that can occur when a round cannot be built from a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("field dimensions must be positive and at most {max} cells (got {width}x{height})", max = MAX_FIELD_CELLS)]
    InvalidDimensions { width: i32, height: i32 },

    #[error("building width range {min}..={max} is invalid")]
    InvalidBuildingWidth { min: i32, max: i32 },

    #[error("building height range {min}..={max} does not fit a field {field_height} tall")]
    InvalidBuildingHeight { min: i32, max: i32, field_height: i32 },

    #[error("building palette is empty")]
    EmptyPalette,

    #[error("wind range {min}..={max} is invalid")]
    InvalidWindRange { min: f32, max: f32 },

    #[error("invalid physics constant `{name}`: {value}")]
    InvalidPhysics { name: &'static str, value: f32 },

    #[error("skyline has {count} buildings, need at least {min}", min = MIN_BUILDINGS)]
    TooFewBuildings { count: usize },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
