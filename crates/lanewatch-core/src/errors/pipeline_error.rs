//! Pipeline configuration and scoring errors.
//!
//! Everything here is fatal: the period run aborts before anything is
//! persisted. Insufficient-data and empty-period conditions are modeled as
//! `Option`/zero values, never as errors.

use super::storage_error::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No weight configured for {dimension} value '{value}'")]
    UnknownAttribute {
        dimension: &'static str,
        value: String,
    },

    #[error("EWMA half-life must be a positive finite number of periods, got {0}")]
    InvalidHalfLife(f64),

    #[error("Health thresholds must satisfy watch < active, got watch={watch} active={active}")]
    InvalidThresholds { watch: i64, active: i64 },

    #[error("CUSUM parameters must be positive and finite, got k={k} h={h}")]
    InvalidCusumParams { k: f64, h: f64 },

    #[error("Weight for {dimension} value '{value}' must be in (0, {max}], got {weight}")]
    InvalidWeight {
        dimension: &'static str,
        value: String,
        weight: f64,
        max: f64,
    },

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
