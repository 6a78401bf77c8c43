//! Top-level pipeline configuration: EWMA half-lives, CUSUM parameters,
//! health thresholds, and the weight matrix.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::weights::WeightMatrix;
use crate::errors::{PipelineError, PipelineResult};
use crate::types::taxonomy::IndexKind;

/// EWMA half-life per index, expressed in periods.
///
/// λ = 1 − 2^(−1/H); the default 14-period half-life gives λ ≈ 0.048.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EwmaConfig {
    pub rpi_half_life: f64,
    pub lsi_half_life: f64,
    pub cpi_half_life: f64,
}

impl Default for EwmaConfig {
    fn default() -> Self {
        Self {
            rpi_half_life: 14.0,
            lsi_half_life: 14.0,
            cpi_half_life: 14.0,
        }
    }
}

impl EwmaConfig {
    pub fn half_life(&self, index: IndexKind) -> f64 {
        match index {
            IndexKind::Rpi => self.rpi_half_life,
            IndexKind::Lsi => self.lsi_half_life,
            IndexKind::Cpi => self.cpi_half_life,
        }
    }
}

/// Two-sided CUSUM parameters for the drift-sensitive index.
///
/// `k` is the reference value (half the shift magnitude to detect, in sigma
/// units), `h` the control limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CusumConfig {
    pub k: f64,
    pub h: f64,
    /// The index the detector tracks. Regulatory signals carry the slow
    /// persistent shifts a single-period z-score misses.
    pub index: IndexKind,
}

impl Default for CusumConfig {
    fn default() -> Self {
        Self {
            k: 0.5,
            h: 4.5,
            index: IndexKind::Rpi,
        }
    }
}

/// Lane health thresholds, both inclusive lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub watch_threshold: i64,
    pub active_threshold: i64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            watch_threshold: 4,
            active_threshold: 8,
        }
    }
}

/// Everything the period pipeline needs, constructed once and passed down.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub weights: WeightMatrix,
    pub ewma: EwmaConfig,
    pub cusum: CusumConfig,
    pub health: HealthConfig,
}

impl PipelineConfig {
    /// Parse from a TOML string. Missing sections fall back to defaults.
    pub fn from_toml_str(s: &str) -> PipelineResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Fatal configuration checks. Run before any period computation.
    pub fn validate(&self) -> PipelineResult<()> {
        self.weights.validate()?;

        for index in IndexKind::ALL {
            let h = self.ewma.half_life(index);
            if !(h.is_finite() && h > 0.0) {
                return Err(PipelineError::InvalidHalfLife(h));
            }
        }

        if !(self.cusum.k.is_finite()
            && self.cusum.k > 0.0
            && self.cusum.h.is_finite()
            && self.cusum.h > 0.0)
        {
            return Err(PipelineError::InvalidCusumParams {
                k: self.cusum.k,
                h: self.cusum.h,
            });
        }

        if self.health.watch_threshold >= self.health.active_threshold {
            return Err(PipelineError::InvalidThresholds {
                watch: self.health.watch_threshold,
                active: self.health.active_threshold,
            });
        }

        Ok(())
    }
}
