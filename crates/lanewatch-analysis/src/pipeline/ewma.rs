//! Exponentially weighted moving baseline.
//!
//! Recurrences:
//!   mean_t     = λ·x_t + (1−λ)·mean_{t−1}
//!   variance_t = λ·(x_t − mean_t)² + (1−λ)·variance_{t−1}
//!
//! Half-life relationship: λ = 1 − 2^(−1/H), H in periods. The state is a
//! (mean, variance) pair that loads from and stores to the prior period's
//! `CategoryState`, so advancing one period is O(1) in history length.

use lanewatch_core::{PipelineError, PipelineResult};

/// Convert a half-life in periods to the EWMA decay parameter λ ∈ (0, 1).
pub fn lambda_from_half_life(half_life: f64) -> PipelineResult<f64> {
    if !(half_life.is_finite() && half_life > 0.0) {
        return Err(PipelineError::InvalidHalfLife(half_life));
    }
    Ok(1.0 - 2f64.powf(-1.0 / half_life))
}

/// EWMA mean/variance tracker for a single index time series.
///
/// Uninitialized until the first `update`, which pins the baseline to the
/// first aggregate with zero variance.
#[derive(Debug, Clone, Copy)]
pub struct EwmaBaseline {
    lambda: f64,
    mean: Option<f64>,
    variance: Option<f64>,
}

impl EwmaBaseline {
    pub fn new(lambda: f64) -> Self {
        Self {
            lambda,
            mean: None,
            variance: None,
        }
    }

    /// Resume from persisted state. `None` fields behave like a fresh
    /// baseline.
    pub fn from_state(lambda: f64, mean: Option<f64>, variance: Option<f64>) -> Self {
        Self {
            lambda,
            mean,
            variance,
        }
    }

    /// Current (mean, variance) for persistence.
    pub fn state(&self) -> (Option<f64>, Option<f64>) {
        (self.mean, self.variance)
    }

    /// Advance the baseline with one period aggregate; returns the
    /// post-update `(mean, sigma)`.
    pub fn update(&mut self, x: f64) -> (f64, f64) {
        let mean = match self.mean {
            None => {
                self.mean = Some(x);
                self.variance = Some(0.0);
                return (x, 0.0);
            }
            Some(prev) => self.lambda * x + (1.0 - self.lambda) * prev,
        };
        self.mean = Some(mean);

        let prev_variance = self.variance.unwrap_or(0.0);
        let variance = self.lambda * (x - mean).powi(2) + (1.0 - self.lambda) * prev_variance;
        self.variance = Some(variance);

        (mean, variance.max(0.0).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lambda_for_14_period_half_life() {
        let lambda = lambda_from_half_life(14.0).unwrap();
        assert!((lambda - 0.04832).abs() < 0.001);
    }

    #[test]
    fn non_positive_half_life_is_rejected() {
        assert!(matches!(
            lambda_from_half_life(0.0),
            Err(PipelineError::InvalidHalfLife(_))
        ));
        assert!(lambda_from_half_life(-3.0).is_err());
        assert!(lambda_from_half_life(f64::NAN).is_err());
    }

    #[test]
    fn first_observation_initializes_exactly() {
        let mut ewma = EwmaBaseline::new(0.1);
        let (mean, sigma) = ewma.update(5.0);
        assert_eq!(mean, 5.0);
        assert_eq!(sigma, 0.0);
        assert_eq!(ewma.state(), (Some(5.0), Some(0.0)));
    }

    #[test]
    fn converges_toward_constant_input() {
        let mut ewma = EwmaBaseline::new(0.1);
        ewma.update(0.0);
        let mut mean = 0.0;
        for _ in 0..100 {
            (mean, _) = ewma.update(10.0);
        }
        assert!((mean - 10.0).abs() < 0.1);
    }

    #[test]
    fn sigma_grows_under_alternating_input() {
        let mut ewma = EwmaBaseline::new(0.1);
        ewma.update(5.0);
        let mut sigma = 0.0;
        for i in 0..20 {
            let x = if i % 2 == 0 { 10.0 } else { 0.0 };
            (_, sigma) = ewma.update(x);
        }
        assert!(sigma > 0.0);
    }

    #[test]
    fn resumed_state_continues_the_series() {
        let mut fresh = EwmaBaseline::new(0.2);
        fresh.update(1.0);
        fresh.update(2.0);
        let (mean, variance) = fresh.state();

        let mut resumed = EwmaBaseline::from_state(0.2, mean, variance);
        let mut continued = fresh;
        assert_eq!(resumed.update(3.0), continued.update(3.0));
    }
}
