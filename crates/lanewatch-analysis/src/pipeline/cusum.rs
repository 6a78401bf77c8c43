//! Two-sided CUSUM control chart for persistent small shifts.
//!
//! Upper: C⁺_t = max(0, C⁺_{t−1} + z_t − k)
//! Lower: C⁻_t = min(0, C⁻_{t−1} + z_t + k)
//! Alarm when C⁺ > h or |C⁻| > h.
//!
//! The detector never resets itself on alarm: a sustained shift keeps
//! alarming every period until `reset` is called after the alarm has been
//! acted on.

use serde::{Deserialize, Serialize};

/// Accumulator pair for one index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CusumState {
    pub upper: f64,
    pub lower: f64,
}

/// CUSUM detector for a single index time series.
#[derive(Debug, Clone, Copy)]
pub struct CusumDetector {
    k: f64,
    h: f64,
    state: CusumState,
}

impl CusumDetector {
    pub fn new(k: f64, h: f64) -> Self {
        Self {
            k,
            h,
            state: CusumState::default(),
        }
    }

    /// Resume from persisted accumulators.
    pub fn from_state(k: f64, h: f64, upper: f64, lower: f64) -> Self {
        Self {
            k,
            h,
            state: CusumState { upper, lower },
        }
    }

    pub fn state(&self) -> CusumState {
        self.state
    }

    /// Advance with one standardized observation; returns the new state
    /// and whether a control limit is breached.
    pub fn update(&mut self, z_score: f64) -> (CusumState, bool) {
        self.state.upper = (self.state.upper + z_score - self.k).max(0.0);
        self.state.lower = (self.state.lower + z_score + self.k).min(0.0);
        (self.state, self.alarmed())
    }

    /// Whether the current accumulators breach the control limit.
    pub fn alarmed(&self) -> bool {
        self.state.upper > self.h || self.state.lower.abs() > self.h
    }

    /// Clear both accumulators after an alarm has been acted on or on
    /// manual operator intervention.
    pub fn reset(&mut self) {
        self.state = CusumState::default();
    }
}
