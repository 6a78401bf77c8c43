//! Cross-period persisted state and per-period emitted records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::collections::FxHashMap;
use super::taxonomy::{HealthStatus, IndexKind};

/// A monitored trade lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneInfo {
    pub id: i64,
    pub name: String,
    pub sector: String,
}

/// Adaptive baseline + drift-detector state for one (lane, index) pair.
///
/// Persisted once per period (keyed by period end) and never deleted, so a
/// period re-run reads the same prior state the first run did.
/// `ewma_mean`/`ewma_variance` are `None` until the baseline has seen its
/// first aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryState {
    pub ewma_mean: Option<f64>,
    pub ewma_variance: Option<f64>,
    pub cusum_upper: f64,
    pub cusum_lower: f64,
}

/// Per-(lane, index, period) snapshot, upserted on recomputation.
///
/// `z_score` is `None` when the baseline sigma is not yet positive;
/// the CUSUM fields are `None` for indexes the detector does not track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    pub index: IndexKind,
    pub period_end: NaiveDate,
    pub raw_total: f64,
    pub weighted_total: f64,
    pub z_score: Option<f64>,
    pub ewma_mean: f64,
    pub ewma_sigma: f64,
    pub cusum_upper: Option<f64>,
    pub cusum_lower: Option<f64>,
}

/// Weekly lane health roll-up, upserted by (lane, period_start).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub rpi_total: f64,
    pub lsi_total: f64,
    pub cpi_total: f64,
    pub combined_total: f64,
    pub status: HealthStatus,
}

/// Decomposition of one period's aggregate weighted magnitude across the
/// three provenance dimensions. Each map's fractions sum to 1, or the map
/// is empty when the period carried no weighted magnitude.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributionBreakdown {
    pub by_source_tier: FxHashMap<String, f64>,
    pub by_pathway: FxHashMap<String, f64>,
    pub by_jurisdiction: FxHashMap<String, f64>,
}

impl AttributionBreakdown {
    /// True when no dimension carries any weight.
    pub fn is_empty(&self) -> bool {
        self.by_source_tier.is_empty()
            && self.by_pathway.is_empty()
            && self.by_jurisdiction.is_empty()
    }
}

/// Everything one period run produces, already persisted by the time the
/// orchestrator returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodOutcome {
    pub lane_id: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub snapshots: Vec<PeriodSnapshot>,
    pub states: Vec<(IndexKind, CategoryState)>,
    pub health: HealthRecord,
    pub attribution: AttributionBreakdown,
    /// Whether the drift-sensitive index's CUSUM is past its control limit.
    pub cusum_alarm: bool,
}
