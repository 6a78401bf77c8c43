//! `ILaneWriter` — write side of the lane state store.
//!
//! All period outputs are upserts: re-running a period overwrites the
//! existing rows for its keys instead of duplicating them.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::StorageResult;
use crate::types::observation::{Observation, WeightedScore};
use crate::types::state::{CategoryState, HealthRecord, PeriodSnapshot};
use crate::types::taxonomy::IndexKind;

/// Write access to lanes, observations, and persisted pipeline state.
pub trait ILaneWriter: Send + Sync {
    /// Register a lane, returning its id. Registering an existing name
    /// returns the existing id.
    fn register_lane(&self, name: &str, sector: &str) -> StorageResult<i64>;

    /// Insert classified observations for a lane, returning the count
    /// inserted.
    fn insert_observations(&self, lane_id: i64, obs: &[Observation]) -> StorageResult<usize>;

    /// Record derived weighted scores, keyed by observation id. Upsert.
    fn record_weighted_scores(&self, scores: &[(i64, WeightedScore)]) -> StorageResult<()>;

    /// Upsert the baseline/CUSUM state for one (lane, index, period_end).
    /// State rows are never deleted; each period appends (or overwrites)
    /// its own row.
    fn upsert_category_state(
        &self,
        lane_id: i64,
        index: IndexKind,
        period_end: NaiveDate,
        state: &CategoryState,
    ) -> StorageResult<()>;

    /// Upsert one period snapshot, keyed by (lane, index, period_end).
    fn upsert_snapshot(&self, lane_id: i64, snapshot: &PeriodSnapshot) -> StorageResult<()>;

    /// Upsert one health record, keyed by (lane, period_start).
    fn upsert_health(&self, lane_id: i64, record: &HealthRecord) -> StorageResult<()>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: ILaneWriter + ?Sized> ILaneWriter for Arc<T> {
    fn register_lane(&self, name: &str, sector: &str) -> StorageResult<i64> {
        (**self).register_lane(name, sector)
    }
    fn insert_observations(&self, lane_id: i64, obs: &[Observation]) -> StorageResult<usize> {
        (**self).insert_observations(lane_id, obs)
    }
    fn record_weighted_scores(&self, scores: &[(i64, WeightedScore)]) -> StorageResult<()> {
        (**self).record_weighted_scores(scores)
    }
    fn upsert_category_state(
        &self,
        lane_id: i64,
        index: IndexKind,
        period_end: NaiveDate,
        state: &CategoryState,
    ) -> StorageResult<()> {
        (**self).upsert_category_state(lane_id, index, period_end, state)
    }
    fn upsert_snapshot(&self, lane_id: i64, snapshot: &PeriodSnapshot) -> StorageResult<()> {
        (**self).upsert_snapshot(lane_id, snapshot)
    }
    fn upsert_health(&self, lane_id: i64, record: &HealthRecord) -> StorageResult<()> {
        (**self).upsert_health(lane_id, record)
    }
}
