//! `ILaneReader` — read side of the lane state store.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::StorageResult;
use crate::types::observation::Observation;
use crate::types::state::{CategoryState, HealthRecord, LaneInfo, PeriodSnapshot};
use crate::types::taxonomy::IndexKind;

/// Read-only access to lanes, observations, and persisted pipeline state.
pub trait ILaneReader: Send + Sync {
    /// Look up a lane by its unique name.
    fn lane_by_name(&self, name: &str) -> StorageResult<Option<LaneInfo>>;

    /// All classified observations for a lane in `[start, end]`, ordered by
    /// observation date.
    fn observations_for_period(
        &self,
        lane_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StorageResult<Vec<Observation>>;

    /// The most recent persisted baseline/CUSUM state for one
    /// (lane, index) from a period ending strictly before `before`, or
    /// `None` when no earlier period exists. Keying state rows by period
    /// is what makes re-running a period idempotent: the re-run reads the
    /// same prior state the first run did.
    fn category_state_before(
        &self,
        lane_id: i64,
        index: IndexKind,
        before: NaiveDate,
    ) -> StorageResult<Option<CategoryState>>;

    /// Most recent snapshots for one (lane, index), newest first.
    fn snapshot_series(
        &self,
        lane_id: i64,
        index: IndexKind,
        limit: usize,
    ) -> StorageResult<Vec<PeriodSnapshot>>;

    /// Most recent health records for a lane, newest first.
    fn health_history(&self, lane_id: i64, limit: usize) -> StorageResult<Vec<HealthRecord>>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: ILaneReader + ?Sized> ILaneReader for Arc<T> {
    fn lane_by_name(&self, name: &str) -> StorageResult<Option<LaneInfo>> {
        (**self).lane_by_name(name)
    }
    fn observations_for_period(
        &self,
        lane_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StorageResult<Vec<Observation>> {
        (**self).observations_for_period(lane_id, start, end)
    }
    fn category_state_before(
        &self,
        lane_id: i64,
        index: IndexKind,
        before: NaiveDate,
    ) -> StorageResult<Option<CategoryState>> {
        (**self).category_state_before(lane_id, index, before)
    }
    fn snapshot_series(
        &self,
        lane_id: i64,
        index: IndexKind,
        limit: usize,
    ) -> StorageResult<Vec<PeriodSnapshot>> {
        (**self).snapshot_series(lane_id, index, limit)
    }
    fn health_history(&self, lane_id: i64, limit: usize) -> StorageResult<Vec<HealthRecord>> {
        (**self).health_history(lane_id, limit)
    }
}
