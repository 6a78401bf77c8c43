//! `LaneStorageEngine` — unified storage engine implementing the
//! `lanewatch-core` storage traits.
//!
//! Wraps `DatabaseManager`; all access goes through `with_conn`. This is
//! the single owner of the connection — no code outside this crate should
//! touch a raw `&Connection` for lane data.

use std::path::Path;

use chrono::NaiveDate;

use lanewatch_core::traits::storage::{ILaneReader, ILaneWriter};
use lanewatch_core::{
    CategoryState, HealthRecord, IndexKind, LaneInfo, Observation, PeriodSnapshot, StorageResult,
    WeightedScore,
};

use crate::connection::DatabaseManager;
use crate::queries;

/// SQLite-backed lane store.
pub struct LaneStorageEngine {
    db: DatabaseManager,
}

impl LaneStorageEngine {
    /// Open a file-backed engine, running migrations and pragmas.
    pub fn open(path: &Path) -> StorageResult<Self> {
        Ok(Self {
            db: DatabaseManager::open(path)?,
        })
    }

    /// Open an in-memory engine (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    /// Database file path (`None` for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    /// All registered lanes.
    pub fn list_lanes(&self) -> StorageResult<Vec<LaneInfo>> {
        self.db.with_conn(queries::lanes::list)
    }

    /// Recorded weighted score for one observation.
    pub fn weighted_score(&self, observation_id: i64) -> StorageResult<Option<WeightedScore>> {
        self.db
            .with_conn(|conn| queries::observations::score_for(conn, observation_id))
    }
}

impl ILaneReader for LaneStorageEngine {
    fn lane_by_name(&self, name: &str) -> StorageResult<Option<LaneInfo>> {
        self.db.with_conn(|conn| queries::lanes::by_name(conn, name))
    }

    fn observations_for_period(
        &self,
        lane_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StorageResult<Vec<Observation>> {
        self.db
            .with_conn(|conn| queries::observations::for_period(conn, lane_id, start, end))
    }

    fn category_state_before(
        &self,
        lane_id: i64,
        index: IndexKind,
        before: NaiveDate,
    ) -> StorageResult<Option<CategoryState>> {
        self.db
            .with_conn(|conn| queries::state::latest_before(conn, lane_id, index, before))
    }

    fn snapshot_series(
        &self,
        lane_id: i64,
        index: IndexKind,
        limit: usize,
    ) -> StorageResult<Vec<PeriodSnapshot>> {
        self.db
            .with_conn(|conn| queries::snapshots::series(conn, lane_id, index, limit))
    }

    fn health_history(&self, lane_id: i64, limit: usize) -> StorageResult<Vec<HealthRecord>> {
        self.db
            .with_conn(|conn| queries::health::history(conn, lane_id, limit))
    }
}

impl ILaneWriter for LaneStorageEngine {
    fn register_lane(&self, name: &str, sector: &str) -> StorageResult<i64> {
        self.db
            .with_conn(|conn| queries::lanes::register(conn, name, sector))
    }

    fn insert_observations(&self, lane_id: i64, obs: &[Observation]) -> StorageResult<usize> {
        self.db
            .with_conn(|conn| queries::observations::insert_batch(conn, lane_id, obs))
    }

    fn record_weighted_scores(&self, scores: &[(i64, WeightedScore)]) -> StorageResult<()> {
        self.db
            .with_conn(|conn| queries::observations::upsert_scores(conn, scores))
    }

    fn upsert_category_state(
        &self,
        lane_id: i64,
        index: IndexKind,
        period_end: NaiveDate,
        state: &CategoryState,
    ) -> StorageResult<()> {
        self.db
            .with_conn(|conn| queries::state::upsert(conn, lane_id, index, period_end, state))
    }

    fn upsert_snapshot(&self, lane_id: i64, snapshot: &PeriodSnapshot) -> StorageResult<()> {
        self.db
            .with_conn(|conn| queries::snapshots::upsert(conn, lane_id, snapshot))
    }

    fn upsert_health(&self, lane_id: i64, record: &HealthRecord) -> StorageResult<()> {
        self.db
            .with_conn(|conn| queries::health::upsert(conn, lane_id, record))
    }
}
