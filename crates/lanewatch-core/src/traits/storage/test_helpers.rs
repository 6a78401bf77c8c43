//! `InMemoryLaneStore` — in-memory test double for the storage traits.
//!
//! Used by pipeline tests to avoid creating real SQLite databases. Upsert
//! semantics mirror the real engine so idempotency tests are meaningful.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use chrono::NaiveDate;

use super::lane_reader::ILaneReader;
use super::lane_writer::ILaneWriter;
use crate::errors::StorageResult;
use crate::types::observation::{Observation, WeightedScore};
use crate::types::state::{CategoryState, HealthRecord, LaneInfo, PeriodSnapshot};
use crate::types::taxonomy::IndexKind;

#[derive(Default)]
struct Inner {
    lanes: Vec<LaneInfo>,
    next_lane_id: i64,
    observations: HashMap<i64, Vec<Observation>>,
    next_observation_id: i64,
    scores: HashMap<i64, WeightedScore>,
    states: HashMap<(i64, IndexKind), BTreeMap<NaiveDate, CategoryState>>,
    snapshots: HashMap<(i64, IndexKind, NaiveDate), PeriodSnapshot>,
    health: HashMap<(i64, NaiveDate), HealthRecord>,
}

/// In-memory implementation of `ILaneReader` + `ILaneWriter`.
#[derive(Default)]
pub struct InMemoryLaneStore {
    inner: Mutex<Inner>,
}

impl InMemoryLaneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots (across all keys). Test-only accessor.
    pub fn snapshot_count(&self) -> usize {
        self.inner.lock().unwrap().snapshots.len()
    }

    /// Number of stored health records. Test-only accessor.
    pub fn health_count(&self) -> usize {
        self.inner.lock().unwrap().health.len()
    }

    /// Recorded weighted score for an observation id. Test-only accessor.
    pub fn weighted_score(&self, observation_id: i64) -> Option<WeightedScore> {
        self.inner.lock().unwrap().scores.get(&observation_id).copied()
    }
}

impl ILaneReader for InMemoryLaneStore {
    fn lane_by_name(&self, name: &str) -> StorageResult<Option<LaneInfo>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.lanes.iter().find(|l| l.name == name).cloned())
    }

    fn observations_for_period(
        &self,
        lane_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StorageResult<Vec<Observation>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<Observation> = inner
            .observations
            .get(&lane_id)
            .map(|obs| {
                obs.iter()
                    .filter(|o| o.observed_at >= start && o.observed_at <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        rows.sort_by_key(|o| (o.observed_at, o.id));
        Ok(rows)
    }

    fn category_state_before(
        &self,
        lane_id: i64,
        index: IndexKind,
        before: NaiveDate,
    ) -> StorageResult<Option<CategoryState>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.states.get(&(lane_id, index)).and_then(|by_period| {
            by_period
                .range(..before)
                .next_back()
                .map(|(_, state)| *state)
        }))
    }

    fn snapshot_series(
        &self,
        lane_id: i64,
        index: IndexKind,
        limit: usize,
    ) -> StorageResult<Vec<PeriodSnapshot>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<PeriodSnapshot> = inner
            .snapshots
            .iter()
            .filter(|((lane, idx, _), _)| *lane == lane_id && *idx == index)
            .map(|(_, snap)| snap.clone())
            .collect();
        rows.sort_by_key(|s| std::cmp::Reverse(s.period_end));
        rows.truncate(limit);
        Ok(rows)
    }

    fn health_history(&self, lane_id: i64, limit: usize) -> StorageResult<Vec<HealthRecord>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<HealthRecord> = inner
            .health
            .iter()
            .filter(|((lane, _), _)| *lane == lane_id)
            .map(|(_, rec)| rec.clone())
            .collect();
        rows.sort_by_key(|r| std::cmp::Reverse(r.period_start));
        rows.truncate(limit);
        Ok(rows)
    }
}

impl ILaneWriter for InMemoryLaneStore {
    fn register_lane(&self, name: &str, sector: &str) -> StorageResult<i64> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(existing) = inner.lanes.iter().find(|l| l.name == name) {
            return Ok(existing.id);
        }
        inner.next_lane_id += 1;
        let id = inner.next_lane_id;
        inner.lanes.push(LaneInfo {
            id,
            name: name.to_string(),
            sector: sector.to_string(),
        });
        Ok(id)
    }

    fn insert_observations(&self, lane_id: i64, obs: &[Observation]) -> StorageResult<usize> {
        let mut inner = self.inner.lock().unwrap();
        let mut next_id = inner.next_observation_id;
        let rows = inner.observations.entry(lane_id).or_default();
        for o in obs {
            next_id += 1;
            let mut stored = o.clone();
            stored.id = next_id;
            rows.push(stored);
        }
        inner.next_observation_id = next_id;
        Ok(obs.len())
    }

    fn record_weighted_scores(&self, scores: &[(i64, WeightedScore)]) -> StorageResult<()> {
        let mut inner = self.inner.lock().unwrap();
        for (id, score) in scores {
            inner.scores.insert(*id, *score);
        }
        Ok(())
    }

    fn upsert_category_state(
        &self,
        lane_id: i64,
        index: IndexKind,
        period_end: NaiveDate,
        state: &CategoryState,
    ) -> StorageResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .states
            .entry((lane_id, index))
            .or_default()
            .insert(period_end, *state);
        Ok(())
    }

    fn upsert_snapshot(&self, lane_id: i64, snapshot: &PeriodSnapshot) -> StorageResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .snapshots
            .insert((lane_id, snapshot.index, snapshot.period_end), snapshot.clone());
        Ok(())
    }

    fn upsert_health(&self, lane_id: i64, record: &HealthRecord) -> StorageResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .health
            .insert((lane_id, record.period_start), record.clone());
        Ok(())
    }
}
