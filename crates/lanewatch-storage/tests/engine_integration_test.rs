//! Engine integration tests: trait round-trips against a file-backed
//! database, plus a full period pipeline run through the real store.

use chrono::NaiveDate;
use smallvec::smallvec;
use tempfile::TempDir;

use lanewatch_analysis::pipeline::PeriodProcessor;
use lanewatch_core::traits::storage::{ILaneReader, ILaneWriter};
use lanewatch_core::{
    CategoryState, Confidence, EventStatus, HealthStatus, IndexKind, Jurisdiction, Observation,
    PipelineConfig, SourceTier,
};
use lanewatch_storage::LaneStorageEngine;

fn temp_engine() -> (TempDir, LaneStorageEngine) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("lanes.db");
    let engine = LaneStorageEngine::open(&db_path).unwrap();
    (dir, engine)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn obs(observed_at: NaiveDate, index: IndexKind, delta: i8) -> Observation {
    Observation {
        id: 0,
        observed_at,
        index,
        delta,
        source_tier: SourceTier::Logistics,
        status: EventStatus::Enforced,
        confidence: Confidence::High,
        has_precedent: true,
        pathway_tags: smallvec!["Time".to_string(), "Availability".to_string()],
        jurisdiction: Jurisdiction::Uk,
        description: "Berth congestion advisory".to_string(),
    }
}

#[test]
fn lane_registration_is_idempotent() {
    let (_dir, engine) = temp_engine();
    let first = engine.register_lane("UK-India", "Textiles").unwrap();
    let second = engine.register_lane("UK-India", "Textiles").unwrap();
    assert_eq!(first, second);

    let lane = engine.lane_by_name("UK-India").unwrap().unwrap();
    assert_eq!(lane.id, first);
    assert_eq!(lane.sector, "Textiles");
    assert!(engine.lane_by_name("UK-Vietnam").unwrap().is_none());
}

#[test]
fn observations_round_trip_with_tags_and_enums() {
    let (_dir, engine) = temp_engine();
    let lane_id = engine.register_lane("UK-India", "Textiles").unwrap();

    let monday = date(2026, 2, 16);
    engine
        .insert_observations(lane_id, &[obs(monday, IndexKind::Lsi, 1)])
        .unwrap();

    let rows = engine
        .observations_for_period(lane_id, monday, date(2026, 2, 20))
        .unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert!(row.id > 0);
    assert_eq!(row.index, IndexKind::Lsi);
    assert_eq!(row.delta, 1);
    assert_eq!(row.source_tier, SourceTier::Logistics);
    assert_eq!(row.pathway_tags.as_slice(), ["Time", "Availability"]);
    assert_eq!(row.jurisdiction, Jurisdiction::Uk);

    // Outside the window.
    let rows = engine
        .observations_for_period(lane_id, date(2026, 2, 23), date(2026, 2, 27))
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn category_state_is_versioned_by_period() {
    let (_dir, engine) = temp_engine();
    let lane_id = engine.register_lane("UK-India", "Textiles").unwrap();

    let w1 = date(2026, 1, 23);
    let w2 = date(2026, 1, 30);
    let state_w1 = CategoryState {
        ewma_mean: Some(0.5),
        ewma_variance: Some(0.1),
        cusum_upper: 1.0,
        cusum_lower: 0.0,
    };
    let state_w2 = CategoryState {
        ewma_mean: Some(0.7),
        ewma_variance: Some(0.2),
        cusum_upper: 2.0,
        cusum_lower: -0.5,
    };
    engine
        .upsert_category_state(lane_id, IndexKind::Rpi, w1, &state_w1)
        .unwrap();
    engine
        .upsert_category_state(lane_id, IndexKind::Rpi, w2, &state_w2)
        .unwrap();

    // Nothing before the first period.
    assert!(engine
        .category_state_before(lane_id, IndexKind::Rpi, w1)
        .unwrap()
        .is_none());
    // A run for week 2 sees week 1's state, not its own.
    assert_eq!(
        engine
            .category_state_before(lane_id, IndexKind::Rpi, w2)
            .unwrap(),
        Some(state_w1)
    );
    // A later period sees the latest.
    assert_eq!(
        engine
            .category_state_before(lane_id, IndexKind::Rpi, date(2026, 2, 6))
            .unwrap(),
        Some(state_w2)
    );
    // Other indexes are untouched.
    assert!(engine
        .category_state_before(lane_id, IndexKind::Cpi, date(2026, 2, 6))
        .unwrap()
        .is_none());
}

#[test]
fn full_period_run_persists_through_the_real_store() {
    let (_dir, engine) = temp_engine();
    let lane_id = engine.register_lane("UK-India", "Textiles").unwrap();
    let (start, end) = (date(2026, 1, 19), date(2026, 1, 23));

    let mut events = Vec::new();
    for _ in 0..5 {
        events.push(obs(start, IndexKind::Rpi, 1));
    }
    for _ in 0..2 {
        events.push(obs(start, IndexKind::Lsi, 1));
        events.push(obs(start, IndexKind::Cpi, 1));
    }
    engine.insert_observations(lane_id, &events).unwrap();

    let config = PipelineConfig::default();
    let processor = PeriodProcessor::new(&config).unwrap();
    let outcome = processor.run(&engine, lane_id, start, end).unwrap();
    assert_eq!(outcome.health.status, HealthStatus::Active);

    // Read everything back through the reader side.
    let health = engine.health_history(lane_id, 10).unwrap();
    assert_eq!(health.len(), 1);
    assert_eq!(health[0].combined_total, 9.0);
    assert_eq!(health[0].status, HealthStatus::Active);

    for index in IndexKind::ALL {
        let series = engine.snapshot_series(lane_id, index, 10).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].period_end, end);
    }

    let rows = engine.observations_for_period(lane_id, start, end).unwrap();
    let score = engine.weighted_score(rows[0].id).unwrap().unwrap();
    assert!(score.score > 0.0);
}

#[test]
fn rerunning_a_period_overwrites_instead_of_duplicating() {
    let (_dir, engine) = temp_engine();
    let lane_id = engine.register_lane("UK-India", "Textiles").unwrap();
    let (start, end) = (date(2026, 1, 19), date(2026, 1, 23));
    engine
        .insert_observations(lane_id, &[obs(start, IndexKind::Rpi, 1)])
        .unwrap();

    let config = PipelineConfig::default();
    let processor = PeriodProcessor::new(&config).unwrap();
    let first = processor.run(&engine, lane_id, start, end).unwrap();
    let second = processor.run(&engine, lane_id, start, end).unwrap();

    assert_eq!(first.snapshots, second.snapshots);
    assert_eq!(first.health, second.health);

    let health = engine.health_history(lane_id, 10).unwrap();
    assert_eq!(health.len(), 1);
    let series = engine.snapshot_series(lane_id, IndexKind::Rpi, 10).unwrap();
    assert_eq!(series.len(), 1);
}

#[test]
fn state_chains_across_consecutive_periods() {
    let (_dir, engine) = temp_engine();
    let lane_id = engine.register_lane("UK-India", "Textiles").unwrap();
    let config = PipelineConfig::default();
    let processor = PeriodProcessor::new(&config).unwrap();

    let mut start = date(2026, 1, 5);
    for week in 0..4 {
        let end = start + chrono::Days::new(4);
        let delta = if week % 2 == 0 { 1 } else { -1 };
        engine
            .insert_observations(lane_id, &[obs(start, IndexKind::Rpi, delta)])
            .unwrap();
        processor.run(&engine, lane_id, start, end).unwrap();
        start = start + chrono::Days::new(7);
    }

    let series = engine.snapshot_series(lane_id, IndexKind::Rpi, 10).unwrap();
    assert_eq!(series.len(), 4);
    // Newest first; by the later weeks the alternating aggregates have
    // produced variance, so the deviation is defined.
    assert!(series[0].z_score.is_some());
    assert!(series[0].cusum_upper.is_some());
}

#[test]
fn reopening_a_database_preserves_schema_and_data() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("lanes.db");

    let lane_id = {
        let engine = LaneStorageEngine::open(&db_path).unwrap();
        engine.register_lane("UK-India", "Textiles").unwrap()
    };

    let engine = LaneStorageEngine::open(&db_path).unwrap();
    let lane = engine.lane_by_name("UK-India").unwrap().unwrap();
    assert_eq!(lane.id, lane_id);
}
