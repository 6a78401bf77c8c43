//! observations + weighted_scores table queries.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use lanewatch_core::types::observation::PathwayTags;
use lanewatch_core::{Observation, StorageResult, WeightedScore};

/// Insert a batch of observations, returning the count inserted.
pub fn insert_batch(
    conn: &Connection,
    lane_id: i64,
    observations: &[Observation],
) -> StorageResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO observations
         (lane_id, observed_at, index_kind, delta, source_tier, status,
          confidence, has_precedent, pathway_tags, jurisdiction, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )?;

    let mut count = 0;
    for obs in observations {
        stmt.execute(params![
            lane_id,
            obs.observed_at,
            obs.index,
            obs.delta,
            obs.source_tier,
            obs.status,
            obs.confidence,
            obs.has_precedent,
            join_tags(&obs.pathway_tags),
            obs.jurisdiction,
            obs.description,
        ])?;
        count += 1;
    }
    Ok(count)
}

/// All observations for a lane within `[start, end]`, ordered by date.
pub fn for_period(
    conn: &Connection,
    lane_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> StorageResult<Vec<Observation>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, observed_at, index_kind, delta, source_tier, status,
                confidence, has_precedent, pathway_tags, jurisdiction, description
         FROM observations
         WHERE lane_id = ?1 AND observed_at >= ?2 AND observed_at <= ?3
         ORDER BY observed_at, id",
    )?;
    let rows = stmt
        .query_map(params![lane_id, start, end], map_observation_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Upsert derived weighted scores keyed by observation id.
pub fn upsert_scores(conn: &Connection, scores: &[(i64, WeightedScore)]) -> StorageResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO weighted_scores
         (observation_id, score, source_weight, status_weight, confidence_weight, precedent_weight)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(observation_id) DO UPDATE SET
             score = excluded.score,
             source_weight = excluded.source_weight,
             status_weight = excluded.status_weight,
             confidence_weight = excluded.confidence_weight,
             precedent_weight = excluded.precedent_weight,
             computed_at = datetime('now')",
    )?;
    for (observation_id, s) in scores {
        stmt.execute(params![
            observation_id,
            s.score,
            s.source_w,
            s.status_w,
            s.confidence_w,
            s.precedent_w,
        ])?;
    }
    Ok(())
}

/// Recorded weighted score for one observation.
pub fn score_for(conn: &Connection, observation_id: i64) -> StorageResult<Option<WeightedScore>> {
    use rusqlite::OptionalExtension;
    let mut stmt = conn.prepare_cached(
        "SELECT score, source_weight, status_weight, confidence_weight, precedent_weight
         FROM weighted_scores WHERE observation_id = ?1",
    )?;
    let row = stmt
        .query_row(params![observation_id], |row| {
            Ok(WeightedScore {
                score: row.get(0)?,
                source_w: row.get(1)?,
                status_w: row.get(2)?,
                confidence_w: row.get(3)?,
                precedent_w: row.get(4)?,
            })
        })
        .optional()?;
    Ok(row)
}

fn map_observation_row(row: &Row<'_>) -> rusqlite::Result<Observation> {
    let tags: String = row.get(8)?;
    Ok(Observation {
        id: row.get(0)?,
        observed_at: row.get(1)?,
        index: row.get(2)?,
        delta: row.get(3)?,
        source_tier: row.get(4)?,
        status: row.get(5)?,
        confidence: row.get(6)?,
        has_precedent: row.get(7)?,
        pathway_tags: split_tags(&tags),
        jurisdiction: row.get(9)?,
        description: row.get(10)?,
    })
}

/// Tags are stored as a semicolon-joined list, e.g. "Compliance;Time".
fn join_tags(tags: &PathwayTags) -> String {
    tags.join(";")
}

fn split_tags(raw: &str) -> PathwayTags {
    raw.split(';')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}
