//! index_snapshots table queries.

use rusqlite::{params, Connection, Row};

use lanewatch_core::{IndexKind, PeriodSnapshot, StorageResult};

/// Upsert one snapshot, keyed by (lane, index, period_end).
pub fn upsert(conn: &Connection, lane_id: i64, snapshot: &PeriodSnapshot) -> StorageResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO index_snapshots
         (lane_id, index_kind, period_end, raw_total, weighted_total,
          z_score, ewma_mean, ewma_sigma, cusum_upper, cusum_lower)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         ON CONFLICT(lane_id, index_kind, period_end) DO UPDATE SET
             raw_total = excluded.raw_total,
             weighted_total = excluded.weighted_total,
             z_score = excluded.z_score,
             ewma_mean = excluded.ewma_mean,
             ewma_sigma = excluded.ewma_sigma,
             cusum_upper = excluded.cusum_upper,
             cusum_lower = excluded.cusum_lower",
    )?;
    stmt.execute(params![
        lane_id,
        snapshot.index,
        snapshot.period_end,
        snapshot.raw_total,
        snapshot.weighted_total,
        snapshot.z_score,
        snapshot.ewma_mean,
        snapshot.ewma_sigma,
        snapshot.cusum_upper,
        snapshot.cusum_lower,
    ])?;
    Ok(())
}

/// Most recent snapshots for one (lane, index), newest first.
pub fn series(
    conn: &Connection,
    lane_id: i64,
    index: IndexKind,
    limit: usize,
) -> StorageResult<Vec<PeriodSnapshot>> {
    let mut stmt = conn.prepare_cached(
        "SELECT index_kind, period_end, raw_total, weighted_total,
                z_score, ewma_mean, ewma_sigma, cusum_upper, cusum_lower
         FROM index_snapshots
         WHERE lane_id = ?1 AND index_kind = ?2
         ORDER BY period_end DESC LIMIT ?3",
    )?;
    let rows = stmt
        .query_map(params![lane_id, index, limit as i64], map_snapshot_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn map_snapshot_row(row: &Row<'_>) -> rusqlite::Result<PeriodSnapshot> {
    Ok(PeriodSnapshot {
        index: row.get(0)?,
        period_end: row.get(1)?,
        raw_total: row.get(2)?,
        weighted_total: row.get(3)?,
        z_score: row.get(4)?,
        ewma_mean: row.get(5)?,
        ewma_sigma: row.get(6)?,
        cusum_upper: row.get(7)?,
        cusum_lower: row.get(8)?,
    })
}
