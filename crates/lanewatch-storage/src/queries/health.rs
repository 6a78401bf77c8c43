//! lane_health table queries.

use rusqlite::{params, Connection, Row};

use lanewatch_core::{HealthRecord, StorageResult};

/// Upsert one health record, keyed by (lane, period_start).
pub fn upsert(conn: &Connection, lane_id: i64, record: &HealthRecord) -> StorageResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO lane_health
         (lane_id, period_start, period_end, rpi_total, lsi_total, cpi_total,
          combined_total, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(lane_id, period_start) DO UPDATE SET
             period_end = excluded.period_end,
             rpi_total = excluded.rpi_total,
             lsi_total = excluded.lsi_total,
             cpi_total = excluded.cpi_total,
             combined_total = excluded.combined_total,
             status = excluded.status",
    )?;
    stmt.execute(params![
        lane_id,
        record.period_start,
        record.period_end,
        record.rpi_total,
        record.lsi_total,
        record.cpi_total,
        record.combined_total,
        record.status,
    ])?;
    Ok(())
}

/// Most recent health records for a lane, newest first.
pub fn history(conn: &Connection, lane_id: i64, limit: usize) -> StorageResult<Vec<HealthRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT period_start, period_end, rpi_total, lsi_total, cpi_total,
                combined_total, status
         FROM lane_health
         WHERE lane_id = ?1
         ORDER BY period_start DESC LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(params![lane_id, limit as i64], map_health_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn map_health_row(row: &Row<'_>) -> rusqlite::Result<HealthRecord> {
    Ok(HealthRecord {
        period_start: row.get(0)?,
        period_end: row.get(1)?,
        rpi_total: row.get(2)?,
        lsi_total: row.get(3)?,
        cpi_total: row.get(4)?,
        combined_total: row.get(5)?,
        status: row.get(6)?,
    })
}
