//! category_state table queries.
//!
//! State rows are keyed by (lane, index, period_end) and never deleted, so
//! re-running a period reads the same prior row the first run did.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use lanewatch_core::{CategoryState, IndexKind, StorageResult};

/// Latest state from a period ending strictly before `before`.
pub fn latest_before(
    conn: &Connection,
    lane_id: i64,
    index: IndexKind,
    before: NaiveDate,
) -> StorageResult<Option<CategoryState>> {
    let mut stmt = conn.prepare_cached(
        "SELECT ewma_mean, ewma_variance, cusum_upper, cusum_lower
         FROM category_state
         WHERE lane_id = ?1 AND index_kind = ?2 AND period_end < ?3
         ORDER BY period_end DESC LIMIT 1",
    )?;
    let row = stmt
        .query_row(params![lane_id, index, before], |row| {
            Ok(CategoryState {
                ewma_mean: row.get(0)?,
                ewma_variance: row.get(1)?,
                cusum_upper: row.get(2)?,
                cusum_lower: row.get(3)?,
            })
        })
        .optional()?;
    Ok(row)
}

/// Upsert one period's state row.
pub fn upsert(
    conn: &Connection,
    lane_id: i64,
    index: IndexKind,
    period_end: NaiveDate,
    state: &CategoryState,
) -> StorageResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO category_state
         (lane_id, index_kind, period_end, ewma_mean, ewma_variance, cusum_upper, cusum_lower)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(lane_id, index_kind, period_end) DO UPDATE SET
             ewma_mean = excluded.ewma_mean,
             ewma_variance = excluded.ewma_variance,
             cusum_upper = excluded.cusum_upper,
             cusum_lower = excluded.cusum_lower",
    )?;
    stmt.execute(params![
        lane_id,
        index,
        period_end,
        state.ewma_mean,
        state.ewma_variance,
        state.cusum_upper,
        state.cusum_lower,
    ])?;
    Ok(())
}
