//! lanes table queries.

use rusqlite::{params, Connection, OptionalExtension};

use lanewatch_core::{LaneInfo, StorageResult};

/// Insert a lane if its name is new; either way, return its id.
pub fn register(conn: &Connection, name: &str, sector: &str) -> StorageResult<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO lanes (name, sector) VALUES (?1, ?2)
         ON CONFLICT(name) DO UPDATE SET sector = excluded.sector
         RETURNING id",
    )?;
    let id = stmt.query_row(params![name, sector], |row| row.get(0))?;
    Ok(id)
}

/// Look up a lane by name.
pub fn by_name(conn: &Connection, name: &str) -> StorageResult<Option<LaneInfo>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name, sector FROM lanes WHERE name = ?1")?;
    let row = stmt
        .query_row(params![name], |row| {
            Ok(LaneInfo {
                id: row.get(0)?,
                name: row.get(1)?,
                sector: row.get(2)?,
            })
        })
        .optional()?;
    Ok(row)
}

/// List all lanes, oldest first.
pub fn list(conn: &Connection) -> StorageResult<Vec<LaneInfo>> {
    let mut stmt = conn.prepare_cached("SELECT id, name, sector FROM lanes ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(LaneInfo {
                id: row.get(0)?,
                name: row.get(1)?,
                sector: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
