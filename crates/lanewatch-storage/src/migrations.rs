//! Versioned schema migrations.
//!
//! Each entry runs in order inside a transaction; `schema_version` records
//! the last applied version so reopening an existing database is a no-op.

use rusqlite::Connection;

use lanewatch_core::{StorageError, StorageResult};

const MIGRATIONS: &[(u32, &str)] = &[(1, V1_SCHEMA)];

const V1_SCHEMA: &str = "
CREATE TABLE lanes (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    sector      TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE observations (
    id              INTEGER PRIMARY KEY,
    lane_id         INTEGER NOT NULL REFERENCES lanes(id),
    observed_at     TEXT NOT NULL,
    index_kind      TEXT NOT NULL,
    delta           INTEGER NOT NULL,
    source_tier     TEXT NOT NULL,
    status          TEXT NOT NULL,
    confidence      TEXT NOT NULL,
    has_precedent   INTEGER NOT NULL,
    pathway_tags    TEXT NOT NULL,
    jurisdiction    TEXT NOT NULL,
    description     TEXT NOT NULL DEFAULT '',
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX idx_observations_lane_date ON observations(lane_id, observed_at);

CREATE TABLE weighted_scores (
    observation_id      INTEGER PRIMARY KEY REFERENCES observations(id),
    score               REAL NOT NULL,
    source_weight       REAL NOT NULL,
    status_weight       REAL NOT NULL,
    confidence_weight   REAL NOT NULL,
    precedent_weight    REAL NOT NULL,
    computed_at         TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE category_state (
    lane_id         INTEGER NOT NULL REFERENCES lanes(id),
    index_kind      TEXT NOT NULL,
    period_end      TEXT NOT NULL,
    ewma_mean       REAL,
    ewma_variance   REAL,
    cusum_upper     REAL NOT NULL DEFAULT 0,
    cusum_lower     REAL NOT NULL DEFAULT 0,
    PRIMARY KEY (lane_id, index_kind, period_end)
);

CREATE TABLE index_snapshots (
    lane_id         INTEGER NOT NULL REFERENCES lanes(id),
    index_kind      TEXT NOT NULL,
    period_end      TEXT NOT NULL,
    raw_total       REAL NOT NULL,
    weighted_total  REAL NOT NULL,
    z_score         REAL,
    ewma_mean       REAL NOT NULL,
    ewma_sigma      REAL NOT NULL,
    cusum_upper     REAL,
    cusum_lower     REAL,
    PRIMARY KEY (lane_id, index_kind, period_end)
);

CREATE TABLE lane_health (
    lane_id         INTEGER NOT NULL REFERENCES lanes(id),
    period_start    TEXT NOT NULL,
    period_end      TEXT NOT NULL,
    rpi_total       REAL NOT NULL,
    lsi_total       REAL NOT NULL,
    cpi_total       REAL NOT NULL,
    combined_total  REAL NOT NULL,
    status          TEXT NOT NULL,
    PRIMARY KEY (lane_id, period_start)
);
";

/// Apply all pending migrations.
pub fn apply(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
    )?;

    let current: u32 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |row| {
            row.get(0)
        })?;

    for &(version, sql) in MIGRATIONS {
        if version <= current {
            continue;
        }
        tracing::debug!(version, "applying schema migration");
        conn.execute_batch("BEGIN")?;
        let result = conn
            .execute_batch(sql)
            .and_then(|()| {
                conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
                    .map(|_| ())
            });
        match result {
            Ok(()) => conn.execute_batch("COMMIT")?,
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(StorageError::MigrationFailed {
                    version,
                    message: e.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Latest applied schema version.
pub fn current_version(conn: &Connection) -> StorageResult<u32> {
    Ok(conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?)
}
