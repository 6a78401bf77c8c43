//! Schema migration tests.

use tempfile::TempDir;

use lanewatch_storage::{migrations, DatabaseManager};

#[test]
fn fresh_database_lands_on_the_latest_version() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let version = db.with_conn(migrations::current_version).unwrap();
    assert_eq!(version, 1);
}

#[test]
fn reopening_does_not_reapply_migrations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lanes.db");

    {
        let db = DatabaseManager::open(&path).unwrap();
        assert_eq!(db.with_conn(migrations::current_version).unwrap(), 1);
    }

    // Second open must find the schema already in place.
    let db = DatabaseManager::open(&path).unwrap();
    assert_eq!(db.with_conn(migrations::current_version).unwrap(), 1);
    let rows: i64 = db
        .with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))?)
        })
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn core_tables_exist_after_migration() {
    let db = DatabaseManager::open_in_memory().unwrap();
    for table in [
        "lanes",
        "observations",
        "weighted_scores",
        "category_state",
        "index_snapshots",
        "lane_health",
    ] {
        let count: i64 = db
            .with_conn(|conn| {
                Ok(conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )?)
            })
            .unwrap();
        assert_eq!(count, 1, "missing table {table}");
    }
}
