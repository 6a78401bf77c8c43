//! Subcommand implementations.

pub mod ingest;
pub mod run;
pub mod status;

use std::error::Error;
use std::path::Path;

use lanewatch_core::traits::storage::ILaneWriter;
use lanewatch_storage::LaneStorageEngine;

pub type CommandResult = Result<(), Box<dyn Error>>;

/// Create (or migrate) the database file.
pub fn init(db: &Path) -> CommandResult {
    let engine = LaneStorageEngine::open(db)?;
    println!("Database ready at {}", engine.path().unwrap_or(db).display());
    Ok(())
}

/// Register the demo UK-India Textiles lane.
pub fn seed(db: &Path) -> CommandResult {
    let engine = LaneStorageEngine::open(db)?;
    let lane_id = engine.register_lane("UK-India", "Textiles")?;
    tracing::info!(lane_id, "seeded demo lane");
    println!("Seeded UK-India Textiles lane (id {lane_id}).");
    Ok(())
}

/// Open the engine and resolve a lane by name.
pub(crate) fn open_lane(
    db: &Path,
    lane: &str,
) -> Result<(LaneStorageEngine, lanewatch_core::LaneInfo), Box<dyn Error>> {
    use lanewatch_core::traits::storage::ILaneReader;

    let engine = LaneStorageEngine::open(db)?;
    match engine.lane_by_name(lane)? {
        Some(info) => Ok((engine, info)),
        None => {
            let available = engine
                .list_lanes()?
                .into_iter()
                .map(|l| l.name)
                .collect::<Vec<_>>()
                .join(", ");
            Err(format!("unknown lane '{lane}'. Available: {available}").into())
        }
    }
}
