//! Lane status: recent health roll-ups and index snapshots.

use std::path::Path;

use lanewatch_core::traits::storage::ILaneReader;
use lanewatch_core::IndexKind;

use super::{open_lane, CommandResult};

pub fn status(db: &Path, lane: &str, periods: usize) -> CommandResult {
    let (engine, info) = open_lane(db, lane)?;

    let health = engine.health_history(info.id, periods)?;
    if health.is_empty() {
        println!("{}: no processed periods yet.", info.name);
        return Ok(());
    }

    println!("{} ({})", info.name, info.sector);
    println!();
    println!("  week starting | RPI  LSI  CPI | combined | status");
    for record in &health {
        println!(
            "  {} | {:+4.0} {:+4.0} {:+4.0} | {:+8.0} | {}",
            record.period_start,
            record.rpi_total,
            record.lsi_total,
            record.cpi_total,
            record.combined_total,
            record.status.label(),
        );
    }

    for index in IndexKind::ALL {
        let series = engine.snapshot_series(info.id, index, periods)?;
        if series.is_empty() {
            continue;
        }
        println!();
        println!("  {} snapshots:", index.label());
        for snap in &series {
            let z = snap
                .z_score
                .map(|z| format!("{z:+.2}"))
                .unwrap_or_else(|| "n/a".to_string());
            let cusum = match (snap.cusum_upper, snap.cusum_lower) {
                (Some(upper), Some(lower)) => format!(" | C+ {upper:.2} C- {lower:.2}"),
                _ => String::new(),
            };
            println!(
                "    {} | weighted {:+.3} | z {}{}",
                snap.period_end, snap.weighted_total, z, cusum,
            );
        }
    }

    Ok(())
}
