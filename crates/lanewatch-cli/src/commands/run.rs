//! One weekly pipeline run, mirroring the shape of the period driver:
//! resolve lane → run the processor → print the roll-up.

use std::path::Path;

use chrono::{Datelike, Days, NaiveDate};

use lanewatch_analysis::pipeline::PeriodProcessor;
use lanewatch_core::PipelineConfig;

use super::{open_lane, CommandResult};

pub fn run(db: &Path, config: Option<&Path>, lane: &str, week: Option<NaiveDate>) -> CommandResult {
    let config = match config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    let week_start = week.unwrap_or_else(|| {
        let today = chrono::Local::now().date_naive();
        today - Days::new(u64::from(today.weekday().num_days_from_monday()))
    });
    let week_end = week_start + Days::new(4);

    let (engine, info) = open_lane(db, lane)?;
    println!(
        "Running pipeline for {} | Week: {week_start} to {week_end}",
        info.name
    );

    let processor = PeriodProcessor::new(&config)?;
    let outcome = processor.run(&engine, info.id, week_start, week_end)?;

    println!();
    println!("WEEKLY ROLL-UP:");
    println!("  RPI Total:   {:+.0}", outcome.health.rpi_total);
    println!("  LSI Total:   {:+.0}", outcome.health.lsi_total);
    println!("  CPI Total:   {:+.0}", outcome.health.cpi_total);
    println!("  Combined:    {:+.0}", outcome.health.combined_total);
    println!("  Lane Health: {}", outcome.health.status.label());
    if outcome.cusum_alarm {
        println!("  CUSUM ALARM: persistent shift detected on the drift-sensitive index");
    }

    for snapshot in &outcome.snapshots {
        let z = snapshot
            .z_score
            .map(|z| format!("{z:+.2}"))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  {}: weighted {:+.3} | baseline {:.3} ± {:.3} | z {}",
            snapshot.index.label(),
            snapshot.weighted_total,
            snapshot.ewma_mean,
            snapshot.ewma_sigma,
            z,
        );
    }

    if !outcome.attribution.is_empty() {
        println!();
        println!("ATTRIBUTION:");
        print_dimension("source layer", &outcome.attribution.by_source_tier);
        print_dimension("impact pathway", &outcome.attribution.by_pathway);
        print_dimension("jurisdiction", &outcome.attribution.by_jurisdiction);
    }

    Ok(())
}

/// Zero the CUSUM accumulators on the drift-sensitive index, keeping the
/// EWMA baseline intact. The next period run starts accumulating from a
/// clean chart.
pub fn reset_cusum(db: &Path, config: Option<&Path>, lane: &str) -> CommandResult {
    use lanewatch_core::traits::storage::{ILaneReader, ILaneWriter};

    let config = match config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    let index = config.cusum.index;

    let (engine, info) = open_lane(db, lane)?;
    let series = engine.snapshot_series(info.id, index, 1)?;
    let Some(latest) = series.first() else {
        println!("{}: no processed periods, nothing to reset.", info.name);
        return Ok(());
    };

    let mut state = engine
        .category_state_before(info.id, index, latest.period_end + Days::new(1))?
        .unwrap_or_default();
    state.cusum_upper = 0.0;
    state.cusum_lower = 0.0;
    engine.upsert_category_state(info.id, index, latest.period_end, &state)?;

    tracing::info!(lane = %info.name, index = index.label(), "CUSUM accumulators cleared");
    println!(
        "Cleared {} CUSUM accumulators for {} (as of {}).",
        index.label(),
        info.name,
        latest.period_end,
    );
    Ok(())
}

fn print_dimension(name: &str, buckets: &lanewatch_core::FxHashMap<String, f64>) {
    let mut entries: Vec<(&String, &f64)> = buckets.iter().collect();
    entries.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
    let breakdown = entries
        .iter()
        .map(|(label, fraction)| format!("{label}: {:.0}%", **fraction * 100.0))
        .collect::<Vec<_>>()
        .join(" | ");
    println!("  {name}: {breakdown}");
}
