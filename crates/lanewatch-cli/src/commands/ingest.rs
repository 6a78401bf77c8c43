//! Observation import: classified JSON, or raw signals through the
//! keyword fallback classifier.

use std::path::Path;

use serde::Deserialize;

use lanewatch_analysis::classify::{KeywordClassifier, RawSignal, SignalClassifier, SourceContext};
use lanewatch_core::traits::storage::ILaneWriter;
use lanewatch_core::Observation;

use super::{open_lane, CommandResult};

/// Raw import payload: one source's context plus its scraped signals.
#[derive(Debug, Deserialize)]
struct RawImport {
    context: SourceContext,
    signals: Vec<RawSignal>,
}

pub fn import(db: &Path, lane: &str, file: &Path, raw: bool) -> CommandResult {
    let (engine, info) = open_lane(db, lane)?;
    let payload = std::fs::read_to_string(file)?;

    let observations: Vec<Observation> = if raw {
        let import: RawImport = serde_json::from_str(&payload)?;
        let classifier = KeywordClassifier::new();
        let today = chrono::Local::now().date_naive();
        let classified: Vec<Observation> = import
            .signals
            .iter()
            .filter_map(|signal| classifier.classify(signal, &import.context, today))
            .collect();
        tracing::info!(
            total = import.signals.len(),
            kept = classified.len(),
            source = %import.context.source_name,
            "classified raw signals"
        );
        classified
    } else {
        serde_json::from_str(&payload)?
    };

    let count = engine.insert_observations(info.id, &observations)?;
    println!("Imported {count} observations into {}.", info.name);
    Ok(())
}
