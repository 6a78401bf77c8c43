//! Classified observation input and its derived weighted score.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::taxonomy::{Confidence, EventStatus, IndexKind, Jurisdiction, SourceTier};

/// Impact pathway tags for one observation, e.g. `["Compliance", "Time"]`.
/// Almost always one or two tags, so they stay inline.
pub type PathwayTags = SmallVec<[String; 2]>;

/// One classified, signed, provenance-tagged input unit for a given index
/// and period. Produced by an external classifier; never mutated by the
/// pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Store-assigned row id; 0 until persisted.
    #[serde(default)]
    pub id: i64,
    pub observed_at: NaiveDate,
    pub index: IndexKind,
    /// Signed unit delta: -1, 0, or +1.
    pub delta: i8,
    pub source_tier: SourceTier,
    pub status: EventStatus,
    pub confidence: Confidence,
    pub has_precedent: bool,
    #[serde(default)]
    pub pathway_tags: PathwayTags,
    pub jurisdiction: Jurisdiction,
    #[serde(default)]
    pub description: String,
}

/// Weighted importance score derived from one observation.
///
/// `score = delta × source_w × status_w × confidence_w × precedent_w`.
/// Purely a function of (observation, weight matrix); recomputed, never
/// read back as an input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedScore {
    pub score: f64,
    pub source_w: f64,
    pub status_w: f64,
    pub confidence_w: f64,
    pub precedent_w: f64,
}
