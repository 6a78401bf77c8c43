//! Deterministic keyword fallback classifier.
//!
//! The primary classification pathway is an external collaborator; when it
//! is unavailable, this strategy turns raw scraped signals into classified
//! observations using an explicit rule table. The table is a
//! statically-checkable name → classification mapping, not a runtime
//! registry; the exact keyword list is domain tuning, not contract, and
//! any `SignalClassifier` implementation can replace it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lanewatch_core::types::observation::PathwayTags;
use lanewatch_core::{
    Confidence, EventStatus, IndexKind, Jurisdiction, Observation, SourceTier,
};

/// Raw scraped content before classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSignal {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub published: Option<NaiveDate>,
}

/// Provenance of the source a raw signal came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceContext {
    pub source_name: String,
    pub source_tier: SourceTier,
    pub primary_index: IndexKind,
    pub jurisdiction: Jurisdiction,
}

/// The observation-producing seam. Classifiers are replaceable strategies:
/// an LLM-backed collaborator and this keyword fallback implement the same
/// contract.
pub trait SignalClassifier {
    /// Classify a raw signal, or return `None` when it is irrelevant to
    /// the monitored corridor.
    fn classify(
        &self,
        raw: &RawSignal,
        ctx: &SourceContext,
        observed_at: NaiveDate,
    ) -> Option<Observation>;
}

struct KeywordRule {
    needle: &'static str,
    index: IndexKind,
    delta: i8,
    pathway: &'static str,
}

/// Relief rules come first: "congestion eased" must match before
/// "congestion" does.
const RULES: &[KeywordRule] = &[
    // Pressure easing
    KeywordRule { needle: "congestion eased", index: IndexKind::Lsi, delta: -1, pathway: "Time" },
    KeywordRule { needle: "congestion resolved", index: IndexKind::Lsi, delta: -1, pathway: "Time" },
    KeywordRule { needle: "capacity increase", index: IndexKind::Lsi, delta: -1, pathway: "Availability" },
    KeywordRule { needle: "remedy terminated", index: IndexKind::Rpi, delta: -1, pathway: "Compliance" },
    KeywordRule { needle: "regulatory relief", index: IndexKind::Rpi, delta: -1, pathway: "Compliance" },
    KeywordRule { needle: "tariff cut", index: IndexKind::Cpi, delta: -1, pathway: "Cost" },
    KeywordRule { needle: "tariff reduction", index: IndexKind::Cpi, delta: -1, pathway: "Cost" },
    // Regulatory pressure
    KeywordRule { needle: "anti-dumping", index: IndexKind::Rpi, delta: 1, pathway: "Compliance" },
    KeywordRule { needle: "trade remedy", index: IndexKind::Rpi, delta: 1, pathway: "Compliance" },
    KeywordRule { needle: "new regulation", index: IndexKind::Rpi, delta: 1, pathway: "Compliance" },
    KeywordRule { needle: "certification requirement", index: IndexKind::Rpi, delta: 1, pathway: "Compliance" },
    KeywordRule { needle: "customs guidance", index: IndexKind::Rpi, delta: 1, pathway: "Compliance;Time" },
    KeywordRule { needle: "enforcement", index: IndexKind::Rpi, delta: 1, pathway: "Compliance" },
    // Logistics stress
    KeywordRule { needle: "congestion", index: IndexKind::Lsi, delta: 1, pathway: "Time" },
    KeywordRule { needle: "blank sailing", index: IndexKind::Lsi, delta: 1, pathway: "Time;Availability" },
    KeywordRule { needle: "port closure", index: IndexKind::Lsi, delta: 1, pathway: "Availability" },
    KeywordRule { needle: "dwell time", index: IndexKind::Lsi, delta: 1, pathway: "Time" },
    // Cost pressure
    KeywordRule { needle: "tariff increase", index: IndexKind::Cpi, delta: 1, pathway: "Cost" },
    KeywordRule { needle: "freight rate", index: IndexKind::Cpi, delta: 1, pathway: "Cost" },
    KeywordRule { needle: "depreciation", index: IndexKind::Cpi, delta: 1, pathway: "Cost" },
    KeywordRule { needle: "input cost", index: IndexKind::Cpi, delta: 1, pathway: "Cost" },
];

/// Keyword-table classifier. First matching rule wins.
#[derive(Debug, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    fn status_from_text(text: &str) -> EventStatus {
        if text.contains("in effect")
            || text.contains("enforced")
            || text.contains("immediate effect")
        {
            EventStatus::Enforced
        } else if text.contains("draft") || text.contains("proposal") || text.contains("proposed")
        {
            EventStatus::Draft
        } else {
            EventStatus::Announced
        }
    }

    fn confidence_from_tier(tier: SourceTier) -> Confidence {
        match tier {
            SourceTier::Primary => Confidence::High,
            SourceTier::Logistics | SourceTier::Market => Confidence::Medium,
            SourceTier::Industry => Confidence::Low,
        }
    }
}

/// Routine wording that is relevant to the corridor but moves nothing:
/// classified as a zero-delta observation on the source's primary index.
const ROUTINE_HINTS: &[&str] = &["advisory", "notice", "routine", "reminder"];

impl SignalClassifier for KeywordClassifier {
    fn classify(
        &self,
        raw: &RawSignal,
        ctx: &SourceContext,
        observed_at: NaiveDate,
    ) -> Option<Observation> {
        let text = format!("{} {}", raw.title, raw.body).to_lowercase();

        let (index, delta, pathway_tags) = match RULES.iter().find(|r| text.contains(r.needle)) {
            Some(rule) => (
                rule.index,
                rule.delta,
                rule.pathway.split(';').map(|t| t.to_string()).collect(),
            ),
            None if ROUTINE_HINTS.iter().any(|hint| text.contains(hint)) => {
                (ctx.primary_index, 0, PathwayTags::new())
            }
            None => return None,
        };

        Some(Observation {
            id: 0,
            observed_at: raw.published.unwrap_or(observed_at),
            index,
            delta,
            source_tier: ctx.source_tier,
            status: Self::status_from_text(&text),
            confidence: Self::confidence_from_tier(ctx.source_tier),
            // Keyword matches describe recurring event shapes; novelty
            // detection needs the historical record this strategy lacks.
            has_precedent: true,
            pathway_tags,
            jurisdiction: ctx.jurisdiction,
            description: raw.title.clone(),
        })
    }
}
