//! Static weight matrix converting provenance attributes into importance
//! multipliers.
//!
//! An attribute value with no entry is a configuration error at lookup
//! time (`UnknownAttribute`), never a silent default.

use serde::{Deserialize, Serialize};

use crate::errors::{PipelineError, PipelineResult};
use crate::types::collections::FxHashMap;
use crate::types::taxonomy::{Confidence, EventStatus, SourceTier};

/// Precedent multipliers: novel observations are weighted up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecedentWeights {
    pub novel: f64,
    pub known: f64,
}

impl Default for PrecedentWeights {
    fn default() -> Self {
        Self {
            novel: 1.2,
            known: 1.0,
        }
    }
}

/// The four independent provenance weight tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightMatrix {
    pub source: FxHashMap<SourceTier, f64>,
    pub status: FxHashMap<EventStatus, f64>,
    pub confidence: FxHashMap<Confidence, f64>,
    pub precedent: PrecedentWeights,
}

impl Default for WeightMatrix {
    fn default() -> Self {
        let mut source = FxHashMap::default();
        source.insert(SourceTier::Primary, 1.0);
        source.insert(SourceTier::Logistics, 0.8);
        source.insert(SourceTier::Market, 0.7);
        source.insert(SourceTier::Industry, 0.6);

        let mut status = FxHashMap::default();
        status.insert(EventStatus::Enforced, 1.0);
        status.insert(EventStatus::Announced, 0.7);
        status.insert(EventStatus::Draft, 0.4);

        let mut confidence = FxHashMap::default();
        confidence.insert(Confidence::High, 1.0);
        confidence.insert(Confidence::Medium, 0.7);
        confidence.insert(Confidence::Low, 0.4);

        Self {
            source,
            status,
            confidence,
            precedent: PrecedentWeights::default(),
        }
    }
}

impl WeightMatrix {
    pub fn source_weight(&self, tier: SourceTier) -> PipelineResult<f64> {
        self.source
            .get(&tier)
            .copied()
            .ok_or_else(|| PipelineError::UnknownAttribute {
                dimension: "source_tier",
                value: tier.label().to_string(),
            })
    }

    pub fn status_weight(&self, status: EventStatus) -> PipelineResult<f64> {
        self.status
            .get(&status)
            .copied()
            .ok_or_else(|| PipelineError::UnknownAttribute {
                dimension: "event_status",
                value: status.label().to_string(),
            })
    }

    pub fn confidence_weight(&self, confidence: Confidence) -> PipelineResult<f64> {
        self.confidence
            .get(&confidence)
            .copied()
            .ok_or_else(|| PipelineError::UnknownAttribute {
                dimension: "confidence",
                value: confidence.label().to_string(),
            })
    }

    pub fn precedent_weight(&self, has_precedent: bool) -> f64 {
        if has_precedent {
            self.precedent.known
        } else {
            self.precedent.novel
        }
    }

    /// Range-check every configured entry. Completeness is enforced at
    /// lookup time, where the offending attribute value is known.
    pub fn validate(&self) -> PipelineResult<()> {
        for (tier, &w) in &self.source {
            check_unit_weight("source_tier", tier.label(), w)?;
        }
        for (status, &w) in &self.status {
            check_unit_weight("event_status", status.label(), w)?;
        }
        for (confidence, &w) in &self.confidence {
            check_unit_weight("confidence", confidence.label(), w)?;
        }
        check_positive_weight("precedent", "novel", self.precedent.novel)?;
        check_positive_weight("precedent", "known", self.precedent.known)?;
        Ok(())
    }
}

fn check_unit_weight(dimension: &'static str, value: &str, weight: f64) -> PipelineResult<()> {
    if !(weight.is_finite() && weight > 0.0 && weight <= 1.0) {
        return Err(PipelineError::InvalidWeight {
            dimension,
            value: value.to_string(),
            weight,
            max: 1.0,
        });
    }
    Ok(())
}

fn check_positive_weight(dimension: &'static str, value: &str, weight: f64) -> PipelineResult<()> {
    if !(weight.is_finite() && weight > 0.0) {
        return Err(PipelineError::InvalidWeight {
            dimension,
            value: value.to_string(),
            weight,
            max: f64::INFINITY,
        });
    }
    Ok(())
}
