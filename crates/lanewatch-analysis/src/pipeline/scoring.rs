//! Weighted signal scoring.
//!
//! `score = delta × source_w × status_w × confidence_w × precedent_w`.
//! Pure function of (observation, weight matrix); identical inputs always
//! produce identical outputs, which is what makes period recomputation
//! idempotent.

use lanewatch_core::{Observation, PipelineResult, WeightMatrix, WeightedScore};

/// Compute the weighted score and its component weights for one
/// observation. Fails if any provenance value has no weight entry.
pub fn compute_weighted_score(
    obs: &Observation,
    weights: &WeightMatrix,
) -> PipelineResult<WeightedScore> {
    let source_w = weights.source_weight(obs.source_tier)?;
    let status_w = weights.status_weight(obs.status)?;
    let confidence_w = weights.confidence_weight(obs.confidence)?;
    let precedent_w = weights.precedent_weight(obs.has_precedent);

    let score = f64::from(obs.delta) * source_w * status_w * confidence_w * precedent_w;

    Ok(WeightedScore {
        score,
        source_w,
        status_w,
        confidence_w,
        precedent_w,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lanewatch_core::{
        Confidence, EventStatus, IndexKind, Jurisdiction, PipelineError, SourceTier,
    };
    use smallvec::smallvec;

    use super::*;

    fn obs(
        delta: i8,
        source_tier: SourceTier,
        status: EventStatus,
        confidence: Confidence,
        has_precedent: bool,
    ) -> Observation {
        Observation {
            id: 0,
            observed_at: NaiveDate::from_ymd_opt(2026, 1, 19).unwrap(),
            index: IndexKind::Rpi,
            delta,
            source_tier,
            status,
            confidence,
            has_precedent,
            pathway_tags: smallvec!["Compliance".to_string()],
            jurisdiction: Jurisdiction::India,
            description: String::new(),
        }
    }

    #[test]
    fn draft_primary_relief_scores_minus_point_four() {
        // -1 × 1.0 × 0.4 × 1.0 × 1.0 = -0.4
        let score = compute_weighted_score(
            &obs(-1, SourceTier::Primary, EventStatus::Draft, Confidence::High, true),
            &WeightMatrix::default(),
        )
        .unwrap();
        assert!((score.score - -0.4).abs() < 1e-12);
        assert_eq!(score.status_w, 0.4);
    }

    #[test]
    fn enforced_logistics_disruption_scores_plus_point_eight() {
        // +1 × 0.8 × 1.0 × 1.0 × 1.0 = +0.8
        let score = compute_weighted_score(
            &obs(1, SourceTier::Logistics, EventStatus::Enforced, Confidence::High, true),
            &WeightMatrix::default(),
        )
        .unwrap();
        assert!((score.score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn novel_to_known_ratio_is_exactly_1_2() {
        let weights = WeightMatrix::default();
        let novel = compute_weighted_score(
            &obs(1, SourceTier::Primary, EventStatus::Announced, Confidence::High, false),
            &weights,
        )
        .unwrap();
        let known = compute_weighted_score(
            &obs(1, SourceTier::Primary, EventStatus::Announced, Confidence::High, true),
            &weights,
        )
        .unwrap();
        assert!(novel.score > known.score);
        assert!((novel.score / known.score - 1.2).abs() < 1e-12);
    }

    #[test]
    fn low_confidence_industry_draft_is_minimal() {
        // 1 × 0.6 × 0.4 × 0.4 × 1.0 = 0.096
        let score = compute_weighted_score(
            &obs(1, SourceTier::Industry, EventStatus::Draft, Confidence::Low, true),
            &WeightMatrix::default(),
        )
        .unwrap();
        assert!((score.score - 0.096).abs() < 1e-12);
    }

    #[test]
    fn zero_delta_zeroes_the_score_but_not_the_weights() {
        let score = compute_weighted_score(
            &obs(0, SourceTier::Market, EventStatus::Announced, Confidence::Medium, true),
            &WeightMatrix::default(),
        )
        .unwrap();
        assert_eq!(score.score, 0.0);
        assert_eq!(score.source_w, 0.7);
    }

    #[test]
    fn missing_weight_entry_propagates_as_unknown_attribute() {
        let mut weights = WeightMatrix::default();
        weights.confidence.remove(&Confidence::Low);
        let err = compute_weighted_score(
            &obs(1, SourceTier::Primary, EventStatus::Enforced, Confidence::Low, true),
            &weights,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::UnknownAttribute { .. }));
    }
}
