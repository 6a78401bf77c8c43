//! Attribution: decompose one period's aggregate weighted magnitude across
//! the three provenance dimensions, as fractions summing to 1.
//!
//! Source tier and jurisdiction are single-valued per observation; the
//! pathway dimension can carry several tags, so an observation's magnitude
//! is split evenly across its tags before bucketing.

use lanewatch_core::types::observation::PathwayTags;
use lanewatch_core::{AttributionBreakdown, FxHashMap, Jurisdiction, SourceTier};

/// Per-observation input to attribution: the derived score plus the three
/// provenance coordinates.
#[derive(Debug, Clone)]
pub struct AttributionInput {
    pub weighted_score: f64,
    pub source_tier: SourceTier,
    pub pathway_tags: PathwayTags,
    pub jurisdiction: Jurisdiction,
}

/// Compute fraction maps for source tier, pathway, and jurisdiction.
///
/// An empty input set, or one whose scores are all exactly zero, yields
/// three empty maps rather than dividing by zero.
pub fn compute_attribution(inputs: &[AttributionInput]) -> AttributionBreakdown {
    let total_abs: f64 = inputs.iter().map(|e| e.weighted_score.abs()).sum();
    if total_abs == 0.0 {
        return AttributionBreakdown::default();
    }

    let mut by_source: FxHashMap<String, f64> = FxHashMap::default();
    let mut by_pathway: FxHashMap<String, f64> = FxHashMap::default();
    let mut by_jurisdiction: FxHashMap<String, f64> = FxHashMap::default();

    for input in inputs {
        let abs_score = input.weighted_score.abs();

        *by_source
            .entry(input.source_tier.label().to_string())
            .or_insert(0.0) += abs_score;

        if input.pathway_tags.is_empty() {
            // Keep the dimension total intact even for untagged observations.
            *by_pathway.entry("Unspecified".to_string()).or_insert(0.0) += abs_score;
        } else {
            let per_tag = abs_score / input.pathway_tags.len() as f64;
            for tag in &input.pathway_tags {
                *by_pathway.entry(tag.clone()).or_insert(0.0) += per_tag;
            }
        }

        *by_jurisdiction
            .entry(input.jurisdiction.label().to_string())
            .or_insert(0.0) += abs_score;
    }

    normalize(&mut by_source, total_abs);
    normalize(&mut by_pathway, total_abs);
    normalize(&mut by_jurisdiction, total_abs);

    AttributionBreakdown {
        by_source_tier: by_source,
        by_pathway,
        by_jurisdiction,
    }
}

fn normalize(buckets: &mut FxHashMap<String, f64>, total_abs: f64) {
    for value in buckets.values_mut() {
        *value /= total_abs;
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    fn input(
        weighted_score: f64,
        source_tier: SourceTier,
        tags: &[&str],
        jurisdiction: Jurisdiction,
    ) -> AttributionInput {
        AttributionInput {
            weighted_score,
            source_tier,
            pathway_tags: tags.iter().map(|t| t.to_string()).collect(),
            jurisdiction,
        }
    }

    fn sums_to_one(map: &FxHashMap<String, f64>) -> bool {
        (map.values().sum::<f64>() - 1.0).abs() < 1e-9
    }

    #[test]
    fn empty_input_yields_empty_maps() {
        let breakdown = compute_attribution(&[]);
        assert!(breakdown.is_empty());
    }

    #[test]
    fn all_zero_scores_yield_empty_maps() {
        let inputs = vec![
            input(0.0, SourceTier::Primary, &["Cost"], Jurisdiction::India),
            input(0.0, SourceTier::Market, &["Time"], Jurisdiction::Uk),
        ];
        assert!(compute_attribution(&inputs).is_empty());
    }

    #[test]
    fn fractions_sum_to_one_per_dimension() {
        let inputs = vec![
            input(-0.4, SourceTier::Primary, &["Compliance"], Jurisdiction::India),
            input(0.8, SourceTier::Logistics, &["Time"], Jurisdiction::Uk),
            input(0.7, SourceTier::Market, &["Cost"], Jurisdiction::Bilateral),
        ];
        let breakdown = compute_attribution(&inputs);
        assert!(sums_to_one(&breakdown.by_source_tier));
        assert!(sums_to_one(&breakdown.by_pathway));
        assert!(sums_to_one(&breakdown.by_jurisdiction));
    }

    #[test]
    fn magnitude_not_sign_drives_attribution() {
        let inputs = vec![
            input(-0.5, SourceTier::Primary, &["Compliance"], Jurisdiction::India),
            input(0.5, SourceTier::Industry, &["Cost"], Jurisdiction::Uk),
        ];
        let breakdown = compute_attribution(&inputs);
        assert!((breakdown.by_source_tier["Primary"] - 0.5).abs() < 1e-9);
        assert!((breakdown.by_source_tier["Industry"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn multi_tag_magnitude_splits_evenly() {
        let inputs = vec![
            input(0.6, SourceTier::Primary, &["Compliance", "Time"], Jurisdiction::India),
            input(0.6, SourceTier::Primary, &["Cost"], Jurisdiction::India),
        ];
        let breakdown = compute_attribution(&inputs);
        assert!((breakdown.by_pathway["Compliance"] - 0.25).abs() < 1e-9);
        assert!((breakdown.by_pathway["Time"] - 0.25).abs() < 1e-9);
        assert!((breakdown.by_pathway["Cost"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn untagged_magnitude_lands_in_unspecified() {
        let inputs = vec![
            input(0.5, SourceTier::Primary, &[], Jurisdiction::India),
            input(0.5, SourceTier::Primary, &["Cost"], Jurisdiction::India),
        ];
        let breakdown = compute_attribution(&inputs);
        assert!((breakdown.by_pathway["Unspecified"] - 0.5).abs() < 1e-9);
        assert!(sums_to_one(&breakdown.by_pathway));
    }

    #[test]
    fn single_source_takes_the_whole_dimension() {
        let inputs = vec![
            input(0.3, SourceTier::Logistics, &["Time"], Jurisdiction::Uk),
            input(0.9, SourceTier::Logistics, &["Availability"], Jurisdiction::Uk),
        ];
        let breakdown = compute_attribution(&inputs);
        assert!((breakdown.by_source_tier["Logistics"] - 1.0).abs() < 1e-9);
        assert!((breakdown.by_jurisdiction["UK"] - 1.0).abs() < 1e-9);
    }
}
