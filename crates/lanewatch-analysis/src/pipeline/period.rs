//! Period orchestrator — runs one (lane, period) through the full
//! pipeline against a state store.
//!
//! All computation happens before the first write, so a fatal error (an
//! unmapped attribute, a broken config) persists nothing. All writes are
//! upserts keyed on the period, so re-running a period overwrites instead
//! of double-accumulating.

use chrono::NaiveDate;

use lanewatch_core::traits::storage::{ILaneReader, ILaneWriter};
use lanewatch_core::{
    CategoryState, FxHashMap, HealthRecord, IndexKind, PeriodOutcome, PeriodSnapshot,
    PipelineConfig, PipelineResult, WeightedScore,
};

use super::attribution::{compute_attribution, AttributionInput};
use super::cusum::CusumDetector;
use super::ewma::{lambda_from_half_life, EwmaBaseline};
use super::health::compute_lane_health;
use super::scoring::compute_weighted_score;
use super::zscore::compute_zscore;

/// Combined storage capability the orchestrator needs: load prior state,
/// write back period results.
pub trait PeriodStore: ILaneReader + ILaneWriter {}

impl<T: ILaneReader + ILaneWriter + ?Sized> PeriodStore for T {}

/// Orchestrates one processing period for one lane.
pub struct PeriodProcessor<'a> {
    config: &'a PipelineConfig,
}

impl<'a> PeriodProcessor<'a> {
    /// Validates the configuration up front; invalid config never reaches
    /// the per-period path.
    pub fn new(config: &'a PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the pipeline for `[period_start, period_end]` and persist the
    /// results. A period with zero observations still produces (and
    /// persists) a zero snapshot per index and a STABLE health record, so
    /// the series stays continuous.
    pub fn run(
        &self,
        store: &dyn PeriodStore,
        lane_id: i64,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> PipelineResult<PeriodOutcome> {
        let observations = store.observations_for_period(lane_id, period_start, period_end)?;

        // Stage 1: weighted scoring + per-index totals.
        let mut raw_totals: FxHashMap<IndexKind, f64> = FxHashMap::default();
        let mut weighted_totals: FxHashMap<IndexKind, f64> = FxHashMap::default();
        let mut scores: Vec<(i64, WeightedScore)> = Vec::with_capacity(observations.len());
        let mut attribution_inputs: Vec<AttributionInput> = Vec::with_capacity(observations.len());

        for obs in &observations {
            let score = compute_weighted_score(obs, &self.config.weights)?;
            *raw_totals.entry(obs.index).or_insert(0.0) += f64::from(obs.delta);
            *weighted_totals.entry(obs.index).or_insert(0.0) += score.score;
            scores.push((obs.id, score));
            attribution_inputs.push(AttributionInput {
                weighted_score: score.score,
                source_tier: obs.source_tier,
                pathway_tags: obs.pathway_tags.clone(),
                jurisdiction: obs.jurisdiction,
            });
        }

        // Stage 2: advance each index's baseline and detector from the
        // prior period's persisted state.
        let mut snapshots = Vec::with_capacity(IndexKind::ALL.len());
        let mut states = Vec::with_capacity(IndexKind::ALL.len());
        let mut cusum_alarm = false;

        for index in IndexKind::ALL {
            let raw_total = raw_totals.get(&index).copied().unwrap_or(0.0);
            let weighted_total = weighted_totals.get(&index).copied().unwrap_or(0.0);

            let prior = store
                .category_state_before(lane_id, index, period_end)?
                .unwrap_or_default();
            let lambda = lambda_from_half_life(self.config.ewma.half_life(index))?;
            let mut baseline =
                EwmaBaseline::from_state(lambda, prior.ewma_mean, prior.ewma_variance);
            let (mean, sigma) = baseline.update(weighted_total);
            let z_score = compute_zscore(weighted_total, mean, sigma);

            let (ewma_mean, ewma_variance) = baseline.state();
            let mut state = CategoryState {
                ewma_mean,
                ewma_variance,
                ..prior
            };

            let (cusum_upper, cusum_lower) = if index == self.config.cusum.index {
                match z_score {
                    Some(z) => {
                        let mut detector = CusumDetector::from_state(
                            self.config.cusum.k,
                            self.config.cusum.h,
                            prior.cusum_upper,
                            prior.cusum_lower,
                        );
                        let (cusum_state, alarm) = detector.update(z);
                        state.cusum_upper = cusum_state.upper;
                        state.cusum_lower = cusum_state.lower;
                        cusum_alarm = alarm;
                        (Some(cusum_state.upper), Some(cusum_state.lower))
                    }
                    // Undefined deviation: the accumulators stay where they
                    // are and no alarm can fire this period.
                    None => (Some(prior.cusum_upper), Some(prior.cusum_lower)),
                }
            } else {
                (None, None)
            };

            snapshots.push(PeriodSnapshot {
                index,
                period_end,
                raw_total,
                weighted_total,
                z_score,
                ewma_mean: mean,
                ewma_sigma: sigma,
                cusum_upper,
                cusum_lower,
            });
            states.push((index, state));
        }

        // Stage 3: health roll-up over raw totals + attribution.
        let (combined_total, status) = compute_lane_health(
            raw_totals.get(&IndexKind::Rpi).copied().unwrap_or(0.0),
            raw_totals.get(&IndexKind::Lsi).copied().unwrap_or(0.0),
            raw_totals.get(&IndexKind::Cpi).copied().unwrap_or(0.0),
            &self.config.health,
        );
        let health = HealthRecord {
            period_start,
            period_end,
            rpi_total: raw_totals.get(&IndexKind::Rpi).copied().unwrap_or(0.0),
            lsi_total: raw_totals.get(&IndexKind::Lsi).copied().unwrap_or(0.0),
            cpi_total: raw_totals.get(&IndexKind::Cpi).copied().unwrap_or(0.0),
            combined_total,
            status,
        };
        let attribution = compute_attribution(&attribution_inputs);

        tracing::debug!(
            lane_id,
            %period_start,
            %period_end,
            observations = observations.len(),
            combined_total,
            status = status.label(),
            cusum_alarm,
            "period computed"
        );

        // Stage 4: persist. Everything above is already computed, so a
        // storage failure leaves at worst a partially written period that
        // the next (idempotent) re-run repairs.
        store.record_weighted_scores(&scores)?;
        for (index, state) in &states {
            store.upsert_category_state(lane_id, *index, period_end, state)?;
        }
        for snapshot in &snapshots {
            store.upsert_snapshot(lane_id, snapshot)?;
        }
        store.upsert_health(lane_id, &health)?;

        Ok(PeriodOutcome {
            lane_id,
            period_start,
            period_end,
            snapshots,
            states,
            health,
            attribution,
            cusum_alarm,
        })
    }
}
