//! Lane health roll-up.
//!
//! Combined = RPI + LSI + CPI raw totals; thresholds are inclusive lower
//! bounds, so boundary values belong to the higher tier.

use lanewatch_core::{HealthConfig, HealthStatus};

/// Combine the three raw index totals and classify.
pub fn compute_lane_health(
    rpi_total: f64,
    lsi_total: f64,
    cpi_total: f64,
    config: &HealthConfig,
) -> (f64, HealthStatus) {
    let combined = rpi_total + lsi_total + cpi_total;
    (combined, classify(combined, config))
}

/// Map a combined total to its status tier.
pub fn classify(combined: f64, config: &HealthConfig) -> HealthStatus {
    if combined >= config.active_threshold as f64 {
        HealthStatus::Active
    } else if combined >= config.watch_threshold as f64 {
        HealthStatus::Watch
    } else {
        HealthStatus::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> HealthConfig {
        HealthConfig::default()
    }

    #[test]
    fn pilot_week_is_active() {
        let (combined, status) = compute_lane_health(5.0, 2.0, 2.0, &defaults());
        assert_eq!(combined, 9.0);
        assert_eq!(status, HealthStatus::Active);
    }

    #[test]
    fn quiet_lane_is_stable() {
        let (combined, status) = compute_lane_health(1.0, 1.0, 0.0, &defaults());
        assert_eq!(combined, 2.0);
        assert_eq!(status, HealthStatus::Stable);
    }

    #[test]
    fn mid_range_lane_is_watch() {
        let (combined, status) = compute_lane_health(2.0, 1.0, 2.0, &defaults());
        assert_eq!(combined, 5.0);
        assert_eq!(status, HealthStatus::Watch);
    }

    #[test]
    fn zero_signals_is_stable() {
        let (combined, status) = compute_lane_health(0.0, 0.0, 0.0, &defaults());
        assert_eq!(combined, 0.0);
        assert_eq!(status, HealthStatus::Stable);
    }

    #[test]
    fn watch_boundary_belongs_to_watch() {
        let (combined, status) = compute_lane_health(2.0, 1.0, 1.0, &defaults());
        assert_eq!(combined, 4.0);
        assert_eq!(status, HealthStatus::Watch);
    }

    #[test]
    fn active_boundary_belongs_to_active() {
        let (combined, status) = compute_lane_health(3.0, 3.0, 2.0, &defaults());
        assert_eq!(combined, 8.0);
        assert_eq!(status, HealthStatus::Active);
    }

    #[test]
    fn custom_thresholds_shift_the_tiers() {
        let config = HealthConfig {
            watch_threshold: 2,
            active_threshold: 5,
        };
        assert_eq!(classify(1.0, &config), HealthStatus::Stable);
        assert_eq!(classify(2.0, &config), HealthStatus::Watch);
        assert_eq!(classify(5.0, &config), HealthStatus::Active);
    }

    #[test]
    fn negative_combined_total_is_stable() {
        let (combined, status) = compute_lane_health(-2.0, -1.0, 0.0, &defaults());
        assert_eq!(combined, -3.0);
        assert_eq!(status, HealthStatus::Stable);
    }
}
