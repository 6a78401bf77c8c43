//! Z-score standardization against the EWMA baseline.
//!
//! z_t = (x_t − μ_t) / σ_t, in post-update baseline-sigma units.

/// Standardize a period aggregate against the baseline. Returns `None`
/// when sigma is not positive — there is not enough variance history to
/// express a deviation, which is a data condition, not an error.
pub fn compute_zscore(value: f64, ewma_mean: f64, ewma_sigma: f64) -> Option<f64> {
    if ewma_sigma <= 0.0 {
        return None;
    }
    Some((value - ewma_mean) / ewma_sigma)
}
