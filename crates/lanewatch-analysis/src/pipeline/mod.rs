//! Period pipeline components.
//!
//! Each module is a pure, independently testable stage; `period` chains
//! them over the storage traits.

pub mod attribution;
pub mod cusum;
pub mod ewma;
pub mod health;
pub mod period;
pub mod scoring;
pub mod zscore;

pub use attribution::compute_attribution;
pub use cusum::{CusumDetector, CusumState};
pub use ewma::{lambda_from_half_life, EwmaBaseline};
pub use health::compute_lane_health;
pub use period::{PeriodProcessor, PeriodStore};
pub use scoring::compute_weighted_score;
pub use zscore::compute_zscore;
