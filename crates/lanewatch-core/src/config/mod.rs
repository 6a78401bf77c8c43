//! Pipeline configuration.
//!
//! Constructed once (defaults, or a TOML file) and threaded as a parameter
//! into the orchestrator and its sub-components — nothing reads ambient
//! global state.

mod pipeline;
mod weights;

pub use pipeline::{CusumConfig, EwmaConfig, HealthConfig, PipelineConfig};
pub use weights::{PrecedentWeights, WeightMatrix};
