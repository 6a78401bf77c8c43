//! # lanewatch-core
//!
//! Foundation crate for the lanewatch corridor health engine.
//! Defines the observation model, errors, configuration, and the storage
//! traits every other crate in the workspace builds on.

pub mod config;
pub mod errors;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{CusumConfig, EwmaConfig, HealthConfig, PipelineConfig, WeightMatrix};
pub use errors::{PipelineError, PipelineResult, StorageError, StorageResult};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::observation::{Observation, WeightedScore};
pub use types::state::{
    AttributionBreakdown, CategoryState, HealthRecord, LaneInfo, PeriodOutcome, PeriodSnapshot,
};
pub use types::taxonomy::{
    Confidence, EventStatus, HealthStatus, IndexKind, Jurisdiction, SourceTier,
};
