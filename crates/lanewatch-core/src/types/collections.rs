//! Hash collections used across the workspace.
//!
//! FxHash is used everywhere keys are small (enum labels, tag strings);
//! no collision resistance is needed for internal aggregation maps.

pub use rustc_hash::{FxHashMap, FxHashSet};
