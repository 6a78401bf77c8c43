//! Storage trait module — the contract between the period pipeline and
//! the underlying state store.
//!
//! The SQLite implementation lives in `lanewatch-storage`. Both traits are
//! object-safe, `Send + Sync`, and have blanket `Arc<T>` impls. The store
//! is responsible for serializing concurrent writers of the same
//! (lane, index, period) key — the pipeline assumes at most one logical
//! writer per period and provides no locking of its own.

pub mod lane_reader;
pub mod lane_writer;
pub mod test_helpers;

pub use lane_reader::ILaneReader;
pub use lane_writer::ILaneWriter;
