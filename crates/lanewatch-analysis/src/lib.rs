//! # lanewatch-analysis
//!
//! The quantitative core of the corridor monitor: per-observation weighted
//! scoring, adaptive EWMA baselines, z-score standardization, CUSUM drift
//! detection, three-level health classification, and attribution
//! decomposition, tied together by the period orchestrator.

pub mod classify;
pub mod pipeline;
