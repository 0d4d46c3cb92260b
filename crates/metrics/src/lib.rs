//! Metric definitions for missive.
//!
//! Names and label keys are centralized here so dashboards and alerts have a
//! single source of truth; crates record through the `metrics` facade macros
//! re-exported below. Installing a recorder/exporter is the embedding
//! process's job.

mod definitions;

pub use definitions::*;

// Re-export metrics macros for convenience
pub use metrics::{counter, gauge, histogram};
