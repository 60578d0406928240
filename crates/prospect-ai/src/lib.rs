//! Core library for resolving raw go-to-market signals to canonical entities,
//! gating enrichment behind identity preconditions, and scoring buyer intent.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
