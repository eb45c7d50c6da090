//! # datasieve-risk
//!
//! Converts dataset-level statistics (plus optional detector evidence)
//! into a 0–100 collapse-risk score, a categorical training-safety
//! verdict, and ordered recommendations.
//!
//! Five factors, each in [0, 1], enter a weighted sum: overfit
//! potential, representation collapse, class-boundary distortion,
//! poisoning density, and trigger confidence.

pub mod engine;
pub mod factors;
pub mod formula;
pub mod recommendations;

pub use engine::RiskEngine;
