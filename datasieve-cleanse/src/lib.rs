//! # datasieve-cleanse
//!
//! Turns a suspected-sample set into a concrete cleansing action under
//! one of three policies: strict removal, confidence-gated removal, or
//! review-only relabel suggestions. Detected trigger patterns can also
//! be scrubbed out of their carrier samples in place.

pub mod engine;
pub mod relabel;
pub mod scrub;

pub use engine::DatasetCleanser;
