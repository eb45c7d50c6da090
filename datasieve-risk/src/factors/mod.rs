//! The five independent risk factors, each mapping to [0, 1].

pub mod boundary;
pub mod overfit;
pub mod poisoning;
pub mod representation;
pub mod trigger;

pub use boundary::class_boundary_distortion;
pub use overfit::overfit_potential;
pub use poisoning::poisoning_density;
pub use representation::representation_collapse;
pub use trigger::trigger_confidence;
