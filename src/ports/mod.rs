//! Ports layer: Trait definitions for the collaborators of the core.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the scoring pipeline and what surrounds it (record sources,
//! randomness, time, and the risk model itself).

mod random;
mod risk_model;
mod source;

pub use random::{Clock, RandomSource};
pub use risk_model::RiskModel;
pub use source::{LoadedRecord, PatientSource};
