//! Adapters layer: Concrete implementations of ports.
//!
//! - `weighted`: transparent weighted-sum risk model
//! - `rng`: ChaCha20 random source and clocks
//! - `json`: JSON file patient source

pub mod json;
pub mod rng;
pub mod weighted;

// Re-export source error for lib.rs
pub use json::SourceError;
