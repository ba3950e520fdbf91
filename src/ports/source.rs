//! Patient source port: Trait for obtaining records to score.
//!
//! The transport is up to the implementation (file, API, in-memory fixture).

use crate::domain::{PatientRecord, ValidationError};

/// One entry of a loaded batch: a decoded record, or the reason it could not
/// be decoded.
pub type LoadedRecord = Result<PatientRecord, ValidationError>;

/// Trait for loading patient records.
pub trait PatientSource: Send + Sync {
    /// Error type for load operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load every available record, one entry per record in source order.
    ///
    /// A malformed record yields a `ValidationError` entry and does not
    /// prevent the others from loading.
    ///
    /// # Errors
    /// Returns error if the source as a whole cannot be read or decoded.
    fn load_records(&self) -> Result<Vec<LoadedRecord>, Self::Error>;
}
