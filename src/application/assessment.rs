//! Assessment service: Orchestrates extraction and scoring.
//!
//! This service coordinates:
//! - Record validation and feature extraction
//! - Risk scoring through the configured `RiskModel`
//! - Batch scoring, sequential or on scoped worker threads
//!
//! A record that fails validation never reaches the model, and one failing
//! record never aborts a batch.

use std::sync::Arc;
use std::thread;

use crate::adapters::rng::ChaChaSource;
use crate::domain::{FeatureExtractor, PatientRecord, RiskAssessment};
use crate::ports::{Clock, RandomSource, RiskModel};
use crate::ReadmitError;

/// Service for scoring patient records.
pub struct AssessmentService<M>
where
    M: RiskModel,
{
    extractor: FeatureExtractor,
    model: Arc<M>,
}

impl<M> Clone for AssessmentService<M>
where
    M: RiskModel,
{
    fn clone(&self) -> Self {
        Self {
            extractor: self.extractor,
            model: Arc::clone(&self.model),
        }
    }
}

impl<M> AssessmentService<M>
where
    M: RiskModel,
{
    /// Create a new assessment service.
    pub fn new(model: Arc<M>) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            model,
        }
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Extract features from one record and score them.
    ///
    /// # Errors
    /// Returns `ReadmitError::Validation` if the record is malformed.
    pub fn assess(
        &self,
        record: &PatientRecord,
        rng: &mut dyn RandomSource,
        clock: &dyn Clock,
    ) -> Result<RiskAssessment, ReadmitError> {
        let features = self.extractor.extract(record)?;
        let assessment = self
            .model
            .score(&features, record.id.as_deref(), rng, clock);

        tracing::info!(
            model = self.model.name(),
            score = assessment.risk_score,
            category = %assessment.risk_category,
            confidence = assessment.confidence,
            "Assessment complete"
        );

        Ok(assessment)
    }

    /// Score records one after another, sharing a single random source.
    ///
    /// Returns one result per record, in input order.
    pub fn assess_batch(
        &self,
        records: &[PatientRecord],
        rng: &mut dyn RandomSource,
        clock: &dyn Clock,
    ) -> Vec<Result<RiskAssessment, ReadmitError>> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                self.assess(record, rng, clock).map_err(|e| {
                    tracing::warn!(index, "Skipping record: {e}");
                    e
                })
            })
            .collect()
    }

    /// Score records on up to `workers` scoped threads.
    ///
    /// Record `i` draws from its own source seeded with `seed + i`, so the
    /// output does not depend on scheduling. Results keep input order.
    pub fn assess_batch_parallel(
        &self,
        records: &[PatientRecord],
        seed: u64,
        clock: &dyn Clock,
        workers: usize,
    ) -> Vec<Result<RiskAssessment, ReadmitError>> {
        if records.is_empty() {
            return Vec::new();
        }

        let workers = workers.clamp(1, records.len());
        let chunk_size = records.len().div_ceil(workers);
        tracing::info!(
            records = records.len(),
            workers,
            "Starting parallel batch assessment"
        );

        thread::scope(|scope| {
            let handles: Vec<_> = records
                .chunks(chunk_size)
                .enumerate()
                .map(|(chunk_index, chunk)| {
                    let offset = chunk_index * chunk_size;
                    let handle = scope.spawn(move || {
                        chunk
                            .iter()
                            .enumerate()
                            .map(|(i, record)| {
                                let index = offset + i;
                                let mut rng = ChaChaSource::seeded(seed.wrapping_add(index as u64));
                                self.assess(record, &mut rng, clock).map_err(|e| {
                                    tracing::warn!(index, "Skipping record: {e}");
                                    e
                                })
                            })
                            .collect::<Vec<_>>()
                    });
                    (chunk.len(), handle)
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|(len, handle)| match handle.join() {
                    Ok(results) => results,
                    Err(_) => {
                        tracing::warn!(records = len, "Assessment worker panicked");
                        (0..len).map(|_| Err(ReadmitError::WorkerPanicked)).collect()
                    }
                })
                .collect()
        })
    }
}
