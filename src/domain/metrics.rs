//! Model performance metrics.
//!
//! These are produced elsewhere (offline validation) and only forwarded to
//! reporting. Nothing here computes or checks them.

use serde::{Deserialize, Serialize};

/// 2x2 confusion matrix laid out as `[[TN, FP], [FN, TP]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfusionMatrix(pub [[u64; 2]; 2]);

impl ConfusionMatrix {
    #[must_use]
    pub fn true_negatives(&self) -> u64 {
        self.0[0][0]
    }

    #[must_use]
    pub fn false_positives(&self) -> u64 {
        self.0[0][1]
    }

    #[must_use]
    pub fn false_negatives(&self) -> u64 {
        self.0[1][0]
    }

    #[must_use]
    pub fn true_positives(&self) -> u64 {
        self.0[1][1]
    }

    /// Total number of predictions in the matrix.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().flatten().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub auc_roc: f64,
    pub confusion_matrix: ConfusionMatrix,
}

impl ModelMetrics {
    /// Simulated validation metrics published alongside the weighted scorer.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            accuracy: 0.847,
            precision: 0.823,
            recall: 0.789,
            f1_score: 0.806,
            auc_roc: 0.891,
            confusion_matrix: ConfusionMatrix([[1247, 89], [156, 508]]),
        }
    }
}
