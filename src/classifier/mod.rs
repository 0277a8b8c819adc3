pub mod forest;
pub mod training;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::{Rng, RngCore};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::reference::{CropLabel, ReferenceData, ReferenceError, SoilType};

pub use forest::StumpForest;
pub use training::{build_training_set, TrainingPlan, TrainingSample};

/// Predicts a plausible crop for a soil. Implementations are read-only after
/// construction and may be shared across request handlers.
pub trait CropPredictor: Send + Sync {
    fn predict(&self, soil: SoilType, rng: &mut dyn RngCore) -> Result<CropLabel>;
    fn summary(&self) -> ModelSummary;
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub members: usize,
    pub samples: usize,
    pub trained_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("invalid reference data: {0}")]
    Reference(#[from] ReferenceError),
    #[error("training set is empty")]
    NoSamples,
    #[error("ensemble size must be at least 1")]
    EmptyEnsemble,
}

/// Validates the reference tables, generates the synthetic samples and fits
/// the ensemble.
pub fn train<R: Rng + ?Sized>(
    reference: &ReferenceData,
    plan: &TrainingPlan,
    rng: &mut R,
) -> std::result::Result<StumpForest, TrainingError> {
    reference.validate()?;
    let samples = build_training_set(reference, plan, rng);
    let forest = StumpForest::fit(&samples, plan.ensemble_size, rng)?;
    info!(
        samples = samples.len(),
        members = plan.ensemble_size,
        "trained crop classifier"
    );
    Ok(forest)
}
