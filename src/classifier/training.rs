use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::reference::{CropLabel, ReferenceData, SoilType};

/// How the synthetic training set and the ensemble are sized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingPlan {
    pub sample_replicas: usize,
    pub noise_samples_per_soil: usize,
    pub ensemble_size: usize,
}

impl Default for TrainingPlan {
    fn default() -> Self {
        Self {
            sample_replicas: 5,
            noise_samples_per_soil: 3,
            ensemble_size: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingSample {
    pub soil: SoilType,
    pub crop: CropLabel,
}

/// Replicates every suitable (soil, crop) pair and mixes in uniformly random
/// crops per soil.
pub fn build_training_set<R: Rng + ?Sized>(
    reference: &ReferenceData,
    plan: &TrainingPlan,
    rng: &mut R,
) -> Vec<TrainingSample> {
    let mut samples = Vec::new();
    for soil in reference.soils() {
        for crop in reference.suitable_crops(soil) {
            samples.extend(
                std::iter::repeat(TrainingSample { soil, crop: *crop }).take(plan.sample_replicas),
            );
        }
        for _ in 0..plan.noise_samples_per_soil {
            let crop = CropLabel::ALL[rng.gen_range(0..CropLabel::ALL.len())];
            samples.push(TrainingSample { soil, crop });
        }
    }
    samples
}
