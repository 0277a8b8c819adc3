use anyhow::{anyhow, Result};
use chrono::Utc;
use rand::{Rng, RngCore};

use crate::classifier::training::TrainingSample;
use crate::classifier::{CropPredictor, ModelSummary, TrainingError};
use crate::reference::{CropLabel, SoilType};

const SOIL_COUNT: usize = SoilType::ALL.len();
const CROP_COUNT: usize = CropLabel::ALL.len();

/// One ensemble member: the majority crop per soil over its bootstrap sample.
/// `None` means the bootstrap never drew that soil.
#[derive(Debug, Clone)]
struct Stump {
    votes: [Option<CropLabel>; SOIL_COUNT],
}

/// Bagged ensemble of categorical decision stumps (soil index -> crop index).
#[derive(Debug, Clone)]
pub struct StumpForest {
    members: Vec<Stump>,
    consensus: [Option<CropLabel>; SOIL_COUNT],
    summary: ModelSummary,
}

impl StumpForest {
    pub fn fit<R: Rng + ?Sized>(
        samples: &[TrainingSample],
        ensemble_size: usize,
        rng: &mut R,
    ) -> std::result::Result<Self, TrainingError> {
        if samples.is_empty() {
            return Err(TrainingError::NoSamples);
        }
        if ensemble_size == 0 {
            return Err(TrainingError::EmptyEnsemble);
        }

        let members = (0..ensemble_size)
            .map(|_| {
                let bootstrap =
                    (0..samples.len()).map(|_| &samples[rng.gen_range(0..samples.len())]);
                Stump {
                    votes: majority_votes(bootstrap),
                }
            })
            .collect();

        Ok(Self {
            members,
            consensus: majority_votes(samples.iter()),
            summary: ModelSummary {
                members: ensemble_size,
                samples: samples.len(),
                trained_at: Utc::now(),
            },
        })
    }

    /// Vote of the whole training set, ignoring bootstrap variation.
    pub fn consensus(&self, soil: SoilType) -> Option<CropLabel> {
        self.consensus[soil.index()]
    }
}

impl CropPredictor for StumpForest {
    fn predict(&self, soil: SoilType, rng: &mut dyn RngCore) -> Result<CropLabel> {
        let member = &self.members[rng.gen_range(0..self.members.len())];
        member.votes[soil.index()]
            .or(self.consensus[soil.index()])
            .ok_or_else(|| anyhow!("classifier has no vote for soil {soil}"))
    }

    fn summary(&self) -> ModelSummary {
        self.summary.clone()
    }
}

/// Ties resolve to the lowest crop index.
fn majority_votes<'a>(
    samples: impl Iterator<Item = &'a TrainingSample>,
) -> [Option<CropLabel>; SOIL_COUNT] {
    let mut counts = [[0u32; CROP_COUNT]; SOIL_COUNT];
    for sample in samples {
        counts[sample.soil.index()][sample.crop.index()] += 1;
    }

    let mut votes = [None; SOIL_COUNT];
    for (soil_idx, crop_counts) in counts.iter().enumerate() {
        let mut best: Option<(usize, u32)> = None;
        for (crop_idx, &count) in crop_counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            if best.map(|(_, top)| count > top).unwrap_or(true) {
                best = Some((crop_idx, count));
            }
        }
        votes[soil_idx] = best.and_then(|(crop_idx, _)| CropLabel::from_index(crop_idx));
    }
    votes
}
