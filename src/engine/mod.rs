pub mod scoring;

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::classifier::{CropPredictor, ModelSummary};
use crate::engine::scoring::{merge_candidates, score_candidates, to_scale};
use crate::reference::{CropLabel, FertilizerAdvice, ReferenceData, SoilParseError, SoilType};

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Invalid soil type")]
    InvalidSoilType(#[source] SoilParseError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    pub soil: SoilType,
    pub soil_description: &'static str,
    pub soil_fertilizer: FertilizerAdvice,
    pub recommended_crops: Vec<CropRecommendation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CropRecommendation {
    pub name: CropLabel,
    pub score: u32,
    pub fertilizer: FertilizerAdvice,
}

/// Ranks crops for a soil by blending the static suitability table with
/// classifier predictions. Cheap to clone; all state is shared read-only.
#[derive(Clone)]
pub struct RecommendationEngine {
    reference: Arc<ReferenceData>,
    predictor: Arc<dyn CropPredictor>,
    prediction_draws: usize,
}

impl RecommendationEngine {
    pub fn new(
        reference: Arc<ReferenceData>,
        predictor: Arc<dyn CropPredictor>,
        prediction_draws: usize,
    ) -> Self {
        Self {
            reference,
            predictor,
            prediction_draws,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn model_summary(&self) -> ModelSummary {
        self.predictor.summary()
    }

    /// Scores carry fresh randomness on every call, so two calls for the same
    /// soil can return different scores and orderings within a tier.
    pub fn recommend(&self, soil_id: &str) -> Result<RecommendationResult, RecommendError> {
        self.recommend_with_rng(soil_id, &mut rand::thread_rng())
    }

    pub fn recommend_with_rng<R: Rng>(
        &self,
        soil_id: &str,
        rng: &mut R,
    ) -> Result<RecommendationResult, RecommendError> {
        let soil = self
            .reference
            .lookup_soil(soil_id)
            .map_err(RecommendError::InvalidSoilType)?;
        let predefined = self.reference.suitable_crops(soil);

        let mut predicted = Vec::with_capacity(self.prediction_draws);
        for _ in 0..self.prediction_draws {
            predicted.push(self.predictor.predict(soil, &mut *rng)?);
        }

        let candidates = merge_candidates(predefined, &predicted);
        let recommended_crops = score_candidates(&candidates, predefined, rng)
            .into_iter()
            .map(|scored| CropRecommendation {
                name: scored.crop,
                score: to_scale(scored.score),
                fertilizer: self.reference.crop_advice(scored.crop),
            })
            .collect();

        Ok(RecommendationResult {
            soil,
            soil_description: soil.description(),
            soil_fertilizer: self.reference.soil_advice(soil),
            recommended_crops,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use anyhow::{anyhow, Result};
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use tokio_test::{assert_err, assert_ok};

    use super::{RecommendError, RecommendationEngine};
    use crate::classifier::{train, CropPredictor, ModelSummary, TrainingPlan};
    use crate::reference::{CropLabel, FertilizerAdvice, ReferenceData, SoilType};

    struct FixedPredictor(CropLabel);

    impl CropPredictor for FixedPredictor {
        fn predict(&self, _soil: SoilType, _rng: &mut dyn RngCore) -> Result<CropLabel> {
            Ok(self.0)
        }

        fn summary(&self) -> ModelSummary {
            ModelSummary {
                members: 1,
                samples: 0,
                trained_at: Utc::now(),
            }
        }
    }

    struct BrokenPredictor;

    impl CropPredictor for BrokenPredictor {
        fn predict(&self, _soil: SoilType, _rng: &mut dyn RngCore) -> Result<CropLabel> {
            Err(anyhow!("model weights unavailable"))
        }

        fn summary(&self) -> ModelSummary {
            FixedPredictor(CropLabel::Rice).summary()
        }
    }

    fn trained_engine() -> RecommendationEngine {
        let reference = Arc::new(ReferenceData::builtin());
        let mut rng = StdRng::seed_from_u64(42);
        let forest = train(&reference, &TrainingPlan::default(), &mut rng)
            .expect("training should succeed");
        RecommendationEngine::new(reference, Arc::new(forest), 10)
    }

    fn stub_engine(predictor: impl CropPredictor + 'static) -> RecommendationEngine {
        RecommendationEngine::new(Arc::new(ReferenceData::builtin()), Arc::new(predictor), 10)
    }

    #[test]
    fn every_soil_gets_unique_non_empty_crops() {
        let engine = trained_engine();
        let mut rng = StdRng::seed_from_u64(1);
        for soil in SoilType::ALL {
            let result = assert_ok!(engine.recommend_with_rng(soil.as_str(), &mut rng));
            assert!(!result.recommended_crops.is_empty());
            let unique = result
                .recommended_crops
                .iter()
                .map(|c| c.name)
                .collect::<BTreeSet<_>>();
            assert_eq!(unique.len(), result.recommended_crops.len());
        }
    }

    #[test]
    fn predefined_crops_are_always_present() {
        let engine = trained_engine();
        let mut rng = StdRng::seed_from_u64(2);
        for soil in SoilType::ALL {
            let result = assert_ok!(engine.recommend_with_rng(soil.as_str(), &mut rng));
            for crop in engine.reference().suitable_crops(soil) {
                assert!(
                    result.recommended_crops.iter().any(|c| c.name == *crop),
                    "{crop} missing for {soil}"
                );
            }
        }
    }

    #[test]
    fn invalid_soil_is_rejected() {
        let engine = trained_engine();
        let error = assert_err!(engine.recommend("Volcanic"));
        assert!(matches!(error, RecommendError::InvalidSoilType(_)));
        assert_eq!(error.to_string(), "Invalid soil type");
    }

    #[test]
    fn scores_fall_within_scale_bounds() {
        let engine = trained_engine();
        for _ in 0..50 {
            for soil in SoilType::ALL {
                let result = assert_ok!(engine.recommend(soil.as_str()));
                for crop in &result.recommended_crops {
                    assert!((50..=150).contains(&crop.score), "{} scored {}", crop.name, crop.score);
                }
            }
        }
    }

    #[test]
    fn predefined_crops_outrank_classifier_only_crops() {
        let engine = stub_engine(FixedPredictor(CropLabel::Apple));
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let result = assert_ok!(engine.recommend_with_rng("Alluvial", &mut rng));
            let last = result.recommended_crops.last().expect("crops present");
            assert_eq!(last.name, CropLabel::Apple);
            assert!(last.score <= 100);
            assert_eq!(last.fertilizer, FertilizerAdvice::CROP_DEFAULT);
            assert_eq!(result.recommended_crops.len(), 9);
        }
    }

    #[test]
    fn scores_are_sorted_descending() {
        let engine = trained_engine();
        let mut rng = StdRng::seed_from_u64(4);
        let result = assert_ok!(engine.recommend_with_rng("Red", &mut rng));
        assert!(result
            .recommended_crops
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn alluvial_matches_reference_example() {
        let engine = trained_engine();
        let result = assert_ok!(engine.recommend("Alluvial"));
        assert_eq!(result.soil, SoilType::Alluvial);
        assert_eq!(
            result.soil_description,
            "Rich in nutrients, formed by river deposits, ideal for agriculture"
        );
        assert_eq!(
            result.soil_fertilizer.organic,
            "Cow dung compost and vermicompost"
        );
        let names = result
            .recommended_crops
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>();
        for expected in [
            "Rice", "Wheat", "Sugarcane", "Maize", "Cotton", "Jute", "Pulses", "Oilseeds",
        ] {
            assert!(names.contains(&expected), "{expected} missing");
        }
    }

    #[test]
    fn saline_recommends_salt_tolerant_rice_in_top_tier() {
        let engine = trained_engine();
        for _ in 0..20 {
            let result = assert_ok!(engine.recommend("Saline"));
            let rice = result
                .recommended_crops
                .iter()
                .find(|c| c.name == CropLabel::SaltTolerantRice)
                .expect("Salt-tolerant Rice should be recommended");
            assert!(rice.score >= 100);
        }
    }

    #[test]
    fn same_seed_reproduces_result() {
        let engine = trained_engine();
        let first = assert_ok!(engine.recommend_with_rng("Black", &mut StdRng::seed_from_u64(9)));
        let second = assert_ok!(engine.recommend_with_rng("Black", &mut StdRng::seed_from_u64(9)));
        let scores = |r: &super::RecommendationResult| {
            r.recommended_crops
                .iter()
                .map(|c| (c.name, c.score))
                .collect::<Vec<_>>()
        };
        assert_eq!(scores(&first), scores(&second));
    }

    #[test]
    fn classifier_failure_surfaces_as_internal_error() {
        let engine = stub_engine(BrokenPredictor);
        let error = assert_err!(engine.recommend("Arid"));
        assert!(matches!(error, RecommendError::Internal(_)));
        assert_eq!(error.to_string(), "model weights unavailable");
    }

    #[test]
    fn zero_draws_returns_predefined_list_only() {
        let engine = RecommendationEngine::new(
            Arc::new(ReferenceData::builtin()),
            Arc::new(FixedPredictor(CropLabel::Apple)),
            0,
        );
        let result = assert_ok!(engine.recommend("Laterite"));
        assert_eq!(result.recommended_crops.len(), 8);
        assert!(result.recommended_crops.iter().all(|c| c.score >= 100));
    }
}
