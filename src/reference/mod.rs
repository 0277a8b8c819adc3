pub mod crop;
pub mod fertilizer;
pub mod soil;

use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

pub use crop::{CropLabel, CropParseError};
pub use fertilizer::FertilizerAdvice;
pub use soil::{SoilParseError, SoilType};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("soil {0} has no suitable crops mapped")]
    EmptySuitability(SoilType),
    #[error("soil {soil} lists {crop} more than once")]
    DuplicateCrop { soil: SoilType, crop: CropLabel },
}

/// Static lookup tables shared by the trainer and the recommendation engine.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    suitability: BTreeMap<SoilType, Vec<CropLabel>>,
    soil_advice: BTreeMap<SoilType, FertilizerAdvice>,
    crop_advice: BTreeMap<CropLabel, FertilizerAdvice>,
}

impl ReferenceData {
    pub fn builtin() -> Self {
        use CropLabel::*;

        let suitability = BTreeMap::from([
            (
                SoilType::Alluvial,
                vec![Rice, Wheat, Sugarcane, Maize, Cotton, Jute, Pulses, Oilseeds],
            ),
            (
                SoilType::Black,
                vec![Cotton, Sugarcane, Oilseeds, Pulses, Wheat, Groundnut, Millet, Sorghum],
            ),
            (
                SoilType::Red,
                vec![Pulses, Millet, Groundnut, Potato, Maize, Ragi, Sorghum, Oilseeds],
            ),
            (
                SoilType::Laterite,
                vec![Tea, Coffee, Rubber, Coconut, Cashew, Pepper, Pineapple, Cardamom],
            ),
            (
                SoilType::Arid,
                vec![Dates, Millet, Barley, Guar, Mustard, Cotton, Wheat, Pulses],
            ),
            (
                SoilType::Forest,
                vec![Tea, Coffee, Rubber, Coconut, Cardamom, Taro, Pepper],
            ),
            (
                SoilType::Peaty,
                vec![Rice, Potato, Onion, Tomato, Sugarcane, Taro],
            ),
            (
                SoilType::Saline,
                vec![SaltTolerantRice, Coconut, Barley, Cotton, Mustard, Sunflower],
            ),
        ]);

        let soil_advice = SoilType::ALL
            .into_iter()
            .map(|soil| (soil, fertilizer::builtin_soil_advice(soil)))
            .collect();
        let crop_advice = CropLabel::ALL
            .into_iter()
            .filter_map(|crop| fertilizer::builtin_crop_advice(crop).map(|advice| (crop, advice)))
            .collect();

        Self {
            suitability,
            soil_advice,
            crop_advice,
        }
    }

    /// Replaces the suitable-crop list of one soil.
    pub fn with_suitability(mut self, soil: SoilType, crops: Vec<CropLabel>) -> Self {
        self.suitability.insert(soil, crops);
        self
    }

    pub fn without_soil_advice(mut self, soil: SoilType) -> Self {
        self.soil_advice.remove(&soil);
        self
    }

    pub fn without_crop_advice(mut self, crop: CropLabel) -> Self {
        self.crop_advice.remove(&crop);
        self
    }

    pub fn soils(&self) -> impl Iterator<Item = SoilType> + '_ {
        SoilType::ALL.into_iter()
    }

    pub fn lookup_soil(&self, id: &str) -> Result<SoilType, SoilParseError> {
        SoilType::from_str(id)
    }

    pub fn suitable_crops(&self, soil: SoilType) -> &[CropLabel] {
        self.suitability
            .get(&soil)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_suitable(&self, soil: SoilType, crop: CropLabel) -> bool {
        self.suitable_crops(soil).contains(&crop)
    }

    pub fn soil_advice(&self, soil: SoilType) -> FertilizerAdvice {
        self.soil_advice
            .get(&soil)
            .copied()
            .unwrap_or(FertilizerAdvice::SOIL_FALLBACK)
    }

    pub fn crop_advice(&self, crop: CropLabel) -> FertilizerAdvice {
        self.crop_advice
            .get(&crop)
            .copied()
            .unwrap_or(FertilizerAdvice::CROP_DEFAULT)
    }

    /// Checked once at startup, before the classifier is trained.
    pub fn validate(&self) -> Result<(), ReferenceError> {
        for soil in self.soils() {
            let crops = self.suitable_crops(soil);
            if crops.is_empty() {
                return Err(ReferenceError::EmptySuitability(soil));
            }
            for (position, crop) in crops.iter().enumerate() {
                if crops[..position].contains(crop) {
                    return Err(ReferenceError::DuplicateCrop { soil, crop: *crop });
                }
            }
        }
        Ok(())
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}
