use serde::Serialize;

use crate::reference::{CropLabel, SoilType};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FertilizerAdvice {
    pub organic: &'static str,
    pub homemade: &'static str,
}

impl FertilizerAdvice {
    /// Used for every crop without a dedicated entry.
    pub const CROP_DEFAULT: FertilizerAdvice = FertilizerAdvice::new(
        "Vermicompost and cow dung compost",
        "Kitchen waste compost and compost tea",
    );

    /// Used when a soil table has no entry for the requested soil.
    pub const SOIL_FALLBACK: FertilizerAdvice =
        FertilizerAdvice::new("Vermicompost and cow dung", "Kitchen waste compost");

    pub const fn new(organic: &'static str, homemade: &'static str) -> Self {
        Self { organic, homemade }
    }
}

pub fn builtin_soil_advice(soil: SoilType) -> FertilizerAdvice {
    match soil {
        SoilType::Alluvial => FertilizerAdvice::new(
            "Cow dung compost and vermicompost",
            "Banana peel and kitchen waste compost",
        ),
        SoilType::Black => FertilizerAdvice::new(
            "Farm yard manure and neem cake",
            "Eggshell powder mixed with compost",
        ),
        SoilType::Red => {
            FertilizerAdvice::new("Bone meal and vermicompost", "Wood ash and green manure")
        }
        SoilType::Laterite => FertilizerAdvice::new(
            "Coconut coir compost and bone meal",
            "Crushed seashells and compost tea",
        ),
        SoilType::Arid => FertilizerAdvice::new(
            "Sheep/goat manure and compost",
            "Dried leaves and grass clippings mulch",
        ),
        SoilType::Forest => FertilizerAdvice::new(
            "Leaf mold and worm castings",
            "Forest soil and decomposed leaves",
        ),
        SoilType::Peaty => {
            FertilizerAdvice::new("Cow dung and wood ash", "Lime water and crushed eggshells")
        }
        SoilType::Saline => FertilizerAdvice::new(
            "Well-rotted compost and gypsum",
            "Rice husk compost and coconut water",
        ),
    }
}

/// Crops with dedicated advice; everything else gets [`FertilizerAdvice::CROP_DEFAULT`].
pub fn builtin_crop_advice(crop: CropLabel) -> Option<FertilizerAdvice> {
    let advice = match crop {
        CropLabel::Rice => FertilizerAdvice::new(
            "Cow dung compost and azolla biofertilizer",
            "Rice water and banana peel tea",
        ),
        CropLabel::Wheat => {
            FertilizerAdvice::new("Farm yard manure and green manure", "Compost tea and wood ash")
        }
        CropLabel::Maize => FertilizerAdvice::new(
            "Poultry manure and vermicompost",
            "Fermented kitchen waste and grass mulch",
        ),
        CropLabel::Sugarcane => FertilizerAdvice::new(
            "Press mud compost and farm yard manure",
            "Jaggery water and banana peel compost",
        ),
        CropLabel::Cotton => {
            FertilizerAdvice::new("Neem cake and vermicompost", "Cottonseed meal and compost tea")
        }
        CropLabel::Pulses => {
            FertilizerAdvice::new("Vermicompost and rhizobium culture", "Lentil water and wood ash")
        }
        CropLabel::Oilseeds => FertilizerAdvice::new(
            "Mustard cake and vermicompost",
            "Crushed eggshells and seaweed solution",
        ),
        CropLabel::Jute => FertilizerAdvice::new(
            "Cow dung compost and green manure",
            "Fermented rice water and leaf mulch",
        ),
        CropLabel::Groundnut => FertilizerAdvice::new(
            "Farm yard manure and bone meal",
            "Crushed eggshells and peanut shell compost",
        ),
        CropLabel::Tea => FertilizerAdvice::new(
            "Vermicompost and fish emulsion",
            "Used tea leaves compost and eggshells",
        ),
        CropLabel::Coffee => FertilizerAdvice::new(
            "Coffee pulp compost and cow manure",
            "Used coffee grounds and banana peels",
        ),
        CropLabel::Coconut => FertilizerAdvice::new(
            "Coconut coir compost and cow dung",
            "Coconut husk compost and seaweed solution",
        ),
        CropLabel::Rubber => FertilizerAdvice::new(
            "Leaf litter compost and farm yard manure",
            "Wood ash and fermented fruit waste",
        ),
        _ => return None,
    };
    Some(advice)
}
