use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crop vocabulary. Declaration order is the classifier's label index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CropLabel {
    Rice,
    Wheat,
    Maize,
    Sugarcane,
    Cotton,
    Pulses,
    Oilseeds,
    Jute,
    Soybean,
    Groundnut,
    Sunflower,
    Sorghum,
    Millet,
    Ragi,
    Potato,
    Onion,
    Tomato,
    Tea,
    Coffee,
    Cashew,
    Coconut,
    Rubber,
    Pepper,
    Pineapple,
    Guar,
    Mustard,
    Dates,
    Barley,
    #[serde(rename = "Salt-tolerant Rice")]
    SaltTolerantRice,
    Apple,
    Orange,
    Taro,
    Cardamom,
}

impl CropLabel {
    pub const ALL: [CropLabel; 33] = [
        CropLabel::Rice,
        CropLabel::Wheat,
        CropLabel::Maize,
        CropLabel::Sugarcane,
        CropLabel::Cotton,
        CropLabel::Pulses,
        CropLabel::Oilseeds,
        CropLabel::Jute,
        CropLabel::Soybean,
        CropLabel::Groundnut,
        CropLabel::Sunflower,
        CropLabel::Sorghum,
        CropLabel::Millet,
        CropLabel::Ragi,
        CropLabel::Potato,
        CropLabel::Onion,
        CropLabel::Tomato,
        CropLabel::Tea,
        CropLabel::Coffee,
        CropLabel::Cashew,
        CropLabel::Coconut,
        CropLabel::Rubber,
        CropLabel::Pepper,
        CropLabel::Pineapple,
        CropLabel::Guar,
        CropLabel::Mustard,
        CropLabel::Dates,
        CropLabel::Barley,
        CropLabel::SaltTolerantRice,
        CropLabel::Apple,
        CropLabel::Orange,
        CropLabel::Taro,
        CropLabel::Cardamom,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rice => "Rice",
            Self::Wheat => "Wheat",
            Self::Maize => "Maize",
            Self::Sugarcane => "Sugarcane",
            Self::Cotton => "Cotton",
            Self::Pulses => "Pulses",
            Self::Oilseeds => "Oilseeds",
            Self::Jute => "Jute",
            Self::Soybean => "Soybean",
            Self::Groundnut => "Groundnut",
            Self::Sunflower => "Sunflower",
            Self::Sorghum => "Sorghum",
            Self::Millet => "Millet",
            Self::Ragi => "Ragi",
            Self::Potato => "Potato",
            Self::Onion => "Onion",
            Self::Tomato => "Tomato",
            Self::Tea => "Tea",
            Self::Coffee => "Coffee",
            Self::Cashew => "Cashew",
            Self::Coconut => "Coconut",
            Self::Rubber => "Rubber",
            Self::Pepper => "Pepper",
            Self::Pineapple => "Pineapple",
            Self::Guar => "Guar",
            Self::Mustard => "Mustard",
            Self::Dates => "Dates",
            Self::Barley => "Barley",
            Self::SaltTolerantRice => "Salt-tolerant Rice",
            Self::Apple => "Apple",
            Self::Orange => "Orange",
            Self::Taro => "Taro",
            Self::Cardamom => "Cardamom",
        }
    }
}

impl Display for CropLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown crop: {0}")]
pub struct CropParseError(pub String);

impl FromStr for CropLabel {
    type Err = CropParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CropLabel::ALL
            .into_iter()
            .find(|crop| crop.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CropParseError(s.to_string()))
    }
}
