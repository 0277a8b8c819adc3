use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Indian soil categories, declared in classifier feature order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SoilType {
    Alluvial,
    Black,
    Red,
    Laterite,
    Arid,
    Forest,
    Peaty,
    Saline,
}

impl SoilType {
    pub const ALL: [SoilType; 8] = [
        SoilType::Alluvial,
        SoilType::Black,
        SoilType::Red,
        SoilType::Laterite,
        SoilType::Arid,
        SoilType::Forest,
        SoilType::Peaty,
        SoilType::Saline,
    ];

    /// Feature value fed to the classifier.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alluvial => "Alluvial",
            Self::Black => "Black",
            Self::Red => "Red",
            Self::Laterite => "Laterite",
            Self::Arid => "Arid",
            Self::Forest => "Forest",
            Self::Peaty => "Peaty",
            Self::Saline => "Saline",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Alluvial => "Rich in nutrients, formed by river deposits, ideal for agriculture",
            Self::Black => {
                "Rich in calcium, iron, and moisture retention, suitable for cotton and oilseeds"
            }
            Self::Red => {
                "Rich in iron oxide, found in low rainfall areas, suitable for millets and pulses"
            }
            Self::Laterite => {
                "Rich in iron and aluminum, formed in monsoon regions, requires fertilizers"
            }
            Self::Arid => "Found in desert regions, low in organic matter, requires irrigation",
            Self::Forest => {
                "Rich in organic matter, found in forest regions, suitable for tea and coffee"
            }
            Self::Peaty => "Rich in organic matter, highly acidic, suitable for specific crops",
            Self::Saline => "High salt content, found in coastal areas, requires salt-tolerant crops",
        }
    }
}

impl Display for SoilType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown soil type: {0}")]
pub struct SoilParseError(pub String);

impl FromStr for SoilType {
    type Err = SoilParseError;

    /// Soil names are matched exactly; the HTTP contract is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoilType::ALL
            .into_iter()
            .find(|soil| soil.as_str() == s)
            .ok_or_else(|| SoilParseError(s.to_string()))
    }
}
