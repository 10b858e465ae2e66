use super::crop::{AbsorbWater, Crop, CropKind, CropVariant};
use serde::{Deserialize, Serialize};

/// Height gained by a conifer per successful watering, in metres.
pub const CONIFER_GROWTH_PER_WATERING: f64 = 0.05;

/// Fraction of absorbed water an olive tree turns into annual yield.
pub const OLIVE_YIELD_FACTOR: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeGrowth {
    pub height: f64,
    pub annual_yield: f64,
}

impl TreeGrowth {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            annual_yield: 0.0,
        }
    }

    pub fn grow(&mut self, metres: f64) {
        self.height += metres;
    }
}

/// Capability shared by conifers and olive trees.
pub trait Tree {
    fn growth(&self) -> &TreeGrowth;

    fn height(&self) -> f64 {
        self.growth().height
    }

    fn annual_yield(&self) -> f64 {
        self.growth().annual_yield
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OliveVariety {
    #[default]
    Manzanilla,
    Arbequina,
    Picual,
    Arauco,
}

impl OliveVariety {
    pub fn as_str(&self) -> &'static str {
        match self {
            OliveVariety::Manzanilla => "Manzanilla",
            OliveVariety::Arbequina => "Arbequina",
            OliveVariety::Picual => "Picual",
            OliveVariety::Arauco => "Arauco",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "manzanilla" => Some(OliveVariety::Manzanilla),
            "arbequina" => Some(OliveVariety::Arbequina),
            "picual" => Some(OliveVariety::Picual),
            "arauco" => Some(OliveVariety::Arauco),
            _ => None,
        }
    }
}

impl std::fmt::Display for OliveVariety {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conifer {
    pub surface_area: f64,
    pub growth: TreeGrowth,
}

impl Conifer {
    pub const MIN_WATER: f64 = 10.0;

    pub(crate) fn new(surface_area: f64, height: f64) -> Self {
        Self {
            surface_area,
            growth: TreeGrowth::new(height),
        }
    }
}

impl Tree for Conifer {
    fn growth(&self) -> &TreeGrowth {
        &self.growth
    }
}

impl AbsorbWater for Conifer {
    fn kind(&self) -> CropKind {
        Self::KIND
    }

    fn min_water(&self) -> f64 {
        Self::MIN_WATER
    }

    fn apply_water(&mut self, _amount: f64) {
        self.growth.grow(CONIFER_GROWTH_PER_WATERING);
    }
}

impl CropVariant for Conifer {
    const KIND: CropKind = CropKind::Conifer;

    fn from_crop(crop: &Crop) -> Option<&Self> {
        match crop {
            Crop::Conifer(c) => Some(c),
            _ => None,
        }
    }

    fn into_crop(self) -> Crop {
        Crop::Conifer(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Olive {
    pub surface_area: f64,
    pub growth: TreeGrowth,
    pub variety: OliveVariety,
}

impl Olive {
    pub const MIN_WATER: f64 = 5.0;

    pub(crate) fn new(surface_area: f64, height: f64, variety: OliveVariety) -> Self {
        Self {
            surface_area,
            growth: TreeGrowth::new(height),
            variety,
        }
    }
}

impl Tree for Olive {
    fn growth(&self) -> &TreeGrowth {
        &self.growth
    }
}

impl AbsorbWater for Olive {
    fn kind(&self) -> CropKind {
        Self::KIND
    }

    fn min_water(&self) -> f64 {
        Self::MIN_WATER
    }

    fn apply_water(&mut self, amount: f64) {
        self.growth.annual_yield += amount * OLIVE_YIELD_FACTOR;
    }
}

impl CropVariant for Olive {
    const KIND: CropKind = CropKind::Olive;

    fn from_crop(crop: &Crop) -> Option<&Self> {
        match crop {
            Crop::Olive(c) => Some(c),
            _ => None,
        }
    }

    fn into_crop(self) -> Crop {
        Crop::Olive(self)
    }
}
