use super::crop::{AbsorbWater, Crop, CropKind, CropVariant};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetableGrowth {
    pub growth_days: u32,
    pub is_watered: bool,
}

impl VegetableGrowth {
    pub fn new(growth_days: u32) -> Self {
        Self {
            growth_days,
            is_watered: false,
        }
    }

    pub fn water(&mut self) {
        self.is_watered = true;
    }
}

/// Capability shared by lettuce and carrots.
pub trait Vegetable {
    fn growth(&self) -> &VegetableGrowth;

    fn growth_days(&self) -> u32 {
        self.growth().growth_days
    }

    fn is_watered(&self) -> bool {
        self.growth().is_watered
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lettuce {
    pub surface_area: f64,
    pub growth: VegetableGrowth,
}

impl Lettuce {
    pub const MIN_WATER: f64 = 1.0;

    pub(crate) fn new(surface_area: f64, growth_days: u32) -> Self {
        Self {
            surface_area,
            growth: VegetableGrowth::new(growth_days),
        }
    }
}

impl Vegetable for Lettuce {
    fn growth(&self) -> &VegetableGrowth {
        &self.growth
    }
}

impl AbsorbWater for Lettuce {
    fn kind(&self) -> CropKind {
        Self::KIND
    }

    fn min_water(&self) -> f64 {
        Self::MIN_WATER
    }

    fn apply_water(&mut self, _amount: f64) {
        self.growth.water();
    }
}

impl CropVariant for Lettuce {
    const KIND: CropKind = CropKind::Lettuce;

    fn from_crop(crop: &Crop) -> Option<&Self> {
        match crop {
            Crop::Lettuce(c) => Some(c),
            _ => None,
        }
    }

    fn into_crop(self) -> Crop {
        Crop::Lettuce(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrot {
    pub surface_area: f64,
    pub growth: VegetableGrowth,
    /// Root depth in metres.
    pub depth: f64,
}

impl Carrot {
    pub const MIN_WATER: f64 = 0.5;

    pub(crate) fn new(surface_area: f64, growth_days: u32, depth: f64) -> Self {
        Self {
            surface_area,
            growth: VegetableGrowth::new(growth_days),
            depth,
        }
    }
}

impl Vegetable for Carrot {
    fn growth(&self) -> &VegetableGrowth {
        &self.growth
    }
}

impl AbsorbWater for Carrot {
    fn kind(&self) -> CropKind {
        Self::KIND
    }

    fn min_water(&self) -> f64 {
        Self::MIN_WATER
    }

    fn apply_water(&mut self, _amount: f64) {
        self.growth.water();
    }
}

impl CropVariant for Carrot {
    const KIND: CropKind = CropKind::Carrot;

    fn from_crop(crop: &Crop) -> Option<&Self> {
        match crop {
            Crop::Carrot(c) => Some(c),
            _ => None,
        }
    }

    fn into_crop(self) -> Crop {
        Crop::Carrot(self)
    }
}
