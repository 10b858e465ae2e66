use super::tree::{Conifer, Olive, Tree};
use super::vegetable::{Carrot, Lettuce, Vegetable};
use crate::error::{FincaError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CropKind {
    Conifer,
    Olive,
    Lettuce,
    Carrot,
}

impl CropKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropKind::Conifer => "Conifer",
            CropKind::Olive => "Olive",
            CropKind::Lettuce => "Lettuce",
            CropKind::Carrot => "Carrot",
        }
    }

    /// Case-insensitive; accepts the Spanish names used by older farm records.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "conifer" | "pine" | "pino" => Some(CropKind::Conifer),
            "olive" | "olivo" => Some(CropKind::Olive),
            "lettuce" | "lechuga" => Some(CropKind::Lettuce),
            "carrot" | "zanahoria" => Some(CropKind::Carrot),
            _ => None,
        }
    }

    pub fn all() -> &'static [CropKind] {
        &[
            CropKind::Conifer,
            CropKind::Olive,
            CropKind::Lettuce,
            CropKind::Carrot,
        ]
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, CropKind::Conifer | CropKind::Olive)
    }
}

impl std::fmt::Display for CropKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Water intake rule shared by every crop.
///
/// `absorb_water` rejects amounts below `min_water` without touching any
/// state, then applies the kind-specific effect.
pub trait AbsorbWater {
    fn kind(&self) -> CropKind;

    fn min_water(&self) -> f64;

    fn apply_water(&mut self, amount: f64);

    fn check_water(&self, amount: f64) -> Result<()> {
        let required = self.min_water();
        // NaN must fail too
        if !(amount >= required) {
            return Err(FincaError::InsufficientWater {
                kind: self.kind(),
                required,
                given: amount,
            });
        }
        Ok(())
    }

    fn absorb_water(&mut self, amount: f64) -> Result<()> {
        self.check_water(amount)?;
        self.apply_water(amount);
        Ok(())
    }
}

/// A concrete crop struct that can be recovered from a [`Crop`] by kind.
pub trait CropVariant: AbsorbWater + Sized {
    const KIND: CropKind;

    fn from_crop(crop: &Crop) -> Option<&Self>;

    fn into_crop(self) -> Crop;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Crop {
    Conifer(Conifer),
    Olive(Olive),
    Lettuce(Lettuce),
    Carrot(Carrot),
}

impl Crop {
    pub fn kind(&self) -> CropKind {
        match self {
            Crop::Conifer(_) => CropKind::Conifer,
            Crop::Olive(_) => CropKind::Olive,
            Crop::Lettuce(_) => CropKind::Lettuce,
            Crop::Carrot(_) => CropKind::Carrot,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn surface_area(&self) -> f64 {
        match self {
            Crop::Conifer(c) => c.surface_area,
            Crop::Olive(c) => c.surface_area,
            Crop::Lettuce(c) => c.surface_area,
            Crop::Carrot(c) => c.surface_area,
        }
    }

    pub fn as_tree(&self) -> Option<&dyn Tree> {
        match self {
            Crop::Conifer(c) => Some(c),
            Crop::Olive(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_vegetable(&self) -> Option<&dyn Vegetable> {
        match self {
            Crop::Lettuce(c) => Some(c),
            Crop::Carrot(c) => Some(c),
            _ => None,
        }
    }
}

impl AbsorbWater for Crop {
    fn kind(&self) -> CropKind {
        Crop::kind(self)
    }

    fn min_water(&self) -> f64 {
        match self {
            Crop::Conifer(c) => c.min_water(),
            Crop::Olive(c) => c.min_water(),
            Crop::Lettuce(c) => c.min_water(),
            Crop::Carrot(c) => c.min_water(),
        }
    }

    fn apply_water(&mut self, amount: f64) {
        match self {
            Crop::Conifer(c) => c.apply_water(amount),
            Crop::Olive(c) => c.apply_water(amount),
            Crop::Lettuce(c) => c.apply_water(amount),
            Crop::Carrot(c) => c.apply_water(amount),
        }
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} m²)", self.name(), self.surface_area())
    }
}
