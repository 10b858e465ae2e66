use super::crop::{AbsorbWater, Crop};
use crate::error::{FincaError, Result};
use crate::logic::absorption::{AbsorptionStrategy, FullAbsorption};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plantation {
    pub name: String,
    pub total_surface: f64,
    pub available_water: f64,
    crops: Vec<Crop>,
}

impl Plantation {
    /// Fails on a non-positive surface or a negative water budget.
    pub fn new(name: impl Into<String>, total_surface: f64, available_water: f64) -> Result<Self> {
        let name = name.into();
        if !(total_surface > 0.0) {
            return Err(FincaError::InsufficientSurface(format!(
                "plantation '{}' must have a positive surface, got {}",
                name, total_surface
            )));
        }
        if !(available_water >= 0.0) {
            return Err(FincaError::InvalidParameter(format!(
                "plantation '{}' water must be non-negative, got {}",
                name, available_water
            )));
        }
        Ok(Self {
            name,
            total_surface,
            available_water,
            crops: Vec::new(),
        })
    }

    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    pub fn used_surface(&self) -> f64 {
        self.crops.iter().map(Crop::surface_area).sum()
    }

    pub fn remaining_surface(&self) -> f64 {
        (self.total_surface - self.used_surface()).max(0.0)
    }

    /// Adds a crop if it fits in the surface still free at this moment.
    pub fn add_crop(&mut self, crop: Crop) -> Result<()> {
        if !(crop.surface_area() > 0.0) {
            return Err(FincaError::InsufficientSurface(format!(
                "{} must have a positive surface, got {}",
                crop.name(),
                crop.surface_area()
            )));
        }
        let remaining = self.remaining_surface();
        if !(crop.surface_area() <= remaining) {
            return Err(FincaError::InsufficientSurface(format!(
                "{} needs {} m² but plantation '{}' has {} m² left",
                crop.name(),
                crop.surface_area(),
                self.name,
                remaining
            )));
        }
        debug!(plantation = %self.name, crop = %crop, "Crop added");
        self.crops.push(crop);
        Ok(())
    }

    pub fn water_all(&mut self, amount: f64) -> Result<()> {
        self.water_all_with(amount, &FullAbsorption)
    }

    /// Waters every crop with the strategy's effective share of `amount`.
    ///
    /// All checks run before any crop is touched: a shortage of water in the
    /// plantation or a crop below its minimum leaves everything unchanged.
    pub fn water_all_with(&mut self, amount: f64, strategy: &dyn AbsorptionStrategy) -> Result<()> {
        if !(amount >= 0.0) {
            return Err(FincaError::InvalidParameter(format!(
                "watering amount must be non-negative, got {}",
                amount
            )));
        }
        if amount > self.available_water {
            return Err(FincaError::WaterShortage {
                requested: amount,
                available: self.available_water,
            });
        }

        let effective = strategy.effective_amount(amount);
        for crop in &self.crops {
            crop.check_water(effective)?;
        }
        for crop in &mut self.crops {
            crop.apply_water(effective);
        }
        self.available_water -= amount;

        debug!(
            plantation = %self.name,
            amount,
            effective,
            remaining_water = self.available_water,
            "Plantation watered"
        );
        Ok(())
    }
}

impl std::fmt::Display for Plantation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} m², {} crops, {} L water)",
            self.name,
            self.total_surface,
            self.crops.len(),
            self.available_water
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::absorption::ConstantAbsorption;
    use crate::models::{Carrot, Conifer, CropVariant, Lettuce, Olive, OliveVariety, Tree, Vegetable};

    fn mixed_plantation() -> Plantation {
        let mut p = Plantation::new("North Field", 10000.0, 500.0).unwrap();
        p.add_crop(Conifer::new(10.0, 1.0).into_crop()).unwrap();
        p.add_crop(Olive::new(8.0, 1.2, OliveVariety::Manzanilla).into_crop())
            .unwrap();
        p.add_crop(Lettuce::new(2.0, 60).into_crop()).unwrap();
        p
    }

    #[test]
    fn water_shortage_leaves_budget_untouched() {
        let mut p = mixed_plantation();
        let before = p.clone();
        let err = p.water_all(600.0).unwrap_err();
        assert!(matches!(err, FincaError::WaterShortage { .. }));
        assert_eq!(p.available_water, 500.0);
        assert_eq!(p, before);
    }

    #[test]
    fn watering_applies_every_crop_effect() {
        let mut p = mixed_plantation();
        p.water_all(20.0).unwrap();
        assert_eq!(p.available_water, 480.0);

        let crops = p.crops();
        assert!((crops[0].as_tree().unwrap().height() - 1.05).abs() < 1e-9);
        assert!((crops[1].as_tree().unwrap().annual_yield() - 4.0).abs() < 1e-9);
        assert!(crops[2].as_vegetable().unwrap().is_watered());
    }

    #[test]
    fn crop_minimum_failure_is_all_or_nothing() {
        let mut p = mixed_plantation();
        let before = p.clone();
        // Enough for lettuce and olive, not for the conifer
        let err = p.water_all(6.0).unwrap_err();
        assert!(matches!(err, FincaError::InsufficientWater { .. }));
        assert_eq!(p, before);
    }

    #[test]
    fn add_crop_checks_remaining_surface() {
        let mut p = Plantation::new("Small Plot", 12.0, 100.0).unwrap();
        p.add_crop(Conifer::new(10.0, 1.0).into_crop()).unwrap();
        assert_eq!(p.remaining_surface(), 2.0);

        let err = p.add_crop(Carrot::new(3.0, 80, 0.3).into_crop()).unwrap_err();
        assert!(matches!(err, FincaError::InsufficientSurface(_)));
        assert_eq!(p.crops().len(), 1);

        // Exactly fills the plot
        p.add_crop(Lettuce::new(2.0, 60).into_crop()).unwrap();
        assert_eq!(p.remaining_surface(), 0.0);
    }

    #[test]
    fn negative_amount_rejected() {
        let mut p = mixed_plantation();
        assert!(matches!(
            p.water_all(-5.0),
            Err(FincaError::InvalidParameter(_))
        ));
        assert_eq!(p.available_water, 500.0);
    }

    #[test]
    fn strategy_scales_what_crops_receive() {
        let mut p = Plantation::new("Olive Grove", 100.0, 100.0).unwrap();
        p.add_crop(Olive::new(8.0, 1.2, OliveVariety::Picual).into_crop())
            .unwrap();

        // 0.8 * 6 = 4.8, below the olive minimum of 5
        assert!(p.water_all_with(6.0, &ConstantAbsorption).is_err());
        assert_eq!(p.available_water, 100.0);

        p.water_all_with(10.0, &ConstantAbsorption).unwrap();
        assert_eq!(p.available_water, 90.0);
        assert!((p.crops()[0].as_tree().unwrap().annual_yield() - 1.6).abs() < 1e-9);
    }

    #[test]
    fn empty_plantation_still_spends_water() {
        let mut p = Plantation::new("Fallow", 50.0, 100.0).unwrap();
        p.water_all(30.0).unwrap();
        assert_eq!(p.available_water, 70.0);
    }

    #[test]
    fn non_positive_crop_surface_rejected() {
        let mut p = Plantation::new("Tiny", 10.0, 100.0).unwrap();
        let mut conifer = Conifer::new(10.0, 1.0);
        conifer.surface_area = -50.0;
        let err = p.add_crop(conifer.into_crop()).unwrap_err();
        assert!(matches!(err, FincaError::InsufficientSurface(_)));
        assert_eq!(p.remaining_surface(), 10.0);

        let mut lettuce = Lettuce::new(2.0, 60);
        lettuce.surface_area = 0.0;
        assert!(p.add_crop(lettuce.into_crop()).is_err());

        // The surface cap still holds after the rejected crops
        for _ in 0..5 {
            p.add_crop(Lettuce::new(2.0, 60).into_crop()).unwrap();
        }
        assert!(p.add_crop(Lettuce::new(2.0, 60).into_crop()).is_err());
        assert!(p.used_surface() <= p.total_surface);
    }

    #[test]
    fn invalid_plantation_rejected() {
        assert!(matches!(
            Plantation::new("Empty", 0.0, 100.0),
            Err(FincaError::InsufficientSurface(_))
        ));
        assert!(matches!(
            Plantation::new("Negative", -10.0, 100.0),
            Err(FincaError::InsufficientSurface(_))
        ));
        assert!(matches!(
            Plantation::new("Dry", 10.0, -1.0),
            Err(FincaError::InvalidParameter(_))
        ));
        assert!(Plantation::new("Dry", 10.0, 0.0).is_ok());
    }
}
