use super::absorption::AbsorptionStrategy;
use crate::error::{FincaError, Result};
use crate::models::{Crop, ForestRegistry, Land, Plantation};
use tracing::{debug, info};

/// Water budget (L) given to a plantation created alongside a new farm.
pub const DEFAULT_PLANTATION_WATER: f64 = 100.0;

/// Creates farms (a land plot plus its plantation) and keeps them on record.
#[derive(Debug, Clone)]
pub struct FarmService {
    lands: Vec<Land>,
    registry: ForestRegistry,
    default_water: f64,
}

impl FarmService {
    pub fn new(default_water: f64) -> Self {
        Self::with_registry(default_water, ForestRegistry::new())
    }

    /// Resumes from a previously saved registry. Land records are not part
    /// of the registry and start empty.
    pub fn with_registry(default_water: f64, registry: ForestRegistry) -> Self {
        Self {
            lands: Vec::new(),
            registry,
            default_water,
        }
    }

    pub fn create_farm(
        &mut self,
        cadastral_id: u32,
        surface: f64,
        address: &str,
        plantation_name: &str,
    ) -> Result<&Land> {
        if !(surface > 0.0) {
            return Err(FincaError::InsufficientSurface(format!(
                "land {} must have a positive surface, got {}",
                cadastral_id, surface
            )));
        }

        let plantation = Plantation::new(plantation_name, surface, self.default_water)?;
        let land = Land::new(cadastral_id, surface, address, plantation_name);

        self.registry.add(plantation);
        self.lands.retain(|l| l.cadastral_id != cadastral_id);
        self.lands.push(land);

        info!(
            cadastral_id,
            surface,
            plantation = plantation_name,
            "Farm created"
        );
        self.lands
            .last()
            .ok_or_else(|| FincaError::NotFound(format!("land {}", cadastral_id)))
    }

    pub fn list_lands(&self) -> &[Land] {
        &self.lands
    }

    pub fn list_plantations(&self) -> &[Plantation] {
        self.registry.list()
    }

    pub fn find_plantation(&self, name: &str) -> Option<&Plantation> {
        self.registry.find(name)
    }

    pub fn find_plantation_mut(&mut self, name: &str) -> Option<&mut Plantation> {
        self.registry.find_mut(name)
    }

    pub fn plantation_of(&self, land: &Land) -> Option<&Plantation> {
        self.registry.find(&land.plantation_name)
    }

    /// Drops the plantation and any land pointing at it.
    pub fn remove_farm(&mut self, plantation_name: &str) -> bool {
        let removed = self.registry.remove(plantation_name);
        self.lands.retain(|l| l.plantation_name != plantation_name);
        if removed {
            info!(plantation = plantation_name, "Farm removed");
        }
        removed
    }

    pub fn plant(&mut self, plantation_name: &str, crop: Crop) -> Result<()> {
        let plantation = self.require_mut(plantation_name)?;
        plantation.add_crop(crop)
    }

    pub fn water(&mut self, plantation_name: &str, amount: f64) -> Result<()> {
        let plantation = self.require_mut(plantation_name)?;
        plantation.water_all(amount)?;
        debug!(
            plantation = plantation_name,
            amount,
            remaining = plantation.available_water,
            "Watering done"
        );
        Ok(())
    }

    pub fn water_with(
        &mut self,
        plantation_name: &str,
        amount: f64,
        strategy: &dyn AbsorptionStrategy,
    ) -> Result<()> {
        self.require_mut(plantation_name)?
            .water_all_with(amount, strategy)
    }

    pub fn registry(&self) -> &ForestRegistry {
        &self.registry
    }

    fn require_mut(&mut self, name: &str) -> Result<&mut Plantation> {
        self.registry
            .find_mut(name)
            .ok_or_else(|| FincaError::NotFound(format!("plantation '{}'", name)))
    }
}

impl Default for FarmService {
    fn default() -> Self {
        Self::new(DEFAULT_PLANTATION_WATER)
    }
}
