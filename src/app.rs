use crate::config::Config;
use crate::db::PackageStore;
use crate::error::{FincaError, Result};
use crate::logic::irrigation::{IrrigationController, SimulatedReader};
use crate::logic::{CropDispatchRegistry, FarmService, WorkerService};
use crate::models::ForestRegistry;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything built once at process start and handed to the rest of the
/// program. The crop dispatch registry lives here: there is exactly one, and
/// every consumer receives it through [`App::registry`].
pub struct App {
    pub config: Config,
    pub farms: FarmService,
    pub workers: WorkerService,
    pub store: PackageStore,
    registry: Arc<CropDispatchRegistry>,
}

impl App {
    pub fn new(config: Config, store: PackageStore) -> Self {
        Self::with_registry(config, store, CropDispatchRegistry::new())
    }

    pub fn with_registry(
        config: Config,
        store: PackageStore,
        registry: CropDispatchRegistry,
    ) -> Self {
        let farms = FarmService::new(config.farm.default_water);
        Self {
            config,
            farms,
            workers: WorkerService::new(),
            store,
            registry: Arc::new(registry),
        }
    }

    /// Returns the same registry instance on every call.
    pub fn registry(&self) -> Arc<CropDispatchRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn controller(&self) -> IrrigationController {
        IrrigationController::with_thresholds(self.config.irrigation)
    }

    pub fn reader(&self) -> SimulatedReader {
        let sim = &self.config.simulation;
        SimulatedReader::new(sim.seed).with_ranges(sim.temperature_range, sim.humidity_range)
    }

    /// One dispatch-registry report line per crop in the plantation.
    pub fn report_plantation(&self, name: &str) -> Result<Vec<String>> {
        let plantation = self
            .farms
            .find_plantation(name)
            .ok_or_else(|| FincaError::NotFound(format!("plantation '{}'", name)))?;
        self.registry.display_all(plantation.crops())
    }

    pub fn save_registry(&self, name: &str) -> Result<PathBuf> {
        self.store.save(self.farms.registry(), name)
    }

    /// Replaces the farm records with a saved registry.
    pub fn load_registry(&mut self, name: &str) -> Result<()> {
        let registry: ForestRegistry = self.store.load(name)?;
        self.farms = FarmService::with_registry(self.config.farm.default_water, registry);
        Ok(())
    }
}
