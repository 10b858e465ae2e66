pub mod absorption;
pub mod dispatch;
pub mod factory;
pub mod farm;
pub mod irrigation;
pub mod workers;

pub use absorption::{AbsorptionStrategy, ConstantAbsorption, FullAbsorption, SeasonalAbsorption};
pub use dispatch::CropDispatchRegistry;
pub use factory::{CropFactory, CropParams};
pub use farm::FarmService;
pub use workers::WorkerService;
