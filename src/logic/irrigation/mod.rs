pub mod controller;
pub mod reader;
pub mod sensor;

pub use controller::{
    IrrigationController, IrrigationState, IrrigationThresholds, HUMIDITY_MAX, TEMP_MAX, TEMP_MIN,
};
pub use reader::SimulatedReader;
pub use sensor::{PublishReport, Sensor, SensorKind, SensorListener, SharedListener};
