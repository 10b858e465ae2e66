use super::sensor::{PublishReport, Sensor, SensorKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const TEMPERATURE_RANGE: [f64; 2] = [5.0, 40.0];
pub const HUMIDITY_RANGE: [f64; 2] = [10.0, 80.0];

/// Stand-in for field hardware: draws uniform readings and publishes them.
pub struct SimulatedReader {
    rng: StdRng,
    temperature_range: [f64; 2],
    humidity_range: [f64; 2],
}

impl SimulatedReader {
    /// Seeded readers produce the same sequence on every run.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            temperature_range: TEMPERATURE_RANGE,
            humidity_range: HUMIDITY_RANGE,
        }
    }

    pub fn with_ranges(mut self, temperature: [f64; 2], humidity: [f64; 2]) -> Self {
        self.temperature_range = temperature;
        self.humidity_range = humidity;
        self
    }

    pub fn sample(&mut self, kind: SensorKind) -> f64 {
        let [lo, hi] = match kind {
            SensorKind::Temperature => self.temperature_range,
            SensorKind::Humidity => self.humidity_range,
        };
        let raw = if hi > lo && lo.is_finite() && hi.is_finite() {
            self.rng.gen_range(lo..=hi)
        } else {
            lo
        };
        (raw * 100.0).round() / 100.0
    }

    /// Samples a value for the sensor's kind and publishes it.
    pub fn read(&mut self, sensor: &mut Sensor) -> (f64, PublishReport) {
        let value = self.sample(sensor.kind());
        let report = sensor.publish(value);
        (value, report)
    }
}
