use super::sensor::{SensorKind, SensorListener};
use crate::error::{FincaError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Lowest temperature (°C) at which irrigation may run.
pub const TEMP_MIN: f64 = 8.0;
/// Highest temperature (°C) at which irrigation may run.
pub const TEMP_MAX: f64 = 15.0;
/// Irrigation runs only while humidity (%) is strictly below this.
pub const HUMIDITY_MAX: f64 = 50.0;

/// Rendered in status lines for a reading that has never arrived.
pub const UNSET_MARKER: &str = "unset";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrigationThresholds {
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_max: f64,
}

impl IrrigationThresholds {
    /// Inclusive on both temperature bounds, exclusive on humidity.
    pub fn allows(&self, temperature: f64, humidity: f64) -> bool {
        (self.temp_min..=self.temp_max).contains(&temperature) && humidity < self.humidity_max
    }
}

impl Default for IrrigationThresholds {
    fn default() -> Self {
        Self {
            temp_min: TEMP_MIN,
            temp_max: TEMP_MAX,
            humidity_max: HUMIDITY_MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrigationState {
    /// At least one of temperature or humidity has never been reported.
    AwaitingData,
    Idle,
    Irrigating,
}

impl IrrigationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationState::AwaitingData => "AWAITING DATA",
            IrrigationState::Idle => "IDLE",
            IrrigationState::Irrigating => "IRRIGATING",
        }
    }
}

impl std::fmt::Display for IrrigationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decides whether irrigation runs from the latest temperature and humidity.
///
/// The decision is recomputed from scratch on every notification, with no
/// hysteresis: it depends only on the most recent pair of readings.
#[derive(Debug, Clone)]
pub struct IrrigationController {
    thresholds: IrrigationThresholds,
    last_temperature: Option<f64>,
    last_humidity: Option<f64>,
    state: IrrigationState,
}

impl IrrigationController {
    pub fn new() -> Self {
        Self::with_thresholds(IrrigationThresholds::default())
    }

    pub fn with_thresholds(thresholds: IrrigationThresholds) -> Self {
        Self {
            thresholds,
            last_temperature: None,
            last_humidity: None,
            state: IrrigationState::AwaitingData,
        }
    }

    pub fn thresholds(&self) -> &IrrigationThresholds {
        &self.thresholds
    }

    pub fn state(&self) -> IrrigationState {
        self.state
    }

    pub fn irrigation_active(&self) -> bool {
        self.state == IrrigationState::Irrigating
    }

    pub fn last_temperature(&self) -> Option<f64> {
        self.last_temperature
    }

    pub fn last_humidity(&self) -> Option<f64> {
        self.last_humidity
    }

    pub fn report_status(&self) -> String {
        let label = if self.irrigation_active() {
            IrrigationState::Irrigating
        } else {
            IrrigationState::Idle
        };
        format!(
            "{} | Temp: {} | Humidity: {}",
            label,
            render(self.last_temperature),
            render(self.last_humidity)
        )
    }

    fn evaluate(&mut self) {
        let next = match (self.last_temperature, self.last_humidity) {
            (Some(t), Some(h)) if self.thresholds.allows(t, h) => IrrigationState::Irrigating,
            (Some(_), Some(_)) => IrrigationState::Idle,
            _ => IrrigationState::AwaitingData,
        };
        if next != self.state {
            info!(from = %self.state, to = %next, "Irrigation state changed");
            self.state = next;
        }
    }
}

impl Default for IrrigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorListener for IrrigationController {
    fn on_update(&mut self, kind: SensorKind, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(FincaError::InvalidParameter(format!(
                "non-finite {} reading",
                kind.as_str().to_lowercase()
            )));
        }
        match kind {
            SensorKind::Temperature => self.last_temperature = Some(value),
            SensorKind::Humidity => self.last_humidity = Some(value),
        }
        self.evaluate();
        Ok(())
    }
}

fn render(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => UNSET_MARKER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::irrigation::Sensor;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn wired() -> (Sensor, Sensor, Rc<RefCell<IrrigationController>>) {
        let controller = Rc::new(RefCell::new(IrrigationController::new()));
        let mut temp = Sensor::temperature();
        let mut hum = Sensor::humidity();
        temp.subscribe(controller.clone());
        hum.subscribe(controller.clone());
        (temp, hum, controller)
    }

    #[test]
    fn awaits_both_readings() {
        let (mut temp, _hum, controller) = wired();
        assert_eq!(controller.borrow().state(), IrrigationState::AwaitingData);
        assert_eq!(
            controller.borrow().report_status(),
            "IDLE | Temp: unset | Humidity: unset"
        );

        temp.publish(10.0);
        assert_eq!(controller.borrow().state(), IrrigationState::AwaitingData);
        assert!(!controller.borrow().irrigation_active());
        assert_eq!(
            controller.borrow().report_status(),
            "IDLE | Temp: 10 | Humidity: unset"
        );
    }

    #[test]
    fn irrigates_then_goes_idle() {
        let (mut temp, mut hum, controller) = wired();

        temp.publish(10.0);
        hum.publish(30.0);
        let first = controller.borrow().report_status();
        assert!(controller.borrow().irrigation_active());
        assert!(first.contains("IRRIGATING"));

        temp.publish(40.0);
        hum.publish(80.0);
        let second = controller.borrow().report_status();
        assert!(!controller.borrow().irrigation_active());
        assert!(second.contains("IDLE"));
        assert_ne!(first, second);
    }

    #[test]
    fn arrival_order_does_not_matter() {
        let (mut t1, mut h1, c1) = wired();
        t1.publish(12.0);
        h1.publish(20.0);

        let (mut t2, mut h2, c2) = wired();
        h2.publish(20.0);
        t2.publish(12.0);

        assert_eq!(
            c1.borrow().irrigation_active(),
            c2.borrow().irrigation_active()
        );
        assert_eq!(c1.borrow().state(), c2.borrow().state());
    }

    #[test]
    fn recomputed_on_single_value_change() {
        let (mut temp, mut hum, controller) = wired();
        temp.publish(10.0);
        hum.publish(30.0);
        assert!(controller.borrow().irrigation_active());

        // Only humidity changes
        hum.publish(50.0);
        assert!(!controller.borrow().irrigation_active());

        // And back, no hysteresis
        hum.publish(49.9);
        assert!(controller.borrow().irrigation_active());
    }

    #[test]
    fn threshold_boundaries() {
        let t = IrrigationThresholds::default();
        assert!(t.allows(TEMP_MIN, 0.0));
        assert!(t.allows(TEMP_MAX, 49.99));
        assert!(!t.allows(TEMP_MIN - 0.01, 10.0));
        assert!(!t.allows(TEMP_MAX + 0.01, 10.0));
        assert!(!t.allows(10.0, HUMIDITY_MAX));
    }

    #[test]
    fn custom_thresholds() {
        let mut controller = IrrigationController::with_thresholds(IrrigationThresholds {
            temp_min: 20.0,
            temp_max: 30.0,
            humidity_max: 70.0,
        });
        controller.on_update(SensorKind::Temperature, 25.0).unwrap();
        controller.on_update(SensorKind::Humidity, 60.0).unwrap();
        assert!(controller.irrigation_active());
        assert_eq!(
            controller.report_status(),
            "IRRIGATING | Temp: 25 | Humidity: 60"
        );
    }

    #[test]
    fn non_finite_reading_rejected_and_state_kept() {
        let mut controller = IrrigationController::new();
        controller.on_update(SensorKind::Temperature, 10.0).unwrap();
        controller.on_update(SensorKind::Humidity, 30.0).unwrap();

        assert!(controller
            .on_update(SensorKind::Humidity, f64::NAN)
            .is_err());
        assert_eq!(controller.last_humidity(), Some(30.0));
        assert!(controller.irrigation_active());
    }

    #[test]
    fn unsubscribed_controller_keeps_last_reading() {
        let (mut temp, mut hum, controller) = wired();
        temp.publish(10.0);
        hum.publish(30.0);

        assert!(temp.unsubscribe(&controller));
        temp.publish(35.0);

        assert_eq!(controller.borrow().last_temperature(), Some(10.0));
        assert!(controller.borrow().irrigation_active());
    }
}
