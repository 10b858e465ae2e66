use crate::error::{FincaError, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    Temperature,
    Humidity,
}

impl SensorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "Temperature",
            SensorKind::Humidity => "Humidity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "°C",
            SensorKind::Humidity => "%",
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receives every reading published by the sensors it is subscribed to.
pub trait SensorListener {
    fn on_update(&mut self, kind: SensorKind, value: f64) -> Result<()>;
}

pub type SharedListener = Rc<RefCell<dyn SensorListener>>;

#[derive(Debug)]
pub struct ListenerFailure {
    /// Position of the listener in subscription order.
    pub position: usize,
    pub error: FincaError,
}

/// Outcome of a single publish. Listener failures are isolated: one failing
/// listener never prevents the ones after it from being notified.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub notified: usize,
    pub failures: Vec<ListenerFailure>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Observable temperature or humidity source.
pub struct Sensor {
    kind: SensorKind,
    last_value: Option<f64>,
    listeners: Vec<SharedListener>,
}

impl Sensor {
    pub fn new(kind: SensorKind) -> Self {
        Self {
            kind,
            last_value: None,
            listeners: Vec::new(),
        }
    }

    pub fn temperature() -> Self {
        Self::new(SensorKind::Temperature)
    }

    pub fn humidity() -> Self {
        Self::new(SensorKind::Humidity)
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Returns false if the listener was already subscribed.
    pub fn subscribe(&mut self, listener: SharedListener) -> bool {
        if self.position_of(&listener).is_some() {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Returns false if the listener was not subscribed.
    pub fn unsubscribe<L: ?Sized>(&mut self, listener: &Rc<RefCell<L>>) -> bool {
        match self.position_of(listener) {
            Some(idx) => {
                self.listeners.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Records the reading, then notifies every listener in subscription order.
    pub fn publish(&mut self, value: f64) -> PublishReport {
        self.last_value = Some(value);
        trace!(sensor = %self.kind, value, "Publishing reading");

        let mut report = PublishReport::default();
        for (position, listener) in self.listeners.iter().enumerate() {
            let outcome = match listener.try_borrow_mut() {
                Ok(mut l) => l.on_update(self.kind, value),
                Err(_) => Err(FincaError::ListenerUnavailable(format!(
                    "listener {} is already borrowed",
                    position
                ))),
            };
            match outcome {
                Ok(()) => report.notified += 1,
                Err(error) => {
                    warn!(sensor = %self.kind, position, %error, "Listener failed to handle reading");
                    report.failures.push(ListenerFailure { position, error });
                }
            }
        }
        report
    }

    fn position_of<L: ?Sized>(&self, listener: &Rc<RefCell<L>>) -> Option<usize> {
        let target = Rc::as_ptr(listener) as *const ();
        self.listeners
            .iter()
            .position(|l| Rc::as_ptr(l) as *const () == target)
    }
}

impl std::fmt::Debug for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sensor")
            .field("kind", &self.kind)
            .field("last_value", &self.last_value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(SensorKind, f64)>,
    }

    impl Recorder {
        fn last(&self) -> Option<f64> {
            self.seen.last().map(|(_, v)| *v)
        }
    }

    impl SensorListener for Recorder {
        fn on_update(&mut self, kind: SensorKind, value: f64) -> Result<()> {
            self.seen.push((kind, value));
            Ok(())
        }
    }

    struct Failing;

    impl SensorListener for Failing {
        fn on_update(&mut self, _kind: SensorKind, _value: f64) -> Result<()> {
            Err(FincaError::InvalidParameter("rejected".into()))
        }
    }

    #[test]
    fn publish_records_last_value() {
        let mut sensor = Sensor::temperature();
        assert_eq!(sensor.last_value(), None);
        let report = sensor.publish(21.5);
        assert_eq!(sensor.last_value(), Some(21.5));
        assert_eq!(report.notified, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn listeners_receive_kind_and_value() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut sensor = Sensor::humidity();
        sensor.subscribe(recorder.clone());

        sensor.publish(40.0);
        sensor.publish(45.0);
        assert_eq!(
            recorder.borrow().seen,
            vec![(SensorKind::Humidity, 40.0), (SensorKind::Humidity, 45.0)]
        );
    }

    #[test]
    fn duplicate_subscribe_notifies_once() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut sensor = Sensor::temperature();
        assert!(sensor.subscribe(recorder.clone()));
        assert!(!sensor.subscribe(recorder.clone()));
        assert_eq!(sensor.listener_count(), 1);

        let report = sensor.publish(12.0);
        assert_eq!(report.notified, 1);
        assert_eq!(recorder.borrow().seen.len(), 1);
    }

    #[test]
    fn unsubscribe_freezes_listener_value() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut sensor = Sensor::temperature();
        sensor.subscribe(recorder.clone());

        sensor.publish(10.0);
        assert!(sensor.unsubscribe(&recorder));
        assert!(!sensor.unsubscribe(&recorder));
        sensor.publish(30.0);

        assert_eq!(recorder.borrow().last(), Some(10.0));
        assert_eq!(sensor.last_value(), Some(30.0));
    }

    #[test]
    fn notification_follows_subscription_order() {
        let order = Rc::new(RefCell::new(Vec::new()));

        struct Tagged(&'static str, Rc<RefCell<Vec<&'static str>>>);
        impl SensorListener for Tagged {
            fn on_update(&mut self, _kind: SensorKind, _value: f64) -> Result<()> {
                self.1.borrow_mut().push(self.0);
                Ok(())
            }
        }

        let mut sensor = Sensor::humidity();
        sensor.subscribe(Rc::new(RefCell::new(Tagged("first", order.clone()))));
        sensor.subscribe(Rc::new(RefCell::new(Tagged("second", order.clone()))));
        sensor.subscribe(Rc::new(RefCell::new(Tagged("third", order.clone()))));
        sensor.publish(50.0);

        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn failing_listener_is_isolated() {
        let before = Rc::new(RefCell::new(Recorder::default()));
        let after = Rc::new(RefCell::new(Recorder::default()));
        let mut sensor = Sensor::temperature();
        sensor.subscribe(before.clone());
        sensor.subscribe(Rc::new(RefCell::new(Failing)));
        sensor.subscribe(after.clone());

        let report = sensor.publish(9.0);
        assert_eq!(report.notified, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].position, 1);
        assert_eq!(before.borrow().last(), Some(9.0));
        assert_eq!(after.borrow().last(), Some(9.0));
    }

    #[test]
    fn borrowed_listener_reported_not_panicking() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut sensor = Sensor::temperature();
        sensor.subscribe(recorder.clone());

        let guard = recorder.borrow_mut();
        let report = sensor.publish(11.0);
        drop(guard);

        assert_eq!(report.notified, 0);
        assert!(matches!(
            report.failures[0].error,
            FincaError::ListenerUnavailable(_)
        ));
        assert!(recorder.borrow().seen.is_empty());
    }
}
