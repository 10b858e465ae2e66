use chrono::{Datelike, Local, NaiveDate};

/// Share of the water poured on a plantation that each crop actually takes in.
pub trait AbsorptionStrategy {
    fn effective_amount(&self, amount: f64) -> f64;
}

/// Crops receive the full amount.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullAbsorption;

impl AbsorptionStrategy for FullAbsorption {
    fn effective_amount(&self, amount: f64) -> f64 {
        amount
    }
}

pub const CONSTANT_ABSORPTION_FACTOR: f64 = 0.8;

/// Fixed loss to runoff and evaporation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantAbsorption;

impl AbsorptionStrategy for ConstantAbsorption {
    fn effective_amount(&self, amount: f64) -> f64 {
        amount * CONSTANT_ABSORPTION_FACTOR
    }
}

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Southern-hemisphere seasons: Dec-Feb is summer, Jun-Aug is winter.
pub const SUMMER_FACTOR: f64 = 1.1;
pub const WINTER_FACTOR: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Summer,
    Winter,
    Mild,
}

impl Season {
    pub fn for_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Summer,
            6..=8 => Season::Winter,
            _ => Season::Mild,
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            Season::Summer => SUMMER_FACTOR,
            Season::Winter => WINTER_FACTOR,
            Season::Mild => 1.0,
        }
    }
}

/// Absorption that follows the season of the injected clock's current month.
#[derive(Debug, Clone, Default)]
pub struct SeasonalAbsorption<C: Clock = SystemClock> {
    clock: C,
}

impl<C: Clock> SeasonalAbsorption<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn current_season(&self) -> Season {
        Season::for_month(self.clock.today().month())
    }
}

impl<C: Clock> AbsorptionStrategy for SeasonalAbsorption<C> {
    fn effective_amount(&self, amount: f64) -> f64 {
        amount * self.current_season().factor()
    }
}
