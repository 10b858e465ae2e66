use crate::error::{FincaError, Result};
use crate::models::{Carrot, Conifer, Crop, CropKind, CropVariant, Lettuce, Olive, OliveVariety};
use serde_json::{Map, Value};
use tracing::debug;

pub const CONIFER_DEFAULT_SURFACE: f64 = 10.0;
pub const CONIFER_DEFAULT_HEIGHT: f64 = 1.0;
pub const OLIVE_DEFAULT_SURFACE: f64 = 8.0;
pub const OLIVE_DEFAULT_HEIGHT: f64 = 1.2;
pub const LETTUCE_DEFAULT_SURFACE: f64 = 2.0;
pub const LETTUCE_DEFAULT_GROWTH_DAYS: u32 = 60;
pub const CARROT_DEFAULT_SURFACE: f64 = 3.0;
pub const CARROT_DEFAULT_GROWTH_DAYS: u32 = 80;
pub const CARROT_DEFAULT_DEPTH: f64 = 0.3;

/// Loosely-typed construction parameters, e.g. `{"surface": 12, "height": 2.5}`.
///
/// Recognized keys: `surface`, `height`, `variety`, `growth_days`, `depth`.
/// Keys a kind does not use are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropParams(Map<String, Value>);

impl CropParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(FincaError::InvalidParameter(format!(
                "crop parameters must be an object, got {}",
                other
            ))),
        }
    }

    fn f64_or(&self, key: &str, default: f64) -> Result<f64> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(v) => v.as_f64().ok_or_else(|| {
                FincaError::InvalidParameter(format!("'{}' must be a number, got {}", key, v))
            }),
        }
    }

    fn u32_or(&self, key: &str, default: u32) -> Result<u32> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    FincaError::InvalidParameter(format!(
                        "'{}' must be a non-negative integer, got {}",
                        key, v
                    ))
                }),
        }
    }

    fn str_opt(&self, key: &str) -> Result<Option<&str>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(v) => Err(FincaError::InvalidParameter(format!(
                "'{}' must be a string, got {}",
                key, v
            ))),
        }
    }
}

/// Single construction path for crops.
pub struct CropFactory;

impl CropFactory {
    pub fn create(kind: &str, params: &CropParams) -> Result<Crop> {
        let crop_kind =
            CropKind::from_str(kind).ok_or_else(|| FincaError::UnknownCropKind(kind.to_string()))?;

        let crop = match crop_kind {
            CropKind::Conifer => {
                let surface = surface(params, CONIFER_DEFAULT_SURFACE)?;
                let height = non_negative(params, "height", CONIFER_DEFAULT_HEIGHT)?;
                Conifer::new(surface, height).into_crop()
            }
            CropKind::Olive => {
                let surface = surface(params, OLIVE_DEFAULT_SURFACE)?;
                let height = non_negative(params, "height", OLIVE_DEFAULT_HEIGHT)?;
                let variety = match params.str_opt("variety")? {
                    Some(s) => OliveVariety::from_str(s).ok_or_else(|| {
                        FincaError::InvalidParameter(format!("unknown olive variety '{}'", s))
                    })?,
                    None => OliveVariety::default(),
                };
                Olive::new(surface, height, variety).into_crop()
            }
            CropKind::Lettuce => {
                let surface = surface(params, LETTUCE_DEFAULT_SURFACE)?;
                let days = growth_days(params, LETTUCE_DEFAULT_GROWTH_DAYS)?;
                Lettuce::new(surface, days).into_crop()
            }
            CropKind::Carrot => {
                let surface = surface(params, CARROT_DEFAULT_SURFACE)?;
                let days = growth_days(params, CARROT_DEFAULT_GROWTH_DAYS)?;
                let depth = non_negative(params, "depth", CARROT_DEFAULT_DEPTH)?;
                Carrot::new(surface, days, depth).into_crop()
            }
        };

        debug!(kind = %crop_kind, surface = crop.surface_area(), "Crop created");
        Ok(crop)
    }
}

fn surface(params: &CropParams, default: f64) -> Result<f64> {
    let value = params.f64_or("surface", default)?;
    if !(value > 0.0) {
        return Err(FincaError::InsufficientSurface(format!(
            "crop surface must be positive, got {}",
            value
        )));
    }
    Ok(value)
}

fn non_negative(params: &CropParams, key: &str, default: f64) -> Result<f64> {
    let value = params.f64_or(key, default)?;
    if !(value >= 0.0) {
        return Err(FincaError::InvalidParameter(format!(
            "'{}' must be non-negative, got {}",
            key, value
        )));
    }
    Ok(value)
}

fn growth_days(params: &CropParams, default: u32) -> Result<u32> {
    let days = params.u32_or("growth_days", default)?;
    if days == 0 {
        return Err(FincaError::InvalidParameter(
            "'growth_days' must be greater than zero".into(),
        ));
    }
    Ok(days)
}
