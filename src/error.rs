use crate::models::CropKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FincaError {
    #[error("Insufficient water for {kind}: needs at least {required} L, got {given} L")]
    InsufficientWater {
        kind: CropKind,
        required: f64,
        given: f64,
    },

    #[error("Water shortage: requested {requested} L but only {available} L available")]
    WaterShortage { requested: f64, available: f64 },

    #[error("Insufficient surface: {0}")]
    InsufficientSurface(String),

    #[error("Unknown crop kind: {0}")]
    UnknownCropKind(String),

    #[error("No handler registered for crop kind {0}")]
    UnregisteredHandler(CropKind),

    #[error("Persistence error{}", .0.as_deref().map(|d| format!(": {}", d)).unwrap_or_default())]
    Persistence(Option<String>),

    #[error("Listener unavailable: {0}")]
    ListenerUnavailable(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FincaError {
    pub fn persistence(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if detail.is_empty() {
            FincaError::Persistence(None)
        } else {
            FincaError::Persistence(Some(detail))
        }
    }
}

pub type Result<T> = std::result::Result<T, FincaError>;
