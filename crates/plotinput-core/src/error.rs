//! Error types shared across the input engine.

use crate::geometry::Orientation;
use crate::module::ModuleTarget;
use thiserror::Error;

/// Errors reported by a drawing surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("Surface unavailable")]
    Unavailable,
    #[error("Draw failed: {0}")]
    Draw(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Errors raised while a strategy paints or promotes a drag.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("Non-finite drag point ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
}

/// Result type for strategy operations.
pub type StrategyResult<T> = Result<T, StrategyError>;

/// Errors raised by a module callback.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModuleError {
    #[error("Callback failed: {0}")]
    Callback(String),
    #[error(transparent)]
    Strategy(#[from] StrategyError),
}

impl ModuleError {
    /// Convenience constructor for callback failures.
    pub fn callback(message: impl Into<String>) -> Self {
        Self::Callback(message.into())
    }
}

/// Result type for module callbacks.
pub type ModuleResult = Result<(), ModuleError>;

/// Configuration errors, raised synchronously when building modules or loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Module label must not be empty")]
    EmptyLabel,
    #[error("Module '{label}' needs a {required:?} target but is bound to {target:?}")]
    OrientationMismatch {
        label: String,
        required: Orientation,
        target: ModuleTarget,
    },
    #[error("Module '{0}' is in use by the open session")]
    ModuleBusy(String),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;
