/// Error types for the widget core.
use thiserror::Error;

/// Errors from interpreting a widget's stored control values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required control '{0}' has no stored value")]
    MissingControl(&'static str),
    #[error("timezone value '{value}' is not a catalog index")]
    InvalidTimezone { value: String },
    #[error("timezone index {index} is outside the catalog (len {len})")]
    TimezoneOutOfRange { index: usize, len: usize },
    #[error("format value '{value}' is not a known time format")]
    InvalidFormat { value: String },
}

/// Errors from producing a button image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot allocate a {width}x{height} button surface")]
    Surface { width: u32, height: u32 },
}

/// Errors from arming the minute-boundary refresh timer.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("refresh scheduler is already running")]
    AlreadyStarted,
    #[error("no tokio runtime available to arm the refresh timer")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
