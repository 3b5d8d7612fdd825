//! Error type shared by the library.

use thiserror::Error;

/// Everything that can go wrong outside of silent edit rejection.
///
/// Parse failures inside settings handlers never show up here: those edits are
/// ignored and the last good state is kept.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The drawing backend failed; carries the backend's debug output.
    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("unsupported color value: {0:?}")]
    InvalidColor(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("unsupported output format: {0}")]
    UnsupportedOutput(String),

    #[error("tool was already rendered")]
    AlreadyRendered,
}

pub type Result<T> = std::result::Result<T, ChartError>;

/// Map a plotters drawing error into [`ChartError::Draw`].
pub(crate) fn draw_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Draw(format!("{e:?}"))
}
