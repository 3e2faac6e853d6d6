//! Error types for core functionality.

use thiserror::Error;

/// Errors that can occur during application setup and configuration handling.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// The rules engine could not be constructed
    #[error("Engine initialization failed: {message}")]
    EngineInit { message: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
