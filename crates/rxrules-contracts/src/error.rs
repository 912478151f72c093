//! Error types for the rxrules crates.
//!
//! The recommendation engine itself never fails. Errors only arise at the
//! edges: parsing typed values out of raw text, loading configuration, and
//! running the HTTP server.

use thiserror::Error;

/// The unified error type for the rxrules workspace.
#[derive(Debug, Error)]
pub enum RxError {
    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A symptom name did not match any recognized symptom.
    #[error("unknown symptom '{name}'")]
    UnknownSymptom { name: String },

    /// A condition name did not match any recognized condition.
    #[error("unknown condition '{name}'")]
    UnknownCondition { name: String },

    /// A caller supplied input the boundary could not interpret.
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// A value could not be encoded for output.
    #[error("serialization error: {reason}")]
    SerializationError { reason: String },

    /// One or more reference scenarios produced an unexpected recommendation.
    #[error("{failed} of {total} reference scenario(s) produced unexpected output")]
    ScenarioFailed { failed: usize, total: usize },

    /// The HTTP server failed to bind or stopped unexpectedly.
    #[error("server error: {reason}")]
    ServerError { reason: String },
}

/// Convenience alias used throughout the rxrules crates.
pub type RxResult<T> = Result<T, RxError>;
