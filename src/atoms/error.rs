// ── Paw Atoms: Error Types ─────────────────────────────────────────────────
// Single canonical error enum for the decision engine, built with `thiserror`.
//
// Design rules:
//   • `evaluate()` never returns an error. These variants cover the fallible
//     construction surface (config parsing and validation) and the custom
//     token estimator contract, whose failures the engine swallows.
//   • The `#[from]` attribute wires external decode errors automatically.

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EngineError {
    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML config decode failure.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Engine configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A custom token estimator could not produce an estimate.
    #[error("Estimator error: {estimator}: {message}")]
    Estimator { estimator: String, message: String },

    /// Catch-all for errors that do not yet have a dedicated variant.
    #[error("{0}")]
    Other(String),
}

// ── Convenience constructors ───────────────────────────────────────────────

impl EngineError {
    /// Create an estimator error with name and message.
    pub fn estimator(estimator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Estimator { estimator: estimator.into(), message: message.into() }
    }

    /// Create a config validation error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<String> for EngineError {
    fn from(s: String) -> Self {
        EngineError::Other(s)
    }
}

impl From<&str> for EngineError {
    fn from(s: &str) -> Self {
        EngineError::Other(s.to_string())
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All fallible engine operations return this type.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<EngineError> for String {
    fn from(e: EngineError) -> Self {
        e.to_string()
    }
}
