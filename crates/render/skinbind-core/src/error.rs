//! Error types for skinbind.
//!
//! Resolution failures never reach the orchestrator as errors: resolvers collapse them to
//! `None`. These types cover the loader boundary and configuration parsing.

use thiserror::Error;

/// Failure reported by a [`crate::cache::PlayerLoader`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The profile is unknown to the loader's backing store.
    #[error("profile not found")]
    ProfileNotFound,

    /// The model definition for the key could not be built.
    #[error("definition for '{unique}' failed: {message}")]
    Definition { unique: String, message: String },

    /// Upstream profile/skin source failed.
    #[error("profile source error: {0}")]
    Source(String),
}

/// Invalid or unparsable configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
