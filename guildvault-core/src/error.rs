//! Error types for the guildvault core library.

use thiserror::Error;

/// Top-level error type for vault, codec, and configuration operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The persisted document carries no `data` key. This is the explicit
    /// "no vault" signal — never silently replaced by an empty vault.
    #[error("no vault data: document has no `data` key")]
    MissingData,

    /// A record in the vault document broke the strict field chain
    /// (missing or mistyped field, or wrong kind tag).
    #[error("undecodable {kind} record in vault document")]
    Decode {
        /// Kind tag of the record that failed to decode.
        kind: String,
    },

    /// Configuration error (bad TOML, duplicate codec kind tag).
    #[error("configuration error: {0}")]
    Config(String),

    /// YAML document read/write failure.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, CoreError>;
