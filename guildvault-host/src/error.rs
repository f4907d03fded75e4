//! Error types for the host lifecycle layer.

use thiserror::Error;

/// Top-level error type for hook, task, and registry operations.
#[derive(Error, Debug)]
pub enum HostError {
    /// The hook was constructed without a vault binding. Fatal to this
    /// hook only: the registry removes it and it stays inactive for the
    /// rest of the process.
    #[error("data vault for `{hook}` hook is not bound; check the hook constructor")]
    VaultUnbound {
        /// Name of the misconfigured hook.
        hook: String,
    },

    /// Vault, codec, config, or I/O failure from the core layer.
    #[error(transparent)]
    Core(#[from] guildvault_core::CoreError),

    /// The task already has a live schedule. Cancel it before issuing
    /// again.
    #[error("task `{task}` is already scheduled")]
    AlreadyScheduled {
        /// Name of the task.
        task: String,
    },
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, HostError>;
