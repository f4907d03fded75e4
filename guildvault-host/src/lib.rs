//! # Guildvault Host Library
//!
//! Lifecycle layer binding `guildvault-core` vaults to a running host
//! process:
//!
//! - [`FileStore`] — one YAML document per hook under the host data dir
//! - [`Task`] — a named unit of work bound to a lifecycle [`Trigger`],
//!   scheduled on the host's tokio runtime
//! - [`Hook`] — mediates load/save and task launch/stop for one module
//! - [`Registry`] — drives load-all, launch, stop-all, save-all at
//!   process start and stop
//!
//! Failures stay local: a misconfigured hook deregisters itself, I/O
//! errors surface as results plus logs, and the process keeps running
//! with whatever hooks remain valid.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod hook;
pub mod hooks;
pub mod registry;
pub mod store;
pub mod task;
pub mod team;

pub use error::HostError;
pub use hook::{Hook, HookLifecycle, SharedVault};
pub use registry::Registry;
pub use store::FileStore;
pub use task::{Task, Trigger};
