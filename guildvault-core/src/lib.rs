//! # Guildvault Core Library
//!
//! Host-agnostic data layer for pluggable game-server modules ("hooks").
//!
//! Each hook owns one typed, ordered collection of records — a [`Vault`] —
//! that round-trips through a per-hook YAML document. Three record kinds
//! are provided:
//!
//! - **Player** — guild membership entry with a privilege [`Role`]
//! - **Guild** — named team with a role state machine and validated metadata
//! - **Coin** — a wallet balance, per player or per guild
//!
//! External side effects (team creation, display-name updates) go through
//! the [`TeamDirectory`] boundary trait so hosts can plug in their own
//! command dispatcher. Nothing in this crate blocks or suspends; lifecycle
//! and scheduling live in `guildvault-host`.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod team;
pub mod vault;

pub use codec::{AnyRecord, KindRegistry, Record};
pub use config::{HostConfig, TaskConfig};
pub use error::CoreError;
pub use models::{CoinModel, GuildModel, PlayerModel, Role};
pub use team::TeamDirectory;
pub use vault::Vault;
