//! Host-side [`TeamDirectory`] implementation.
//!
//! The host has no real scoreboard backend, so team side effects are
//! surfaced through the log. Embedders with an actual team system
//! provide their own `TeamDirectory` instead.

use serde_json::Value;
use tracing::info;

use guildvault_core::team::TeamDirectory;

/// Team directory that logs each call at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTeamDirectory;

impl TeamDirectory for LogTeamDirectory {
    fn create_team(&self, owner: &str, display_name: &Value) {
        info!(team = owner, display = %display_name, "team created");
    }

    fn join_team(&self, player: &str, team: &str) {
        info!(player, team, "player joined team");
    }

    fn set_display_name(&self, team: &str, display_name: &Value) {
        info!(team, display = %display_name, "team display name updated");
    }

    fn set_prefix(&self, team: &str, prefix: &Value) {
        info!(team, %prefix, "team prefix updated");
    }
}
