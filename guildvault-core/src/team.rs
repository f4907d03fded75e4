//! Team directory boundary — the host-side service that owns scoreboard
//! teams and their display text.
//!
//! Guild operations fire these calls and never consult a return value;
//! the directory is free to batch, drop, or replay them. Payloads use the
//! host's text-component JSON shape.

use serde_json::{json, Value};

/// Side-effecting team operations implemented by the host.
pub trait TeamDirectory: Send + Sync {
    /// Create a team owned by `owner` with an initial display payload.
    fn create_team(&self, owner: &str, display: &Value);

    /// Add `player` to `team`.
    fn join_team(&self, player: &str, team: &str);

    /// Update the team's display name.
    fn set_display_name(&self, team: &str, display: &Value);

    /// Update the team's chat prefix.
    fn set_prefix(&self, team: &str, prefix: &Value);
}

/// Directory that ignores every call. Useful for hosts without a team
/// system and for pure-data tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTeamDirectory;

impl TeamDirectory for NullTeamDirectory {
    fn create_team(&self, _owner: &str, _display: &Value) {}
    fn join_team(&self, _player: &str, _team: &str) {}
    fn set_display_name(&self, _team: &str, _display: &Value) {}
    fn set_prefix(&self, _team: &str, _prefix: &Value) {}
}

/// Text component used when first creating a team.
#[must_use]
pub fn creation_payload(name: &str) -> Value {
    json!({ "text": name })
}

/// Colored display-name component for a guild.
#[must_use]
pub fn display_payload(name: &str, color: &str) -> Value {
    json!([{ "text": name, "color": color }])
}

/// Colored chat-prefix component, rendered as `[prefix] `.
#[must_use]
pub fn prefix_payload(prefix: &str, color: &str) -> Value {
    json!([{ "text": format!("[{prefix}] "), "color": color }])
}
