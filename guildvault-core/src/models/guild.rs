//! Guild record — membership roster, role state machine, and validated
//! metadata setters.
//!
//! Invariants:
//! - at most one player holds [`Role::Creator`] at any time;
//! - roster insertion order is authoritative for all first-match lookups;
//! - `guild_color` is a lowercase `#rrggbb` string or a supported color
//!   name.
//!
//! Construction is pure. The external team-creation call sequence that
//! the host expects on guild creation is a separate, explicit
//! [`GuildModel::register`] step.

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::codec::{self, Record};
use crate::models::player::{PlayerModel, Role};
use crate::team::{self, TeamDirectory};

/// Color names accepted by [`GuildModel::set_guild_color`] besides
/// `#rrggbb` hex strings.
pub const SUPPORTED_COLOR_NAMES: &[&str] = &[
    "aqua",
    "black",
    "blue",
    "dark_aqua",
    "dark_blue",
    "dark_gray",
    "dark_green",
    "dark_purple",
    "dark_red",
    "gold",
    "gray",
    "green",
    "light_purple",
    "red",
    "white",
    "yellow",
];

/// Symbols stripped from guild names and prefixes before display.
const RESERVED_SYMBOLS: &str = "-+=*&|\\/@{}.^:,<>[]!?'\"";

fn strip_reserved(input: &str) -> String {
    input
        .chars()
        .filter(|c| !RESERVED_SYMBOLS.contains(*c))
        .collect()
}

fn is_hex_color(input: &str) -> bool {
    input.len() == 7
        && input.starts_with('#')
        && input[1..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

fn is_valid_color(input: &str) -> bool {
    is_hex_color(input) || SUPPORTED_COLOR_NAMES.contains(&input)
}

/// A guild: named team of players with per-player roles.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildModel {
    guild_name: String,
    guild_prefix: String,
    guild_color: String,
    creator_name: String,
    players: Vec<PlayerModel>,
}

impl GuildModel {
    /// Create a guild with `creator_name` as its sole Creator-role player.
    ///
    /// Name and prefix are stripped of reserved symbols; an invalid color
    /// falls back to `"white"`. No external calls are made — follow up
    /// with [`GuildModel::register`] to create the host-side team.
    #[must_use]
    pub fn new(creator_name: &str, guild_name: &str, guild_prefix: &str, guild_color: &str) -> Self {
        let color = if is_valid_color(guild_color) {
            guild_color.to_owned()
        } else {
            warn!(color = guild_color, "unsupported guild color, using white");
            "white".to_owned()
        };
        Self {
            guild_name: strip_reserved(guild_name),
            guild_prefix: strip_reserved(guild_prefix),
            guild_color: color,
            creator_name: creator_name.to_owned(),
            players: vec![PlayerModel::new(creator_name, Some(true), Some(Role::Creator))],
        }
    }

    /// Reassemble a guild from persisted fields, roster included. Fields
    /// are taken verbatim; used by the decode path.
    #[must_use]
    pub fn with_players(
        creator_name: String,
        guild_name: String,
        guild_prefix: String,
        guild_color: String,
        players: Vec<PlayerModel>,
    ) -> Self {
        Self {
            guild_name,
            guild_prefix,
            guild_color,
            creator_name,
            players,
        }
    }

    /// Fire the host-side team creation sequence for this guild: create
    /// the team, join the creator, then push display name and prefix.
    ///
    /// Callers sequence this explicitly after construction; the calls are
    /// fire-and-forget.
    pub fn register(&self, teams: &dyn TeamDirectory) {
        debug!(guild = %self.guild_name, team = %self.creator_name, "registering guild team");
        teams.create_team(&self.creator_name, &team::creation_payload(&self.guild_name));
        teams.join_team(&self.creator_name, &self.creator_name);
        teams.set_display_name(
            &self.creator_name,
            &team::display_payload(&self.guild_name, &self.guild_color),
        );
        teams.set_prefix(
            &self.creator_name,
            &team::prefix_payload(&self.guild_prefix, &self.guild_color),
        );
    }

    // ------------------------------------------------------------------
    // Roster operations
    // ------------------------------------------------------------------

    /// Add a player to the end of the roster. `active` defaults to
    /// `false`, `role` to [`Role::Requested`].
    ///
    /// Returns `false` without mutating if the name is already taken, or
    /// if `role` is Creator and the guild already has one.
    pub fn add_player(&mut self, name: &str, active: Option<bool>, role: Option<Role>) -> bool {
        if self.has_player(name) {
            return false;
        }
        if role == Some(Role::Creator) && self.player_by_role(Role::Creator).is_some() {
            return false;
        }
        self.players.push(PlayerModel::new(name, active, role));
        true
    }

    /// First roster entry with the given name, in insertion order.
    #[must_use]
    pub fn player_by_name(&self, name: &str) -> Option<&PlayerModel> {
        self.players.iter().find(|p| p.name == name)
    }

    /// First roster entry with the given role, in insertion order.
    #[must_use]
    pub fn player_by_role(&self, role: Role) -> Option<&PlayerModel> {
        self.players.iter().find(|p| p.role == role)
    }

    /// Whether a player with this name is on the roster.
    #[must_use]
    pub fn has_player(&self, name: &str) -> bool {
        self.player_by_name(name).is_some()
    }

    /// Remove the first roster entry with this name. `false` if absent.
    pub fn remove_player(&mut self, name: &str) -> bool {
        let Some(index) = self.players.iter().position(|p| p.name == name) else {
            return false;
        };
        self.players.remove(index);
        true
    }

    /// Promote Member → Operator. `false` unless the player exists and
    /// currently has role Member.
    pub fn op_player(&mut self, name: &str) -> bool {
        self.transition(name, Role::Member, Role::Operator)
    }

    /// Demote Operator → Member. `false` unless currently Operator.
    pub fn deop_player(&mut self, name: &str) -> bool {
        self.transition(name, Role::Operator, Role::Member)
    }

    /// Accept a join request: Requested → Member. `false` unless
    /// currently Requested.
    pub fn accept_player(&mut self, name: &str) -> bool {
        self.transition(name, Role::Requested, Role::Member)
    }

    fn transition(&mut self, name: &str, from: Role, to: Role) -> bool {
        let Some(player) = self.players.iter_mut().find(|p| p.name == name) else {
            return false;
        };
        if player.role != from {
            return false;
        }
        player.role = to;
        true
    }

    // ------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------

    /// Set the guild color. Accepts only lowercase `#rrggbb` hex or a
    /// name from [`SUPPORTED_COLOR_NAMES`]; anything else is rejected
    /// with `false` and the stored color is unchanged.
    pub fn set_guild_color(&mut self, color: &str) -> bool {
        if !is_valid_color(color) {
            return false;
        }
        self.guild_color = color.to_owned();
        true
    }

    /// Set the guild display name, stripping reserved symbols, and push
    /// the update to the team directory. Returns the stored value.
    pub fn set_guild_name(&mut self, name: &str, teams: &dyn TeamDirectory) -> String {
        self.guild_name = strip_reserved(name);
        teams.set_display_name(
            &self.creator_name,
            &team::display_payload(&self.guild_name, &self.guild_color),
        );
        self.guild_name.clone()
    }

    /// Set the chat prefix, stripping reserved symbols, and push the
    /// update to the team directory. Returns the stored value.
    pub fn set_guild_prefix(&mut self, prefix: &str, teams: &dyn TeamDirectory) -> String {
        self.guild_prefix = strip_reserved(prefix);
        teams.set_prefix(
            &self.creator_name,
            &team::prefix_payload(&self.guild_prefix, &self.guild_color),
        );
        self.guild_prefix.clone()
    }

    /// Guild display name.
    #[must_use]
    pub fn guild_name(&self) -> &str {
        &self.guild_name
    }

    /// Chat prefix.
    #[must_use]
    pub fn guild_prefix(&self) -> &str {
        &self.guild_prefix
    }

    /// Current color (hex or named).
    #[must_use]
    pub fn guild_color(&self) -> &str {
        &self.guild_color
    }

    /// Name of the creator; also the host-side team identifier.
    #[must_use]
    pub fn creator_name(&self) -> &str {
        &self.creator_name
    }

    /// The roster, in insertion order.
    #[must_use]
    pub fn players(&self) -> &[PlayerModel] {
        &self.players
    }
}

impl Record for GuildModel {
    const KIND: &'static str = "guild";

    fn encode(&self) -> Mapping {
        let mut map = codec::tagged(Self::KIND);
        map.insert(Value::from("guildName"), Value::from(self.guild_name.clone()));
        map.insert(
            Value::from("guildPrefix"),
            Value::from(self.guild_prefix.clone()),
        );
        map.insert(
            Value::from("guildColor"),
            Value::from(self.guild_color.clone()),
        );
        map.insert(
            Value::from("creatorName"),
            Value::from(self.creator_name.clone()),
        );
        let players: Vec<Value> = self
            .players
            .iter()
            .map(|p| Value::Mapping(p.encode()))
            .collect();
        map.insert(Value::from("players"), Value::Sequence(players));
        map
    }

    fn decode(map: &Mapping) -> Option<Self> {
        if !codec::has_kind(map, Self::KIND) {
            return None;
        }
        let guild_name = codec::get_str(map, "guildName")?;
        let guild_prefix = codec::get_str(map, "guildPrefix")?;
        let guild_color = codec::get_str(map, "guildColor")?;
        let creator_name = codec::get_str(map, "creatorName")?;
        let entries = codec::get_seq(map, "players")?;

        let mut players = Vec::with_capacity(entries.len());
        for entry in entries {
            players.push(PlayerModel::decode(entry.as_mapping()?)?);
        }
        Some(Self::with_players(
            creator_name,
            guild_name,
            guild_prefix,
            guild_color,
            players,
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
