//! Player membership record and the guild privilege ladder.

use std::fmt;

use serde_yaml::{Mapping, Value};

use crate::codec::{self, Record};

/// Privilege level within a guild, ordered Creator > Operator > Member >
/// Requested. Serialized by variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Asked to join, not yet accepted.
    Requested,
    /// Ordinary accepted member.
    Member,
    /// Member with moderation rights.
    Operator,
    /// The guild founder. At most one per guild.
    Creator,
}

impl Role {
    /// Variant name used in persisted documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "Requested",
            Self::Member => "Member",
            Self::Operator => "Operator",
            Self::Creator => "Creator",
        }
    }

    /// Parse a role from its persisted variant name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Requested" => Some(Self::Requested),
            "Member" => Some(Self::Member),
            "Operator" => Some(Self::Operator),
            "Creator" => Some(Self::Creator),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player's membership entry inside a guild.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerModel {
    /// Player name, unique within a guild.
    pub name: String,
    /// Whether the player is currently active.
    pub active: bool,
    /// Privilege level.
    pub role: Role,
}

impl PlayerModel {
    /// Create a player entry. `active` defaults to `false` and `role` to
    /// [`Role::Requested`] when unspecified.
    #[must_use]
    pub fn new(name: impl Into<String>, active: Option<bool>, role: Option<Role>) -> Self {
        Self {
            name: name.into(),
            active: active.unwrap_or(false),
            role: role.unwrap_or(Role::Requested),
        }
    }

    /// True for anyone on the membership ladder (Member, Operator, Creator).
    #[must_use]
    pub fn is_member(&self) -> bool {
        matches!(self.role, Role::Member | Role::Operator | Role::Creator)
    }

    /// True for Operator or Creator.
    #[must_use]
    pub fn is_operator(&self) -> bool {
        matches!(self.role, Role::Operator | Role::Creator)
    }

    /// True for Creator only.
    #[must_use]
    pub fn is_creator(&self) -> bool {
        self.role == Role::Creator
    }

    /// Capability check against a required role.
    ///
    /// Creator/Operator/Member ask "does the actual role reach this rung
    /// of the ladder". The Requested branch is different: it holds for
    /// any player *not* on the membership ladder, not just for players
    /// whose role equals Requested.
    #[must_use]
    pub fn test_role(&self, required: Role) -> bool {
        match required {
            Role::Creator => self.is_creator(),
            Role::Operator => self.is_operator(),
            Role::Member => self.is_member(),
            Role::Requested => !self.is_member(),
        }
    }
}

impl Record for PlayerModel {
    const KIND: &'static str = "player";

    fn encode(&self) -> Mapping {
        let mut map = codec::tagged(Self::KIND);
        map.insert(Value::from("name"), Value::from(self.name.clone()));
        map.insert(Value::from("active"), Value::from(self.active));
        map.insert(Value::from("role"), Value::from(self.role.as_str()));
        map
    }

    fn decode(map: &Mapping) -> Option<Self> {
        if !codec::has_kind(map, Self::KIND) {
            return None;
        }
        let name = codec::get_str(map, "name")?;
        let active = codec::get_bool(map, "active")?;
        let role = Role::parse(&codec::get_str(map, "role")?)?;
        Some(Self {
            name,
            active,
            role,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_inactive_requested() {
        let player = PlayerModel::new("Alice", None, None);
        assert!(!player.active);
        assert_eq!(player.role, Role::Requested);
    }

    #[test]
    fn role_ordering_follows_privilege() {
        assert!(Role::Creator > Role::Operator);
        assert!(Role::Operator > Role::Member);
        assert!(Role::Member > Role::Requested);
    }

    #[test]
    fn ladder_checks_include_higher_roles() {
        let operator = PlayerModel::new("Bob", Some(true), Some(Role::Operator));
        assert!(operator.test_role(Role::Member));
        assert!(operator.test_role(Role::Operator));
        assert!(!operator.test_role(Role::Creator));

        let creator = PlayerModel::new("Carol", Some(true), Some(Role::Creator));
        assert!(creator.test_role(Role::Member));
        assert!(creator.test_role(Role::Operator));
        assert!(creator.test_role(Role::Creator));
    }

    #[test]
    fn requested_check_is_membership_negation() {
        // Holds exactly when the player is not Member/Operator/Creator.
        let requested = PlayerModel::new("Dan", None, Some(Role::Requested));
        assert!(requested.test_role(Role::Requested));

        for role in [Role::Member, Role::Operator, Role::Creator] {
            let player = PlayerModel::new("Eve", None, Some(role));
            assert!(!player.test_role(Role::Requested));
        }
    }

    #[test]
    fn decode_requires_every_field() {
        let full = PlayerModel::new("Alice", Some(true), Some(Role::Member)).encode();
        assert!(PlayerModel::decode(&full).is_some());

        for missing in ["name", "active", "role"] {
            let mut map = full.clone();
            map.remove(missing);
            assert!(
                PlayerModel::decode(&map).is_none(),
                "decode should fail without `{missing}`"
            );
        }
    }

    #[test]
    fn decode_rejects_wrong_kind_tag() {
        let mut map = PlayerModel::new("Alice", None, None).encode();
        map.insert(Value::from("kind"), Value::from("coin"));
        assert!(PlayerModel::decode(&map).is_none());
    }

    #[test]
    fn decode_rejects_unknown_role_name() {
        let mut map = PlayerModel::new("Alice", None, None).encode();
        map.insert(Value::from("role"), Value::from("Emperor"));
        assert!(PlayerModel::decode(&map).is_none());
    }
}
