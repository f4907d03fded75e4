//! Tagged-mapping codec for persisted records.
//!
//! Every record serializes to a YAML mapping carrying a `kind` tag plus
//! exactly its declared fields. Decoding is a strict left-to-right chain:
//! the tag must match and every field must be present and well-typed, or
//! the whole record decodes to `None` — a record is never partially
//! populated.
//!
//! The [`KindRegistry`] maps kind tags to decode functions and is built
//! and validated once at host startup, replacing string-class reflection
//! with an explicit, checked table.

use std::collections::HashMap;

use serde_yaml::{Mapping, Value};

use crate::error::{CoreError, Result};
use crate::models::{CoinModel, GuildModel, PlayerModel};

/// Mapping key under which every record stores its kind tag.
pub const KIND_KEY: &str = "kind";

/// A persistable record kind.
///
/// Implementors own their serialization contract: [`Record::encode`]
/// emits the tagged mapping, [`Record::decode`] walks the strict field
/// chain and yields `None` on the first missing or mistyped field.
pub trait Record: Clone {
    /// Kind tag written into the `kind` field of the mapping.
    const KIND: &'static str;

    /// Serialize this record to a tagged mapping.
    fn encode(&self) -> Mapping;

    /// Decode a record from a tagged mapping. `None` on any structural
    /// mismatch, never a partially populated record.
    fn decode(map: &Mapping) -> Option<Self>;
}

// ---------------------------------------------------------------------------
// Mapping field helpers
// ---------------------------------------------------------------------------

/// Read a string field.
#[must_use]
pub fn get_str(map: &Mapping, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Read a boolean field.
#[must_use]
pub fn get_bool(map: &Mapping, key: &str) -> Option<bool> {
    map.get(key).and_then(Value::as_bool)
}

/// Read a numeric field as `f64` (accepts integer YAML scalars too).
#[must_use]
pub fn get_f64(map: &Mapping, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

/// Read a sequence field.
#[must_use]
pub fn get_seq<'a>(map: &'a Mapping, key: &str) -> Option<&'a Vec<Value>> {
    map.get(key).and_then(Value::as_sequence)
}

/// True if the mapping carries the expected kind tag.
#[must_use]
pub fn has_kind(map: &Mapping, kind: &str) -> bool {
    get_str(map, KIND_KEY).as_deref() == Some(kind)
}

/// Start a tagged mapping for the given kind.
#[must_use]
pub fn tagged(kind: &str) -> Mapping {
    let mut map = Mapping::new();
    map.insert(Value::from(KIND_KEY), Value::from(kind));
    map
}

// ---------------------------------------------------------------------------
// Kind registry
// ---------------------------------------------------------------------------

/// A decoded record of any registered kind.
#[derive(Debug, Clone)]
pub enum AnyRecord {
    /// A player membership record.
    Player(PlayerModel),
    /// A guild record.
    Guild(GuildModel),
    /// A coin wallet record.
    Coin(CoinModel),
}

impl From<PlayerModel> for AnyRecord {
    fn from(model: PlayerModel) -> Self {
        Self::Player(model)
    }
}

impl From<GuildModel> for AnyRecord {
    fn from(model: GuildModel) -> Self {
        Self::Guild(model)
    }
}

impl From<CoinModel> for AnyRecord {
    fn from(model: CoinModel) -> Self {
        Self::Coin(model)
    }
}

type DecodeFn = fn(&Mapping) -> Option<AnyRecord>;

fn decode_any<T>(map: &Mapping) -> Option<AnyRecord>
where
    T: Record + Into<AnyRecord>,
{
    T::decode(map).map(Into::into)
}

/// Explicit kind-tag → decode-function table, validated at startup.
#[derive(Default)]
pub struct KindRegistry {
    decoders: HashMap<&'static str, DecodeFn>,
}

impl KindRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with all built-in record kinds registered.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if two kinds claim the same tag.
    pub fn with_builtin_kinds() -> Result<Self> {
        let mut registry = Self::new();
        registry.register::<PlayerModel>()?;
        registry.register::<GuildModel>()?;
        registry.register::<CoinModel>()?;
        Ok(registry)
    }

    /// Register a record kind under its tag.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if the tag is already taken.
    pub fn register<T>(&mut self) -> Result<()>
    where
        T: Record + Into<AnyRecord>,
    {
        if self.decoders.insert(T::KIND, decode_any::<T>).is_some() {
            return Err(CoreError::Config(format!(
                "duplicate codec kind tag: {}",
                T::KIND
            )));
        }
        Ok(())
    }

    /// Decode a tagged mapping by dispatching on its `kind` field.
    /// `None` if the tag is absent, unregistered, or the record is
    /// structurally invalid.
    #[must_use]
    pub fn decode(&self, map: &Mapping) -> Option<AnyRecord> {
        let kind = get_str(map, KIND_KEY)?;
        let decoder = self.decoders.get(kind.as_str())?;
        decoder(map)
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    /// True if no kind is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
