//! Generic persisted collection of one record kind.
//!
//! A [`Vault`] is an ordered, mutable `Vec` of records plus the
//! serialization contract for the per-hook document:
//!
//! ```yaml
//! data:
//!   - kind: player
//!     name: Alice
//!     active: true
//!     role: Creator
//! ```
//!
//! Round-trip law: decoding a vault's own document reproduces a vault
//! whose models are order-equal to the original.

use serde_yaml::{Mapping, Value};

use crate::codec::Record;
use crate::error::{CoreError, Result};

/// Document key holding the record sequence.
pub const DATA_KEY: &str = "data";

/// Ordered, mutable collection of one record kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Vault<T: Record> {
    models: Vec<T>,
}

impl<T: Record> Default for Vault<T> {
    fn default() -> Self {
        Self { models: Vec::new() }
    }
}

impl<T: Record> Vault<T> {
    /// Create a vault. An absent initializer yields an empty collection,
    /// never an absent one.
    #[must_use]
    pub fn new(initial: Option<Vec<T>>) -> Self {
        Self {
            models: initial.unwrap_or_default(),
        }
    }

    /// The live collection. No defensive copy is made; mutations through
    /// [`Vault::models_mut`] are immediately visible to every holder of
    /// the shared vault.
    #[must_use]
    pub fn models(&self) -> &[T] {
        &self.models
    }

    /// Mutable access to the live collection.
    pub fn models_mut(&mut self) -> &mut Vec<T> {
        &mut self.models
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True when no record is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Serialize to the persisted document shape: a mapping with the
    /// record sequence under [`DATA_KEY`].
    #[must_use]
    pub fn to_document(&self) -> Value {
        let records: Vec<Value> = self
            .models
            .iter()
            .map(|m| Value::Mapping(m.encode()))
            .collect();
        let mut map = Mapping::new();
        map.insert(Value::from(DATA_KEY), Value::Sequence(records));
        Value::Mapping(map)
    }

    /// Decode a vault from a persisted document.
    ///
    /// # Errors
    ///
    /// [`CoreError::MissingData`] if the document is not a mapping with a
    /// `data` sequence — the explicit "no vault" signal, never replaced
    /// by an empty fallback. [`CoreError::Decode`] if any record breaks
    /// its field chain; a partially decoded vault is never returned.
    pub fn from_document(document: &Value) -> Result<Self> {
        let records = document
            .as_mapping()
            .and_then(|map| map.get(DATA_KEY))
            .and_then(Value::as_sequence)
            .ok_or(CoreError::MissingData)?;

        let mut models = Vec::with_capacity(records.len());
        for record in records {
            let decoded = record
                .as_mapping()
                .and_then(T::decode)
                .ok_or_else(|| CoreError::Decode {
                    kind: T::KIND.to_owned(),
                })?;
            models.push(decoded);
        }
        Ok(Self { models })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
