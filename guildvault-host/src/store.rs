//! YAML file store — one document per hook under the host data dir.
//!
//! The store deals in raw `serde_yaml::Value` documents; the vault layer
//! owns their shape. A hook named `guilds` persists to
//! `<data_dir>/guilds.yml`.

use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{debug, info};

use guildvault_core::error::Result;

/// Handle to the per-hook document directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `data_dir`. The directory itself is
    /// created lazily on first load or save.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the document backing the named hook.
    #[must_use]
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.yml"))
    }

    /// Root directory of the store.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the named hook's document, creating an empty file first if
    /// none exists. An empty file loads as `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` on filesystem failures and
    /// `CoreError::Yaml` if the file holds malformed YAML.
    pub fn load(&self, name: &str) -> Result<Value> {
        let path = self.document_path(name);
        if !path.exists() {
            std::fs::create_dir_all(&self.data_dir)?;
            std::fs::write(&path, "")?;
            info!(hook = name, path = %path.display(), "created empty data file");
        }

        let content = std::fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Value::Null);
        }
        let document: Value = serde_yaml::from_str(&content)?;
        debug!(hook = name, bytes = content.len(), "loaded data file");
        Ok(document)
    }

    /// Write the named hook's document.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` on filesystem failures and
    /// `CoreError::Yaml` if the document cannot be serialized.
    pub fn save(&self, name: &str, document: &Value) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        let path = self.document_path(name);
        let content = serde_yaml::to_string(document)?;
        std::fs::write(&path, content)?;
        debug!(hook = name, path = %path.display(), "saved data file");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Mapping;

    #[test]
    fn load_creates_a_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("data"));

        let document = store.load("guilds").expect("load");
        assert!(document.is_null());
        assert!(store.document_path("guilds").exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());

        let mut map = Mapping::new();
        map.insert(Value::from("data"), Value::Sequence(vec![]));
        let document = Value::Mapping(map);

        store.save("coins", &document).expect("save");
        let loaded = store.load("coins").expect("load");
        assert_eq!(loaded, document);
    }

    #[test]
    fn hooks_get_separate_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        assert_ne!(store.document_path("guilds"), store.document_path("coins"));
    }
}
