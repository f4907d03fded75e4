//! Host-supplied configuration for hook tasks.
//!
//! Loaded from the host's TOML config file. Tasks are looked up under
//! `tasks.<hook>.<task>`:
//!
//! ```toml
//! [tasks.guilds.autosave]
//! enabled = true
//! delay = 0
//! timeout = 600
//! ```
//!
//! A task with no entry, or with `enabled = false`, is simply not
//! launched.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Top-level host configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Per-task scheduling settings, keyed by hook name then task name.
    #[serde(default)]
    pub tasks: HashMap<String, HashMap<String, TaskConfig>>,
}

impl HostConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Settings for `tasks.<hook>.<task>`, if configured.
    #[must_use]
    pub fn task(&self, hook: &str, task: &str) -> Option<&TaskConfig> {
        self.tasks.get(hook)?.get(task)
    }
}

/// Scheduling settings for a single task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Whether the task is launched at all. Defaults to `false`.
    #[serde(default)]
    pub enabled: bool,
    /// Milliseconds before the first run. Defaults to 0.
    #[serde(default)]
    pub delay: u64,
    /// Milliseconds between recurring runs; 0 means run once. The key
    /// name is kept from the host's config file format.
    #[serde(default)]
    pub timeout: u64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
