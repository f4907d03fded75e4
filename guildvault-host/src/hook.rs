//! Hook — the module-scoped lifecycle mediator.
//!
//! A hook owns one shared vault and the tasks that maintain it. The
//! vault travels behind `Arc<RwLock<..>>` because an in-flight scheduled
//! task (autosave) and the host's own calls can reach it concurrently;
//! the lock is the single-writer discipline for that sharing.
//!
//! Load-before-launch ordering is the caller's responsibility —
//! `Registry::enable` sequences it.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::runtime::Handle;
use tracing::{debug, error, info};

use guildvault_core::codec::Record;
use guildvault_core::config::HostConfig;
use guildvault_core::vault::Vault;

use crate::error::{HostError, Result};
use crate::store::FileStore;
use crate::task::{Task, Trigger};

/// A vault shared between a hook and its in-flight tasks.
pub type SharedVault<T> = Arc<RwLock<Vault<T>>>;

/// Create a shared vault. An absent initializer yields an empty vault.
#[must_use]
pub fn shared_vault<T: Record>(initial: Option<Vec<T>>) -> SharedVault<T> {
    Arc::new(RwLock::new(Vault::new(initial)))
}

/// Serialize the vault under its read lock and write it through the
/// store.
///
/// # Errors
///
/// Propagates store I/O and serialization failures.
pub fn save_vault<T: Record>(
    store: &FileStore,
    name: &str,
    vault: &SharedVault<T>,
) -> Result<()> {
    let document = vault.read().to_document();
    store.save(name, &document)?;
    Ok(())
}

/// Lifecycle mediator for one logical module: a name, an optional vault
/// binding, and the owned task list.
pub struct Hook<T: Record> {
    name: String,
    vault: Option<SharedVault<T>>,
    store: Arc<FileStore>,
    tasks: Vec<Task>,
}

impl<T: Record> std::fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hook")
            .field("name", &self.name)
            .field("vault_bound", &self.vault.is_some())
            .field("tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

impl<T: Record + Send + Sync + 'static> Hook<T> {
    /// Create a hook with no vault binding. A hook left in this state is
    /// misconfigured: its first `load_data` reports
    /// [`HostError::VaultUnbound`] and the registry deregisters it.
    #[must_use]
    pub fn new(name: impl Into<String>, store: Arc<FileStore>) -> Self {
        Self {
            name: name.into(),
            vault: None,
            store,
            tasks: Vec::new(),
        }
    }

    /// Bind the shared vault this hook persists.
    #[must_use]
    pub fn with_vault(mut self, vault: SharedVault<T>) -> Self {
        self.vault = Some(vault);
        self
    }

    /// Add a task to the owned task list.
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Hook name; also the backing document name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound vault, if any.
    #[must_use]
    pub fn vault(&self) -> Option<&SharedVault<T>> {
        self.vault.as_ref()
    }

    /// Owned tasks, in registration order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Load the vault from the backing document, creating the document
    /// if absent. A fresh (empty) document is seeded with the current
    /// vault contents instead of failing the first start.
    ///
    /// # Errors
    ///
    /// [`HostError::VaultUnbound`] if no vault was configured — the
    /// caller must deregister this hook. Read or decode failures are
    /// logged and returned; the in-memory vault is left untouched.
    pub fn load_data(&mut self) -> Result<()> {
        let Some(vault) = &self.vault else {
            error!(
                hook = %self.name,
                "data vault is not bound; removing hook from the registry"
            );
            return Err(HostError::VaultUnbound {
                hook: self.name.clone(),
            });
        };

        let document = match self.store.load(&self.name) {
            Ok(document) => document,
            Err(e) => {
                error!(hook = %self.name, error = %e, "loading data failed");
                return Err(e.into());
            }
        };

        if document.is_null() {
            debug!(hook = %self.name, "fresh data file, seeding vault document");
            save_vault(&self.store, &self.name, vault)?;
            return Ok(());
        }

        match Vault::from_document(&document) {
            Ok(loaded) => {
                let count = loaded.len();
                *vault.write() = loaded;
                info!(hook = %self.name, records = count, "vault data loaded");
                Ok(())
            }
            Err(e) => {
                error!(hook = %self.name, error = %e, "vault document is unreadable");
                Err(e.into())
            }
        }
    }

    /// Serialize the current vault to the backing document.
    ///
    /// # Errors
    ///
    /// I/O failure is logged and returned, never escalated further.
    pub fn save_data(&self) -> Result<()> {
        let Some(vault) = &self.vault else {
            return Err(HostError::VaultUnbound {
                hook: self.name.clone(),
            });
        };
        if let Err(e) = save_vault(&self.store, &self.name, vault) {
            error!(hook = %self.name, error = %e, "saving data failed");
            return Err(e);
        }
        debug!(hook = %self.name, "vault data saved");
        Ok(())
    }

    /// Launch every owned task of the given trigger whose
    /// `tasks.<hook>.<task>` config entry is enabled, using the
    /// configured delay and period (both default 0). Tasks without an
    /// entry, or disabled, are silently skipped.
    ///
    /// # Errors
    ///
    /// Scheduling faults (re-issue of a live task) propagate.
    pub fn launch_tasks(
        &mut self,
        trigger: Trigger,
        config: &HostConfig,
        scheduler: &Handle,
    ) -> Result<()> {
        for task in &mut self.tasks {
            if task.trigger() != trigger {
                continue;
            }
            match config.task(&self.name, task.name()) {
                Some(entry) if entry.enabled => {
                    task.issue(
                        scheduler,
                        Duration::from_millis(entry.delay),
                        Duration::from_millis(entry.timeout),
                    )?;
                    info!(
                        hook = %self.name,
                        task = %task.name(),
                        delay_ms = entry.delay,
                        period_ms = entry.timeout,
                        "task launched"
                    );
                }
                _ => {
                    debug!(hook = %self.name, task = %task.name(), "task not enabled, skipping");
                }
            }
        }
        Ok(())
    }

    /// Cancel every owned task. Tasks that were never scheduled are
    /// tolerated.
    pub fn stop_all_tasks(&mut self) {
        for task in &mut self.tasks {
            task.cancel();
        }
    }
}

/// Object-safe lifecycle surface, letting the registry own hooks of
/// different record kinds side by side.
pub trait HookLifecycle: Send {
    /// Hook name.
    fn name(&self) -> &str;
    /// Load the vault from its backing document.
    fn load_data(&mut self) -> Result<()>;
    /// Save the vault to its backing document.
    fn save_data(&self) -> Result<()>;
    /// Launch enabled tasks of the given trigger.
    fn launch_tasks(
        &mut self,
        trigger: Trigger,
        config: &HostConfig,
        scheduler: &Handle,
    ) -> Result<()>;
    /// Cancel every owned task.
    fn stop_all_tasks(&mut self);
}

impl<T: Record + Send + Sync + 'static> HookLifecycle for Hook<T> {
    fn name(&self) -> &str {
        Hook::name(self)
    }

    fn load_data(&mut self) -> Result<()> {
        Hook::load_data(self)
    }

    fn save_data(&self) -> Result<()> {
        Hook::save_data(self)
    }

    fn launch_tasks(
        &mut self,
        trigger: Trigger,
        config: &HostConfig,
        scheduler: &Handle,
    ) -> Result<()> {
        Hook::launch_tasks(self, trigger, config, scheduler)
    }

    fn stop_all_tasks(&mut self) {
        Hook::stop_all_tasks(self);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use guildvault_core::models::{CoinModel, PlayerModel, Role};

    fn store_in(dir: &tempfile::TempDir) -> Arc<FileStore> {
        Arc::new(FileStore::new(dir.path()))
    }

    #[test]
    fn unbound_vault_is_a_configuration_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut hook: Hook<CoinModel> = Hook::new("coins", store_in(&dir));

        let err = hook.load_data().expect_err("unbound");
        assert!(matches!(err, HostError::VaultUnbound { hook } if hook == "coins"));
    }

    #[test]
    fn first_load_seeds_the_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        let vault = shared_vault::<CoinModel>(None);
        let mut hook = Hook::new("coins", Arc::clone(&store)).with_vault(vault);

        hook.load_data().expect("first load");
        // The seeded document now decodes as an empty vault.
        let document = store.load("coins").expect("reload");
        let decoded = Vault::<CoinModel>::from_document(&document).expect("decode");
        assert!(decoded.is_empty());
    }

    #[test]
    fn save_then_load_restores_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        let vault = shared_vault::<PlayerModel>(None);
        let mut hook = Hook::new("players", Arc::clone(&store)).with_vault(Arc::clone(&vault));

        vault
            .write()
            .models_mut()
            .push(PlayerModel::new("Alice", Some(true), Some(Role::Creator)));
        hook.save_data().expect("save");

        // Drop in-memory state, then reload from disk.
        *vault.write() = Vault::new(None);
        hook.load_data().expect("load");
        assert_eq!(vault.read().models().len(), 1);
        assert_eq!(vault.read().models()[0].name, "Alice");
    }

    #[test]
    fn corrupt_document_leaves_the_vault_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        let vault = shared_vault(Some(vec![CoinModel::new("Alice", None, None)]));
        let mut hook = Hook::new("coins", Arc::clone(&store)).with_vault(Arc::clone(&vault));

        std::fs::write(store.document_path("coins"), "wrong: shape\n").expect("write");
        assert!(hook.load_data().is_err());
        assert_eq!(vault.read().models().len(), 1, "in-memory vault kept");
    }

    #[tokio::test]
    async fn launch_is_gated_on_the_enabled_flag() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = shared_vault::<CoinModel>(None);
        let mut hook = Hook::new("coins", store_in(&dir)).with_vault(Arc::clone(&vault));
        hook.add_task(Task::autosave("coins", vault, store_in(&dir)));

        // No config entry: silently skipped.
        let config = HostConfig::default();
        hook.launch_tasks(Trigger::OnEnable, &config, &Handle::current())
            .expect("launch");
        assert!(!hook.tasks()[0].is_scheduled());

        // Disabled entry: still skipped.
        let config = HostConfig::from_toml("[tasks.coins.autosave]\nenabled = false\n")
            .expect("parse");
        hook.launch_tasks(Trigger::OnEnable, &config, &Handle::current())
            .expect("launch");
        assert!(!hook.tasks()[0].is_scheduled());

        // Enabled entry: issued with the configured schedule.
        let config = HostConfig::from_toml(
            "[tasks.coins.autosave]\nenabled = true\ndelay = 10\ntimeout = 50\n",
        )
        .expect("parse");
        hook.launch_tasks(Trigger::OnEnable, &config, &Handle::current())
            .expect("launch");
        assert!(hook.tasks()[0].is_scheduled());

        hook.stop_all_tasks();
    }

    #[tokio::test]
    async fn launch_skips_other_triggers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = shared_vault::<CoinModel>(None);
        let mut hook = Hook::new("coins", store_in(&dir)).with_vault(Arc::clone(&vault));
        hook.add_task(Task::autosave("coins", vault, store_in(&dir)));

        let config =
            HostConfig::from_toml("[tasks.coins.autosave]\nenabled = true\n").expect("parse");
        hook.launch_tasks(Trigger::OnDisable, &config, &Handle::current())
            .expect("launch");
        assert!(!hook.tasks()[0].is_scheduled());
    }

    #[test]
    fn stop_with_nothing_launched_is_fine() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = shared_vault::<CoinModel>(None);
        let mut hook = Hook::new("coins", store_in(&dir)).with_vault(Arc::clone(&vault));
        hook.add_task(Task::autosave("coins", vault, store_in(&dir)));

        hook.stop_all_tasks();
        hook.stop_all_tasks();
    }
}
