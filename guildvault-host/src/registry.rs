//! Hook registry — owns the installed hooks and drives their lifecycle.
//!
//! Enable order is fixed: codec validation, then load, then task
//! launch. Disable is the mirror image: stop tasks, then save. A hook
//! that reports an unbound vault is removed here and stays inactive for
//! the rest of the process; any other load failure keeps the hook
//! registered with its in-memory state intact.

use std::collections::HashMap;

use tokio::runtime::Handle;
use tracing::{error, info, warn};

use guildvault_core::codec::KindRegistry;
use guildvault_core::config::HostConfig;

use crate::error::{HostError, Result};
use crate::hook::HookLifecycle;
use crate::task::Trigger;

/// Owner of all installed hooks, keyed by hook name.
pub struct Registry {
    hooks: HashMap<String, Box<dyn HookLifecycle>>,
    config: HostConfig,
    scheduler: Handle,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("hooks", &self.names())
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Create an empty registry over the host config and scheduler.
    #[must_use]
    pub fn new(config: HostConfig, scheduler: Handle) -> Self {
        Self {
            hooks: HashMap::new(),
            config,
            scheduler,
        }
    }

    /// Install a hook, keyed by its name. A hook installed under an
    /// already-taken name replaces the old one.
    pub fn insert(&mut self, hook: Box<dyn HookLifecycle>) {
        let name = hook.name().to_owned();
        if self.hooks.insert(name.clone(), hook).is_some() {
            warn!(hook = %name, "replaced an already-installed hook");
        }
    }

    /// Remove and return the named hook.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn HookLifecycle>> {
        self.hooks.remove(name)
    }

    /// Whether a hook with this name is installed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// Names of all installed hooks, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of installed hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// True if no hook is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Load every hook's vault from disk. Hooks with no vault binding
    /// are deregistered; other load failures are logged and the hook
    /// stays installed with its in-memory vault untouched.
    pub fn load_all(&mut self) {
        let names: Vec<String> = self.hooks.keys().cloned().collect();
        for name in names {
            let Some(hook) = self.hooks.get_mut(&name) else {
                continue;
            };
            match hook.load_data() {
                Ok(()) => {}
                Err(HostError::VaultUnbound { .. }) => {
                    self.hooks.remove(&name);
                    error!(hook = %name, "hook deregistered: no vault bound");
                }
                Err(e) => {
                    warn!(hook = %name, error = %e, "load failed, hook kept with in-memory data");
                }
            }
        }
    }

    /// Save every hook's vault. Failures are logged per hook; the pass
    /// always visits all hooks.
    pub fn save_all(&self) {
        for hook in self.hooks.values() {
            if let Err(e) = hook.save_data() {
                error!(hook = %hook.name(), error = %e, "save failed");
            }
        }
    }

    /// Launch every enabled task bound to the given trigger, across all
    /// hooks.
    ///
    /// # Errors
    ///
    /// Scheduling faults propagate; tasks launched before the fault
    /// stay scheduled.
    pub fn launch(&mut self, trigger: Trigger) -> Result<()> {
        for hook in self.hooks.values_mut() {
            hook.launch_tasks(trigger, &self.config, &self.scheduler)?;
        }
        Ok(())
    }

    /// Cancel every task of every hook.
    pub fn stop_all(&mut self) {
        for hook in self.hooks.values_mut() {
            hook.stop_all_tasks();
        }
    }

    /// Full startup sequence: validate the codec table, load all vaults,
    /// then launch the enable-triggered tasks.
    ///
    /// # Errors
    ///
    /// A duplicate codec kind tag or a scheduling fault aborts startup.
    pub fn enable(&mut self) -> Result<()> {
        let codecs = KindRegistry::with_builtin_kinds()?;
        info!(kinds = codecs.len(), "record codecs registered");

        self.load_all();
        self.launch(Trigger::OnEnable)?;
        info!(hooks = self.len(), "startup tasks launched");
        Ok(())
    }

    /// Full shutdown sequence: stop every task, then save every vault.
    pub fn disable(&mut self) {
        self.stop_all();
        info!("all tasks stopped");
        self.save_all();
        info!("all vault data saved");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use guildvault_core::models::CoinModel;

    use crate::hook::Hook;
    use crate::hooks::{coin_hook, guild_hook};
    use crate::store::FileStore;

    fn store_in(dir: &tempfile::TempDir) -> Arc<FileStore> {
        Arc::new(FileStore::new(dir.path()))
    }

    #[tokio::test]
    async fn insert_keys_by_hook_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut registry = Registry::new(HostConfig::default(), Handle::current());

        let (guilds, _) = guild_hook(store_in(&dir));
        let (coins, _) = coin_hook(store_in(&dir));
        registry.insert(Box::new(guilds));
        registry.insert(Box::new(coins));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("guilds"));
        assert_eq!(registry.names(), vec!["coins", "guilds"]);
    }

    #[tokio::test]
    async fn unbound_hook_is_deregistered_on_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut registry = Registry::new(HostConfig::default(), Handle::current());

        let (coins, _) = coin_hook(store_in(&dir));
        registry.insert(Box::new(coins));
        // A hook constructed without a vault binding.
        let broken: Hook<CoinModel> = Hook::new("broken", store_in(&dir));
        registry.insert(Box::new(broken));

        registry.load_all();
        assert!(!registry.contains("broken"));
        assert!(registry.contains("coins"), "healthy hooks are untouched");
    }

    #[tokio::test]
    async fn corrupt_document_keeps_the_hook_installed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        let mut registry = Registry::new(HostConfig::default(), Handle::current());

        std::fs::write(store.document_path("coins"), "wrong: shape\n").expect("write");
        let (coins, _) = coin_hook(store);
        registry.insert(Box::new(coins));

        registry.load_all();
        assert!(registry.contains("coins"));
    }

    #[tokio::test]
    async fn enable_then_disable_round_trips_data() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        let mut registry = Registry::new(HostConfig::default(), Handle::current());

        let (coins, vault) = coin_hook(Arc::clone(&store));
        registry.insert(Box::new(coins));

        registry.enable().expect("enable");
        vault
            .write()
            .models_mut()
            .push(CoinModel::new("Alice", None, Some(25.0)));
        registry.disable();

        // A second registry over the same store sees the saved wallet.
        let mut fresh = Registry::new(HostConfig::default(), Handle::current());
        let (coins, vault) = coin_hook(store);
        fresh.insert(Box::new(coins));
        fresh.enable().expect("enable");
        assert_eq!(vault.read().models().len(), 1);
        assert_eq!(vault.read().models()[0].wallet_name, "Alice");
    }
}
