//! The `coins` hook — persists wallet balances and runs their autosave.

use std::sync::Arc;

use guildvault_core::models::CoinModel;

use crate::hook::{shared_vault, Hook, SharedVault};
use crate::store::FileStore;
use crate::task::Task;

/// Hook and document name for wallet data.
pub const COINS_HOOK: &str = "coins";

/// Build the coins hook over the given store.
#[must_use]
pub fn coin_hook(store: Arc<FileStore>) -> (Hook<CoinModel>, SharedVault<CoinModel>) {
    let vault = shared_vault::<CoinModel>(None);
    let mut hook = Hook::new(COINS_HOOK, Arc::clone(&store)).with_vault(Arc::clone(&vault));
    hook.add_task(Task::autosave(COINS_HOOK, Arc::clone(&vault), store));
    (hook, vault)
}

/// Wallet names filtered by ownership, in vault order.
#[must_use]
pub fn wallet_names(vault: &SharedVault<CoinModel>, is_guild: bool) -> Vec<String> {
    vault
        .read()
        .models()
        .iter()
        .filter(|w| w.is_guild == is_guild)
        .map(|w| w.wallet_name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_comes_with_a_bound_vault_and_autosave() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Arc::new(FileStore::new(dir.path()));
        let (hook, _vault) = coin_hook(store);

        assert_eq!(hook.name(), COINS_HOOK);
        assert!(hook.vault().is_some());
        assert_eq!(hook.tasks()[0].name(), "autosave");
    }

    #[test]
    fn wallet_names_filter_by_ownership() {
        let vault = shared_vault(Some(vec![
            CoinModel::new("Alice", Some(false), Some(10.0)),
            CoinModel::new("Whalers", Some(true), Some(500.0)),
            CoinModel::new("Bob", None, None),
        ]));

        assert_eq!(wallet_names(&vault, false), vec!["Alice", "Bob"]);
        assert_eq!(wallet_names(&vault, true), vec!["Whalers"]);
    }
}
