//! The `guilds` hook — persists guild rosters and runs their autosave.

use std::sync::Arc;

use guildvault_core::models::{GuildModel, Role};

use crate::hook::{shared_vault, Hook, SharedVault};
use crate::store::FileStore;
use crate::task::Task;

/// Hook and document name for guild data.
pub const GUILDS_HOOK: &str = "guilds";

/// Build the guilds hook over the given store. Returns the hook along
/// with a second handle to its vault, for callers that mutate guild
/// state outside the lifecycle path.
#[must_use]
pub fn guild_hook(store: Arc<FileStore>) -> (Hook<GuildModel>, SharedVault<GuildModel>) {
    let vault = shared_vault::<GuildModel>(None);
    let mut hook = Hook::new(GUILDS_HOOK, Arc::clone(&store)).with_vault(Arc::clone(&vault));
    hook.add_task(Task::autosave(GUILDS_HOOK, Arc::clone(&vault), store));
    (hook, vault)
}

/// Creator names of all guilds in the vault, in vault order. The
/// creator name doubles as the team identifier.
#[must_use]
pub fn guild_names(vault: &SharedVault<GuildModel>) -> Vec<String> {
    vault
        .read()
        .models()
        .iter()
        .filter_map(|g| g.player_by_role(Role::Creator).map(|p| p.name.clone()))
        .collect()
}

/// One display line per guild: `<name> (<creator>) - <member count>`.
#[must_use]
pub fn guild_summaries(vault: &SharedVault<GuildModel>) -> Vec<String> {
    vault
        .read()
        .models()
        .iter()
        .map(|g| {
            format!(
                "{} ({}) - {}",
                g.guild_name(),
                g.creator_name(),
                g.players().len()
            )
        })
        .collect()
}
