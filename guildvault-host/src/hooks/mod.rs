//! Built-in hooks shipped with the host: guild rosters and coin wallets.

pub mod coins;
pub mod guilds;

pub use coins::{coin_hook, COINS_HOOK};
pub use guilds::{guild_hook, GUILDS_HOOK};
