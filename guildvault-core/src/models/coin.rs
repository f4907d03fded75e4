//! Coin wallet record — one balance per player or guild.

use serde_yaml::{Mapping, Value};

use crate::codec::{self, Record};

/// A coin wallet. Balances are plain `f64` with no enforced
/// non-negativity; overdraft policy belongs to the host economy.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinModel {
    /// Wallet owner name (player name, or creator name for guild wallets).
    pub wallet_name: String,
    /// Whether this wallet belongs to a guild rather than a player.
    pub is_guild: bool,
    coins: f64,
}

impl CoinModel {
    /// Create a wallet. `is_guild` defaults to `false` and `coins` to 0.
    #[must_use]
    pub fn new(wallet_name: impl Into<String>, is_guild: Option<bool>, coins: Option<f64>) -> Self {
        Self {
            wallet_name: wallet_name.into(),
            is_guild: is_guild.unwrap_or(false),
            coins: coins.unwrap_or(0.0),
        }
    }

    /// Exact balance.
    #[must_use]
    pub fn coins(&self) -> f64 {
        self.coins
    }

    /// Replace the exact balance.
    pub fn set_coins(&mut self, coins: f64) {
        self.coins = coins;
    }

    /// Whole-coin view of the balance, truncated toward zero.
    #[must_use]
    pub fn balance(&self) -> i64 {
        self.coins as i64
    }

    /// Set the balance from a whole-coin amount.
    pub fn set_balance(&mut self, balance: i64) {
        self.coins = balance as f64;
    }
}

impl Record for CoinModel {
    const KIND: &'static str = "coin";

    fn encode(&self) -> Mapping {
        let mut map = codec::tagged(Self::KIND);
        map.insert(
            Value::from("walletName"),
            Value::from(self.wallet_name.clone()),
        );
        map.insert(Value::from("isGuild"), Value::from(self.is_guild));
        map.insert(Value::from("coins"), Value::from(self.coins));
        map
    }

    fn decode(map: &Mapping) -> Option<Self> {
        if !codec::has_kind(map, Self::KIND) {
            return None;
        }
        let wallet_name = codec::get_str(map, "walletName")?;
        let is_guild = codec::get_bool(map, "isGuild")?;
        let coins = codec::get_f64(map, "coins")?;
        Some(Self {
            wallet_name,
            is_guild,
            coins,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
