//! Record model definitions — one module per persisted record kind.

pub mod coin;
pub mod guild;
pub mod player;

pub use coin::CoinModel;
pub use guild::GuildModel;
pub use player::{PlayerModel, Role};
