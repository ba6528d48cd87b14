//! Wallet domain models and repository traits.

mod wallets_model;
mod wallets_traits;

pub use wallets_model::{MovementType, Wallet, WalletMovement};
pub use wallets_traits::WalletRepositoryTrait;
