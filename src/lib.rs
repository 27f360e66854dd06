//! Client-side state manager for a wallet-linked NFT staking front end.
//!
//! The crate tracks the wallet-connection lifecycle across external
//! provider events, discovers the connected account's assets through one
//! of two strategies, and keeps the owned/staked inventories, selection
//! sets, and reward estimate consistent while the user moves assets
//! between collections. Rendering, the concrete wallet backend, and the
//! staking contracts live behind traits ([`provider::WalletProvider`],
//! [`gateway::TransactionGate`]) supplied by the host.

pub mod chains;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod gateway;
pub mod models;
pub mod notify;
pub mod provider;
pub mod rewards;
pub mod session;
pub mod store;
pub mod utils;
pub mod view;

pub use config::Config;
pub use error::{Result, VaultError};
pub use models::{Asset, ConnectionState, ConnectionStatus, RewardSnapshot};
pub use session::ConnectionManager;
pub use store::{Collection, InventoryStore};
pub use view::{PanelState, ViewModel};
