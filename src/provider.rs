//! Capability surface of the external wallet provider. The core never
//! inspects provider internals beyond this trait; each concrete backend
//! (browser extension bridge, WalletConnect relay, test double) supplies
//! an adapter.

use async_trait::async_trait;

use crate::error::Result;

/// Externally-raised provider notifications. The host wires its provider's
/// subscription surface to [`crate::session::ConnectionManager::on_provider_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    /// The account list changed; an empty list means the wallet revoked
    /// access entirely.
    AccountsChanged(Vec<String>),
    ChainChanged(u64),
    Disconnected,
}

#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Asks the wallet for account access. Implementations map a declined
    /// dialog to [`crate::error::VaultError::UserRejected`] and a missing
    /// backend to [`crate::error::VaultError::ProviderUnavailable`].
    async fn request_accounts(&self) -> Result<Vec<String>>;

    /// The chain the wallet is currently pointed at.
    async fn chain_id(&self) -> Result<u64>;
}
