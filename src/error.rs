use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("No wallet provider detected: {0}")]
    ProviderUnavailable(String),

    #[error("Connection request rejected by user")]
    UserRejected,

    #[error("Wallet reported no accounts")]
    NoAccounts,

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Blockchain RPC error: {0}")]
    Rpc(String),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Indexer error: {0}")]
    Indexer(String),

    #[error("Discovery result is stale (started at epoch {started}, current {current})")]
    StaleDiscovery { started: u64, current: u64 },

    #[error("Transaction gate refused: {0}")]
    GateRefused(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid configuration: {0}")]
    BadConfig(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VaultError {
    /// Errors that degrade to empty/placeholder data instead of
    /// interrupting the session.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, VaultError::BadConfig(_))
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;
