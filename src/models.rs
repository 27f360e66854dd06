use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==================== CONNECTION ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Single source of truth for "is an account connected, to which chain".
/// Exactly one of these exists per session; mutated only through the
/// connection manager's transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionState {
    pub status: ConnectionStatus,
    pub account: Option<String>,
    pub chain_id: Option<u64>,
    pub last_error: Option<String>,
}

impl ConnectionState {
    pub fn disconnected() -> Self {
        Self {
            status: ConnectionStatus::Disconnected,
            account: None,
            chain_id: None,
            last_error: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::disconnected()
    }
}

// ==================== ASSET ====================

/// A non-fungible token record owned by or staked on behalf of an account.
/// `staked_at` is present exactly while the asset sits in the staked
/// collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub contract_address: String,
    pub token_id: String,
    pub display_name: String,
    pub collection_name: String,
    pub image_uri: String,
    pub description: String,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    pub staked_at: Option<DateTime<Utc>>,
}

impl Asset {
    /// Deterministic identity: `{contract}-{token_id}`, contract lowercased.
    pub fn derive_id(contract_address: &str, token_id: &str) -> String {
        format!("{}-{}", contract_address.to_ascii_lowercase(), token_id)
    }

    pub fn new(contract_address: &str, token_id: &str) -> Self {
        Self {
            id: Self::derive_id(contract_address, token_id),
            contract_address: contract_address.to_ascii_lowercase(),
            token_id: token_id.to_string(),
            display_name: String::new(),
            collection_name: String::new(),
            image_uri: String::new(),
            description: String::new(),
            staked_at: None,
        }
    }
}

// ==================== REWARDS ====================

/// Derived reward display, recomputed from the staked inventory. Not
/// persisted and not authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSnapshot {
    pub claimable: Decimal,
    pub daily_rate: Decimal,
    pub total_earned: Decimal,
    pub days_staked: i64,
}

impl RewardSnapshot {
    pub fn zero() -> Self {
        Self {
            claimable: Decimal::ZERO,
            daily_rate: Decimal::ZERO,
            total_earned: Decimal::ZERO,
            days_staked: 0,
        }
    }
}

impl Default for RewardSnapshot {
    fn default() -> Self {
        Self::zero()
    }
}
