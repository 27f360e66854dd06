//! Pure projection of session + store state into render instructions. The
//! presentation layer consumes this and nothing else; it never reaches
//! into the store directly.

use rust_decimal::Decimal;

use crate::chains::chain_label;
use crate::models::{ConnectionState, RewardSnapshot};
use crate::store::{Collection, InventoryStore};
use crate::utils::shorten_address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// No session: prompt the user to connect
    Disconnected,
    /// Discovery in flight
    Loading,
    Empty,
    Populated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub connected: bool,
    /// Connect-button caption: a call to action, or the short address
    pub connect_label: String,
    pub network_label: Option<String>,

    pub wallet_count: usize,
    pub staked_count: usize,
    pub owned_panel: PanelState,
    pub staked_panel: PanelState,

    pub stake_enabled: bool,
    pub unstake_enabled: bool,
    pub claim_enabled: bool,

    pub reward: RewardSnapshot,
}

pub fn project(
    state: &ConnectionState,
    store: &InventoryStore,
    discovering: bool,
    min_claim: Decimal,
) -> ViewModel {
    let connected = state.is_connected();
    let reward = store.reward().clone();

    let owned_panel = if !connected {
        PanelState::Disconnected
    } else if discovering {
        PanelState::Loading
    } else if store.owned().is_empty() {
        PanelState::Empty
    } else {
        PanelState::Populated
    };

    let staked_panel = if !connected {
        PanelState::Disconnected
    } else if store.staked().is_empty() {
        PanelState::Empty
    } else {
        PanelState::Populated
    };

    ViewModel {
        connected,
        connect_label: match &state.account {
            Some(account) if connected => shorten_address(account),
            _ => "Connect Wallet".to_string(),
        },
        network_label: state.chain_id.map(chain_label),

        wallet_count: store.owned().len(),
        staked_count: store.staked().len(),
        owned_panel,
        staked_panel,

        stake_enabled: connected && store.selection_count(Collection::Owned) > 0,
        unstake_enabled: connected && store.selection_count(Collection::Staked) > 0,
        claim_enabled: connected && reward.claimable > min_claim,

        reward,
    }
}
