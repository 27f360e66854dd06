//! Authoritative-transaction seam. Stake, unstake, and claim are local
//! state transitions only after the gate confirms the corresponding
//! external action; a real deployment implements this trait over the
//! staking contract (approve + call + await confirmation).

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;

#[async_trait]
pub trait TransactionGate: Send + Sync {
    async fn confirm_stake(&self, asset_ids: &[String]) -> Result<()>;

    async fn confirm_unstake(&self, asset_ids: &[String]) -> Result<()>;

    async fn confirm_claim(&self, amount: Decimal) -> Result<()>;
}

/// Demo gate: approves every transition without any on-chain action.
/// Suitable for tests and local simulation only; nothing it confirms is
/// authoritative.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalGate;

#[async_trait]
impl TransactionGate for LocalGate {
    async fn confirm_stake(&self, asset_ids: &[String]) -> Result<()> {
        tracing::debug!("local gate approving stake of {} assets", asset_ids.len());
        Ok(())
    }

    async fn confirm_unstake(&self, asset_ids: &[String]) -> Result<()> {
        tracing::debug!("local gate approving unstake of {} assets", asset_ids.len());
        Ok(())
    }

    async fn confirm_claim(&self, amount: Decimal) -> Result<()> {
        tracing::debug!("local gate approving claim of {}", amount);
        Ok(())
    }
}
