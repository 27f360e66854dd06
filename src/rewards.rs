//! Reward estimation. The numbers shown next to the staked collection are
//! a presentation-side projection; the model is a strategy so a deployment
//! can substitute an authoritative on-chain read without touching the
//! store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{Asset, RewardSnapshot};

pub trait RewardModel: Send + Sync {
    /// Projects a snapshot from the staked inventory. `claimed_total` is
    /// the amount already consumed by claims and is subtracted from the
    /// estimate.
    fn snapshot(
        &self,
        staked: &[Asset],
        claimed_total: Decimal,
        now: DateTime<Utc>,
    ) -> RewardSnapshot;
}

/// Flat per-asset daily accrual: each staked asset earns `daily_rate`
/// tokens per whole day staked.
#[derive(Debug, Clone)]
pub struct FlatRateModel {
    pub daily_rate: Decimal,
}

impl FlatRateModel {
    pub fn new(daily_rate: Decimal) -> Self {
        Self { daily_rate }
    }
}

impl RewardModel for FlatRateModel {
    fn snapshot(
        &self,
        staked: &[Asset],
        claimed_total: Decimal,
        now: DateTime<Utc>,
    ) -> RewardSnapshot {
        let mut days_staked: i64 = 0;
        let mut total_earned = Decimal::ZERO;

        for asset in staked {
            let Some(staked_at) = asset.staked_at else {
                continue;
            };
            let days = (now - staked_at).num_days().max(0);
            days_staked = days_staked.max(days);
            total_earned += self.daily_rate * Decimal::from(days);
        }

        let claimable = (total_earned - claimed_total).max(Decimal::ZERO);

        RewardSnapshot {
            claimable,
            daily_rate: self.daily_rate * Decimal::from(staked.len() as i64),
            total_earned,
            days_staked,
        }
    }
}
