use crate::error::{IncentiveError, Result};
use colearn_types::AccountAddress;
use serde::{Deserialize, Serialize};

/// Staking parameters, immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeConfig {
    /// Seconds a submitter must wait before reclaiming their own deposit.
    pub refund_wait_secs: u32,

    /// Seconds after which the owner may sweep an unclaimed deposit.
    pub owner_claim_wait_secs: u32,

    /// Seconds after which any address may sweep an unclaimed deposit.
    pub any_address_claim_wait_secs: u32,

    /// Scaling factor for the submission pricing curve.
    pub cost_weight: u64,

    /// Privileged identity with early-claim rights.
    pub owner: AccountAddress,
}

impl StakeConfig {
    /// The wait windows must be ordered `refund <= owner <= any`; violating
    /// the ordering is a fatal configuration error, checked before any state
    /// is created.
    pub fn validate(&self) -> Result<()> {
        if self.refund_wait_secs > self.owner_claim_wait_secs {
            return Err(IncentiveError::Configuration(format!(
                "refund wait ({}s) exceeds owner claim wait ({}s)",
                self.refund_wait_secs, self.owner_claim_wait_secs
            )));
        }
        if self.owner_claim_wait_secs > self.any_address_claim_wait_secs {
            return Err(IncentiveError::Configuration(format!(
                "owner claim wait ({}s) exceeds any-address claim wait ({}s)",
                self.owner_claim_wait_secs, self.any_address_claim_wait_secs
            )));
        }
        if self.cost_weight == 0 {
            return Err(IncentiveError::Configuration(
                "cost weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StakeConfig {
    fn default() -> Self {
        Self {
            refund_wait_secs: 86_400,             // 1 day
            owner_claim_wait_secs: 604_800,       // 7 days
            any_address_claim_wait_secs: 1_209_600, // 14 days
            cost_weight: 1,
            owner: AccountAddress::from_bytes([0; 32]),
        }
    }
}
