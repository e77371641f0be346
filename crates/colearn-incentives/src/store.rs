//! Submission Store
//!
//! Authoritative record of every accepted submission and of the per-address
//! good-submission counters. Records are created exactly once, on accepted
//! payment, and are never deleted: the full history stays queryable as an
//! audit trail even after a deposit is fully claimed.
//!
//! All mutation happens under a single write lock per operation, so each
//! operation observes and publishes a consistent state or nothing at all.

use crate::cost;
use crate::error::{IncentiveError, Result};
use colearn_types::{AccountAddress, SubmissionId, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// One accepted submission and the claim state of its deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub submitter: AccountAddress,
    pub original_author: AccountAddress,
    pub classification: u64,
    pub added_time: i64,
    pub deposit: TokenAmount,
    pub claimable_amount: TokenAmount,
    pub claimed_by_submitter: bool,
    pub claimed_by_reporter: bool,
}

#[derive(Debug)]
pub(crate) struct StoreState {
    pub(crate) last_update_time: i64,
    pub(crate) total_good_count: u64,
    pub(crate) address_good_count: HashMap<AccountAddress, u64>,
    pub(crate) submissions: HashMap<SubmissionId, Submission>,
    pub(crate) next_sequence: u64,
}

/// Shared handle to the store; clones refer to the same underlying state.
#[derive(Clone)]
pub struct SubmissionStore {
    pub(crate) state: Arc<RwLock<StoreState>>,
}

impl SubmissionStore {
    /// Create an empty store whose pricing clock starts at `genesis_time`.
    pub fn new(genesis_time: i64) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                last_update_time: genesis_time,
                total_good_count: 0,
                address_good_count: HashMap::new(),
                submissions: HashMap::new(),
                next_sequence: 0,
            })),
        }
    }

    /// Price, charge, and record a new submission.
    ///
    /// The cost is computed under the same write lock that records the entry,
    /// so a concurrent acceptance cannot slip in between pricing and payment.
    pub async fn accept_submission(
        &self,
        now: i64,
        submitter: AccountAddress,
        payment: TokenAmount,
        data: &[u8],
        classification: u64,
        cost_weight: u64,
    ) -> Result<(SubmissionId, TokenAmount)> {
        let mut state = self.state.write().await;

        let cost = cost::next_cost(cost_weight, state.last_update_time, now)?;
        if payment < cost {
            return Err(IncentiveError::InsufficientPayment { payment, cost });
        }

        let sequence = state.next_sequence;
        let id = SubmissionId::compute(sequence, &submitter, data, classification, now);
        state.submissions.insert(
            id,
            Submission {
                submitter,
                original_author: submitter,
                classification,
                added_time: now,
                deposit: payment,
                claimable_amount: payment,
                claimed_by_submitter: false,
                claimed_by_reporter: false,
            },
        );
        state.next_sequence += 1;
        state.last_update_time = now;

        info!(
            submission_id = %id,
            submitter = %submitter,
            classification,
            deposit = %payment,
            cost = %cost,
            "📥 Submission accepted"
        );

        Ok((id, cost))
    }

    pub async fn submission(&self, id: &SubmissionId) -> Option<Submission> {
        let state = self.state.read().await;
        state.submissions.get(id).cloned()
    }

    pub async fn submission_count(&self) -> usize {
        let state = self.state.read().await;
        state.submissions.len()
    }

    pub async fn last_update_time(&self) -> i64 {
        let state = self.state.read().await;
        state.last_update_time
    }

    pub async fn total_good_count(&self) -> u64 {
        let state = self.state.read().await;
        state.total_good_count
    }

    pub async fn good_count(&self, address: &AccountAddress) -> u64 {
        let state = self.state.read().await;
        state.address_good_count.get(address).copied().unwrap_or(0)
    }

    /// Sum of deposit value still claimable across all submissions, for the
    /// host ledger's solvency checks.
    pub async fn total_claimable(&self) -> TokenAmount {
        let state = self.state.read().await;
        state
            .submissions
            .values()
            .fold(TokenAmount::ZERO, |acc, s| {
                acc.saturating_add(s.claimable_amount)
            })
    }
}
