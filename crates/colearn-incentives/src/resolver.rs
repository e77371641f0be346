//! Claim Resolution
//!
//! Arbitration over recorded deposits. Two claim paths exist per submission:
//!
//! - **Refund**: the original submitter reclaims their deposit once the
//!   refund window has passed and the model agrees with their label.
//! - **Report**: a third party claims a deposit attached to data the model
//!   now disagrees with. Before the owner-claim window the reward is weighted
//!   by the reporter's own good-data track record, which makes policing
//!   one's own bad data from a throwaway address unprofitable. After the
//!   owner and any-address windows, deposits become sweepable outright so
//!   value can never be permanently stuck.
//!
//! Each claim flag gates only its own path; `NothingToClaim` is the
//! universal final guard once a deposit is exhausted.

use crate::config::StakeConfig;
use crate::error::{IncentiveError, Result};
use crate::store::SubmissionStore;
use colearn_types::{AccountAddress, SubmissionId, TokenAmount};
use tracing::{info, warn};

pub struct ClaimResolver {
    store: SubmissionStore,
    config: StakeConfig,
}

impl ClaimResolver {
    pub fn new(store: SubmissionStore, config: StakeConfig) -> Self {
        Self { store, config }
    }

    /// Refund a deposit to its original submitter.
    ///
    /// Succeeds only after `refund_wait_secs` and only when the model still
    /// agrees with the submitted label; the entire remaining claimable
    /// amount is consumed and the submitter's good-data counters advance.
    pub async fn handle_refund(
        &self,
        now: i64,
        submission_id: SubmissionId,
        submitter: AccountAddress,
        prediction: u64,
    ) -> Result<TokenAmount> {
        let mut guard = self.store.state.write().await;
        let state = &mut *guard;

        let submission = state
            .submissions
            .get_mut(&submission_id)
            .ok_or(IncentiveError::SubmissionNotFound(submission_id))?;

        if submission.submitter != submitter {
            return Err(IncentiveError::IdentityMismatch(submitter));
        }
        if submission.claimed_by_submitter {
            return Err(IncentiveError::AlreadyClaimed);
        }
        if submission.claimable_amount.is_zero() {
            return Err(IncentiveError::NothingToClaim);
        }
        let elapsed = now - submission.added_time;
        let refund_wait = i64::from(self.config.refund_wait_secs);
        if elapsed < refund_wait {
            return Err(IncentiveError::TooEarly {
                remaining: refund_wait - elapsed,
            });
        }
        if prediction != submission.classification {
            return Err(IncentiveError::PredictionMismatch);
        }

        let refund = submission.claimable_amount;
        submission.claimable_amount = TokenAmount::ZERO;
        submission.claimed_by_submitter = true;

        *state.address_good_count.entry(submitter).or_insert(0) += 1;
        state.total_good_count += 1;

        info!(
            submission_id = %submission_id,
            submitter = %submitter,
            refund = %refund,
            good_count = state.address_good_count[&submitter],
            "💰 Deposit refunded"
        );

        Ok(refund)
    }

    /// Resolve a report against a submission.
    ///
    /// Owner sweep and public sweep pay out the full remaining deposit once
    /// their windows open; inside the contested window the reward is
    /// `deposit * good(reporter) / total_good`, clamped so a floor-divided
    /// zero still pays out the remainder rather than nothing.
    pub async fn handle_report(
        &self,
        now: i64,
        submission_id: SubmissionId,
        reporter: AccountAddress,
        original_author: AccountAddress,
        prediction: u64,
    ) -> Result<TokenAmount> {
        let mut guard = self.store.state.write().await;
        let state = &mut *guard;

        let submission = state
            .submissions
            .get_mut(&submission_id)
            .ok_or(IncentiveError::SubmissionNotFound(submission_id))?;

        if submission.original_author != original_author {
            return Err(IncentiveError::IdentityMismatch(original_author));
        }
        if submission.claimable_amount.is_zero() {
            return Err(IncentiveError::NothingToClaim);
        }

        let elapsed = now - submission.added_time;
        let owner_wait = i64::from(self.config.owner_claim_wait_secs);
        let any_wait = i64::from(self.config.any_address_claim_wait_secs);

        if elapsed >= owner_wait && reporter == self.config.owner {
            let reward = submission.claimable_amount;
            submission.claimable_amount = TokenAmount::ZERO;

            info!(
                submission_id = %submission_id,
                owner = %reporter,
                reward = %reward,
                elapsed,
                "🧹 Abandoned deposit swept by owner"
            );
            return Ok(reward);
        }

        if elapsed >= any_wait {
            let reward = submission.claimable_amount;
            submission.claimable_amount = TokenAmount::ZERO;

            info!(
                submission_id = %submission_id,
                reporter = %reporter,
                reward = %reward,
                elapsed,
                "✅ Expired deposit swept"
            );
            return Ok(reward);
        }

        // Contested report: adjudicated on model disagreement, rewarded in
        // proportion to the reporter's demonstrated good-data share.
        if reporter == submission.original_author {
            return Err(IncentiveError::SelfReport);
        }
        if submission.claimed_by_reporter {
            return Err(IncentiveError::AlreadyClaimed);
        }
        let refund_wait = i64::from(self.config.refund_wait_secs);
        if elapsed < refund_wait {
            return Err(IncentiveError::TooEarly {
                remaining: refund_wait - elapsed,
            });
        }
        if prediction == submission.classification {
            return Err(IncentiveError::PredictionMatches);
        }

        let reporter_good = state
            .address_good_count
            .get(&reporter)
            .copied()
            .unwrap_or(0);
        if reporter_good == 0 {
            return Err(IncentiveError::NoReputation);
        }
        let total_good = state.total_good_count;
        debug_assert!(
            total_good >= reporter_good,
            "per-address good count exceeds the global total"
        );

        let claimable = submission.claimable_amount;
        let weighted = u128::from(submission.deposit.to_units()) * u128::from(reporter_good)
            / u128::from(total_good);
        let weighted = u64::try_from(weighted).unwrap_or(u64::MAX);

        let reward = if weighted == 0 || weighted > claimable.to_units() {
            claimable
        } else {
            TokenAmount::from_units(weighted)
        };

        submission.claimed_by_reporter = true;
        submission.claimable_amount = claimable
            .checked_sub(reward)
            .ok_or(IncentiveError::Overflow("claimable remainder"))?;

        warn!(
            submission_id = %submission_id,
            reporter = %reporter,
            reward = %reward,
            remaining = %submission.claimable_amount,
            reporter_good,
            total_good,
            "⚡ Contested deposit claimed by reporter"
        );

        Ok(reward)
    }
}
