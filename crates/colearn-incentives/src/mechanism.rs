use crate::clock::Clock;
use crate::config::StakeConfig;
use crate::cost;
use crate::error::Result;
use crate::resolver::ClaimResolver;
use crate::store::{Submission, SubmissionStore};
use async_trait::async_trait;
use colearn_types::{AccountAddress, SubmissionId, TokenAmount};
use std::sync::Arc;

/// Capability interface for pricing submissions and adjudicating claims.
///
/// The enclosing contribution-management collaborator authenticates end
/// users, performs the ledger transfers, and forwards already-verified
/// identities into these entry points.
#[async_trait]
pub trait IncentiveMechanism: Send + Sync {
    /// Price of the next submission. Read-only.
    async fn next_cost(&self) -> Result<TokenAmount>;

    /// Accept a paid submission and record its deposit.
    async fn handle_add_data(
        &self,
        submitter: AccountAddress,
        payment: TokenAmount,
        data: &[u8],
        classification: u64,
    ) -> Result<(SubmissionId, TokenAmount)>;

    /// Refund a deposit to its submitter. Returns the refunded amount.
    async fn handle_refund(
        &self,
        submission_id: SubmissionId,
        submitter: AccountAddress,
        prediction: u64,
    ) -> Result<TokenAmount>;

    /// Resolve a report against a submission. Returns the reward paid.
    async fn handle_report(
        &self,
        submission_id: SubmissionId,
        reporter: AccountAddress,
        original_author: AccountAddress,
        prediction: u64,
    ) -> Result<TokenAmount>;
}

/// Deposit-staking incentive mechanism over a shared submission store.
pub struct StakingMechanism {
    config: StakeConfig,
    clock: Arc<dyn Clock>,
    store: SubmissionStore,
    resolver: ClaimResolver,
    // Metrics counters - set externally, incremented on successful operations
    pub submissions_accepted: Option<Arc<prometheus::IntCounter>>,
    pub refunds_paid: Option<Arc<prometheus::IntCounter>>,
    pub reports_paid: Option<Arc<prometheus::IntCounter>>,
}

impl StakingMechanism {
    /// Validate the configuration and create an empty mechanism. The pricing
    /// clock starts at construction time, so the first submission is priced
    /// as if one had just been accepted.
    pub fn new(config: StakeConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let store = SubmissionStore::new(clock.now());
        let resolver = ClaimResolver::new(store.clone(), config.clone());
        Ok(Self {
            config,
            clock,
            store,
            resolver,
            submissions_accepted: None,
            refunds_paid: None,
            reports_paid: None,
        })
    }

    /// Set metrics for tracking accepted submissions and payouts
    pub fn set_metrics(
        &mut self,
        submissions_accepted: Arc<prometheus::IntCounter>,
        refunds_paid: Arc<prometheus::IntCounter>,
        reports_paid: Arc<prometheus::IntCounter>,
    ) {
        self.submissions_accepted = Some(submissions_accepted);
        self.refunds_paid = Some(refunds_paid);
        self.reports_paid = Some(reports_paid);
    }

    pub fn config(&self) -> &StakeConfig {
        &self.config
    }

    pub fn owner(&self) -> AccountAddress {
        self.config.owner
    }

    pub async fn last_update_time(&self) -> i64 {
        self.store.last_update_time().await
    }

    pub async fn total_good_count(&self) -> u64 {
        self.store.total_good_count().await
    }

    pub async fn good_count(&self, address: &AccountAddress) -> u64 {
        self.store.good_count(address).await
    }

    pub async fn submission(&self, id: &SubmissionId) -> Option<Submission> {
        self.store.submission(id).await
    }

    pub async fn submission_count(&self) -> usize {
        self.store.submission_count().await
    }

    pub async fn total_claimable(&self) -> TokenAmount {
        self.store.total_claimable().await
    }
}

#[async_trait]
impl IncentiveMechanism for StakingMechanism {
    async fn next_cost(&self) -> Result<TokenAmount> {
        let now = self.clock.now();
        let last_update = self.store.last_update_time().await;
        cost::next_cost(self.config.cost_weight, last_update, now)
    }

    async fn handle_add_data(
        &self,
        submitter: AccountAddress,
        payment: TokenAmount,
        data: &[u8],
        classification: u64,
    ) -> Result<(SubmissionId, TokenAmount)> {
        let now = self.clock.now();
        let accepted = self
            .store
            .accept_submission(
                now,
                submitter,
                payment,
                data,
                classification,
                self.config.cost_weight,
            )
            .await?;

        if let Some(ref counter) = self.submissions_accepted {
            counter.inc();
        }
        Ok(accepted)
    }

    async fn handle_refund(
        &self,
        submission_id: SubmissionId,
        submitter: AccountAddress,
        prediction: u64,
    ) -> Result<TokenAmount> {
        let now = self.clock.now();
        let refund = self
            .resolver
            .handle_refund(now, submission_id, submitter, prediction)
            .await?;

        if let Some(ref counter) = self.refunds_paid {
            counter.inc();
        }
        Ok(refund)
    }

    async fn handle_report(
        &self,
        submission_id: SubmissionId,
        reporter: AccountAddress,
        original_author: AccountAddress,
        prediction: u64,
    ) -> Result<TokenAmount> {
        let now = self.clock.now();
        let reward = self
            .resolver
            .handle_report(now, submission_id, reporter, original_author, prediction)
            .await?;

        if let Some(ref counter) = self.reports_paid {
            counter.inc();
        }
        Ok(reward)
    }
}
