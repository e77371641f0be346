use colearn_types::{AccountAddress, SubmissionId, TokenAmount};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IncentiveError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Clock inversion: now {now} precedes last update {last_update}")]
    ClockInversion { now: i64, last_update: i64 },

    #[error("Payment {payment} is below the current cost {cost}")]
    InsufficientPayment {
        payment: TokenAmount,
        cost: TokenAmount,
    },

    #[error("Submission not found: {0}")]
    SubmissionNotFound(SubmissionId),

    #[error("Identity {0} does not match the recorded submission")]
    IdentityMismatch(AccountAddress),

    #[error("Deposit already claimed through this path")]
    AlreadyClaimed,

    #[error("Nothing left to claim")]
    NothingToClaim,

    #[error("Too early: wait window opens in {remaining}s")]
    TooEarly { remaining: i64 },

    #[error("Model prediction disagrees with the submitted label")]
    PredictionMismatch,

    #[error("Model prediction agrees with the contested label")]
    PredictionMatches,

    #[error("A submitter cannot report their own submission")]
    SelfReport,

    #[error("Reporter has no confirmed good submissions")]
    NoReputation,

    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),
}

pub type Result<T> = std::result::Result<T, IncentiveError>;
