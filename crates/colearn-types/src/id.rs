use crate::address::AccountAddress;
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content-derived identifier of an accepted submission.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId([u8; 32]);

impl SubmissionId {
    /// Derive an id from the fields fixed at acceptance time. The store's
    /// sequence number disambiguates identical payloads accepted within the
    /// same second.
    pub fn compute(
        sequence: u64,
        submitter: &AccountAddress,
        data: &[u8],
        classification: u64,
        added_time: i64,
    ) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(&sequence.to_le_bytes());
        hasher.update(submitter.as_bytes());
        hasher.update(data);
        hasher.update(&classification.to_le_bytes());
        hasher.update(&added_time.to_le_bytes());
        Self(hasher.finalize().into())
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubmissionId({}...)", &self.to_hex()[..8])
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
