//! Core trait for ledger transports.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Error types for vote submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The ledger refused the operation
    #[error("Vote rejected: {0}")]
    Rejected(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Transport is not available (no signer, offline)
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// Core trait for ledger transports.
///
/// A successful return means the ledger accepted the weighted vote.
#[async_trait]
pub trait VoteTransport: Send + Sync {
    /// Submit `weight` (-10000..=10000 basis points) from `voter` on
    /// `author`'s `permalink`.
    async fn submit_vote(
        &self,
        voter: &str,
        author: &str,
        permalink: &str,
        weight: i32,
    ) -> Result<VoteReceipt, TransportError>;
}

/// Acknowledgement of an accepted vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct VoteReceipt {
    /// Ledger transaction identifier
    pub transaction_id: String,
    /// Block the transaction was included in, when known
    pub block_num: Option<u64>,
}

impl VoteReceipt {
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            block_num: None,
        }
    }

    /// Set the block number.
    pub fn with_block(mut self, block_num: u64) -> Self {
        self.block_num = Some(block_num);
        self
    }
}
