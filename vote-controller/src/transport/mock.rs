//! Mock ledger transport for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;
use tokio::sync::Semaphore;

use super::traits::*;

/// A vote as received by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedVote {
    pub voter: String,
    pub author: String,
    pub permalink: String,
    pub weight: i32,
}

/// Mock transport for testing.
///
/// Accepts or rejects on demand and records every call. When held, each
/// submission waits for [`MockTransport::release`] before completing, which
/// lets tests interleave disposal or a second confirm with an in-flight vote.
pub struct MockTransport {
    accept: AtomicBool,
    failure: Mutex<TransportError>,
    held: AtomicBool,
    gate: Semaphore,
    call_count: AtomicU32,
    submitted: Mutex<Vec<SubmittedVote>>,
}

impl MockTransport {
    /// Create a mock that accepts every vote.
    pub fn new() -> Self {
        Self {
            accept: AtomicBool::new(true),
            failure: Mutex::new(TransportError::Rejected("Mock transport rejected vote".to_string())),
            held: AtomicBool::new(false),
            gate: Semaphore::new(0),
            call_count: AtomicU32::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Set whether votes are accepted.
    pub fn with_accept(self, accept: bool) -> Self {
        self.accept.store(accept, Ordering::SeqCst);
        self
    }

    /// Fail every vote with `error`.
    pub fn with_failure(self, error: TransportError) -> Self {
        self.set_failure(error);
        self.accept.store(false, Ordering::SeqCst);
        self
    }

    /// Hold completions until released.
    pub fn with_held(self, held: bool) -> Self {
        self.held.store(held, Ordering::SeqCst);
        self
    }

    /// Change acceptance at runtime.
    pub fn set_accept(&self, accept: bool) {
        self.accept.store(accept, Ordering::SeqCst);
    }

    /// Change the failure returned when not accepting.
    pub fn set_failure(&self, error: TransportError) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = error;
    }

    /// Let `count` held submissions complete.
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }

    /// Number of submit calls so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Votes received so far, in call order.
    pub fn submitted(&self) -> Vec<SubmittedVote> {
        self.submitted.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoteTransport for MockTransport {
    async fn submit_vote(
        &self,
        voter: &str,
        author: &str,
        permalink: &str,
        weight: i32,
    ) -> Result<VoteReceipt, TransportError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.submitted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SubmittedVote {
                voter: voter.to_string(),
                author: author.to_string(),
                permalink: permalink.to_string(),
                weight,
            });

        if self.held.load(Ordering::SeqCst) {
            let permit = self
                .gate
                .acquire()
                .await
                .map_err(|_| TransportError::Unavailable("Mock gate closed".to_string()))?;
            permit.forget();
        }

        if !self.accept.load(Ordering::SeqCst) {
            return Err(self.failure.lock().unwrap_or_else(|e| e.into_inner()).clone());
        }

        Ok(VoteReceipt::new(format!("mock-tx-{}", call)).with_block(u64::from(call)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_mock_accepts() {
        let transport = MockTransport::new();
        assert_eq!(transport.call_count(), 0);

        let receipt = transport
            .submit_vote("alice", "bob", "post", 10_000)
            .await
            .unwrap();

        assert_eq!(receipt.transaction_id, "mock-tx-1");
        assert_eq!(transport.call_count(), 1);
        assert_eq!(transport.submitted()[0].weight, 10_000);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let transport =
            MockTransport::new().with_failure(TransportError::Network("timeout".to_string()));

        let result = transport.submit_vote("alice", "bob", "post", -500).await;
        assert_eq!(result, Err(TransportError::Network("timeout".to_string())));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_held_until_released() {
        let transport = Arc::new(MockTransport::new().with_held(true));

        let pending = {
            let transport = Arc::clone(&transport);
            tokio::spawn(async move { transport.submit_vote("alice", "bob", "post", 100).await })
        };

        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        transport.release(1);
        assert!(pending.await.unwrap().is_ok());
    }
}
