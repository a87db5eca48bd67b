//! Recording collaborators for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use reward_estimator::{ActiveVote, ContentKey};

use super::traits::*;
use crate::preferences::MemoryPreferenceStore;

/// Spy implementing every side-effecting port.
///
/// Records calls so tests can assert exactly what the controller did, and
/// that it did nothing after disposal.
#[derive(Default)]
pub struct RecordingCollaborators {
    votes: Mutex<Vec<(ContentKey, Vec<ActiveVote>)>>,
    refreshed: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    login_requests: AtomicU32,
}

impl RecordingCollaborators {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Wire this spy into a full set of ports with an in-memory preference store.
    pub fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators {
            sink: self.clone(),
            refresher: self.clone(),
            notifier: self.clone(),
            login: self.clone(),
            formatter: Arc::new(DisplayErrorFormatter),
            preferences: Arc::new(MemoryPreferenceStore::new()),
        }
    }

    /// Vote lists proposed through the sink.
    pub fn proposed_votes(&self) -> Vec<(ContentKey, Vec<ActiveVote>)> {
        self.votes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Voters whose accounts were refreshed.
    pub fn refreshed_accounts(&self) -> Vec<String> {
        self.refreshed.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Error notifications issued.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Times the login flow was requested.
    pub fn login_requests(&self) -> u32 {
        self.login_requests.load(Ordering::SeqCst)
    }

    /// Whether any state-changing port was called.
    pub fn is_untouched(&self) -> bool {
        self.proposed_votes().is_empty() && self.refreshed_accounts().is_empty() && self.errors().is_empty()
    }
}

impl VoteListSink for RecordingCollaborators {
    fn after_vote(&self, content: &ContentKey, votes: Vec<ActiveVote>) {
        self.votes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((content.clone(), votes));
    }
}

impl AccountRefresher for RecordingCollaborators {
    fn refresh_account(&self, voter: &str) {
        self.refreshed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(voter.to_string());
    }
}

impl Notifier for RecordingCollaborators {
    fn notify_error(&self, message: &str) {
        self.errors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}

impl LoginGate for RecordingCollaborators {
    fn require_login(&self) {
        self.login_requests.fetch_add(1, Ordering::SeqCst);
    }
}
