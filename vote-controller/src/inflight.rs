//! Registry of votes awaiting a transport result.
//!
//! Shared between controllers when several widgets can vote on the same
//! item, so the `RejectWhileInFlight` policy holds across all of them.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ControllerError, Result};

/// `(voter, author, permalink)` of an in-flight vote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InFlightKey {
    pub voter: String,
    pub author: String,
    pub permalink: String,
}

impl InFlightKey {
    pub fn new(
        voter: impl Into<String>,
        author: impl Into<String>,
        permalink: impl Into<String>,
    ) -> Self {
        Self {
            voter: voter.into(),
            author: author.into(),
            permalink: permalink.into(),
        }
    }
}

/// Tracks which votes are currently in flight.
#[derive(Debug, Default)]
pub struct InFlightRegistry {
    entries: DashMap<InFlightKey, Uuid>,
}

impl InFlightRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Claim `key` for `submission_id`; released when the guard drops.
    pub fn try_acquire(self: &Arc<Self>, key: InFlightKey, submission_id: Uuid) -> Result<InFlightGuard> {
        match self.entries.entry(key.clone()) {
            Entry::Occupied(_) => Err(ControllerError::AlreadySubmitting {
                voter: key.voter,
                author: key.author,
                permalink: key.permalink,
            }),
            Entry::Vacant(slot) => {
                slot.insert(submission_id);
                Ok(InFlightGuard {
                    registry: Arc::clone(self),
                    key,
                    submission_id,
                })
            }
        }
    }

    /// Whether a vote for `key` is in flight.
    pub fn contains(&self, key: &InFlightKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of votes in flight.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Holds an in-flight claim until dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    registry: Arc<InFlightRegistry>,
    key: InFlightKey,
    submission_id: Uuid,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let submission_id = self.submission_id;
        self.registry
            .entries
            .remove_if(&self.key, |_, owner| *owner == submission_id);
    }
}
