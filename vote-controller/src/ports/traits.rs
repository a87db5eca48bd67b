//! Collaborator traits.

use std::sync::Arc;

use reward_estimator::{ActiveVote, ContentKey};

use crate::preferences::PreferenceStore;
use crate::transport::TransportError;

/// Receives the proposed replacement vote list after a confirmed vote.
pub trait VoteListSink: Send + Sync {
    fn after_vote(&self, content: &ContentKey, votes: Vec<ActiveVote>);
}

/// Asks the account store to re-fetch a voter's snapshot.
pub trait AccountRefresher: Send + Sync {
    fn refresh_account(&self, voter: &str);
}

/// User-visible error surface.
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// Starts the external login flow.
pub trait LoginGate: Send + Sync {
    fn require_login(&self);
}

/// Turns a transport failure into a user-facing message.
pub trait ErrorFormatter: Send + Sync {
    fn format_error(&self, error: &TransportError) -> String;
}

/// Formats with the error's `Display` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayErrorFormatter;

impl ErrorFormatter for DisplayErrorFormatter {
    fn format_error(&self, error: &TransportError) -> String {
        error.to_string()
    }
}

/// All ports a controller needs.
#[derive(Clone)]
pub struct Collaborators {
    pub sink: Arc<dyn VoteListSink>,
    pub refresher: Arc<dyn AccountRefresher>,
    pub notifier: Arc<dyn Notifier>,
    pub login: Arc<dyn LoginGate>,
    pub formatter: Arc<dyn ErrorFormatter>,
    pub preferences: Arc<dyn PreferenceStore>,
}

impl Collaborators {
    /// Replace the error formatter.
    pub fn with_formatter(mut self, formatter: Arc<dyn ErrorFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Replace the preference store.
    pub fn with_preferences(mut self, preferences: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = preferences;
        self
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formatter() {
        let message = DisplayErrorFormatter
            .format_error(&TransportError::Rejected("bandwidth exceeded".to_string()));
        assert_eq!(message, "Vote rejected: bandwidth exceeded");
    }
}
