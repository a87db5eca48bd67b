//! Vote Controller - vote dialog and submission for one content item
//!
//! Drives the vote button of a content item: opening the vote dialog,
//! adjusting and remembering the up/down sliders, estimating the value of
//! the vote, and submitting it through an asynchronous ledger transport.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                VoteController                 │
//! │     (dialog, sliders, submission states)      │
//! └───────┬────────────────┬────────────────┬─────┘
//!         │                │                │
//!         ▼                ▼                ▼
//! ┌───────────────┐ ┌─────────────┐ ┌──────────────┐
//! │RewardEstimator│ │VoteTransport│ │Collaborators │
//! │ (value of the │ │ (sign and   │ │ (vote list,  │
//! │  prospective  │ │  broadcast) │ │  login,      │
//! │  vote)        │ │             │ │  notices)    │
//! └───────────────┘ └─────────────┘ └──────────────┘
//! ```
//!
//! Completions arriving after [`VoteController::dispose`] (or after the
//! controller is dropped) are discarded without touching any collaborator.

pub mod config;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod inflight;
pub mod liveness;
pub mod ports;
pub mod preferences;
pub mod transport;
pub mod votes;

// Re-export main types for convenience
pub use config::{ControllerConfig, DialogConfig, SubmissionPolicy};
pub use controller::{
    ButtonStatus, OpenOutcome, SubmissionHandle, SubmissionOutcome, VoteController, VoteEstimate,
    VoteState,
};
pub use dialog::VoteDialog;
pub use error::{ControllerError, Result};
pub use inflight::{InFlightGuard, InFlightKey, InFlightRegistry};
pub use ports::{
    AccountRefresher, Collaborators, DisplayErrorFormatter, ErrorFormatter, LoginGate, Notifier,
    RecordingCollaborators, VoteListSink,
};
pub use preferences::{MemoryPreferenceStore, PreferenceStore, VoteDirection, VotePreferences};
pub use transport::{MockTransport, TransportError, VoteReceipt, VoteTransport};
pub use votes::{is_voted, merge_vote, vote_weight, VoteStatus};
