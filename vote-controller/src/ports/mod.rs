//! Narrow collaborator interfaces the controller calls out to.
//!
//! Each port covers one concern of the surrounding application; the
//! controller never sees the application context as a whole.

pub mod recording;
pub mod traits;

pub use recording::RecordingCollaborators;
pub use traits::{
    AccountRefresher, Collaborators, DisplayErrorFormatter, ErrorFormatter, LoginGate, Notifier,
    VoteListSink,
};
