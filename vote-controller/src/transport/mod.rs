//! Ledger transport abstraction.
//!
//! How a vote is physically signed and broadcast lives outside this crate;
//! the controller only sees the [`VoteTransport`] trait.
//! - `MockTransport` for tests and demos

pub mod mock;
pub mod traits;

pub use mock::MockTransport;
pub use traits::{TransportError, VoteReceipt, VoteTransport};
