//! Reward Estimator - vote value estimation for stake-weighted content ledgers
//!
//! Converts a voter's stake and voting power, together with a content item's
//! accumulated reward shares, into the currency value a prospective vote
//! would add to (or remove from) that item's payout.
//!
//! Everything in this crate is pure: snapshots are passed in by reference,
//! nothing is fetched and nothing is mutated.
//!
//! # Pipeline
//!
//! ```text
//! AccountSnapshot ──► effective stake (micro-units)
//!        │                    │
//!        ▼                    ▼
//!   VotingPower ──► vote effective shares ──► reward curve (before/after)
//!                                                    │
//!                               EconomicSnapshot ◄───┘ claim
//!                                      │
//!                                      ▼
//!                               estimated value
//! ```

pub mod asset;
pub mod curve;
pub mod error;
pub mod estimator;
pub mod power;
pub mod snapshot;

// Re-export main types for convenience
pub use asset::Asset;
pub use curve::{reward_curve, vote_claim, CurveParams};
pub use error::{AssetParseError, ComputationError, Result};
pub use estimator::RewardEstimator;
pub use power::{FixedPower, RegeneratingPower, VotingPower, MAX_VOTING_POWER};
pub use snapshot::{AccountSnapshot, ActiveVote, ContentKey, ContentSnapshot, EconomicSnapshot};
