//! Vote weight and vote list reconciliation.

use reward_estimator::ActiveVote;
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Transport weight for a percent: `ceil(percent * 100)` basis points.
///
/// Always rounds toward positive infinity, so `-0.005` becomes `0`.
pub fn vote_weight(percent: f64) -> i32 {
    (percent * 100.0).ceil() as i32
}

/// Vote list after `voter` casts `weight`.
///
/// Every other voter's entry keeps its position; `voter`'s single entry goes
/// last.
pub fn merge_vote(votes: &[ActiveVote], voter: &str, weight: i32) -> Vec<ActiveVote> {
    votes
        .iter()
        .filter(|v| v.voter != voter)
        .cloned()
        .chain(std::iter::once(ActiveVote::new(voter, i64::from(weight))))
        .collect()
}

/// Whether a user has an up or down vote on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct VoteStatus {
    pub up_voted: bool,
    pub down_voted: bool,
}

/// Vote status of `user` in `votes`; both false without a user.
pub fn is_voted(votes: &[ActiveVote], user: Option<&str>) -> VoteStatus {
    let Some(user) = user else {
        return VoteStatus::default();
    };

    VoteStatus {
        up_voted: votes.iter().any(|v| v.voter == user && v.rshares > 0),
        down_voted: votes.iter().any(|v| v.voter == user && v.rshares < 0),
    }
}
