//! Voting power helpers.
//!
//! Voting power is a basis-point resource (0-10000) that votes consume and
//! that regenerates over time. The estimator only needs the current value;
//! how it is derived is pluggable through [`VotingPower`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::snapshot::AccountSnapshot;

/// Full voting power in basis points.
pub const MAX_VOTING_POWER: f64 = 10_000.0;

/// Seconds for power to regenerate from 0 to full (5 days).
pub const DEFAULT_REGENERATION_SECS: u64 = 432_000;

/// Source of an account's current voting power.
///
/// Implementations must be pure for a fixed `now` and return a value in
/// `[0, MAX_VOTING_POWER]`.
pub trait VotingPower: Send + Sync {
    /// Current voting power in basis points.
    fn voting_power(&self, account: &AccountSnapshot, now: DateTime<Utc>) -> f64;
}

/// Linear regeneration from the last recorded vote, capped at full power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegeneratingPower {
    /// Seconds for a full 0 to 10000 recharge
    pub regeneration_secs: u64,
}

impl RegeneratingPower {
    pub fn new(regeneration_secs: u64) -> Self {
        Self { regeneration_secs }
    }
}

impl Default for RegeneratingPower {
    fn default() -> Self {
        Self::new(DEFAULT_REGENERATION_SECS)
    }
}

impl VotingPower for RegeneratingPower {
    fn voting_power(&self, account: &AccountSnapshot, now: DateTime<Utc>) -> f64 {
        if self.regeneration_secs == 0 {
            return MAX_VOTING_POWER;
        }

        // A vote timestamp in the future regenerates nothing.
        let elapsed_secs = (now - account.last_vote_time).num_milliseconds().max(0) as f64 / 1000.0;
        let regenerated =
            f64::from(account.voting_power) + MAX_VOTING_POWER * elapsed_secs / self.regeneration_secs as f64;

        regenerated.clamp(0.0, MAX_VOTING_POWER)
    }
}

/// A voting power value computed elsewhere (e.g. by the ledger's RC API).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPower(pub f64);

impl VotingPower for FixedPower {
    fn voting_power(&self, _account: &AccountSnapshot, _now: DateTime<Utc>) -> f64 {
        self.0.clamp(0.0, MAX_VOTING_POWER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn voted_at(power: u16) -> (AccountSnapshot, DateTime<Utc>) {
        let last_vote = Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap();
        (AccountSnapshot::new("alice").with_voting_power(power, last_vote), last_vote)
    }

    #[test]
    fn test_no_elapsed_time() {
        let (account, last_vote) = voted_at(7_500);
        let power = RegeneratingPower::default().voting_power(&account, last_vote);
        assert_eq!(power, 7_500.0);
    }

    #[test]
    fn test_regenerates_linearly() {
        let (account, last_vote) = voted_at(5_000);
        // One day is a fifth of the full recharge: +2000 bp
        let now = last_vote + Duration::days(1);
        let power = RegeneratingPower::default().voting_power(&account, now);
        assert!((power - 7_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_caps_at_full_power() {
        let (account, last_vote) = voted_at(9_000);
        let now = last_vote + Duration::days(30);
        assert_eq!(RegeneratingPower::default().voting_power(&account, now), MAX_VOTING_POWER);
    }

    #[test]
    fn test_future_vote_time_does_not_drain() {
        let (account, last_vote) = voted_at(4_000);
        let now = last_vote - Duration::hours(1);
        assert_eq!(RegeneratingPower::default().voting_power(&account, now), 4_000.0);
    }

    #[test]
    fn test_fixed_power_is_clamped() {
        let account = AccountSnapshot::new("alice");
        let now = Utc::now();
        assert_eq!(FixedPower(12_345.0).voting_power(&account, now), MAX_VOTING_POWER);
        assert_eq!(FixedPower(-1.0).voting_power(&account, now), 0.0);
        assert_eq!(FixedPower(6_400.0).voting_power(&account, now), 6_400.0);
    }
}
