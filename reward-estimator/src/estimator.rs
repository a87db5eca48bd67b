//! Vote value estimation.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::curve::{vote_claim, CurveParams};
use crate::error::{checked_div, finite, Result};
use crate::power::{RegeneratingPower, VotingPower, MAX_VOTING_POWER};
use crate::snapshot::{AccountSnapshot, ContentSnapshot, EconomicSnapshot};

/// Estimates the currency value of a prospective vote.
///
/// Stateless apart from its protocol parameters and voting power source;
/// cheap to clone and share.
#[derive(Clone)]
pub struct RewardEstimator {
    params: CurveParams,
    power: Arc<dyn VotingPower>,
}

impl RewardEstimator {
    /// Create an estimator with the given parameters and power source.
    pub fn new(params: CurveParams, power: Arc<dyn VotingPower>) -> Self {
        Self { params, power }
    }

    /// Replace the curve parameters.
    pub fn with_params(mut self, params: CurveParams) -> Self {
        self.params = params;
        self
    }

    /// Replace the voting power source.
    pub fn with_voting_power(mut self, power: Arc<dyn VotingPower>) -> Self {
        self.power = power;
        self
    }

    /// Curve parameters in use.
    pub fn params(&self) -> &CurveParams {
        &self.params
    }

    /// Estimate the value of voting `percent` (-100..=100) on `content` now.
    pub fn estimate(
        &self,
        account: Option<&AccountSnapshot>,
        content: &ContentSnapshot,
        econ: &EconomicSnapshot,
        percent: f64,
    ) -> Result<f64> {
        self.estimate_at(account, content, econ, percent, Utc::now())
    }

    /// Estimate with an explicit clock for voting power regeneration.
    ///
    /// Returns 0 for a missing or unloaded account. Upvote estimates are
    /// clamped at 0; downvote estimates are returned signed.
    pub fn estimate_at(
        &self,
        account: Option<&AccountSnapshot>,
        content: &ContentSnapshot,
        econ: &EconomicSnapshot,
        percent: f64,
        now: DateTime<Utc>,
    ) -> Result<f64> {
        let Some(account) = account.filter(|a| a.loaded) else {
            return Ok(0.0);
        };

        let sign = if percent < 0.0 { -1.0 } else { 1.0 };
        let vote_shares = self.vote_effective_shares(account, percent, now)?;
        let claim = vote_claim(content.net_rshares as f64, vote_shares, &self.params)?;

        let proportion = checked_div("reward proportion", claim, econ.fund_recent_claims)?;
        let reward_native = finite("native reward", proportion * econ.fund_reward_balance)?;
        let price = checked_div("price ratio", econ.base, econ.quote)?;
        let value = finite("vote value", reward_native * price)?;

        trace!(
            voter = %account.name,
            percent,
            vote_shares,
            claim,
            value,
            "Estimated vote value"
        );

        if sign > 0.0 {
            Ok((value * sign).max(0.0))
        } else {
            Ok(value * sign)
        }
    }

    /// Rshares a vote of `percent` would add, before the curve is applied.
    ///
    /// Always non-negative: direction only affects the sign of the final value.
    pub fn vote_effective_shares(
        &self,
        account: &AccountSnapshot,
        percent: f64,
        now: DateTime<Utc>,
    ) -> Result<f64> {
        let percent = finite("vote percent", percent)?;
        let stake_micro = finite("vesting stake", account.effective_vests() * self.params.micro_scale)?;

        // The power source works in basis points; the vote weight is a percent
        // of a percent, so power_used lands back on the 0-10000 scale.
        let power_bp = self
            .power
            .voting_power(account, now)
            .clamp(0.0, MAX_VOTING_POWER);
        let power_used = (power_bp / 100.0) * percent.abs();

        finite(
            "vote effective shares",
            stake_micro * (power_used / MAX_VOTING_POWER) * self.params.vote_power_fraction,
        )
    }
}

impl Default for RewardEstimator {
    fn default() -> Self {
        Self::new(CurveParams::default(), Arc::new(RegeneratingPower::default()))
    }
}

impl fmt::Debug for RewardEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewardEstimator")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Asset;
    use crate::error::ComputationError;
    use crate::power::FixedPower;

    fn estimator() -> RewardEstimator {
        RewardEstimator::default().with_voting_power(Arc::new(FixedPower(MAX_VOTING_POWER)))
    }

    fn account() -> AccountSnapshot {
        AccountSnapshot::new("alice").with_vesting_shares(Asset::new(1_000_000.0, "VESTS"))
    }

    fn content(net_rshares: i64) -> ContentSnapshot {
        ContentSnapshot::new("bob", "post").with_net_rshares(net_rshares)
    }

    fn econ() -> EconomicSnapshot {
        EconomicSnapshot::new(1e18, 800_000.0, 0.5, 1.0)
    }

    fn estimate(net_rshares: i64, percent: f64) -> f64 {
        estimator()
            .estimate(Some(&account()), &content(net_rshares), &econ(), percent)
            .unwrap()
    }

    #[test]
    fn test_full_upvote() {
        let value = estimate(1_000_000_000_000, 100.0);
        assert!((value - 0.004_846_513_919_684_62).abs() < 1e-12);
    }

    #[test]
    fn test_half_upvote_scales_shares() {
        let shares = estimator()
            .vote_effective_shares(&account(), 50.0, Utc::now())
            .unwrap();
        assert_eq!(shares, 1e10);

        let value = estimate(1_000_000_000_000, 50.0);
        assert!((value - 0.002_421_506_967_566_846).abs() < 1e-12);
    }

    #[test]
    fn test_downvote_is_signed() {
        let value = estimate(1_000_000_000_000, -100.0);
        assert!((value + 0.004_846_513_919_684_62).abs() < 1e-12);
    }

    #[test]
    fn test_unloaded_or_missing_account_is_zero() {
        let unloaded = account().with_loaded(false);
        for percent in [-100.0, -0.1, 0.0, 0.1, 55.5, 100.0] {
            let value = estimator()
                .estimate(Some(&unloaded), &content(1_000_000_000_000), &econ(), percent)
                .unwrap();
            assert_eq!(value, 0.0);

            let value = estimator()
                .estimate(None, &content(1_000_000_000_000), &econ(), percent)
                .unwrap();
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn test_upvote_never_negative() {
        for net in [-7_000_000_000_000, -3_000_000_000_000, -1_000_000, 0, 5_000_000_000_000] {
            for percent in [0.1, 1.0, 33.3, 100.0] {
                assert!(estimate(net, percent) >= 0.0, "net={} percent={}", net, percent);
            }
        }
    }

    #[test]
    fn test_upvote_and_downvote_are_not_mirrored() {
        // In the curve's decreasing region the raw claim is negative: the
        // upvote clamps to zero while the downvote reports a positive value.
        let up = estimate(-3_000_000_000_000, 100.0);
        let down = estimate(-3_000_000_000_000, -100.0);

        assert_eq!(up, 0.0);
        assert!((down - 0.002_199_203_187_250_977).abs() < 1e-12);
        assert_ne!(up, -down);
    }

    #[test]
    fn test_zero_stake_is_zero() {
        let broke = AccountSnapshot::new("carol");
        let value = estimator()
            .estimate(Some(&broke), &content(1_000_000_000_000), &econ(), 100.0)
            .unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_regenerating_power_uses_clock() {
        let last_vote = Utc::now();
        let drained = account().with_voting_power(0, last_vote);
        let estimator = RewardEstimator::default();

        let value = estimator
            .estimate_at(Some(&drained), &content(0), &econ(), 100.0, last_vote)
            .unwrap();
        assert_eq!(value, 0.0);

        let later = last_vote + chrono::Duration::days(5);
        let value = estimator
            .estimate_at(Some(&drained), &content(0), &econ(), 100.0, later)
            .unwrap();
        assert!(value > 0.0);
    }

    #[test]
    fn test_degenerate_economics_are_errors() {
        let no_claims = EconomicSnapshot::new(0.0, 800_000.0, 0.5, 1.0);
        let result = estimator().estimate(Some(&account()), &content(0), &no_claims, 100.0);
        assert_eq!(
            result,
            Err(ComputationError::DivisionByZero { term: "reward proportion" })
        );

        let no_quote = EconomicSnapshot::new(1e18, 800_000.0, 0.5, 0.0);
        let result = estimator().estimate(Some(&account()), &content(0), &no_quote, 100.0);
        assert_eq!(result, Err(ComputationError::DivisionByZero { term: "price ratio" }));
    }

    #[test]
    fn test_nan_never_leaks() {
        let nan_percent = estimator().estimate(Some(&account()), &content(0), &econ(), f64::NAN);
        assert!(nan_percent.is_err());

        let pole = estimator().estimate(Some(&account()), &content(-8_000_000_000_000), &econ(), 100.0);
        assert!(pole.is_err());

        for net in [-9_000_000_000_000_i64, -4_000_000_000_000, -2_000_000_000_000, 0, i64::MAX / 4] {
            if let Ok(value) = estimate_result(net, -100.0) {
                assert!(value.is_finite());
            }
        }
    }

    fn estimate_result(net_rshares: i64, percent: f64) -> Result<f64> {
        estimator().estimate(Some(&account()), &content(net_rshares), &econ(), percent)
    }

    #[test]
    fn test_custom_params() {
        let doubled = estimator().with_params(CurveParams {
            vote_power_fraction: 0.04,
            ..CurveParams::default()
        });
        let shares = doubled
            .vote_effective_shares(&account(), 100.0, Utc::now())
            .unwrap();
        assert_eq!(shares, 4e10);
    }
}
