//! The quadratic reward curve.
//!
//! `f(r) = ((r + C)^2 - C^2) / (r + 4C)` maps accumulated rshares to a claim
//! on the reward pool. A vote's claim is the curve's growth across the
//! shares it adds.

use serde::{Deserialize, Serialize};

use crate::error::{checked_div, finite, Result};

/// Protocol curve constant `C`.
pub const CURVE_CONSTANT: f64 = 2_000_000_000_000.0;

/// Share of stake a single full-strength vote exerts.
pub const VOTE_POWER_FRACTION: f64 = 0.02;

/// Vesting amounts are scaled to the ledger's integer micro-units.
pub const MICRO_SCALE: f64 = 1e6;

/// Protocol parameters of the reward curve.
///
/// Defaults are the live ledger's values; anything else breaks estimate
/// parity with the chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveParams {
    /// Curve constant `C`
    pub curve_constant: f64,
    /// Fraction of stake applied by a 100% vote at full power
    pub vote_power_fraction: f64,
    /// Multiplier from decimal vests to micro-units
    pub micro_scale: f64,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            curve_constant: CURVE_CONSTANT,
            vote_power_fraction: VOTE_POWER_FRACTION,
            micro_scale: MICRO_SCALE,
        }
    }
}

/// Evaluate the reward curve at `rshares`.
pub fn reward_curve(rshares: f64, params: &CurveParams) -> Result<f64> {
    let c = params.curve_constant;
    let c4 = 4.0 * c;
    let c2 = c * c;

    let normalized = finite("normalized rshares", rshares + c)?;
    checked_div("reward curve", normalized * normalized - c2, rshares + c4)
}

/// Curve claim gained by adding `vote_shares` on top of `net_rshares`.
pub fn vote_claim(net_rshares: f64, vote_shares: f64, params: &CurveParams) -> Result<f64> {
    let before = reward_curve(net_rshares, params)?;
    let after = reward_curve(net_rshares + vote_shares, params)?;
    finite("vote claim", after - before)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComputationError;

    #[test]
    fn test_curve_at_zero() {
        assert_eq!(reward_curve(0.0, &CurveParams::default()), Ok(0.0));
    }

    #[test]
    fn test_curve_known_point() {
        // r(r + 2C) / (r + 4C) at r = C/2
        let value = reward_curve(1e12, &CurveParams::default()).unwrap();
        assert!((value - 555_555_555_555.5557).abs() < 1e-3);
    }

    #[test]
    fn test_claim_positive_above_zero() {
        let claim = vote_claim(1e12, 2e10, &CurveParams::default()).unwrap();
        assert!((claim - 12_116_284_799.211548).abs() < 1e-3);
    }

    #[test]
    fn test_claim_negative_in_decreasing_region() {
        // The curve decreases between roughly -6.83C and -1.17C.
        let claim = vote_claim(-3e12, 2e10, &CurveParams::default()).unwrap();
        assert!(claim < 0.0);
    }

    #[test]
    fn test_pole_is_an_error() {
        let params = CurveParams::default();
        let pole = -4.0 * params.curve_constant;
        assert_eq!(
            reward_curve(pole, &params),
            Err(ComputationError::DivisionByZero { term: "reward curve" })
        );
        assert!(vote_claim(pole + 1e10, -1e10, &params).is_err());
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let params: CurveParams = serde_json::from_str(r#"{"vote_power_fraction": 0.05}"#).unwrap();
        assert_eq!(params.curve_constant, CURVE_CONSTANT);
        assert_eq!(params.vote_power_fraction, 0.05);
        assert_eq!(params.micro_scale, MICRO_SCALE);
    }
}
