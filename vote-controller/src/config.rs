//! Configuration for the vote controller.

use reward_estimator::{CurveParams, RegeneratingPower};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for a [`crate::VoteController`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Reward curve protocol parameters
    pub curve: CurveParams,
    /// Voting power regeneration
    pub power: RegeneratingPower,
    /// Handling of overlapping submissions for the same voter and content
    pub submission_policy: SubmissionPolicy,
    /// Vote dialog settings
    pub dialog: DialogConfig,
}

impl ControllerConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Set the submission policy.
    pub fn with_submission_policy(mut self, policy: SubmissionPolicy) -> Self {
        self.submission_policy = policy;
        self
    }
}

/// What to do when a vote is confirmed while an earlier vote by the same
/// voter on the same content has not completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPolicy {
    /// Submit anyway; the ledger keeps the last vote
    #[default]
    AllowConcurrent,
    /// Refuse the second submission until the first completes
    RejectWhileInFlight,
}

/// Vote dialog settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Upvote slider value when no preference is stored
    pub default_up_value: f64,
    /// Downvote slider value when no preference is stored
    pub default_down_value: f64,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            default_up_value: 100.0,
            default_down_value: -100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ControllerConfig::default();
        assert_eq!(config.curve, CurveParams::default());
        assert_eq!(config.power.regeneration_secs, 432_000);
        assert_eq!(config.submission_policy, SubmissionPolicy::AllowConcurrent);
        assert_eq!(config.dialog.default_up_value, 100.0);
        assert_eq!(config.dialog.default_down_value, -100.0);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = ControllerConfig::default()
            .with_submission_policy(SubmissionPolicy::RejectWhileInFlight);
        let yaml = config.to_yaml().unwrap();
        let parsed = ControllerConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "submission_policy: reject_while_in_flight\ndialog:\n  default_up_value: 50.0\n";
        let config = ControllerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.submission_policy, SubmissionPolicy::RejectWhileInFlight);
        assert_eq!(config.dialog.default_up_value, 50.0);
        assert_eq!(config.dialog.default_down_value, -100.0);
        assert_eq!(config.curve.curve_constant, 2_000_000_000_000.0);
    }

    #[test]
    fn test_bad_yaml_is_config_error() {
        let err = ControllerConfig::from_yaml("submission_policy: sometimes").unwrap_err();
        assert!(matches!(err, crate::error::ControllerError::Config(_)));
    }
}
