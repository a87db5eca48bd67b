//! Snapshot types supplied by the external account, content and global stores.
//!
//! Field names follow the ledger API so snapshots deserialize straight from
//! its JSON responses.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::asset::Asset;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// A voter's account as last fetched from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct AccountSnapshot {
    /// Account name (the voter identity)
    pub name: String,
    /// Own staked shares
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub vesting_shares: Asset,
    /// Shares delegated to this account
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub received_vesting_shares: Asset,
    /// Shares this account delegated away
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub delegated_vesting_shares: Asset,
    /// Voting power in basis points (0-10000) as of `last_vote_time`
    pub voting_power: u16,
    /// When the account last voted
    #[serde(deserialize_with = "ledger_time")]
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub last_vote_time: DateTime<Utc>,
    /// Whether the full account data has been loaded
    #[serde(default, alias = "__loaded")]
    pub loaded: bool,
}

impl AccountSnapshot {
    /// Create a loaded snapshot with zero balances and full voting power.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vesting_shares: Asset::new(0.0, "VESTS"),
            received_vesting_shares: Asset::new(0.0, "VESTS"),
            delegated_vesting_shares: Asset::new(0.0, "VESTS"),
            voting_power: 10_000,
            last_vote_time: DateTime::<Utc>::default(),
            loaded: true,
        }
    }

    /// Set own vesting shares.
    pub fn with_vesting_shares(mut self, shares: Asset) -> Self {
        self.vesting_shares = shares;
        self
    }

    /// Set received and delegated shares.
    pub fn with_delegations(mut self, received: Asset, delegated: Asset) -> Self {
        self.received_vesting_shares = received;
        self.delegated_vesting_shares = delegated;
        self
    }

    /// Set raw voting power and the time it was recorded.
    pub fn with_voting_power(mut self, voting_power: u16, last_vote_time: DateTime<Utc>) -> Self {
        self.voting_power = voting_power;
        self.last_vote_time = last_vote_time;
        self
    }

    /// Mark the snapshot as loaded or not.
    pub fn with_loaded(mut self, loaded: bool) -> Self {
        self.loaded = loaded;
        self
    }

    /// Effective stake: own + received - delegated.
    pub fn effective_vests(&self) -> f64 {
        self.vesting_shares.amount + self.received_vesting_shares.amount
            - self.delegated_vesting_shares.amount
    }
}

/// Identity of a content item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ContentKey {
    pub author: String,
    #[serde(alias = "permlink")]
    pub permalink: String,
}

impl ContentKey {
    pub fn new(author: impl Into<String>, permalink: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            permalink: permalink.into(),
        }
    }
}

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}/{}", self.author, self.permalink)
    }
}

/// A single voter's entry on a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ActiveVote {
    pub voter: String,
    pub rshares: i64,
}

impl ActiveVote {
    pub fn new(voter: impl Into<String>, rshares: i64) -> Self {
        Self {
            voter: voter.into(),
            rshares,
        }
    }
}

/// A content item's reward state.
///
/// `active_votes` holds at most one entry per voter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ContentSnapshot {
    pub author: String,
    #[serde(alias = "permlink")]
    pub permalink: String,
    /// Accumulated weighted reward shares
    pub net_rshares: i64,
    #[serde(default)]
    pub active_votes: Vec<ActiveVote>,
}

impl ContentSnapshot {
    /// Create an item with no votes.
    pub fn new(author: impl Into<String>, permalink: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            permalink: permalink.into(),
            net_rshares: 0,
            active_votes: Vec::new(),
        }
    }

    /// Set accumulated rshares.
    pub fn with_net_rshares(mut self, net_rshares: i64) -> Self {
        self.net_rshares = net_rshares;
        self
    }

    /// Set the vote list.
    pub fn with_votes(mut self, votes: Vec<ActiveVote>) -> Self {
        self.active_votes = votes;
        self
    }

    /// Identity of this item.
    pub fn key(&self) -> ContentKey {
        ContentKey::new(&self.author, &self.permalink)
    }
}

/// Global reward-fund and price data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct EconomicSnapshot {
    /// Sum of recent curve claims across the reward fund
    pub fund_recent_claims: f64,
    /// Reward fund balance in its native unit
    pub fund_reward_balance: f64,
    /// Price ratio numerator
    pub base: f64,
    /// Price ratio denominator
    pub quote: f64,
}

impl EconomicSnapshot {
    pub fn new(fund_recent_claims: f64, fund_reward_balance: f64, base: f64, quote: f64) -> Self {
        Self {
            fund_recent_claims,
            fund_reward_balance,
            base,
            quote,
        }
    }
}

/// Ledger timestamps carry no offset (`2020-05-01T12:00:00`) and are UTC.
fn ledger_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}
