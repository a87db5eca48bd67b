//! Ledger asset amounts such as `"1234.567890 VESTS"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AssetParseError;

/// A decimal amount with its unit symbol.
///
/// Serialized in the ledger's textual form, `"<amount> <SYMBOL>"`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
    /// Decimal magnitude (may be negative)
    pub amount: f64,
    /// Unit symbol, empty when the source string carried none
    pub symbol: String,
}

impl Asset {
    /// Create an asset from parts.
    pub fn new(amount: f64, symbol: impl Into<String>) -> Self {
        Self {
            amount,
            symbol: symbol.into(),
        }
    }
}

impl FromStr for Asset {
    type Err = AssetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let raw_amount = parts.next().ok_or(AssetParseError::MissingAmount)?;

        let amount: f64 = raw_amount
            .parse()
            .map_err(|_| AssetParseError::InvalidAmount(raw_amount.to_string()))?;
        if !amount.is_finite() {
            return Err(AssetParseError::InvalidAmount(raw_amount.to_string()));
        }

        Ok(Self {
            amount,
            symbol: parts.next().unwrap_or_default().to_string(),
        })
    }
}

impl TryFrom<String> for Asset {
    type Error = AssetParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbol.is_empty() {
            write!(f, "{}", self.amount)
        } else {
            write!(f, "{} {}", self.amount, self.symbol)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vests() {
        let asset: Asset = "1234.567890 VESTS".parse().unwrap();
        assert_eq!(asset.amount, 1234.56789);
        assert_eq!(asset.symbol, "VESTS");
    }

    #[test]
    fn test_parse_without_symbol() {
        let asset: Asset = "-12.5".parse().unwrap();
        assert_eq!(asset.amount, -12.5);
        assert!(asset.symbol.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("   ".parse::<Asset>(), Err(AssetParseError::MissingAmount));
        assert_eq!(
            "abc VESTS".parse::<Asset>(),
            Err(AssetParseError::InvalidAmount("abc".to_string()))
        );
        assert!("NaN VESTS".parse::<Asset>().is_err());
        assert!("inf VESTS".parse::<Asset>().is_err());
    }

    #[test]
    fn test_serde_string_form() {
        let asset: Asset = serde_json::from_str(r#""0.500000 VESTS""#).unwrap();
        assert_eq!(asset, Asset::new(0.5, "VESTS"));
        assert_eq!(serde_json::to_string(&asset).unwrap(), r#""0.5 VESTS""#);

        let bad: Result<Asset, _> = serde_json::from_str(r#""many VESTS""#);
        assert!(bad.is_err());
    }
}
