//! Token vertex identification
//!
//! A routing vertex is a `(symbol, chain)` pair: the same token on two chains
//! is two distinct vertices, connected (if at all) by bridge edges. The
//! canonical string form is `SYMBOL.chain`, e.g. `USDC.ethereum`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::KeyParseError;

/// Canonical identifier for a token on a specific chain.
///
/// Keys compare by exact equality; no case folding is applied beyond what the
/// data source provides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKey {
    pub symbol: String,
    pub chain: String,
}

impl TokenKey {
    pub fn new(symbol: impl Into<String>, chain: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            chain: chain.into(),
        }
    }

    /// Canonical `SYMBOL.chain` form.
    pub fn canonical(&self) -> String {
        format!("{}.{}", self.symbol, self.chain)
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.symbol, self.chain)
    }
}

impl FromStr for TokenKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((symbol, chain)) if !symbol.is_empty() && !chain.is_empty() => {
                Ok(Self::new(symbol, chain))
            }
            _ => Err(KeyParseError {
                input: s.to_string(),
            }),
        }
    }
}

// Wire forms key vertices by their canonical string, so the serde
// representation is the string, not a struct.
impl Serialize for TokenKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for TokenKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Advisory vertex attributes; none of these influence the solvers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenMeta {
    /// Contract address on the vertex's chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    /// Cached USD price from the price feed at graph-build time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd_price: Option<f64>,
}
