use serde::{Deserialize, Serialize};
use std::fmt;
use crate::services::validator;

/// A pool contract address that passed validation. Kept as supplied for display;
/// requests and cache keys use [`PoolAddress::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PoolAddress(String);

impl PoolAddress {
    pub fn parse(raw: &str) -> Option<Self> {
        validator::is_valid(raw).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for PoolAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pair object as returned by DexScreener, kept as raw JSON.
///
/// The upstream shape has drifted between API versions (numbers as strings,
/// `txns` windows with or without `count`), so fields are read leniently by
/// the flattener instead of through a fixed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairRecord(serde_json::Value);

impl PairRecord {
    pub fn new(raw: serde_json::Value) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn pair_address(&self) -> Option<&str> {
        self.0.get("pairAddress").and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_original_case_and_normalizes_on_demand() {
        let addr = PoolAddress::parse("0xABCDEF0123456789abcdef0123456789ABCDEF01").unwrap();
        assert_eq!(addr.as_str(), "0xABCDEF0123456789abcdef0123456789ABCDEF01");
        assert_eq!(addr.normalized(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(PoolAddress::parse("0x123").is_none());
        assert!(PoolAddress::parse("").is_none());
    }
}
