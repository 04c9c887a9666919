use serde::{Deserialize, Serialize};

/// One table row per fetched pool. Numeric fields are never absent: missing
/// upstream values are stored as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    pub pair_address: Option<String>,
    pub dex: Option<String>,
    pub chain: Option<String>,

    pub token0_symbol: Option<String>,
    pub token0_address: Option<String>,
    pub token1_symbol: Option<String>,
    pub token1_address: Option<String>,

    pub price_usd: f64,

    pub liquidity_usd: f64,
    pub liquidity_token0: f64,
    pub liquidity_token1: f64,

    pub volume_24h_usd: f64,
    pub volume_6h_usd: f64,
    pub volume_1h_usd: f64,

    pub tx_24h_count: u64,
    pub tx_6h_count: u64,
    pub tx_1h_count: u64,

    pub tx_24h_buys: u64,
    pub tx_24h_sells: u64,
}

impl FlatRow {
    /// "BASE/QUOTE", with `?` for a missing symbol.
    pub fn pair_label(&self) -> String {
        format!(
            "{}/{}",
            self.token0_symbol.as_deref().unwrap_or("?"),
            self.token1_symbol.as_deref().unwrap_or("?")
        )
    }

    pub fn address_or_empty(&self) -> &str {
        self.pair_address.as_deref().unwrap_or("")
    }
}
