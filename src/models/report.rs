use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::{FlatRow, PairRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub liquidity_usd: f64,
    pub volume_24h_usd: f64,
    pub tx_24h_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    pub pair_address: String,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub pair_address: String,
    pub label: String,
    pub liquidity_usd: f64,
    pub volume_24h_usd: f64,
    /// Marker size: 24h trade count.
    pub size: u64,
}

/// Series backing the three report charts. Rendering is left to the consumer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub volume_24h: Vec<BarPoint>,
    pub liquidity: Vec<BarPoint>,
    pub liquidity_vs_volume: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    InvalidAddress,
    NetworkFailure,
    HttpFailure,
    NoPairData,
    MalformedResponse,
}

/// A per-address problem. Never fatal for the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub address: String,
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn invalid_address(address: &str) -> Self {
        Self {
            address: address.to_string(),
            kind: WarningKind::InvalidAddress,
            message: format!("Invalid address: {}", address),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub chain: String,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<FlatRow>,
    pub totals: Totals,
    pub charts: ChartData,
    /// Raw JSON of the first pair fetched successfully, for debugging.
    pub first_pair: Option<PairRecord>,
    pub warnings: Vec<Warning>,
}
