use chrono::Utc;
use thiserror::Error;
use crate::models::{
    BarPoint, ChartData, FlatRow, PairRecord, Report, ScatterPoint, Totals, Warning,
};

/// Errors that stop a whole refresh. Per-pool problems are [`Warning`]s.
#[derive(Debug, Clone, Error)]
pub enum BatchError {
    #[error("Enter at least one valid pool address (one per line)")]
    EmptyInput { warnings: Vec<Warning> },

    #[error("No valid pairs fetched from DexScreener")]
    NoPairsFetched { warnings: Vec<Warning> },
}

impl BatchError {
    pub fn warnings(&self) -> &[Warning] {
        match self {
            BatchError::EmptyInput { warnings } | BatchError::NoPairsFetched { warnings } => warnings,
        }
    }
}

pub fn totals(rows: &[FlatRow]) -> Totals {
    rows.iter().fold(Totals::default(), |acc, row| Totals {
        liquidity_usd: acc.liquidity_usd + row.liquidity_usd,
        volume_24h_usd: acc.volume_24h_usd + row.volume_24h_usd,
        tx_24h_count: acc.tx_24h_count.saturating_add(row.tx_24h_count),
    })
}

pub fn charts(rows: &[FlatRow]) -> ChartData {
    let bar = |row: &FlatRow, value: f64| BarPoint {
        pair_address: row.address_or_empty().to_string(),
        label: row.pair_label(),
        value,
    };

    ChartData {
        volume_24h: rows.iter().map(|r| bar(r, r.volume_24h_usd)).collect(),
        liquidity: rows.iter().map(|r| bar(r, r.liquidity_usd)).collect(),
        liquidity_vs_volume: rows
            .iter()
            .map(|r| ScatterPoint {
                pair_address: r.address_or_empty().to_string(),
                label: r.pair_label(),
                liquidity_usd: r.liquidity_usd,
                volume_24h_usd: r.volume_24h_usd,
                size: r.tx_24h_count,
            })
            .collect(),
    }
}

/// Builds the report handed to presentation. Rows keep arrival order.
pub fn assemble(
    chain: &str,
    rows: Vec<FlatRow>,
    first_pair: Option<PairRecord>,
    warnings: Vec<Warning>,
) -> Result<Report, BatchError> {
    if rows.is_empty() {
        return Err(BatchError::NoPairsFetched { warnings });
    }

    Ok(Report {
        chain: chain.to_string(),
        generated_at: Utc::now(),
        totals: totals(&rows),
        charts: charts(&rows),
        rows,
        first_pair,
        warnings,
    })
}
