use num_format::{Locale, ToFormattedString};
use std::fmt::Write;
use tabled::{settings::Style, Table, Tabled};
use crate::models::{Report, Warning};

#[derive(Tabled)]
struct PoolRow {
    #[tabled(rename = "Pair Address")]
    pair_address: String,
    #[tabled(rename = "Token0")]
    token0: String,
    #[tabled(rename = "Token1")]
    token1: String,
    #[tabled(rename = "Price (USD)")]
    price_usd: String,
    #[tabled(rename = "Liquidity (USD)")]
    liquidity_usd: String,
    #[tabled(rename = "Volume 24h (USD)")]
    volume_24h_usd: String,
    #[tabled(rename = "Trades 24h")]
    tx_24h_count: String,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Whole-dollar amount with thousands separators.
pub fn usd(value: f64) -> String {
    (value.round() as i64).to_formatted_string(&Locale::en)
}

pub fn count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

fn short_address(address: &str) -> &str {
    address.get(..12).unwrap_or(address)
}

pub fn render_warnings(warnings: &[Warning]) -> String {
    warnings.iter().fold(String::new(), |mut out, w| {
        let _ = writeln!(out, "⚠️  {}: {}", w.address, w.message);
        out
    })
}

/// Plain-text rendering of a report: pools table, aggregate metrics,
/// per-pool details, warnings and optionally the first pair's raw JSON.
pub fn render_report(report: &Report, show_raw: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "✅ Loaded {} pools on {} at {}\n",
        report.rows.len(),
        report.chain,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let pools: Vec<PoolRow> = report.rows.iter()
        .map(|row| PoolRow {
            pair_address: row.address_or_empty().to_string(),
            token0: row.token0_symbol.clone().unwrap_or_default(),
            token1: row.token1_symbol.clone().unwrap_or_default(),
            price_usd: format!("{:.4}", row.price_usd),
            liquidity_usd: usd(row.liquidity_usd),
            volume_24h_usd: usd(row.volume_24h_usd),
            tx_24h_count: count(row.tx_24h_count),
        })
        .collect();
    let _ = writeln!(out, "Pools Overview\n{}\n", Table::new(pools).with(Style::rounded()));

    let metrics = vec![
        MetricRow { metric: "Total Liquidity (USD)", value: usd(report.totals.liquidity_usd) },
        MetricRow { metric: "Total Volume 24h (USD)", value: usd(report.totals.volume_24h_usd) },
        MetricRow { metric: "Total Trades 24h", value: count(report.totals.tx_24h_count) },
    ];
    let _ = writeln!(
        out,
        "Aggregate Metrics (All Pools)\n{}\n",
        Table::new(metrics).with(Style::rounded())
    );

    let _ = writeln!(out, "Per-Pool Details");
    for row in &report.rows {
        let _ = writeln!(
            out,
            "  {} - {}...\n    Price ${:.4} | Liquidity ${} | Volume 24h ${} | Trades 24h {} ({} buys / {} sells)",
            row.pair_label(),
            short_address(row.address_or_empty()),
            row.price_usd,
            usd(row.liquidity_usd),
            usd(row.volume_24h_usd),
            count(row.tx_24h_count),
            count(row.tx_24h_buys),
            count(row.tx_24h_sells),
        );
    }

    if !report.warnings.is_empty() {
        let _ = write!(out, "\nWarnings\n{}", render_warnings(&report.warnings));
    }

    if show_raw {
        if let Some(pair) = &report.first_pair {
            let raw = serde_json::to_string_pretty(pair.raw()).unwrap_or_default();
            let _ = writeln!(out, "\n🔍 Raw JSON for first pool\n{}", raw);
        }
    }

    out
}
