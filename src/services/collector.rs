use indicatif::ProgressBar;
use std::sync::atomic::{AtomicU64, Ordering};
use crate::models::{Report, Warning};
use crate::sources::PairFetcher;
use super::flatten::flatten;
use super::report::{self, BatchError};
use super::validator;

#[derive(Debug, Default)]
pub struct CollectorStats {
    pub refreshes: AtomicU64,
    pub pools_fetched: AtomicU64,
    pub fetch_failures: AtomicU64,
}

/// Runs one full refresh over an address block: validate, fetch each pool
/// in input order, flatten, assemble.
pub struct PoolCollector {
    fetcher: PairFetcher,
    chain: String,
    stats: CollectorStats,
}

impl PoolCollector {
    pub fn new(fetcher: PairFetcher, chain: &str) -> Self {
        Self {
            fetcher,
            chain: chain.to_string(),
            stats: CollectorStats::default(),
        }
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn stats(&self) -> &CollectorStats {
        &self.stats
    }

    pub async fn refresh(&self, input: &str) -> Result<Report, BatchError> {
        self.refresh_with_progress(input, &ProgressBar::hidden()).await
    }

    pub async fn refresh_with_progress(
        &self,
        input: &str,
        progress: &ProgressBar,
    ) -> Result<Report, BatchError> {
        self.stats.refreshes.fetch_add(1, Ordering::Relaxed);

        let partition = validator::parse_input(input);
        let mut warnings: Vec<Warning> = partition.invalid
            .iter()
            .map(|line| {
                tracing::warn!("❌ Invalid address: {}", line);
                Warning::invalid_address(line)
            })
            .collect();

        if partition.valid.is_empty() {
            return Err(BatchError::EmptyInput { warnings });
        }
        tracing::info!("✓ Validated {} pools", partition.valid.len());

        progress.set_length(partition.valid.len() as u64);

        let mut rows = Vec::with_capacity(partition.valid.len());
        let mut first_pair = None;

        for address in &partition.valid {
            progress.set_message(address.to_string());

            match self.fetcher.fetch(&self.chain, address).await {
                Ok(pair) => {
                    self.stats.pools_fetched.fetch_add(1, Ordering::Relaxed);
                    rows.push(flatten(&pair));
                    if first_pair.is_none() {
                        first_pair = Some((*pair).clone());
                    }
                }
                Err(e) => {
                    self.stats.fetch_failures.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!("Pool {} skipped: {}", address, e);
                    warnings.push(Warning {
                        address: address.to_string(),
                        kind: e.kind(),
                        message: e.to_string(),
                    });
                }
            }

            progress.inc(1);
        }
        progress.finish_and_clear();

        let report = report::assemble(&self.chain, rows, first_pair, warnings)?;
        tracing::info!("✓ Loaded {} pools", report.rows.len());
        Ok(report)
    }
}
