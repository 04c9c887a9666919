use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use crate::models::{PairRecord, PoolAddress};
use crate::services::cache::{FetchOutcome, PairCache};
use super::{FetchError, PairTransport, RawResponse, TransportError};

/// reqwest-backed transport with a fixed per-request timeout.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl PairTransport for HttpTransport {
    fn name(&self) -> &'static str {
        "DexScreener"
    }

    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let resp = self.client.get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp.text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PairsResponse {
    #[serde(default)]
    pairs: Option<Vec<serde_json::Value>>,
}

/// Fetches one pair per pool address from the DexScreener pairs endpoint.
pub struct PairFetcher {
    transport: Arc<dyn PairTransport>,
    cache: Arc<PairCache>,
    base_url: String,
    retry: RetryPolicy,
}

impl PairFetcher {
    pub fn new(
        transport: Arc<dyn PairTransport>,
        cache: Arc<PairCache>,
        base_url: &str,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            cache,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        }
    }

    pub fn pair_url(&self, chain: &str, address: &str) -> String {
        format!("{}/{}/{}", self.base_url, chain, address)
    }

    /// Cached fetch. Failures are cached too, so a failing pool is not
    /// re-requested until its entry expires.
    pub async fn fetch(&self, chain: &str, address: &PoolAddress) -> FetchOutcome {
        let key = address.normalized();

        if let Some(outcome) = self.cache.get(chain, &key) {
            tracing::debug!("Cache hit for {}:{}", chain, key);
            return outcome;
        }

        let outcome = self.fetch_uncached(chain, &key).await;
        if self.cache.insert(chain, &key, outcome.clone()) {
            // Lookup and insert take the lock separately, so concurrent
            // refreshes of one address may both reach upstream.
            tracing::debug!("Concurrent fetch for {}:{} replaced a fresh entry", chain, key);
        }
        outcome
    }

    async fn fetch_uncached(&self, chain: &str, address: &str) -> FetchOutcome {
        let url = self.pair_url(chain, address);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let failure = match self.transport.get(&url).await {
                Ok(resp) if resp.is_success() => return parse_first_pair(address, &resp.body),
                Ok(resp) => FetchError::Http {
                    attempts: attempt,
                    status: resp.status,
                    body: resp.body,
                },
                Err(e) => FetchError::Network {
                    attempts: attempt,
                    message: e.to_string(),
                },
            };

            if attempt > self.retry.max_retries {
                return Err(failure);
            }

            tracing::debug!(
                "{} attempt {}/{} for {} failed: {}",
                self.transport.name(),
                attempt,
                self.retry.max_retries + 1,
                address,
                failure
            );
            tokio::time::sleep(self.retry.backoff).await;
        }
    }
}

fn parse_first_pair(address: &str, body: &str) -> FetchOutcome {
    let data: PairsResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    let pairs = data.pairs.unwrap_or_default();
    if pairs.len() > 1 {
        // TODO: surface the extra pairs once multi-tier pools are supported
        tracing::debug!("{} returned {} pairs, using the first", address, pairs.len());
    }

    pairs.into_iter()
        .next()
        .map(|raw| Arc::new(PairRecord::new(raw)))
        .ok_or(FetchError::NoPairData)
}
