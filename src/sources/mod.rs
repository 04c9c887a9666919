pub mod dexscreener;

use async_trait::async_trait;
use thiserror::Error;
use crate::models::WarningKind;

pub use dexscreener::{HttpTransport, PairFetcher, RetryPolicy};

/// Status line and body of one upstream HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Connection-level failure: refused, reset, timed out, unreadable body.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[async_trait]
pub trait PairTransport: Send + Sync {
    fn name(&self) -> &'static str;
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Network error after {attempts} tries: {message}")]
    Network { attempts: u32, message: String },

    #[error("HTTP {status} after {attempts} tries: {body}")]
    Http { attempts: u32, status: u16, body: String },

    #[error("No pair data returned from DexScreener")]
    NoPairData,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn kind(&self) -> WarningKind {
        match self {
            FetchError::Network { .. } => WarningKind::NetworkFailure,
            FetchError::Http { .. } => WarningKind::HttpFailure,
            FetchError::NoPairData => WarningKind::NoPairData,
            FetchError::MalformedResponse(_) => WarningKind::MalformedResponse,
        }
    }
}
