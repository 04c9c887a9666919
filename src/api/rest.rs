use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::time::interval;
use tower_http::cors::CorsLayer;
use crate::models::Report;
use crate::services::{BatchError, PairCache, PoolCollector};

pub struct AppState {
    pub collector: Arc<PoolCollector>,
    pub cache: Arc<PairCache>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

/// POST /report - body is the address block, one per line. Each call is a
/// manual refresh; cached pairs younger than the TTL are reused.
async fn post_report(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<Report>, ApiError> {
    state.collector.refresh(&body).await.map(Json).map_err(batch_error)
}

fn batch_error(err: BatchError) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({
            "error": err.to_string(),
            "warnings": err.warnings(),
        })),
    )
}

/// GET /health
async fn health() -> &'static str {
    "OK"
}

/// GET /stats
async fn stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.collector.stats();
    Json(serde_json::json!({
        "chain": state.collector.chain(),
        "cached_pairs": state.cache.len(),
        "cache_ttl_secs": state.cache.ttl().as_secs(),
        "refreshes": stats.refreshes.load(Ordering::Relaxed),
        "pools_fetched": stats.pools_fetched.load(Ordering::Relaxed),
        "fetch_failures": stats.fetch_failures.load(Ordering::Relaxed),
    }))
}

pub fn create_rest_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/report", post(post_report))
        .route("/health", get(health))
        .route("/stats", get(stats))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    // Background: drop expired pairs once per TTL
    let cache = state.cache.clone();
    tokio::spawn(async move {
        let mut ticker = interval(cache.ttl().max(std::time::Duration::from_secs(1)));
        loop {
            ticker.tick().await;
            cache.purge_expired();
        }
    });

    let app = create_rest_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("✓ Server ready on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testing::{ok, pair, ScriptedTransport};
    use crate::sources::{PairFetcher, RetryPolicy};
    use serde_json::json;
    use std::time::Duration;

    const A: &str = "0x1111111111111111111111111111111111111111";

    fn state(transport: Arc<ScriptedTransport>) -> Arc<AppState> {
        let cache = Arc::new(PairCache::new(Duration::from_secs(60)));
        let fetcher = PairFetcher::new(
            transport,
            cache.clone(),
            "https://api.dexscreener.com/latest/dex/pairs",
            RetryPolicy::default(),
        );
        Arc::new(AppState {
            collector: Arc::new(PoolCollector::new(fetcher, "base")),
            cache,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn report_returns_rows_and_totals() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(json!({ "pairs": [pair(A, 250.0)] }))]));
        let state = state(transport);

        let Json(report) = post_report(State(state.clone()), format!("{A}\n")).await.unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.totals.liquidity_usd, 250.0);

        let Json(stats) = stats(State(state)).await;
        assert_eq!(stats["cached_pairs"], json!(1));
        assert_eq!(stats["refreshes"], json!(1));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_is_unprocessable() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));

        let (code, Json(body)) = post_report(State(state(transport)), "0xnope".to_string())
            .await
            .unwrap_err();

        assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["warnings"][0]["kind"], json!("invalid_address"));
        assert_eq!(body["warnings"][0]["address"], json!("0xnope"));
    }
}
