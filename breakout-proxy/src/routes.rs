//! HTTP route handlers

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use breakout_core::data::{ChartPayload, MarketDataProvider};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn MarketDataProvider>,
    html_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(provider: Arc<dyn MarketDataProvider>, html_path: PathBuf) -> Self {
        Self {
            provider,
            html_path: Arc::new(html_path),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChartRequest {
    pub symbol: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(scanner_page))
        .route("/index.html", get(scanner_page))
        .route("/cse-scanner.html", get(scanner_page))
        .route("/health", get(health))
        .route("/api/chartData", post(chart_data))
        .with_state(state)
}

/// `POST /api/chartData` with form body `symbol=...`.
///
/// Unknown symbols answer `{"data": []}`; upstream failures answer 502.
pub async fn chart_data(
    State(state): State<AppState>,
    form: Result<Form<ChartRequest>, FormRejection>,
) -> Response {
    let symbol = form
        .ok()
        .and_then(|Form(req)| req.symbol)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let Some(symbol) = symbol else {
        return Json(ChartPayload::with_error("missing symbol")).into_response();
    };

    let provider = Arc::clone(&state.provider);
    let lookup = symbol.clone();
    let outcome = tokio::task::spawn_blocking(move || provider.chart(&lookup)).await;

    match outcome {
        Ok(Ok(payload)) => {
            tracing::debug!(%symbol, rows = payload.data.len(), "chart served");
            Json(payload).into_response()
        }
        Ok(Err(e)) => {
            tracing::warn!(%symbol, error = %e, "upstream request failed");
            bad_gateway(e.to_string())
        }
        Err(e) => {
            tracing::error!(%symbol, error = %e, "chart task failed");
            bad_gateway(e.to_string())
        }
    }
}

fn bad_gateway(error: String) -> Response {
    (StatusCode::BAD_GATEWAY, Json(ErrorResponse { error })).into_response()
}

/// The scanner page, read fresh on every request.
pub async fn scanner_page(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(state.html_path.as_path()).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!(path = %state.html_path.display(), error = %e, "scanner page unavailable");
            (StatusCode::NOT_FOUND, "cse-scanner.html not found").into_response()
        }
    }
}

/// Liveness probe, plus whether the upstream circuit breaker is closed.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
        "upstream": state.provider.name(),
        "upstreamAvailable": state.provider.is_available(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakout_core::data::{CompanySummary, DataError, OhlcvRow};

    struct FakeUpstream {
        fail: bool,
    }

    impl MarketDataProvider for FakeUpstream {
        fn name(&self) -> &str {
            "fake"
        }

        fn company_summary(&self, symbol: &str) -> Result<CompanySummary, DataError> {
            Ok(CompanySummary {
                symbol: symbol.to_string(),
                stock_id: Some(1),
                name: None,
                last_traded_price: None,
            })
        }

        fn chart(&self, symbol: &str) -> Result<ChartPayload, DataError> {
            if self.fail {
                return Err(DataError::HttpStatus {
                    endpoint: "companyChartDataByStock".into(),
                    status: 500,
                });
            }
            if symbol == "UNKNOWN" {
                return Ok(ChartPayload::default());
            }
            Ok(ChartPayload::new(vec![OhlcvRow {
                close: Some(10.5),
                high: Some(11.0),
                low: Some(10.0),
                volume: Some(1200.0),
            }]))
        }

        fn is_available(&self) -> bool {
            !self.fail
        }
    }

    fn state(fail: bool, html_path: PathBuf) -> AppState {
        AppState::new(Arc::new(FakeUpstream { fail }), html_path)
    }

    fn request(symbol: Option<&str>) -> Result<Form<ChartRequest>, FormRejection> {
        Ok(Form(ChartRequest {
            symbol: symbol.map(str::to_string),
        }))
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chart_rows_are_served() {
        let resp = chart_data(State(state(false, PathBuf::new())), request(Some("SAMP.N0000"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(
            json,
            serde_json::json!({ "data": [{ "close": 10.5, "high": 11.0, "low": 10.0, "volume": 1200.0 }] })
        );
    }

    #[tokio::test]
    async fn unknown_symbol_is_empty_data() {
        let resp = chart_data(State(state(false, PathBuf::new())), request(Some("UNKNOWN"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({ "data": [] }));
    }

    #[tokio::test]
    async fn missing_symbol_is_reported_in_body() {
        for symbol in [None, Some(""), Some("   ")] {
            let resp = chart_data(State(state(false, PathBuf::new())), request(symbol)).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(
                body_json(resp).await,
                serde_json::json!({ "data": [], "error": "missing symbol" })
            );
        }
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        let resp = chart_data(State(state(true, PathBuf::new())), request(Some("SAMP.N0000"))).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "HTTP 500 from companyChartDataByStock");
    }

    #[tokio::test]
    async fn missing_page_is_not_found() {
        let path = std::env::temp_dir().join("breakout-proxy-no-such-page.html");
        let resp = scanner_page(State(state(false, path))).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn page_is_served_as_html() {
        let path = std::env::temp_dir().join(format!("breakout-proxy-page-{}.html", std::process::id()));
        std::fs::write(&path, "<html>scanner</html>").unwrap();
        let resp = scanner_page(State(state(false, path.clone()))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers()[axum::http::header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<html>scanner</html>");
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn health_reports_upstream() {
        let Json(json) = health(State(state(true, PathBuf::new()))).await;
        assert_eq!(json["status"], "alive");
        assert_eq!(json["upstreamAvailable"], false);
    }
}
