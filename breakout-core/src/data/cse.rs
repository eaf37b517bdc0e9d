//! Colombo Stock Exchange (CSE) data provider.
//!
//! The exchange exposes an unofficial form-POST JSON API:
//! - `companyInfoSummery` (`symbol`) → `reqSymbolInfo { id, name, lastTradedPrice }`
//! - `companyChartDataByStock` (`stockId`, `period`) → `chartData [{ p, h, l, q }]`
//!
//! A chart lookup first resolves the symbol to its stock id; unknown symbols
//! produce an empty chart. Requests retry with exponential backoff and share
//! a circuit breaker.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::circuit_breaker::CircuitBreaker;
use super::normalize::normalize_chart;
use super::provider::{ChartPayload, CompanySummary, DataError, MarketDataProvider};
use crate::config::MarketDataConfig;

const SUMMARY_ENDPOINT: &str = "companyInfoSummery";
const CHART_ENDPOINT: &str = "companyChartDataByStock";

/// Blocking CSE API client.
pub struct CseClient {
    client: reqwest::blocking::Client,
    circuit_breaker: Arc<CircuitBreaker>,
    base_url: String,
    chart_period: String,
    max_retries: u32,
    base_delay: Duration,
}

impl CseClient {
    pub fn new(config: &MarketDataConfig, circuit_breaker: Arc<CircuitBreaker>) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            circuit_breaker,
            base_url: config.base_url.clone(),
            chart_period: config.chart_period.clone(),
            max_retries: config.max_retries.min(MarketDataConfig::MAX_RETRIES),
            base_delay: Duration::from_millis(500),
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    /// POST a form to an endpoint and decode the JSON body, with retry and
    /// circuit breaker logic.
    fn post_form(&self, endpoint: &str, form: &[(&str, String)]) -> Result<Value, DataError> {
        if !self.circuit_breaker.is_allowed() {
            tracing::warn!(
                endpoint,
                remaining_secs = self.circuit_breaker.remaining_cooldown().as_secs(),
                "circuit breaker open, refusing request"
            );
            return Err(DataError::CircuitBreakerTripped);
        }

        let url = self.endpoint_url(endpoint);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay.saturating_mul(2u32.saturating_pow(attempt - 1));
                tracing::debug!(endpoint, attempt, delay_ms = delay.as_millis() as u64, "retrying");
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(DataError::CircuitBreakerTripped);
            }

            match self.client.post(&url).form(form).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::FORBIDDEN {
                        self.circuit_breaker.trip();
                        return Err(DataError::CircuitBreakerTripped);
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        self.circuit_breaker.record_failure();
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if status.is_server_error() {
                        self.circuit_breaker.record_failure();
                        last_error = Some(DataError::HttpStatus {
                            endpoint: endpoint.to_string(),
                            status: status.as_u16(),
                        });
                        continue;
                    }

                    if !status.is_success() {
                        return Err(DataError::HttpStatus {
                            endpoint: endpoint.to_string(),
                            status: status.as_u16(),
                        });
                    }

                    let body: Value = resp.json().map_err(|e| {
                        DataError::ResponseFormatChanged(format!("{endpoint}: invalid JSON: {e}"))
                    })?;
                    self.circuit_breaker.record_success();
                    return Ok(body);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        tracing::warn!(endpoint, error = %e, "request failed");
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl MarketDataProvider for CseClient {
    fn name(&self) -> &str {
        "cse"
    }

    fn company_summary(&self, symbol: &str) -> Result<CompanySummary, DataError> {
        let body = self.post_form(SUMMARY_ENDPOINT, &[("symbol", symbol.to_string())])?;
        Ok(parse_summary(symbol, &body))
    }

    fn chart(&self, symbol: &str) -> Result<ChartPayload, DataError> {
        let summary = self.company_summary(symbol)?;
        let Some(stock_id) = summary.stock_id else {
            tracing::info!(symbol, "symbol has no stock id, returning empty chart");
            return Ok(ChartPayload::default());
        };

        let body = self.post_form(
            CHART_ENDPOINT,
            &[
                ("stockId", stock_id.to_string()),
                ("period", self.chart_period.clone()),
            ],
        )?;
        let rows = normalize_chart(&body);
        tracing::debug!(symbol, stock_id, rows = rows.len(), "chart fetched");
        Ok(ChartPayload::new(rows))
    }

    fn is_available(&self) -> bool {
        self.circuit_breaker.is_allowed()
    }
}

/// Extract the summary fields from a `companyInfoSummery` body.
///
/// The id and price arrive as numbers or numeric strings depending on the
/// listing; anything unparseable is treated as absent.
pub fn parse_summary(symbol: &str, body: &Value) -> CompanySummary {
    let info = body.get("reqSymbolInfo").and_then(Value::as_object);
    let get = |key: &str| info.and_then(|m| m.get(key));

    let stock_id = get("id").and_then(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    });
    let last_traded_price = get("lastTradedPrice").and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    });
    let name = get("name").and_then(Value::as_str).map(str::to_string);

    CompanySummary {
        symbol: symbol.to_string(),
        stock_id,
        name,
        last_traded_price,
    }
}
