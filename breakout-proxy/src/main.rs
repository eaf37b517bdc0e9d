//! # breakout-proxy
//!
//! Local CORS proxy for the CSE scanner page. Serves the page and forwards
//! `POST /api/chartData` to the exchange, normalizing daily chart rows to
//! `{ "data": [{ close, high, low, volume }, ...] }`.

use anyhow::{Context, Result};
use axum::http::{header, Method};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use breakout_core::data::{CircuitBreaker, CseClient, MarketDataProvider};
use breakout_core::MarketDataConfig;

mod routes;

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    addr: SocketAddr,
    html_path: PathBuf,
    cse_base_url: Option<String>,
}

impl Settings {
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port: u16 = match get("PORT") {
            Some(p) => p.parse().with_context(|| format!("PORT must be a valid number, got '{p}'"))?,
            None => 8765,
        };
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("invalid HOST:PORT configuration '{host}:{port}'"))?;

        Ok(Self {
            addr,
            html_path: get("SCANNER_HTML")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("cse-scanner.html")),
            cse_base_url: get("CSE_BASE_URL").filter(|u| !u.is_empty()),
        })
    }
}

fn main() -> Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "breakout_proxy=info,breakout_core=info,tower_http=info".into()),
        )
        .init();

    let settings = Settings::from_env()?;

    let mut market_data = MarketDataConfig::default();
    if let Some(url) = &settings.cse_base_url {
        market_data.base_url = url.clone();
    }
    market_data.validate()?;

    // The blocking client is created and dropped outside the async runtime.
    let client = CseClient::new(&market_data, Arc::new(CircuitBreaker::default_provider()))?;
    let provider: Arc<dyn MarketDataProvider> = Arc::new(client);
    let state = routes::AppState::new(Arc::clone(&provider), settings.html_path.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    runtime.block_on(serve(settings, state))?;
    drop(runtime);
    drop(provider);
    Ok(())
}

async fn serve(settings: Settings, state: routes::AppState) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    tracing::info!(
        "breakout-proxy v{} listening on http://{} (page: {})",
        env!("CARGO_PKG_VERSION"),
        settings.addr,
        settings.html_path.display()
    );

    let listener = tokio::net::TcpListener::bind(settings.addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_bind_localhost_8765() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.addr, "127.0.0.1:8765".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.html_path, PathBuf::from("cse-scanner.html"));
        assert_eq!(settings.cse_base_url, None);
    }

    #[test]
    fn env_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("SCANNER_HTML", "/srv/scanner.html"),
            ("CSE_BASE_URL", "http://localhost:9999/api/"),
        ]))
        .unwrap();
        assert_eq!(settings.addr.port(), 9000);
        assert_eq!(settings.html_path, PathBuf::from("/srv/scanner.html"));
        assert_eq!(settings.cse_base_url.as_deref(), Some("http://localhost:9999/api/"));
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = Settings::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT must be a valid number"));
    }
}
