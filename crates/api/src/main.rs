use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trendcast_core::domain::prediction::PredictResponse;
use trendcast_core::market::coingecko::CoinGeckoClient;
use trendcast_core::service::PredictionService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = trendcast_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let provider = match CoinGeckoClient::from_settings(&settings) {
        Ok(provider) => provider,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "failed to configure market data provider");
            return Err(e);
        }
    };

    let state = AppState {
        service: PredictionService::new(Arc::new(provider)),
    };

    let port = settings.port()?;
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, upstream = settings.coingecko_api_url(), "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    // Development posture: any origin, method and header.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/predict/:asset_id", get(get_prediction))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    service: PredictionService,
}

/// Always 200; failures are reported as `{"error": "..."}` in the body.
async fn get_prediction(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> Json<PredictResponse> {
    let response = state.service.handle_predict(&asset_id).await;
    if let PredictResponse::Error { error } = &response {
        sentry_anyhow::capture_anyhow(&anyhow::anyhow!("prediction for {asset_id} failed: {error}"));
    }
    Json(response)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &trendcast_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
