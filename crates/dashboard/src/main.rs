use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod chart;
mod client;
mod state;

#[derive(Debug, Parser)]
#[command(name = "trendcast_dashboard")]
struct Args {
    /// Base URL of the prediction service. Overrides PREDICTION_SERVICE_URL.
    #[arg(long)]
    service_url: Option<String>,

    /// Asset to load on startup (e.g. bitcoin).
    #[arg(long)]
    asset: Option<String>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = trendcast_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let service_url = args
        .service_url
        .as_deref()
        .unwrap_or_else(|| settings.prediction_service_url());
    let client = client::PredictionClient::new(service_url)?;

    tracing::info!(service_url, "starting dashboard");

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Crypto Dashboard"),
        ..Default::default()
    };

    let initial_asset = args.asset;
    let result = eframe::run_native(
        "Crypto Dashboard",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::DashboardApp::new(cc, client, initial_asset)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard exited with error: {e}"));

    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
    }
    result
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
