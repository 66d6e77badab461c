mod response;
mod routes;

use axum::routing::get;
use axum::{Extension, Router};
use common::cache::Cache;
use common::config::Config;
use common::provider::EnergyProvider;
use common::service::PriceService;
use eyre::{Result, WrapErr};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::routes::cronjob::{electricity_cronjob_route, gas_cronjob_route};
use crate::routes::data::{electricity_data_route, gas_data_route};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "energy_web=debug,common=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().wrap_err("Invalid configuration")?;
    // The blocking HTTP client must not be created on an async worker
    let service = Arc::new(tokio::task::spawn_blocking(move || build_service(&config)).await??);
    let app = app(service.clone());

    let bind = std::env::var("BIND").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    let addr = SocketAddr::from_str(&bind)?;
    let listener = TcpListener::bind(&addr).await?;

    info!("Starting server on {}", addr);
    let served = axum::serve(listener, app.into_make_service())
        .await
        .wrap_err("Error starting server");

    // Same for tearing it down
    tokio::task::spawn_blocking(move || drop(service)).await?;
    served
}

fn build_service(config: &Config) -> Result<PriceService> {
    let provider =
        EnergyProvider::from_config(&config.api).wrap_err("Unable to set up the price provider")?;
    let cache = Cache::new(config.data_dir.clone());
    info!(data_dir = %cache.dir().display(), "Using cache directory");
    Ok(PriceService::new(provider, cache))
}

fn app(service: Arc<PriceService>) -> Router {
    Router::new()
        .route("/execute_cronjob_electricity", get(electricity_cronjob_route))
        .route("/execute_cronjob_gas", get(gas_cronjob_route))
        .route("/get_electricity_data", get(electricity_data_route))
        .route("/get_gas_data", get(gas_data_route))
        .layer(Extension(service))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}
