use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::sync::Arc;

mod cities;
mod config;
mod error;
mod forecast;
mod routes;

use config::Config;
use forecast::cwa::CwaClient;
use routes::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cwa_weather_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    if config.cwa_api_key.is_none() {
        tracing::warn!("CWA_API_KEY is not set; weather requests will fail until it is configured");
    }

    let weather_client = Arc::new(CwaClient::new(config.clone())?);

    let port = config.port;
    let state = AppState {
        config: Arc::new(config),
        weather_client,
    };

    let app = create_router(state)
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server starting on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
