use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::any::Any;
use std::sync::{Arc, LazyLock};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
    cities::{self, CityEntry},
    config::Config,
    error::ApiError,
    forecast::{
        cwa::CwaClient,
        transform::{transform, TransformError},
        types::CityForecast,
    },
};

// Han ideographs, ASCII letters, digits and hyphen.
static CITY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{Han}A-Za-z0-9-]+$").expect("city token pattern is valid"));

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather_client: Arc<CwaClient>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
    pub example: String,
}

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

pub fn is_valid_city_token(token: &str) -> bool {
    CITY_TOKEN.is_match(token)
}

/// Validates the caller's token, resolves it to a CWA location name, fetches
/// the forecast and flattens it.
pub async fn lookup_city_forecast(state: &AppState, token: &str) -> Result<CityForecast, ApiError> {
    if !is_valid_city_token(token) {
        return Err(ApiError::Validation(token.to_string()));
    }

    if state.config.cwa_api_key.is_none() {
        return Err(ApiError::Configuration);
    }

    let location_name = cities::resolve(token);
    tracing::info!("Fetching forecast for {} (requested as {})", location_name, token);

    let payload = state.weather_client.fetch(&location_name).await?;

    transform(&payload).map_err(|err| match err {
        TransformError::LocationNotFound => ApiError::NotFound(location_name),
    })
}

// Route handlers
pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Taiwan 36-hour city weather forecasts from the CWA open data API"
            .to_string(),
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/api/health",
                description: "Service health check",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/cities",
                description: "Supported city identifiers",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/weather/:id",
                description: "36-hour forecast by city id or CWA location name",
            },
        ],
        example: "/api/weather/taipei".to_string(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

pub async fn list_cities() -> Json<ApiResponse<&'static [CityEntry]>> {
    ApiResponse::ok(cities::list_all())
}

pub async fn get_weather(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<CityForecast>>, ApiError> {
    // Segments that do not decode to UTF-8 are invalid tokens too.
    let Path(id) = id.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let forecast = lookup_city_forecast(&state, &id).await?;
    Ok(ApiResponse::ok(forecast))
}

pub async fn get_weather_without_id() -> ApiError {
    ApiError::Validation(String::new())
}

pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };
    tracing::error!("Request handler panicked: {}", message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "application/json")],
        json!({ "error": "Internal Server Error", "message": message }).to_string(),
    )
        .into_response()
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/cities", get(list_cities))
        .route("/api/weather", get(get_weather_without_id))
        .route("/api/weather/", get(get_weather_without_id))
        .route("/api/weather/:id", get(get_weather))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
