use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    cities,
    forecast::cwa::CwaError,
};

/// Every failure `/api/weather/:id` can report, with its HTTP mapping.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid city identifier: {0:?}")]
    Validation(String),
    #[error("Weather API credential is not configured")]
    Configuration,
    #[error("No forecast found for location {0:?}")]
    NotFound(String),
    #[error("Upstream weather service returned HTTP {status}")]
    Upstream { status: u16, body: String },
    #[error("Could not reach upstream weather service: {0}")]
    Network(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Configuration | ApiError::Network(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "ValidationError",
            ApiError::Configuration => "ConfigurationError",
            ApiError::NotFound(_) => "NotFoundError",
            ApiError::Upstream { .. } => "UpstreamError",
            ApiError::Network(_) => "NetworkError",
            ApiError::Internal(_) => "InternalError",
        }
    }

    fn body(&self) -> Value {
        let mut body = json!({
            "success": false,
            "error": self.kind(),
            "message": self.to_string(),
        });

        match self {
            ApiError::Validation(_) | ApiError::NotFound(_) => {
                body["availableCities"] = json!(cities::list_all());
            }
            ApiError::Upstream { status, body: upstream } => {
                body["statusCode"] = json!(status);
                body["details"] = serde_json::from_str(upstream)
                    .unwrap_or_else(|_| Value::String(upstream.clone()));
            }
            _ => {}
        }

        body
    }
}

impl From<CwaError> for ApiError {
    fn from(err: CwaError) -> Self {
        match err {
            CwaError::MissingApiKey => ApiError::Configuration,
            CwaError::Upstream { status, body } => ApiError::Upstream { status, body },
            CwaError::Network(e) => ApiError::Network(e.to_string()),
            CwaError::ClientBuild(e) => ApiError::Internal(e.to_string()),
            CwaError::Decode(e) => {
                ApiError::Internal(format!("Upstream payload could not be parsed: {}", e))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Weather request failed: {}", self);
        } else {
            tracing::warn!("Weather request rejected: {}", self);
        }

        (status, Json(self.body())).into_response()
    }
}
