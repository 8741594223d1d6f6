// crates/geography-server/src/error.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use geography_core::GeoError;
use serde_json::json;
use tracing::{debug, error};

/// A [`GeoError`] rendered as an HTTP response with a JSON `error` body.
#[derive(Debug)]
pub struct ApiError(pub GeoError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<GeoError> for ApiError {
    fn from(err: GeoError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            GeoError::Validation(_) | GeoError::TooManyResults { .. } => StatusCode::BAD_REQUEST,
            GeoError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            debug!(error = %self.0, %status, "request rejected");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
