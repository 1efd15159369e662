// API error types and their HTTP mapping
use crate::application::view_update::UpdateError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Update error: {0}")]
    Update(#[from] UpdateError),

    #[error("Invalid request body: {}", .0.body_text())]
    BadRequest(#[from] JsonRejection),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Update(UpdateError::InvalidValue { .. }) => {
                (StatusCode::BAD_REQUEST, "INVALID_CONTROL_VALUE")
            }
            ApiError::Update(UpdateError::UnboundSlot(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "UNBOUND_SLOT")
            }
            // Well-formed JSON whose control values have the wrong shape.
            ApiError::BadRequest(JsonRejection::JsonDataError(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_CONTROL_VALUE")
            }
            ApiError::BadRequest(rejection) => (rejection.status(), "INVALID_REQUEST_BODY"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error_code = %code, error_message = %self, "API error occurred");
        } else {
            tracing::warn!(error_code = %code, error_message = %self, "Rejected request");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StatusCode> for ApiError {
    fn from(status: StatusCode) -> Self {
        ApiError::Internal(format!("response encoding failed with {}", status))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
