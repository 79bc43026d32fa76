use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const SERVER_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields")]
    MissingFields(Vec<String>),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Contact store error: {0}")]
    StoreError(String),

    #[error("Internal server error")]
    InternalError(String),
}

impl From<carelead_contact::Error> for AppError {
    fn from(err: carelead_contact::Error) -> Self {
        match err {
            carelead_contact::Error::MissingFields(fields) => AppError::MissingFields(fields),
            carelead_contact::Error::Storage(e) => AppError::StoreError(e),
            carelead_contact::Error::Unknown(e) => AppError::InternalError(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidBody(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            AppError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing required fields", "fields": fields }),
            ),
            AppError::InvalidBody(msg) => {
                tracing::debug!("Rejected request body: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Invalid request body" }),
                )
            }
            AppError::StoreError(e) => {
                tracing::error!("Contact store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": SERVER_ERROR_MESSAGE }),
                )
            }
            AppError::InternalError(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": SERVER_ERROR_MESSAGE }),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}
