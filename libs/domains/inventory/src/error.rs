use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Stock of product {0} cannot grow any further")]
    StockOverflow(i64),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Error body returned by the inventory HTTP handlers.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Product 42 not found"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

impl InventoryError {
    pub fn status(&self) -> StatusCode {
        match self {
            InventoryError::NotFound(_) => StatusCode::NOT_FOUND,
            InventoryError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            InventoryError::StockOverflow(_) => StatusCode::CONFLICT,
            InventoryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> (i32, &'static str) {
        match self {
            InventoryError::InvalidArgument(_) => (1001, "INVALID_ARGUMENT"),
            InventoryError::NotFound(_) => (1004, "NOT_FOUND"),
            InventoryError::StockOverflow(_) => (1008, "CONFLICT"),
            InventoryError::Internal(_) => (2001, "INTERNAL_SERVER_ERROR"),
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, error) = self.code();

        let message = match &self {
            InventoryError::NotFound(id) => format!("Product {} not found", id),
            InventoryError::InvalidArgument(msg) => msg.clone(),
            InventoryError::StockOverflow(_) => self.to_string(),
            InventoryError::Internal(msg) => {
                tracing::error!(error_code = code, "Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        };

        if status.is_client_error() {
            tracing::info!(error_code = code, "{}", message);
        }

        let body = Json(ErrorResponse {
            code,
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
