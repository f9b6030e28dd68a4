//! API Response types and error codes
//!
//! - `ApiResponse<T>`: success envelope `{success: true, message?, ...data}`
//! - `ApiError`: error envelope `{success: false, code, message, errors?}`
//! - `error_codes`: Standard error code constants

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::CatalogError;
use crate::orders::OrderError;
use crate::users::UserError;

// ============================================================================
// Success envelope
// ============================================================================

/// Success envelope. The payload's fields sit next to `success`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Payload for responses that carry only `success` and `message`.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct Empty {}

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// 200 with payload
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// 200 with message and payload
pub fn ok_with_message<T>(message: impl Into<String>, data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::with_message(message, data))))
}

/// 201 with message and payload
pub fn created<T>(message: impl Into<String>, data: T) -> ApiResult<T> {
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(message, data)),
    ))
}

// ============================================================================
// Error envelope
// ============================================================================

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = 1001)]
    pub code: i32,
    #[schema(example = "Missing required field: total")]
    pub message: String,
    /// Every problem found, for checks that report more than one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub message: String,
    pub errors: Vec<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            message,
        )
    }

    pub fn not_found(code: i32, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    /// 500 with the generic message. Details belong in the log.
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            INTERNAL_ERROR_MESSAGE,
        )
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    pub fn into_err<T>(self) -> Result<T, Self> {
        Err(self)
    }
}

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            code: self.code,
            message: self.message,
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(msg) => ApiError::bad_request(msg),
            OrderError::NotFound(msg) => ApiError::not_found(error_codes::ORDER_NOT_FOUND, msg),
            OrderError::Internal(e) => {
                tracing::error!(error = %e, "Order operation failed");
                ApiError::internal()
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) => ApiError::bad_request(msg),
            UserError::NotFound(msg) => ApiError::not_found(error_codes::USER_NOT_FOUND, msg),
            e @ UserError::InvalidCredentials => {
                ApiError::new(StatusCode::UNAUTHORIZED, error_codes::AUTH_FAILED, e.to_string())
            }
            UserError::Internal(e) => {
                tracing::error!(error = %e, "User operation failed");
                ApiError::internal()
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => ApiError::bad_request(msg),
            CatalogError::NotFound(msg) => {
                ApiError::not_found(error_codes::RESOURCE_NOT_FOUND, msg)
            }
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;

    // Auth errors (2xxx)
    pub const AUTH_FAILED: i32 = 2002;

    // Resource errors (4xxx)
    pub const ORDER_NOT_FOUND: i32 = 4001;
    pub const USER_NOT_FOUND: i32 = 4002;
    pub const RESOURCE_NOT_FOUND: i32 = 4004;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
}
