//! Gateway types module
//!
//! ## Submodules
//! - [`extract`]: Request extractors with JSON rejections
//! - [`response`]: Response envelopes and error codes

pub mod extract;
pub mod response;

// Re-export commonly used types at module root
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use response::{
    ApiError, ApiResponse, ApiResult, Empty, ErrorBody, created, error_codes, ok, ok_with_message,
};
