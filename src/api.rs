// Response envelope shared with the rendering layer
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const GENERIC_FAILURE: &str = "Operation failed. Please try again.";

/// `{success, data?, message?}` as returned by every asynchronous operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self { Self { success: true, data: Some(data), message: None } }

    pub fn fail(message: impl Into<String>) -> Self { Self { success: false, data: None, message: Some(message.into()) } }
}

impl ApiResponse<()> {
    /// Success without a payload (delete): `data` stays absent.
    pub fn done() -> Self { Self { success: true, data: None, message: None } }
}

/// Message shown to the user for a failed operation.
pub fn user_message(err: &ApiError) -> String {
    match err {
        ApiError::NotFound { .. } | ApiError::InvalidCredentials => err.to_string(),
        ApiError::StorageRead { .. } | ApiError::TooLarge { .. } | ApiError::Assistant(_) => err.to_string(),
        ApiError::Corrupt { .. } | ApiError::Storage(_) => GENERIC_FAILURE.to_string(),
    }
}

pub fn respond<T>(res: Result<T, ApiError>) -> ApiResponse<T> {
    match res {
        Ok(v) => ApiResponse::ok(v),
        Err(e) => {
            if !e.is_expected() { tracing::warn!(error = %e, "operation failed"); }
            ApiResponse::fail(user_message(&e))
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiResponse<T> {
    fn from(res: Result<T, ApiError>) -> Self { respond(res) }
}

pub fn respond_unit(res: Result<(), ApiError>) -> ApiResponse<()> {
    match res {
        Ok(()) => ApiResponse::done(),
        Err(e) => respond::<()>(Err(e)),
    }
}
