//! Language API response validation
//!
//! Decides whether one raw API answer is a success. The verdict depends only
//! on the response passed in. Checks run in a fixed order and the first one
//! that matches wins:
//!
//! 1. no response, or no `status` field: the call itself failed
//! 2. `status` other than `OK`: the API reported an error
//! 3. `data` missing or exactly `false`: nothing usable came back

use serde_json::Value;

use crate::app::response::{value_to_text, ApiResponse};
use crate::constants::api::STATUS_OK;
use crate::errors::{ApiError, ApiResult};

/// Validate a language API answer
///
/// `None` stands for a call that produced no response at all.
///
/// # Errors
///
/// Returns the first [`ApiError`] that applies to the response.
pub fn validate_response(response: Option<&ApiResponse>) -> ApiResult<()> {
    let response = response.ok_or(ApiError::CallFailed)?;

    let status = response.status.as_deref().ok_or(ApiError::CallFailed)?;

    if status != STATUS_OK {
        return Err(ApiError::WrongResponse {
            details: wrong_response_details(response),
        });
    }

    match response.data {
        None | Some(Value::Bool(false)) => Err(ApiError::WrongContent),
        Some(_) => Ok(()),
    }
}

fn wrong_response_details(response: &ApiResponse) -> String {
    let mut details = String::new();

    if let Some(error_type) = &response.error_type {
        details.push_str(&format!("Type({}) ", error_type));
    }
    if let Some(error_code) = &response.error_code {
        details.push_str(&format!("Code({}) ", error_code));
    }
    if let Some(data) = &response.data {
        details.push_str(&value_to_text(data));
    }

    details
}
