//! Language API response model
//!
//! The API answers with a loosely typed JSON object. Every field is optional
//! here so the validator, not the decoder, decides what a bad answer is.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Raw answer of one language API call
///
/// A transport-level failure is not represented by this type; API clients
/// return `None` instead.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiResponse {
    /// `"OK"` on success; non-string scalars are kept as text
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub status: Option<String>,
    /// File content, a list of language codes, or `false`
    #[serde(default)]
    pub data: Option<Value>,
    /// Error category reported by the API
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub error_type: Option<String>,
    /// Error code reported by the API
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub error_code: Option<String>,
}

impl ApiResponse {
    /// Successful response carrying `data`
    pub fn ok(data: impl Into<Value>) -> Self {
        Self {
            status: Some(crate::constants::api::STATUS_OK.to_string()),
            data: Some(data.into()),
            ..Default::default()
        }
    }

    /// Response with the given status and nothing else
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    /// Set the `data` field
    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the `error_type` field
    pub fn error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }

    /// Set the `error_code` field
    pub fn error_code(mut self, error_code: impl Into<String>) -> Self {
        self.error_code = Some(error_code.into());
        self
    }

    /// `data` rendered as file content
    pub fn data_text(&self) -> String {
        self.data.as_ref().map(value_to_text).unwrap_or_default()
    }

    /// `data` read as a list of language codes
    ///
    /// Anything that is not a JSON array yields an empty list. Non-string
    /// entries are rendered the same way as file content.
    pub fn data_languages(&self) -> Vec<String> {
        match &self.data {
            Some(Value::Array(items)) => items.iter().map(value_to_text).collect(),
            _ => Vec::new(),
        }
    }
}

/// Render a JSON value as plain text
///
/// Strings are returned verbatim, `true`/`false` become `"1"`/`""`, numbers
/// use their decimal form and compound values are rendered as compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        Value::Number(number) => number.to_string(),
        compound => compound.to_string(),
    }
}

/// Accept a JSON string or number for textual error fields
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(other) => Some(value_to_text(&other)),
    })
}
