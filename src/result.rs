//! Execution outcome shaping
//!
//! One toolset response becomes exactly one [`ExecutionResult`]: the `data`
//! body on success, a normalized [`ErrorRecord`] otherwise.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::toolset::ToolsetResponse;

/// Normalized error body returned (not raised) for flagged failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub code: Option<Value>,
    pub message: Option<Value>,
    pub errors: Value,
    pub status: Option<Value>,
}

impl ErrorRecord {
    /// Build from the response's `error` member.
    ///
    /// Objects are read field by field; a bare string becomes the message;
    /// anything else yields an empty record.
    pub fn from_error(error: Option<&Value>) -> Self {
        let field = |name: &str| {
            error
                .and_then(|e| e.get(name))
                .filter(|v| !v.is_null())
                .cloned()
        };

        let message = match error {
            Some(Value::String(text)) => Some(Value::String(text.clone())),
            _ => field("message"),
        };

        Self {
            code: field("code"),
            message,
            errors: field("errors").unwrap_or_else(|| Value::Array(Vec::new())),
            status: field("status"),
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "code": self.code,
            "message": self.message,
            "errors": self.errors,
            "status": self.status,
        })
    }
}

/// Outcome of one `execute_action` call
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    Success(Value),
    Failure(ErrorRecord),
}

impl ExecutionResult {
    /// Shape a raw toolset response.
    ///
    /// Only an explicit `successful: true` counts as success.
    pub fn from_response(response: ToolsetResponse) -> Self {
        if response.successful != Some(true) {
            return ExecutionResult::Failure(ErrorRecord::from_error(response.error.as_ref()));
        }
        ExecutionResult::Success(
            response
                .data
                .unwrap_or_else(|| Value::Object(Map::new())),
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success(_))
    }

    /// Dictionary handed back to the hosting platform
    pub fn into_value(self) -> Value {
        match self {
            ExecutionResult::Success(data) => data,
            ExecutionResult::Failure(record) => record.to_value(),
        }
    }
}
