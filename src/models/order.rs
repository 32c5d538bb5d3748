use serde_json::Value;

use crate::error::AppError;

/// A request body after transport-level JSON parsing, before any validation.
///
/// `content` is `None` when the request carried no body at all (or only
/// whitespace). Bare JSON scalars are refused here, so whatever survives is
/// either absent, `null`, an object or an array.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBody {
    pub content: Option<Value>,
    pub raw_len: usize,
}

impl OrderBody {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        let raw_len = bytes.len();

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self {
                content: None,
                raw_len,
            });
        }

        let value: Value = serde_json::from_slice(bytes)
            .map_err(|err| AppError::MalformedPayload(err.to_string()))?;

        match value {
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Err(
                AppError::MalformedPayload("order must be a JSON object or array".to_string()),
            ),
            other => Ok(Self {
                content: Some(other),
                raw_len,
            }),
        }
    }
}

/// An order that passed validation. The service never looks inside it; it is
/// carried to the queue as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPayload(Value);

impl OrderPayload {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Compact JSON, keys in the order the client sent them.
    pub fn message_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}
