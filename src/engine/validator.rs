use serde_json::Value;
use thiserror::Error;

use crate::models::order::{OrderBody, OrderPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty_body")]
    EmptyBody,
}

impl ValidationError {
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::EmptyBody => "empty_body",
        }
    }
}

/// Presence check only: anything with at least one field or element is an
/// order. What the fields mean is the kitchen's business.
pub fn validate(body: OrderBody) -> Result<OrderPayload, ValidationError> {
    match body.content {
        None | Some(Value::Null) => Err(ValidationError::EmptyBody),
        Some(Value::Object(ref fields)) if fields.is_empty() => Err(ValidationError::EmptyBody),
        Some(Value::Array(ref elements)) if elements.is_empty() => {
            Err(ValidationError::EmptyBody)
        }
        Some(value) => Ok(OrderPayload::new(value)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{validate, ValidationError};
    use crate::models::order::OrderBody;

    fn body(raw: &str) -> OrderBody {
        OrderBody::from_bytes(raw.as_bytes()).unwrap()
    }

    #[test]
    fn absent_body_is_empty() {
        assert_eq!(validate(body("")), Err(ValidationError::EmptyBody));
        assert_eq!(validate(body("   ")), Err(ValidationError::EmptyBody));
    }

    #[test]
    fn empty_containers_and_null_are_empty() {
        assert_eq!(validate(body("{}")), Err(ValidationError::EmptyBody));
        assert_eq!(validate(body("[]")), Err(ValidationError::EmptyBody));
        assert_eq!(validate(body("null")), Err(ValidationError::EmptyBody));
    }

    #[test]
    fn any_non_empty_document_is_accepted_without_schema_checks() {
        let payload = validate(body(r#"{"items":["Taco","Burrito"],"customer":"John Doe"}"#))
            .unwrap();
        assert_eq!(
            payload.as_value(),
            &json!({"items": ["Taco", "Burrito"], "customer": "John Doe"})
        );

        assert!(validate(body(r#"{"anything":null}"#)).is_ok());
        assert!(validate(body(r#"[{}]"#)).is_ok());
    }

    #[test]
    fn reason_is_stable() {
        assert_eq!(ValidationError::EmptyBody.reason(), "empty_body");
        assert_eq!(ValidationError::EmptyBody.to_string(), "empty_body");
    }
}
