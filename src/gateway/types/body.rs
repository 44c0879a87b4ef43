//! Request envelope extraction
//!
//! Every write endpoint takes `{ "data": { ... } }`. [`EnvelopeBody`] parses the
//! JSON, unwraps `data` and hands the handler a [`Payload`]. Malformed JSON is
//! a 400 `ApiError`, never axum's default plain-text rejection.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::error::ApiError;
use crate::payload::Payload;

/// Validated request envelope
#[derive(Debug)]
pub struct EnvelopeBody(pub Payload);

impl<S> FromRequest<S> for EnvelopeBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // 1. Extract JSON body
        let Json(body): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation(format!("Invalid JSON: {}", e.body_text())))?;

        // 2. Unwrap the envelope
        unwrap_envelope(body).map(EnvelopeBody)
    }
}

/// Missing `data` means an empty payload; the guards report what is absent.
fn unwrap_envelope(body: Value) -> Result<Payload, ApiError> {
    let Value::Object(mut body) = body else {
        return Err(ApiError::validation("Request body must be a JSON object"));
    };
    match body.remove("data") {
        None | Some(Value::Null) => Ok(Payload::default()),
        Some(Value::Object(fields)) => Ok(Payload::new(fields)),
        Some(_) => Err(ApiError::validation("Request data must be a JSON object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope() {
        let payload = unwrap_envelope(json!({"data": {"name": "Taco"}})).unwrap();
        assert_eq!(payload.text("name"), Some("Taco"));
    }

    #[test]
    fn test_missing_data_is_empty_payload() {
        assert_eq!(unwrap_envelope(json!({})).unwrap(), Payload::default());
        assert_eq!(
            unwrap_envelope(json!({"data": null})).unwrap(),
            Payload::default()
        );
    }

    #[test]
    fn test_non_object_rejected() {
        assert_eq!(
            unwrap_envelope(json!({"data": [1, 2]})),
            Err(ApiError::validation("Request data must be a JSON object"))
        );
        assert_eq!(
            unwrap_envelope(json!("hello")),
            Err(ApiError::validation("Request body must be a JSON object"))
        );
    }
}
