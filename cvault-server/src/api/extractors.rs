//! Custom Axum extractors for relay request bodies.
//!
//! [`RelayJson<T>`] differs from `axum::Json` in two ways: it ignores the
//! `Content-Type` header, and an empty body is read as `{}` so absent
//! fields reach the relay as missing values. Rejections use the relay's
//! uniform `500 { "error" }` shape.

use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use super::ApiError;

/// Request bodies larger than this are rejected before parsing.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A JSON request body deserialized into `T`.
pub(crate) struct RelayJson<T>(pub T);

/// Parse a raw body, treating a whitespace-only body as `{}`.
fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let bytes = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        bytes
    };
    serde_json::from_slice(bytes)
        .map_err(|e| ApiError::MalformedBody(format!("invalid JSON body: {e}")))
}

impl<T, S> FromRequest<S> for RelayJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let body_bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|_| ApiError::MalformedBody("failed to read request body".to_string()))?;

        parse_body(&body_bytes).map(RelayJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvault_sdk::objects::{ApprovePaymentRequest, DepositRequest};

    #[test]
    fn test_blank_body_reads_as_empty_object() {
        for body in ["", "  ", "\n"] {
            let request: DepositRequest = parse_body(body.as_bytes()).unwrap();
            assert!(request.amount.is_none());
        }
    }

    #[test]
    fn test_null_payment_id_is_present() {
        let request: ApprovePaymentRequest = parse_body(br#"{"paymentId":null}"#).unwrap();
        assert!(request.payment_id.is_some());
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        let err = parse_body::<DepositRequest>(b"[1,").unwrap_err();
        match err {
            ApiError::MalformedBody(message) => assert!(message.starts_with("invalid JSON body")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
