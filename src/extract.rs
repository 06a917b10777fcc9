//! Axum extractors whose rejections use the API's JSON error bodies

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// `Json<T>` that rejects malformed bodies with a 400 `{"error": ...}`
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

/// Parse a raw body as JSON, for handlers that must look at other inputs
/// before the body is allowed to fail the request
pub fn parse_json(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        ApiError::bad_request(format!("Failed to parse the request body as JSON: {}", e))
    })
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    ApiError::bad_request(rejection.body_text())
}

/// The `{id}` segment of `/contacts/{id}`. Anything but an unsigned integer
/// that fits the id column does not name a contact, so it is a 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactId(pub i32);

impl ContactId {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse().ok().map(ContactId)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ContactId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;
        ContactId::parse(&raw).ok_or(ApiError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_id_accepts_only_plain_integers() {
        assert_eq!(ContactId::parse("42"), Some(ContactId(42)));
        assert_eq!(ContactId::parse("007"), Some(ContactId(7)));
        assert_eq!(ContactId::parse("-1"), None);
        assert_eq!(ContactId::parse("+1"), None);
        assert_eq!(ContactId::parse("abc"), None);
        assert_eq!(ContactId::parse(""), None);
        assert_eq!(ContactId::parse("99999999999"), None);
    }

    #[test]
    fn parse_json_reports_bad_bodies_as_400() {
        assert_eq!(parse_json(br#"{"name": "Ana"}"#).unwrap()["name"], "Ana");

        let err = parse_json(b"{\"name\":").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(matches!(parse_json(b"").unwrap_err(), ApiError::BadRequest(_)));
    }
}
