//! Request body extraction with case-insensitive field names

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;

/// JSON body whose top-level keys are matched regardless of case
///
/// Unlike [`axum::Json`] this does not require a `Content-Type` header and
/// reports every parse failure as `400 Invalid JSON`.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for CaseInsensitiveJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            debug!("Failed to read request body: {}", e);
            ApiError::BadRequest("Invalid request body".to_string())
        })?;

        parse(&bytes).map(CaseInsensitiveJson)
    }
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let invalid = |e: serde_json::Error| {
        debug!("Rejected request body: {}", e);
        ApiError::BadRequest("Invalid JSON".to_string())
    };

    let value: Value = serde_json::from_slice(bytes).map_err(invalid)?;
    let Value::Object(fields) = value else {
        return Err(ApiError::BadRequest("Invalid JSON".to_string()));
    };

    let lowered: Map<String, Value> = fields
        .into_iter()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect();

    serde_json::from_value(Value::Object(lowered)).map_err(invalid)
}
