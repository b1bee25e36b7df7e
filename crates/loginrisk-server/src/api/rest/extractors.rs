//! Request extractors

use crate::error::ServerError;
use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;

/// JSON body extractor whose rejections go through [`ServerError`]
///
/// Malformed bodies then share the `{error, status}` shape of every other
/// failure instead of axum's plain-text rejection.
pub struct JsonExtractor<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonExtractor<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| ServerError::InvalidRequest(describe(&rejection)))
    }
}

fn describe(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err.body_text()),
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "expected 'Content-Type: application/json'".to_string()
        }
        other => other.body_text(),
    }
}
