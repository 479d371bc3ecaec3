//! JSON extractor that answers malformed bodies with the error envelope
//!
//! `EnvelopeJson<T>` works like `axum::Json<T>`, but a rejected body becomes a
//! 400 `{"success": false, "error": "Invalid request body: ..."}` instead of
//! axum's plain-text rejection.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;

use super::{ApiResponse, EmptyData};

pub struct EnvelopeJson<T>(pub T);

/// Error type for `EnvelopeJson` extraction failures.
pub struct EnvelopeJsonRejection(JsonRejection);

impl IntoResponse for EnvelopeJsonRejection {
    fn into_response(self) -> Response {
        tracing::warn!(rejection = %self.0, "Rejected request body");
        let body = ApiResponse::<EmptyData>::error(format!("Invalid request body: {}", self.0));
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl<S, T> FromRequest<S> for EnvelopeJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = EnvelopeJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(EnvelopeJsonRejection)?;

        Ok(EnvelopeJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────
