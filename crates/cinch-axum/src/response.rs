//! # Error Response
//!
//! Renders a populated [`Errors`] aggregate as an HTTP response: a status
//! code classified from the overall map and the canonical JSON body
//! `{"overall":{...},"fields":{...}}`. An empty aggregate renders nothing
//! at all — no body, no content type, status left at the transport
//! default.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cinch::{Errors, CONTENT_TYPE_ERROR, DESERIALIZATION_ERROR};

/// Rejection produced when a binding pipeline ends with errors.
///
/// Wraps the aggregate so it can implement [`IntoResponse`] here (the
/// aggregate itself lives in `cinch`, which knows nothing about axum).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindRejection(pub Errors);

impl From<Errors> for BindRejection {
    fn from(errors: Errors) -> Self {
        Self(errors)
    }
}

impl BindRejection {
    /// Status classification for a non-empty aggregate, first match wins:
    ///
    /// 1. `ContentTypeError` present → 415 Unsupported Media Type.
    /// 2. `DeserializationError` present → 400 Bad Request.
    /// 3. Anything else, including field-only errors → 422 Unprocessable
    ///    Entity.
    pub fn status(&self) -> StatusCode {
        if self.0.overall.contains_key(CONTENT_TYPE_ERROR) {
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        } else if self.0.overall.contains_key(DESERIALIZATION_ERROR) {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }

    /// The wrapped aggregate.
    pub fn errors(&self) -> &Errors {
        &self.0
    }
}

impl IntoResponse for BindRejection {
    fn into_response(self) -> Response {
        if self.0.is_empty() {
            return StatusCode::OK.into_response();
        }
        let status = self.status();
        tracing::debug!(errors = self.0.count(), status = %status, "request binding failed");
        (status, Json(self.0)).into_response()
    }
}
