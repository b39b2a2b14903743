//! # Body Extractors
//!
//! The content-type-driven entry point of the engine, shaped as axum
//! extractors. [`Bind`] inspects the request's content type and picks the
//! decode path; [`Form`], [`Multipart`], and [`Json`] each force one path.
//!
//! Every extractor ends the same way: a populated value when the aggregate
//! is empty, or a [`BindRejection`] that renders the classified error
//! response and stops the handler from running.
//!
//! ## Target-type contract
//!
//! Targets implement [`Bindable`] (the form-path descriptor table) and
//! [`Validate`] (the semantic hook, default no-op), and derive
//! `Deserialize` + `Default` with `#[serde(default)]` for the JSON path so
//! absent members decode to zero values and fall through to the
//! required-field check. File fields are `#[serde(skip)]` — files only
//! arrive via multipart.
//!
//! ## Capability view
//!
//! The extractors deref to the bound value, so a handler can hold the
//! concrete type or reborrow it as any trait object it implements:
//!
//! ```ignore
//! async fn create(Bind(post): Bind<BlogPost>) {
//!     let preview: &dyn Headline = &post;
//!     // downstream logic depends on the capability, not the struct
//! }
//! ```

use std::ops::{Deref, DerefMut};

use axum::body::Body;
use axum::extract::{FromRequest, Request};
use bytes::Bytes;
use cinch::{bind, validate, Bindable, Errors, FormSource, Validate};
use cinch::{CONTENT_TYPE_ERROR, DESERIALIZATION_ERROR};
use http::request::Parts;
use serde::de::DeserializeOwned;

use crate::form;
use crate::response::BindRejection;

const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// Maximum number of body bytes the extractors collect, configurable per
/// route via `axum::Extension` (`.layer(Extension(BodyLimit(..)))`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimit(pub usize);

impl Default for BodyLimit {
    fn default() -> Self {
        // 2 MiB covers ordinary form and JSON payloads.
        Self(2 * 1024 * 1024)
    }
}

/// Content-type-dispatching extractor.
///
/// - empty or urlencoded content type → urlencoded form path;
/// - `multipart/form-data` → multipart path;
/// - anything containing `json` → native JSON decode;
/// - everything else → `ContentTypeError`, no further phases.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bind<T>(pub T);

/// Forces the urlencoded form path regardless of content type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Form<T>(pub T);

/// Forces the multipart path; a missing or unparseable boundary is a
/// `ContentTypeError`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Multipart<T>(pub T);

/// Forces the JSON path regardless of content type — a JSON body with an
/// empty content-type header still binds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

macro_rules! impl_payload {
    ($($wrapper:ident),* $(,)?) => {$(
        impl<T> $wrapper<T> {
            /// Consume the extractor and return the bound value.
            pub fn into_inner(self) -> T {
                self.0
            }
        }

        impl<T> Deref for $wrapper<T> {
            type Target = T;

            fn deref(&self) -> &T {
                &self.0
            }
        }

        impl<T> DerefMut for $wrapper<T> {
            fn deref_mut(&mut self) -> &mut T {
                &mut self.0
            }
        }
    )*};
}

impl_payload!(Bind, Form, Multipart, Json);

fn overall_error(classification: &str, message: String) -> BindRejection {
    let mut errs = Errors::new();
    errs.add_overall(classification, message);
    BindRejection(errs)
}

fn content_type(parts: &Parts) -> &str {
    parts
        .headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Collect the whole body, capped by the route's [`BodyLimit`].
///
/// An unreadable or over-limit body means the payload cannot be decoded,
/// which classifies as a deserialization failure.
async fn collect(body: Body, parts: &Parts) -> Result<Bytes, BindRejection> {
    let limit = parts.extensions.get::<BodyLimit>().copied().unwrap_or_default();
    axum::body::to_bytes(body, limit.0).await.map_err(|err| {
        overall_error(
            DESERIALIZATION_ERROR,
            format!("unable to read request body: {err}"),
        )
    })
}

fn finish_form<T>(src: &FormSource, parts: &Parts) -> Result<T, BindRejection>
where
    T: Bindable + Validate,
{
    let (value, mut errs) = bind::bind::<T>(src);
    validate::run(&value, parts, &mut errs);
    if errs.is_empty() {
        Ok(value)
    } else {
        Err(BindRejection(errs))
    }
}

fn finish_json<T>(bytes: &[u8], parts: &Parts) -> Result<T, BindRejection>
where
    T: Bindable + Validate + DeserializeOwned,
{
    match serde_json::from_slice::<T>(bytes) {
        Ok(value) => {
            let mut errs = Errors::new();
            validate::run(&value, parts, &mut errs);
            if errs.is_empty() {
                Ok(value)
            } else {
                Err(BindRejection(errs))
            }
        }
        // No structurally valid value exists, so the binder and validator
        // never run: straight to the presenter.
        Err(err) => Err(overall_error(DESERIALIZATION_ERROR, err.to_string())),
    }
}

async fn finish_multipart<T>(
    boundary: String,
    body: Body,
    parts: &Parts,
) -> Result<T, BindRejection>
where
    T: Bindable + Validate,
{
    let bytes = collect(body, parts).await?;
    let src = form::parse_multipart(boundary, bytes)
        .await
        .map_err(|err| overall_error(DESERIALIZATION_ERROR, err.to_string()))?;
    finish_form(&src, parts)
}

impl<T, S> FromRequest<S> for Bind<T>
where
    T: Bindable + Validate + DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = BindRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let ct = content_type(&parts).to_owned();
        tracing::debug!(content_type = %ct, "dispatching request binding");

        if ct.is_empty() || ct.starts_with(URLENCODED) {
            let bytes = collect(body, &parts).await?;
            let src = form::parse_urlencoded(&bytes);
            finish_form(&src, &parts).map(Bind)
        } else if ct.starts_with(MULTIPART) {
            let boundary = multer::parse_boundary(&ct).map_err(|err| {
                overall_error(CONTENT_TYPE_ERROR, format!("bad multipart boundary: {err}"))
            })?;
            finish_multipart(boundary, body, &parts).await.map(Bind)
        } else if ct.contains("json") {
            let bytes = collect(body, &parts).await?;
            finish_json(&bytes, &parts).map(Bind)
        } else {
            Err(overall_error(
                CONTENT_TYPE_ERROR,
                format!("unsupported content type \"{ct}\""),
            ))
        }
    }
}

impl<T, S> FromRequest<S> for Form<T>
where
    T: Bindable + Validate + Send,
    S: Send + Sync,
{
    type Rejection = BindRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let bytes = collect(body, &parts).await?;
        let src = form::parse_urlencoded(&bytes);
        finish_form(&src, &parts).map(Form)
    }
}

impl<T, S> FromRequest<S> for Multipart<T>
where
    T: Bindable + Validate + Send,
    S: Send + Sync,
{
    type Rejection = BindRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let ct = content_type(&parts);
        let boundary = multer::parse_boundary(ct).map_err(|err| {
            overall_error(CONTENT_TYPE_ERROR, format!("bad multipart boundary: {err}"))
        })?;
        finish_multipart(boundary, body, &parts).await.map(Multipart)
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: Bindable + Validate + DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = BindRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let bytes = collect(body, &parts).await?;
        finish_json(&bytes, &parts).map(Json)
    }
}
