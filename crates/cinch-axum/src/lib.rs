//! # cinch-axum — Axum Adapter for the cinch Binding Engine
//!
//! Bridges the transport-independent engine in `cinch` to axum:
//!
//! - **Extractors** (`extract.rs`): [`Bind`] dispatches on the request's
//!   content type (urlencoded and multipart forms, JSON); [`Form`],
//!   [`Multipart`], and [`Json`] force a single decode path. Body
//!   collection is capped by [`BodyLimit`].
//!
//! - **Form decoding** (`form.rs`): urlencoded pairs and multipart parts
//!   into the engine's raw-input model; file parts share the request
//!   body's allocation.
//!
//! - **Error response** (`response.rs`): [`BindRejection`] renders the
//!   aggregate as `{"overall":{...},"fields":{...}}` with a classified
//!   status — 415 for content-type errors, 400 for deserialization
//!   errors, 422 for everything else.
//!
//! A handler that takes `Bind<T>` only runs when the request bound
//! cleanly; otherwise axum answers with the rejection and the pipeline
//! stops there.
//!
//! ```ignore
//! async fn create(Bind(post): Bind<BlogPost>) -> StatusCode {
//!     // `post` is fully populated and validated here.
//!     StatusCode::CREATED
//! }
//! ```

pub mod extract;
mod form;
pub mod response;

pub use extract::{Bind, BodyLimit, Form, Json, Multipart};
pub use response::BindRejection;
