//! # cinch — Request Binding & Validation Engine
//!
//! Populates application structs from raw request field data and runs a
//! two-phase validation pipeline, producing one aggregated, classified
//! error value per request.
//!
//! ## Modules
//!
//! - **Errors** (`errors.rs`): the [`Errors`] aggregate — two
//!   classification maps (overall and per-field), destructive merge, and
//!   deterministic serialization.
//!
//! - **Coercion** (`coerce.rs`): raw text to typed values, with failures
//!   that identify the field and the offending input.
//!
//! - **Source** (`source.rs`): the raw-input model — ordered repeated
//!   values and reference-counted file parts.
//!
//! - **Binding** (`bind.rs`): descriptor-table struct binding with
//!   embedded, nested, optional-nested, slice, and file fields.
//!
//! - **Validation** (`validate.rs`): required-field checks on bound
//!   values, then the type's own [`Validate`] hook.
//!
//! ## Pipeline
//!
//! ```text
//! raw input → bind (coerce per field) → check_required → Validate hook → Errors
//! ```
//!
//! All non-fatal errors accumulate; the transport layer renders the whole
//! set at once. This crate is transport-independent — the axum adapter
//! lives in `cinch-axum`.
//!
//! ## Crate Policy
//!
//! - No shared mutable state: descriptor tables are `'static`, everything
//!   else is per-request.
//! - No `.unwrap()` outside tests; fallible paths return typed errors.

pub mod bind;
pub mod coerce;
pub mod errors;
pub mod source;
pub mod validate;

pub use bind::{Bindable, EmptyValue, FieldSpec};
pub use coerce::{CoerceError, FromField};
pub use errors::{Errors, CONTENT_TYPE_ERROR, DESERIALIZATION_ERROR, REQUIRED};
pub use source::{FilePart, FormSource};
pub use validate::Validate;
