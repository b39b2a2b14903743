//! # Validation Pipeline
//!
//! Two ordered phases over a bound value, both always executed:
//!
//! 1. **Structural** — every field descriptor's check runs against the
//!    bound value; required fields still at their zero value record a
//!    `Required` entry under their external name.
//! 2. **Semantic** — the target type's [`Validate`] hook runs with the
//!    aggregate so far and the request head, and its result is merged in.
//!    The hook reacts to prior errors but cannot erase them.

use http::request::Parts;

use crate::bind::Bindable;
use crate::errors::Errors;

/// Semantic validation hook for a bound type.
///
/// The default is a no-op, so purely structural types opt in with an empty
/// impl. A hook returns a fresh aggregate; the pipeline merges it via
/// [`Errors::combine`], so hook entries land on top of structural ones.
pub trait Validate {
    /// Inspect the bound value and report domain-rule violations.
    ///
    /// `current` holds everything the structural phase found; `request` is
    /// the head of the request being bound.
    fn validate(&self, current: &Errors, request: &Parts) -> Errors {
        let _ = (current, request);
        Errors::new()
    }
}

/// Run the structural phase only: required-field checks on bound values.
pub fn check_required<T: Bindable>(value: &T, errs: &mut Errors) {
    for field in T::FIELDS {
        (field.check)(value, "", errs);
    }
}

/// Run the full pipeline: structural phase, then the semantic hook.
///
/// The semantic phase runs even when the structural phase recorded errors;
/// all findings accumulate into `errs`.
pub fn run<T: Bindable + Validate>(value: &T, request: &Parts, errs: &mut Errors) {
    check_required(value, errs);
    let semantic = value.validate(errs, request);
    errs.combine(semantic);
}
