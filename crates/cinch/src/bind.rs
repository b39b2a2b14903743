//! # Struct Binding
//!
//! Populates a target struct from a [`FormSource`] by walking the struct's
//! field-descriptor table. The table is the Rust rendering of tag
//! reflection: one `const` [`FieldSpec`] entry per bindable field, built at
//! compile time and shared by every request that binds the same shape.
//!
//! Field addressing on the form path:
//!
//! - plain fields match their external name directly;
//! - embedded structs flatten their sub-fields into the parent's namespace
//!   (no prefix), so a base type's fields can be supplied unprefixed;
//! - nested structs address sub-fields with a dotted prefix
//!   (`author.name`);
//! - optional nested structs are allocated only when at least one of their
//!   sub-fields appears in the input.
//!
//! A field with no table entry is invisible to the engine: never read,
//! never reported missing. Coercion failures are recorded per field and
//! never abort the remaining fields.

use crate::coerce::{self, FromField};
use crate::errors::{Errors, REQUIRED};
use crate::source::{FilePart, FormSource};

/// Descriptor for one bindable field of `T`.
///
/// `bind` populates the field from raw input; `check` runs the structural
/// required-field phase against the bound value. Both receive the current
/// name prefix (empty at the top level, dotted inside nested structs).
/// `required` mirrors what `check` enforces and is kept as table metadata.
pub struct FieldSpec<T> {
    /// External name in the form namespace. Empty for embedded entries,
    /// whose sub-fields live in the parent's namespace.
    pub name: &'static str,
    /// Whether the structural phase demands a non-zero bound value.
    pub required: bool,
    /// Populate the field from the raw input.
    pub bind: fn(&mut T, &FormSource, &str, &mut Errors),
    /// Record a required-field error if the bound value is still empty.
    pub check: fn(&T, &str, &mut Errors),
}

/// A struct shape the engine can populate from raw form input.
///
/// The descriptor table is `'static`: derived once per shape at compile
/// time and safely shared across concurrent requests.
pub trait Bindable: Default + Sized + 'static {
    /// One entry per bindable field, in declaration order.
    const FIELDS: &'static [FieldSpec<Self>];
}

/// Bind a fresh `T` from raw input, accumulating coercion errors.
///
/// The engine constructs and owns the target value itself, so the caller
/// cannot hand it an aliased instance — the pointer-at-the-entry-point
/// hazard is ruled out by the signature. Every field is attempted even
/// when earlier fields fail, so the returned aggregate carries everything
/// wrong with the request at once.
pub fn bind<T: Bindable>(src: &FormSource) -> (T, Errors) {
    let mut target = T::default();
    let mut errs = Errors::new();
    tracing::trace!(fields = T::FIELDS.len(), "binding form input");
    for field in T::FIELDS {
        (field.bind)(&mut target, src, "", &mut errs);
    }
    (target, errs)
}

fn join(prefix: &str, name: &str) -> String {
    format!("{prefix}{name}")
}

fn child_prefix(prefix: &str, name: &str) -> String {
    format!("{prefix}{name}.")
}

// -- Bind helpers (used inside descriptor tables) -----------------------------

/// Bind a scalar field from the first raw value under its name.
///
/// An absent name leaves the field at its default; a coercion failure is
/// recorded under the field's full external name.
pub fn scalar<F: FromField>(
    dst: &mut F,
    name: &str,
    src: &FormSource,
    prefix: &str,
    errs: &mut Errors,
) {
    let key = join(prefix, name);
    if let Some(raw) = src.first(&key) {
        match coerce::coerce::<F>(&key, raw) {
            Ok(value) => *dst = value,
            Err(err) => errs.add_field(key, err.to_string()),
        }
    }
}

/// Bind a slice field: one element per raw value, in encounter order.
///
/// Elements that fail to coerce are dropped; the first failure is recorded
/// under the field's name while the remaining values still bind.
pub fn scalar_vec<F: FromField>(
    dst: &mut Vec<F>,
    name: &str,
    src: &FormSource,
    prefix: &str,
    errs: &mut Errors,
) {
    let key = join(prefix, name);
    let raws = src.values(&key);
    if raws.is_empty() {
        return;
    }
    let (values, failures) = coerce::coerce_each::<F>(&key, raws);
    *dst = values;
    if let Some(first) = failures.into_iter().next() {
        errs.add_field(key, first.to_string());
    }
}

/// Bind an embedded struct: its fields match the parent's namespace.
pub fn embedded<C: Bindable>(dst: &mut C, src: &FormSource, prefix: &str, errs: &mut Errors) {
    for field in C::FIELDS {
        (field.bind)(dst, src, prefix, errs);
    }
}

/// Bind a nested struct under a dotted prefix (`name.sub`).
pub fn nested<C: Bindable>(
    dst: &mut C,
    name: &str,
    src: &FormSource,
    prefix: &str,
    errs: &mut Errors,
) {
    let child = child_prefix(prefix, name);
    for field in C::FIELDS {
        (field.bind)(dst, src, &child, errs);
    }
}

/// Bind an optional nested struct, allocating it only when at least one
/// sub-field is present in the input. With zero matching sub-fields the
/// field stays `None`, keeping "absent object" distinguishable from
/// "present but empty".
pub fn nested_opt<C: Bindable>(
    dst: &mut Option<C>,
    name: &str,
    src: &FormSource,
    prefix: &str,
    errs: &mut Errors,
) {
    let child = child_prefix(prefix, name);
    if !src.contains_prefix(&child) {
        return;
    }
    let mut value = C::default();
    for field in C::FIELDS {
        (field.bind)(&mut value, src, &child, errs);
    }
    *dst = Some(value);
}

/// Bind a single-file field to the first part under its name.
///
/// Parts bind by cloning the `Bytes` handle — content is shared with the
/// request body, never copied.
pub fn file(dst: &mut Option<FilePart>, name: &str, src: &FormSource, prefix: &str) {
    let key = join(prefix, name);
    if let Some(part) = src.file(&key) {
        *dst = Some(part.clone());
    }
}

/// Bind a multi-file field to every part under its name, in order.
pub fn file_vec(dst: &mut Vec<FilePart>, name: &str, src: &FormSource, prefix: &str) {
    let key = join(prefix, name);
    let parts = src.files(&key);
    if !parts.is_empty() {
        *dst = parts.to_vec();
    }
}

// -- Check helpers (structural required phase) --------------------------------

/// A bound value that can report whether it is still the zero value.
///
/// The structural phase runs on bound values, not on raw-input presence:
/// a required field supplied as an empty string is still missing.
pub trait EmptyValue {
    /// True when the value is the type's zero/empty value.
    fn is_empty_value(&self) -> bool;
}

impl EmptyValue for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl EmptyValue for bool {
    fn is_empty_value(&self) -> bool {
        !*self
    }
}

macro_rules! empty_value_zero {
    ($($ty:ty),* $(,)?) => {$(
        impl EmptyValue for $ty {
            fn is_empty_value(&self) -> bool {
                *self == 0 as $ty
            }
        }
    )*};
}

empty_value_zero!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T> EmptyValue for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

impl<T> EmptyValue for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

/// Record a `Required` error when a required field's bound value is empty.
///
/// An empty slice counts as empty, so a required repeated field with zero
/// bound elements is reported missing.
pub fn required<V: EmptyValue>(value: &V, name: &str, prefix: &str, errs: &mut Errors) {
    if value.is_empty_value() {
        errs.add_field(join(prefix, name), REQUIRED);
    }
}

/// Run an embedded struct's checks in the parent's namespace.
pub fn check_embedded<C: Bindable>(value: &C, prefix: &str, errs: &mut Errors) {
    for field in C::FIELDS {
        (field.check)(value, prefix, errs);
    }
}

/// Run a nested struct's checks under its dotted prefix.
pub fn check_nested<C: Bindable>(value: &C, name: &str, prefix: &str, errs: &mut Errors) {
    let child = child_prefix(prefix, name);
    for field in C::FIELDS {
        (field.check)(value, &child, errs);
    }
}

/// Run checks for an optional nested struct.
///
/// An unallocated struct has no instance to inspect, so its sub-fields are
/// skipped; if the field itself is required, its own name is reported.
/// An allocated struct recurses like a by-value nested field.
pub fn check_nested_opt<C: Bindable>(
    value: &Option<C>,
    name: &str,
    field_required: bool,
    prefix: &str,
    errs: &mut Errors,
) {
    match value {
        Some(inner) => check_nested(inner, name, prefix, errs),
        None => {
            if field_required {
                errs.add_field(join(prefix, name), REQUIRED);
            }
        }
    }
}
