//! # Type Coercion
//!
//! Converts raw textual form values into typed destination values. A failed
//! coercion produces a [`CoerceError`] naming the field and the offending
//! text; the binder records it and moves on to the next value, so every
//! problem in a request surfaces in one response.

use thiserror::Error;

/// A raw value that could not be converted to its destination type.
///
/// The display string doubles as the field-level error message, so it
/// carries the offending input and the expected kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot interpret \"{value}\" as {expected}")]
pub struct CoerceError {
    /// Full external name of the field being bound.
    pub field: String,
    /// The raw text that failed to parse.
    pub value: String,
    /// Human-readable name of the destination kind.
    pub expected: &'static str,
}

/// A destination type that can be produced from one raw textual value.
///
/// Numeric parsing goes through `FromStr`, which is locale-invariant.
/// Booleans accept the canonical `true`/`false` forms only.
pub trait FromField: Sized {
    /// Name of the destination kind, used in coercion messages.
    const EXPECTED: &'static str;

    /// Parse one raw value. `None` means the text is not interpretable.
    fn from_field(raw: &str) -> Option<Self>;
}

impl FromField for String {
    const EXPECTED: &'static str = "text";

    fn from_field(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }
}

impl FromField for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_field(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

macro_rules! from_field_numeric {
    ($($ty:ty => $expected:literal),* $(,)?) => {$(
        impl FromField for $ty {
            const EXPECTED: &'static str = $expected;

            fn from_field(raw: &str) -> Option<Self> {
                raw.parse().ok()
            }
        }
    )*};
}

from_field_numeric! {
    i8 => "an integer",
    i16 => "an integer",
    i32 => "an integer",
    i64 => "an integer",
    isize => "an integer",
    u8 => "an unsigned integer",
    u16 => "an unsigned integer",
    u32 => "an unsigned integer",
    u64 => "an unsigned integer",
    usize => "an unsigned integer",
    f32 => "a number",
    f64 => "a number",
}

/// Coerce a single raw value for `field`.
pub fn coerce<F: FromField>(field: &str, raw: &str) -> Result<F, CoerceError> {
    F::from_field(raw).ok_or_else(|| CoerceError {
        field: field.to_owned(),
        value: raw.to_owned(),
        expected: F::EXPECTED,
    })
}

/// Coerce every raw value for a repeated field independently.
///
/// Successful elements come back in input order; failures are collected
/// without aborting the remaining values.
pub fn coerce_each<F: FromField>(field: &str, raws: &[String]) -> (Vec<F>, Vec<CoerceError>) {
    let mut values = Vec::with_capacity(raws.len());
    let mut failures = Vec::new();
    for raw in raws {
        match coerce::<F>(field, raw) {
            Ok(value) => values.push(value),
            Err(err) => failures.push(err),
        }
    }
    (values, failures)
}
