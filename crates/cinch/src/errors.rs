//! # Error Aggregate
//!
//! The single error value produced by a binding pipeline run. Errors are
//! collected, never thrown: every phase appends what it found and the
//! transport layer renders the whole set in one response.
//!
//! Two independent classification maps:
//!
//! - **overall** — request-level failures keyed by classification name
//!   (content type, deserialization, or anything a semantic hook invents).
//! - **fields** — per-field failures keyed by the field's external name.
//!
//! Both maps are `BTreeMap` so the serialized body is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Overall classification recorded when the request body could not be
/// dispatched to any decode path.
pub const CONTENT_TYPE_ERROR: &str = "ContentTypeError";

/// Overall classification recorded when the body failed to parse for the
/// selected decode path.
pub const DESERIALIZATION_ERROR: &str = "DeserializationError";

/// The fixed message recorded under a required field's name when its bound
/// value is still the zero value after binding.
pub const REQUIRED: &str = "Required";

/// Aggregated, classified errors for one binding pipeline run.
///
/// Constructed fresh per request, mutated during bind + validate, and
/// consumed exactly once by the presenter. Both maps are always present;
/// callers write into them without any nil-map ceremony.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Errors {
    /// Request-level errors, keyed by classification name.
    pub overall: BTreeMap<String, String>,
    /// Field-level errors, keyed by the field's external name.
    pub fields: BTreeMap<String, String>,
}

impl Errors {
    /// Create an aggregate with both maps empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request-level error under a classification name.
    pub fn add_overall(&mut self, classification: impl Into<String>, message: impl Into<String>) {
        self.overall.insert(classification.into(), message.into());
    }

    /// Record a field-level error under the field's external name.
    pub fn add_field(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.insert(field.into(), message.into());
    }

    /// Destructive left-merge: every entry of `other` is written into
    /// `self`, with `other` winning on key collision.
    pub fn combine(&mut self, other: Errors) {
        self.overall.extend(other.overall);
        self.fields.extend(other.fields);
    }

    /// Total entry count across both maps. Zero means the request bound
    /// cleanly and processing continues downstream.
    pub fn count(&self) -> usize {
        self.overall.len() + self.fields.len()
    }

    /// True when no errors have been recorded.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_both_maps_empty() {
        let errs = Errors::new();
        assert_eq!(errs.count(), 0);
        assert!(errs.is_empty());
        assert!(errs.overall.is_empty());
        assert!(errs.fields.is_empty());
    }

    #[test]
    fn count_spans_both_maps() {
        let mut errs = Errors::new();
        assert_eq!(errs.count(), 0);
        errs.add_overall("foo", "foo");
        assert_eq!(errs.count(), 1);
        errs.add_overall("bar", "bar");
        errs.add_field("baz", "baz");
        assert_eq!(errs.count(), 3);
    }

    #[test]
    fn combine_merges_both_maps() {
        let mut a = Errors::new();
        a.add_overall("foo1", "foo1");
        a.add_field("bar1", "bar1");

        let mut b = Errors::new();
        b.add_overall("foo2", "foo2");
        b.add_field("bar2", "bar2");

        a.combine(b);

        assert_eq!(a.count(), 4);
        assert_eq!(a.overall["foo1"], "foo1");
        assert_eq!(a.overall["foo2"], "foo2");
        assert_eq!(a.fields["bar1"], "bar1");
        assert_eq!(a.fields["bar2"], "bar2");
    }

    #[test]
    fn combine_right_wins_on_collision() {
        let mut a = Errors::new();
        a.add_overall("clash", "left");
        a.add_field("field", "left");

        let mut b = Errors::new();
        b.add_overall("clash", "right");
        b.add_field("field", "right");

        a.combine(b);

        assert_eq!(a.count(), 2);
        assert_eq!(a.overall["clash"], "right");
        assert_eq!(a.fields["field"], "right");
    }

    #[test]
    fn empty_aggregate_serializes_with_both_objects() {
        let errs = Errors::new();
        let json = serde_json::to_string(&errs).unwrap();
        assert_eq!(json, r#"{"overall":{},"fields":{}}"#);
    }

    #[test]
    fn field_error_serializes_canonically() {
        let mut errs = Errors::new();
        errs.add_field("foo", REQUIRED);
        let json = serde_json::to_string(&errs).unwrap();
        assert_eq!(json, r#"{"overall":{},"fields":{"foo":"Required"}}"#);
    }

    #[test]
    fn overall_error_serializes_canonically() {
        let mut errs = Errors::new();
        errs.add_overall(DESERIALIZATION_ERROR, "parser error");
        let json = serde_json::to_string(&errs).unwrap();
        assert_eq!(
            json,
            r#"{"overall":{"DeserializationError":"parser error"},"fields":{}}"#
        );
    }

    #[test]
    fn serialization_is_deterministic() {
        let mut errs = Errors::new();
        errs.add_field("zulu", "z");
        errs.add_field("alpha", "a");
        errs.add_overall("ZClass", "z");
        errs.add_overall("AClass", "a");
        let json = serde_json::to_string(&errs).unwrap();
        // BTreeMap keys come out sorted regardless of insertion order.
        assert_eq!(
            json,
            r#"{"overall":{"AClass":"a","ZClass":"z"},"fields":{"alpha":"a","zulu":"z"}}"#
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn entries() -> impl Strategy<Value = Vec<(String, String)>> {
            proptest::collection::vec(("[a-z]{1,8}", "[a-z]{0,8}"), 0..8)
        }

        proptest! {
            /// After combine, the count equals the size of the key unions.
            #[test]
            fn combine_count_is_union_size(
                ao in entries(), af in entries(),
                bo in entries(), bf in entries(),
            ) {
                let mut a = Errors::new();
                for (k, v) in &ao { a.add_overall(k.clone(), v.clone()); }
                for (k, v) in &af { a.add_field(k.clone(), v.clone()); }
                let mut b = Errors::new();
                for (k, v) in &bo { b.add_overall(k.clone(), v.clone()); }
                for (k, v) in &bf { b.add_field(k.clone(), v.clone()); }

                let mut overall_union: std::collections::BTreeSet<&String> =
                    a.overall.keys().collect();
                overall_union.extend(b.overall.keys());
                let mut field_union: std::collections::BTreeSet<&String> =
                    a.fields.keys().collect();
                field_union.extend(b.fields.keys());
                let expected = overall_union.len() + field_union.len();

                let b_snapshot = b.clone();
                a.combine(b);
                prop_assert_eq!(a.count(), expected);

                // Right side wins every collision.
                for (k, v) in &b_snapshot.overall {
                    prop_assert_eq!(&a.overall[k], v);
                }
                for (k, v) in &b_snapshot.fields {
                    prop_assert_eq!(&a.fields[k], v);
                }
            }

            /// Combining with an empty aggregate changes nothing.
            #[test]
            fn combine_empty_is_identity(ao in entries(), af in entries()) {
                let mut a = Errors::new();
                for (k, v) in &ao { a.add_overall(k.clone(), v.clone()); }
                for (k, v) in &af { a.add_field(k.clone(), v.clone()); }
                let before = a.clone();
                a.combine(Errors::new());
                prop_assert_eq!(a, before);
            }
        }
    }
}
