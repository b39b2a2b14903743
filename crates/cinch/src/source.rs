//! # Raw Input Model
//!
//! The decoded-but-untyped view of a form request: textual values keyed by
//! field name (repeated keys keep their encounter order) and file parts
//! keyed the same way. Both the urlencoded and the multipart decode paths
//! produce this model; the binder consumes it.

use std::collections::HashMap;

use bytes::Bytes;

/// One uploaded file part.
///
/// `data` is a reference-counted [`Bytes`] view of the received body —
/// cloning a part shares the allocation, it never copies the content. The
/// part's lifetime is tied to the request that produced it; do not stash
/// parts beyond the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilePart {
    /// Client-supplied file name, if any.
    pub file_name: Option<String>,
    /// Declared content type of the part, if any.
    pub content_type: Option<String>,
    /// The part's content.
    pub data: Bytes,
}

/// Raw field data for one request: textual values plus file parts.
#[derive(Debug, Clone, Default)]
pub struct FormSource {
    values: HashMap<String, Vec<String>>,
    files: HashMap<String, Vec<FilePart>>,
}

impl FormSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one textual value under `name`, preserving encounter order.
    pub fn push_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Append one file part under `name`, preserving encounter order.
    pub fn push_file(&mut self, name: impl Into<String>, part: FilePart) {
        self.files.entry(name.into()).or_default().push(part);
    }

    /// First textual value under `name`, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    /// All textual values under `name`, in encounter order.
    pub fn values(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First file part under `name`, if any.
    pub fn file(&self, name: &str) -> Option<&FilePart> {
        self.files.get(name).and_then(|v| v.first())
    }

    /// All file parts under `name`, in encounter order.
    pub fn files(&self, name: &str) -> &[FilePart] {
        self.files.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when any value or file key starts with `prefix`.
    ///
    /// Drives lazy allocation of optional nested structures: a nested
    /// object with zero matching sub-fields stays unset.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.values.keys().chain(self.files.keys()).any(|k| k.starts_with(prefix))
    }
}
