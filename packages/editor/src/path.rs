//! # Field Paths
//!
//! Dot-delimited addresses into a payload. The empty string is the root.
//!
//! Segments are kept as text. Whether a segment means an array index is only
//! known once traversal reaches the container it applies to, see
//! [`FieldPath::index_of`].

use crate::errors::PathError;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The root path
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dot-delimited path, tolerating empty segments
    ///
    /// `"a..b"` yields the segments `a`, `""`, `b`.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }

        Self {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }

    /// Parse a dot-delimited path, rejecting empty segments
    pub fn parse_strict(path: &str) -> Result<Self, PathError> {
        let parsed = Self::parse(path);

        if let Some(position) = parsed.segments.iter().position(String::is_empty) {
            return Err(PathError::EmptySegment {
                path: path.to_string(),
                position,
            });
        }

        Ok(parsed)
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Child path for an object key
    pub fn child_key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_string());
        Self { segments }
    }

    /// Child path for an array position
    pub fn child_index(&self, index: usize) -> Self {
        self.child_key(&index.to_string())
    }

    /// Interpret a segment as an array index
    ///
    /// Only the canonical decimal form counts, so `"01"` and `"+1"` are keys.
    pub fn index_of(segment: &str) -> Option<usize> {
        let index: usize = segment.parse().ok()?;
        (index.to_string() == segment).then_some(index)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
