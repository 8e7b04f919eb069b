//! Key path type with dot-delimited segments.

use std::fmt;

/// A dot-delimited path addressing a (possibly nested) location inside a
/// JSON document.
///
/// Construction cannot fail: every string is a valid key path. The string
/// is split on `.` exactly once, at construction, and empty segments are
/// preserved: `""` is the single empty key, and `"a..b"` steps through
/// the empty key between `a` and `b`.
///
/// # Examples
///
/// ```rust
/// use dotconf_keypath::KeyPath;
///
/// let path = KeyPath::new("server.port");
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.to_string(), "server.port");
///
/// // No dots means a single top-level key
/// assert_eq!(KeyPath::new("timeout").len(), 1);
/// ```
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeyPath {
    pub segments: Vec<String>,
}

impl KeyPath {
    /// Split a dot-delimited string into a key path.
    pub fn new(path: &str) -> Self {
        KeyPath {
            segments: path.split('.').map(|s| s.to_string()).collect(),
        }
    }

    /// Create a path from pre-split segments.
    pub fn from_segments(segments: Vec<String>) -> Self {
        KeyPath { segments }
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if this path has no segments.
    ///
    /// Paths built with `KeyPath::new` always have at least one segment
    /// (splitting `""` yields the single empty segment); an empty path
    /// can only come from `KeyPath::from_segments`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over segments.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.segments.iter()
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        KeyPath::new(path)
    }
}

impl From<String> for KeyPath {
    fn from(path: String) -> Self {
        KeyPath::new(&path)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl std::ops::Index<usize> for KeyPath {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.segments[i]
    }
}
