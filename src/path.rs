//! Field path representation for locating values in a request body.
//!
//! This module provides [`FieldPath`] and [`PathSegment`] types. Paths are built
//! top-down while the validator recurses and are rendered as the keys of an
//! [`ErrorMap`](crate::ErrorMap).

use std::fmt::{self, Display};

/// The key used for errors that apply to the whole body.
pub const ROOT_KEY: &str = "body";

/// A segment of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A property access (e.g., `user`, `email`)
    Field(String),
    /// An array element, rendered as `index-<n>`
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "index-{}", idx),
        }
    }
}

/// A path to a value inside a request body.
///
/// `FieldPath` represents locations like `users.index-0.email`. An empty path
/// renders as `body`, which is how errors against the root value are keyed.
///
/// # Example
///
/// ```rust
/// use bodyguard::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "users.index-0.email");
/// assert_eq!(FieldPath::root().to_string(), "body");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Returns a new path with a field segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "{}", ROOT_KEY);
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_renders_as_body() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "body");
    }

    #[test]
    fn test_single_field() {
        let path = FieldPath::root().push_field("user");
        assert_eq!(path.to_string(), "user");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_single_index() {
        let path = FieldPath::root().push_index(0);
        assert_eq!(path.to_string(), "index-0");
    }

    #[test]
    fn test_nested_fields() {
        let path = FieldPath::root().push_field("a").push_field("b");
        assert_eq!(path.to_string(), "a.b");
    }

    #[test]
    fn test_indices_are_dot_joined() {
        let path = FieldPath::root()
            .push_index(0)
            .push_index(3)
            .push_field("prop");
        assert_eq!(path.to_string(), "index-0.index-3.prop");
    }

    #[test]
    fn test_path_immutability() {
        let base = FieldPath::root().push_field("users");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "users");
        assert_eq!(path_a.to_string(), "users.index-0");
        assert_eq!(path_b.to_string(), "users.index-1");
    }

    #[test]
    fn test_field_named_like_an_index_is_kept_verbatim() {
        let path = FieldPath::from_field("index-9");
        assert_eq!(path.last(), Some(&PathSegment::Field("index-9".to_string())));
        assert_eq!(path.to_string(), "index-9");
    }

    #[test]
    fn test_segments_iterator() {
        let path = FieldPath::root().push_field("a").push_index(1);

        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], &PathSegment::field("a"));
        assert_eq!(segments[1], &PathSegment::index(1));
    }
}
