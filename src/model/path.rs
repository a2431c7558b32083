//! Path keys addressing primitives inside a composite document
//!
//! A key such as `name[0].given[1]` is stored as the segment sequence
//! `name`, `0`, `given`, `1`. Ordering is segment-wise, so every key sharing a
//! prefix sorts contiguously right after that prefix and array indices sort
//! numerically.

use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use super::error::ModelError;

/// One step of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Object member
    Field(String),
    /// Array element
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Ordered sequence of path segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey(SmallVec<[PathSegment; 4]>);

impl PathKey {
    /// The empty path
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a key from segments
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self(segments.into_iter().collect())
    }

    /// Segments of this key
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the empty path
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extend with an object member
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.0.push(PathSegment::Field(name.into()));
        next
    }

    /// Extend with an array index
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.0.push(PathSegment::Index(index));
        next
    }

    /// Whether `prefix` is a (not necessarily strict) segment prefix of this key
    pub fn starts_with(&self, prefix: &PathKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Remainder after a strict segment prefix
    pub fn strip_prefix(&self, prefix: &PathKey) -> Option<PathKey> {
        if self.len() > prefix.len() && self.starts_with(prefix) {
            Some(Self::from_segments(self.0[prefix.len()..].iter().cloned()))
        } else {
            None
        }
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 && matches!(segment, PathSegment::Field(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for PathKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ModelError::InvalidPath {
            path: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(invalid("empty path"));
        }

        let mut segments = SmallVec::new();
        for part in s.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(open) => part.split_at(open),
                None => (part, ""),
            };
            if !name.is_empty() {
                segments.push(PathSegment::Field(name.to_string()));
            } else if rest.is_empty() {
                return Err(invalid("empty segment"));
            }

            while !rest.is_empty() {
                let inner = rest
                    .strip_prefix('[')
                    .ok_or_else(|| invalid("expected '['"))?;
                let close = inner.find(']').ok_or_else(|| invalid("unclosed '['"))?;
                let index = inner[..close]
                    .parse::<usize>()
                    .map_err(|_| invalid("index is not a non-negative integer"))?;
                segments.push(PathSegment::Index(index));
                rest = &inner[close + 1..];
            }
        }

        Ok(Self(segments))
    }
}
