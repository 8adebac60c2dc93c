//! Typed tokens for dot-path expressions.

use std::fmt;

/// A segment in a dot-path expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Mapping key (`name`)
    Key(String),
    /// Sequence element (`[2]`)
    Index(i64),
    /// Half-open sequence range (`[1:3]`)
    Slice(i64, i64),
}

impl PathSegment {
    /// Returns true for `[N]` and `[N:M]` segments.
    pub fn is_index(&self) -> bool {
        !matches!(self, PathSegment::Key(_))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
            PathSegment::Slice(start, end) => write!(f, "[{}:{}]", start, end),
        }
    }
}

/// A parsed dot-path expression.
///
/// Paths from [`super::Parser::parse`] hold at least one segment; a container
/// path may be empty, meaning the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YamlPath {
    /// Segments that make up the path.
    pub segments: Vec<PathSegment>,
}

impl YamlPath {
    /// Creates a new path with the given segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Segments addressing the parent container of the final value.
    ///
    /// Empty for single-segment paths, whose container is the root itself.
    pub fn container_segments(&self) -> &[PathSegment] {
        match self.segments.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// The last segment, i.e. the key or index inside the container.
    pub fn final_segment(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl fmt::Display for YamlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for YamlPath {
    type Err = super::error::YamlPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parser::Parser::parse(s)
    }
}
