//! Dot-path query string parser.
//!
//! The grammar is deliberately small: the expression is split on `.`, and a
//! segment wrapped in `[` and `]` is an index (`[2]`) or, when it contains
//! exactly one `:`, a slice (`[1:3]`). Every other segment is a mapping key
//! taken literally.

use super::ast::{PathSegment, YamlPath};
use super::error::YamlPathError;

/// Parser for dot-path query strings.
pub struct Parser<'a> {
    input: &'a str,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given query string.
    pub fn new(query: &'a str) -> Self {
        Self { input: query }
    }

    /// Parses the query string into a `YamlPath`.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlscribe::yamlpath::{Parser, PathSegment};
    ///
    /// let path = Parser::parse("friends.[1].name").unwrap();
    /// assert_eq!(path.segments[1], PathSegment::Index(1));
    /// ```
    pub fn parse(query: &str) -> Result<YamlPath, YamlPathError> {
        Parser::new(query).parse_path()
    }

    /// Parses every segment except the last, which is never applied and so
    /// is not validated. A single-segment query yields an empty path, which
    /// addresses the root.
    ///
    /// ```
    /// use yamlscribe::yamlpath::{Parser, PathSegment};
    ///
    /// let container = Parser::parse_container("a.[x]").unwrap();
    /// assert_eq!(container.segments, vec![PathSegment::Key("a".to_string())]);
    /// ```
    pub fn parse_container(query: &str) -> Result<YamlPath, YamlPathError> {
        let parser = Parser::new(query);
        if query.is_empty() {
            return Err(YamlPathError::EmptyPath);
        }

        let container = match query.rsplit_once('.') {
            Some((container, _)) => container,
            None => return Ok(YamlPath::new(Vec::new())),
        };

        let segments = container
            .split('.')
            .map(|raw| parser.parse_segment(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(YamlPath::new(segments))
    }

    fn parse_path(&self) -> Result<YamlPath, YamlPathError> {
        if self.input.is_empty() {
            return Err(YamlPathError::EmptyPath);
        }

        let segments = self
            .input
            .split('.')
            .map(|raw| self.parse_segment(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(YamlPath::new(segments))
    }

    fn parse_segment(&self, raw: &str) -> Result<PathSegment, YamlPathError> {
        if !is_index_segment(raw) {
            return Ok(PathSegment::Key(raw.to_string()));
        }

        let inner = &raw[1..raw.len() - 1];
        if inner.matches(':').count() == 1 {
            self.parse_slice(raw, inner)
        } else {
            let index = self.parse_bracket_number(raw, inner)?;
            Ok(PathSegment::Index(index))
        }
    }

    /// Parses array slice bounds: both `N` and `M` are required.
    fn parse_slice(&self, raw: &str, inner: &str) -> Result<PathSegment, YamlPathError> {
        let (start, end) = inner
            .split_once(':')
            .ok_or_else(|| self.malformed(raw))?;
        let start = self.parse_bracket_number(raw, start)?;
        let end = self.parse_bracket_number(raw, end)?;
        Ok(PathSegment::Slice(start, end))
    }

    fn parse_bracket_number(&self, raw: &str, text: &str) -> Result<i64, YamlPathError> {
        text.trim().parse::<i64>().map_err(|_| self.malformed(raw))
    }

    fn malformed(&self, raw: &str) -> YamlPathError {
        YamlPathError::MalformedPathSegment {
            segment: raw.to_string(),
            path: self.input.to_string(),
        }
    }
}

/// Returns true when a raw segment uses the bracket syntax.
///
/// This is purely syntactic: `[x]` counts as an index segment even though it
/// fails to parse.
pub(crate) fn is_index_segment(raw: &str) -> bool {
    raw.len() >= 2 && raw.starts_with('[') && raw.ends_with(']')
}
