//! Resolution of parsed dot-paths against a node tree.
//!
//! Resolution is all-or-nothing: the first segment that cannot be applied
//! stops the walk and reports why. Results borrow from the tree; nothing is
//! copied.

use std::ops::Range;

use super::ast::{PathSegment, YamlPath};
use super::error::YamlPathError;
use crate::document::convert::{items_to_serde_value, to_serde_value};
use crate::document::node::{YamlNode, YamlValue};

/// A live, shared view of the value a path resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    /// A single node inside the tree
    Node(&'a YamlNode),
    /// A contiguous run of sequence items produced by a slice segment
    Items(&'a [YamlNode]),
}

impl<'a> Resolved<'a> {
    pub fn as_node(&self) -> Option<&'a YamlNode> {
        match self {
            Resolved::Node(node) => Some(node),
            Resolved::Items(_) => None,
        }
    }

    pub fn as_items(&self) -> Option<&'a [YamlNode]> {
        match self {
            Resolved::Node(_) => None,
            Resolved::Items(items) => Some(items),
        }
    }

    /// Type name of the resolved value; slices count as sequences.
    pub fn type_name(&self) -> &'static str {
        match self {
            Resolved::Node(node) => node.value().type_name(),
            Resolved::Items(_) => "sequence",
        }
    }

    pub fn to_serde_value(&self) -> serde_yaml::Value {
        match self {
            Resolved::Node(node) => to_serde_value(node),
            Resolved::Items(items) => items_to_serde_value(items),
        }
    }
}

/// A live, mutable view of the value a path resolved to.
#[derive(Debug)]
pub enum ResolvedMut<'a> {
    Node(&'a mut YamlNode),
    Items(&'a mut [YamlNode]),
}

impl<'a> ResolvedMut<'a> {
    pub fn into_node(self) -> Option<&'a mut YamlNode> {
        match self {
            ResolvedMut::Node(node) => Some(node),
            ResolvedMut::Items(_) => None,
        }
    }

    pub fn into_items(self) -> Option<&'a mut [YamlNode]> {
        match self {
            ResolvedMut::Node(_) => None,
            ResolvedMut::Items(items) => Some(items),
        }
    }
}

/// Where a resolved value sits in the tree.
///
/// `path` holds positions as understood by [`crate::document::tree::YamlTree::get_node`].
/// For slice results `path` points at the underlying sequence and `range`
/// holds the absolute item range inside it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: Vec<usize>,
    pub range: Option<Range<usize>>,
}

/// Evaluates parsed paths against a borrowed root node.
pub struct Evaluator<'a> {
    root: &'a YamlNode,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a YamlNode) -> Self {
        Evaluator { root }
    }

    /// Resolves every segment of `path`.
    pub fn evaluate(&self, path: &YamlPath) -> Result<Resolved<'a>, YamlPathError> {
        self.walk(&path.segments, path).map(|(resolved, _)| resolved)
    }

    /// Resolves all but the final segment. Single-segment paths yield the root.
    pub fn evaluate_container(&self, path: &YamlPath) -> Result<Resolved<'a>, YamlPathError> {
        self.walk(path.container_segments(), path)
            .map(|(resolved, _)| resolved)
    }

    /// Resolves `path` and reports where the result lives in the tree.
    pub fn evaluate_located(
        &self,
        path: &YamlPath,
    ) -> Result<(Resolved<'a>, Location), YamlPathError> {
        self.walk(&path.segments, path)
    }

    /// Applies `segments` in order, starting at the root.
    ///
    /// `path` is the full expression and is only used for error reporting.
    fn walk(
        &self,
        segments: &[PathSegment],
        path: &YamlPath,
    ) -> Result<(Resolved<'a>, Location), YamlPathError> {
        let mut current = Resolved::Node(self.root);
        let mut location = Location::default();

        for segment in segments {
            tracing::trace!(%segment, "applying path segment");
            current = self.evaluate_segment(current, segment, &mut location, path)?;
        }

        Ok((current, location))
    }

    fn evaluate_segment(
        &self,
        current: Resolved<'a>,
        segment: &PathSegment,
        location: &mut Location,
        path: &YamlPath,
    ) -> Result<Resolved<'a>, YamlPathError> {
        match (current, segment) {
            (Resolved::Node(node), PathSegment::Key(key)) => match node.value() {
                YamlValue::Object(entries) => {
                    let (position, _, child) =
                        entries
                            .get_full(key.as_str())
                            .ok_or_else(|| YamlPathError::KeyNotFound {
                                key: key.clone(),
                                path: path.to_string(),
                            })?;
                    location.path.push(position);
                    Ok(Resolved::Node(child))
                }
                other => Err(type_mismatch(segment, "mapping", other.type_name(), path)),
            },
            (Resolved::Items(_), PathSegment::Key(_)) => {
                Err(type_mismatch(segment, "mapping", "sequence", path))
            }
            (Resolved::Node(node), PathSegment::Index(index)) => match node.value() {
                YamlValue::Array(items) => {
                    let position = element_position(*index, items.len(), path)?;
                    location.path.push(position);
                    Ok(Resolved::Node(&items[position]))
                }
                other => Err(type_mismatch(segment, "sequence", other.type_name(), path)),
            },
            (Resolved::Items(items), PathSegment::Index(index)) => {
                let position = element_position(*index, items.len(), path)?;
                let offset = location.range.take().map_or(0, |range| range.start);
                location.path.push(offset + position);
                Ok(Resolved::Node(&items[position]))
            }
            (Resolved::Node(node), PathSegment::Slice(start, end)) => match node.value() {
                YamlValue::Array(items) => {
                    let range = slice_range(*start, *end, items.len());
                    location.range = Some(range.clone());
                    Ok(Resolved::Items(&items[range]))
                }
                other => Err(type_mismatch(segment, "sequence", other.type_name(), path)),
            },
            (Resolved::Items(items), PathSegment::Slice(start, end)) => {
                let range = slice_range(*start, *end, items.len());
                let offset = location.range.as_ref().map_or(0, |r| r.start);
                location.range = Some(offset + range.start..offset + range.end);
                Ok(Resolved::Items(&items[range]))
            }
        }
    }
}

/// Resolves `segments` mutably, starting at `root`.
pub(crate) fn walk_mut<'a>(
    root: &'a mut YamlNode,
    segments: &[PathSegment],
    path: &YamlPath,
) -> Result<ResolvedMut<'a>, YamlPathError> {
    let mut current = ResolvedMut::Node(root);
    for segment in segments {
        tracing::trace!(%segment, "applying path segment");
        current = evaluate_segment_mut(current, segment, path)?;
    }
    Ok(current)
}

fn evaluate_segment_mut<'a>(
    current: ResolvedMut<'a>,
    segment: &PathSegment,
    path: &YamlPath,
) -> Result<ResolvedMut<'a>, YamlPathError> {
    match (current, segment) {
        (ResolvedMut::Node(node), PathSegment::Key(key)) => {
            let found = node.value().type_name();
            match node.value_mut() {
                YamlValue::Object(entries) => entries
                    .get_mut(key.as_str())
                    .map(ResolvedMut::Node)
                    .ok_or_else(|| YamlPathError::KeyNotFound {
                        key: key.clone(),
                        path: path.to_string(),
                    }),
                _ => Err(type_mismatch(segment, "mapping", found, path)),
            }
        }
        (ResolvedMut::Items(_), PathSegment::Key(_)) => {
            Err(type_mismatch(segment, "mapping", "sequence", path))
        }
        (ResolvedMut::Node(node), PathSegment::Index(index)) => {
            let found = node.value().type_name();
            match node.value_mut() {
                YamlValue::Array(items) => {
                    let position = element_position(*index, items.len(), path)?;
                    Ok(ResolvedMut::Node(&mut items[position]))
                }
                _ => Err(type_mismatch(segment, "sequence", found, path)),
            }
        }
        (ResolvedMut::Items(items), PathSegment::Index(index)) => {
            let position = element_position(*index, items.len(), path)?;
            Ok(ResolvedMut::Node(&mut items[position]))
        }
        (ResolvedMut::Node(node), PathSegment::Slice(start, end)) => {
            let found = node.value().type_name();
            match node.value_mut() {
                YamlValue::Array(items) => {
                    let range = slice_range(*start, *end, items.len());
                    Ok(ResolvedMut::Items(&mut items[range]))
                }
                _ => Err(type_mismatch(segment, "sequence", found, path)),
            }
        }
        (ResolvedMut::Items(items), PathSegment::Slice(start, end)) => {
            let range = slice_range(*start, *end, items.len());
            Ok(ResolvedMut::Items(&mut items[range]))
        }
    }
}

/// Checks a zero-based element index. Negative indices are rejected.
pub(crate) fn element_position(
    index: i64,
    len: usize,
    path: &YamlPath,
) -> Result<usize, YamlPathError> {
    usize::try_from(index)
        .ok()
        .filter(|&position| position < len)
        .ok_or_else(|| YamlPathError::IndexOutOfRange {
            index,
            len,
            path: path.to_string(),
        })
}

/// Normalizes slice bounds the way sequence slicing does.
///
/// Negative bounds count from the end, out-of-range bounds are clamped and a
/// start past the end yields an empty range.
pub(crate) fn slice_range(start: i64, end: i64, len: usize) -> Range<usize> {
    let len_i = len as i64;
    let normalize = |bound: i64| -> usize {
        if bound < 0 {
            (len_i + bound).max(0) as usize
        } else {
            bound.min(len_i) as usize
        }
    };

    let start_idx = normalize(start);
    let end_idx = normalize(end).max(start_idx);
    start_idx..end_idx
}

fn type_mismatch(
    segment: &PathSegment,
    expected: &'static str,
    found: &'static str,
    path: &YamlPath,
) -> YamlPathError {
    YamlPathError::TypeMismatch {
        segment: segment.to_string(),
        expected,
        found,
        path: path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yamlpath::Parser;
    use indexmap::IndexMap;

    fn make_test_tree() -> YamlNode {
        let items = vec![
            YamlNode::string("a"),
            YamlNode::string("b"),
            YamlNode::string("c"),
            YamlNode::string("d"),
        ];

        let mut obj = IndexMap::new();
        obj.insert("name".to_string(), YamlNode::string("test"));
        obj.insert("age".to_string(), YamlNode::integer(42));
        obj.insert("items".to_string(), YamlNode::new(YamlValue::Array(items)));

        YamlNode::new(YamlValue::Object(obj))
    }

    fn eval<'a>(tree: &'a YamlNode, path: &str) -> Result<Resolved<'a>, YamlPathError> {
        Evaluator::new(tree).evaluate(&Parser::parse(path).unwrap())
    }

    #[test]
    fn test_evaluate_child() {
        let tree = make_test_tree();
        let result = eval(&tree, "name").unwrap();
        assert_eq!(result, Resolved::Node(&YamlNode::string("test")));
    }

    #[test]
    fn test_evaluate_array_index() {
        let tree = make_test_tree();
        let result = eval(&tree, "items.[1]").unwrap();
        assert_eq!(result.as_node(), Some(&YamlNode::string("b")));
    }

    #[test]
    fn test_evaluate_slice() {
        let tree = make_test_tree();
        let items = eval(&tree, "items.[1:3]").unwrap().as_items().unwrap();
        assert_eq!(items, &[YamlNode::string("b"), YamlNode::string("c")]);
    }

    #[test]
    fn test_index_into_slice() {
        let tree = make_test_tree();
        let result = eval(&tree, "items.[1:3].[1]").unwrap();
        assert_eq!(result.as_node(), Some(&YamlNode::string("c")));
    }

    #[test]
    fn test_evaluate_no_match() {
        let tree = make_test_tree();
        let err = eval(&tree, "nonexistent").unwrap_err();
        assert!(matches!(err, YamlPathError::KeyNotFound { ref key, .. } if key == "nonexistent"));
    }

    #[test]
    fn test_negative_index_is_out_of_range() {
        let tree = make_test_tree();
        let err = eval(&tree, "items.[-1]").unwrap_err();
        assert_eq!(
            err,
            YamlPathError::IndexOutOfRange {
                index: -1,
                len: 4,
                path: "items.[-1]".to_string(),
            }
        );
    }

    #[test]
    fn test_key_on_scalar_is_type_mismatch() {
        let tree = make_test_tree();
        let err = eval(&tree, "name.first").unwrap_err();
        assert!(matches!(
            err,
            YamlPathError::TypeMismatch {
                expected: "mapping",
                found: "string",
                ..
            }
        ));
    }

    #[test]
    fn test_index_on_mapping_is_type_mismatch() {
        let tree = make_test_tree();
        let err = eval(&tree, "[0]").unwrap_err();
        assert!(matches!(
            err,
            YamlPathError::TypeMismatch {
                expected: "sequence",
                found: "mapping",
                ..
            }
        ));
    }

    #[test]
    fn test_key_on_slice_is_type_mismatch() {
        let tree = make_test_tree();
        let err = eval(&tree, "items.[0:2].name").unwrap_err();
        assert!(matches!(err, YamlPathError::TypeMismatch { found: "sequence", .. }));
    }

    #[test]
    fn test_container_of_single_segment_is_root() {
        let tree = make_test_tree();
        let path = Parser::parse("name").unwrap();
        let container = Evaluator::new(&tree).evaluate_container(&path).unwrap();
        assert!(std::ptr::eq(container.as_node().unwrap(), &tree));
    }

    #[test]
    fn test_located_paths() {
        let tree = make_test_tree();
        let evaluator = Evaluator::new(&tree);

        let (_, location) = evaluator
            .evaluate_located(&Parser::parse("items.[2]").unwrap())
            .unwrap();
        assert_eq!(location.path, vec![2, 2]);
        assert_eq!(location.range, None);

        let (_, location) = evaluator
            .evaluate_located(&Parser::parse("items.[1:4].[1:3]").unwrap())
            .unwrap();
        assert_eq!(location.path, vec![2]);
        assert_eq!(location.range, Some(2..4));

        let (resolved, location) = evaluator
            .evaluate_located(&Parser::parse("items.[1:4].[1]").unwrap())
            .unwrap();
        assert_eq!(location.path, vec![2, 2]);
        assert_eq!(resolved.as_node(), Some(&YamlNode::string("c")));
    }

    #[test]
    fn test_slice_range_normalization() {
        assert_eq!(slice_range(1, 3, 4), 1..3);
        assert_eq!(slice_range(0, 100, 4), 0..4);
        assert_eq!(slice_range(3, 1, 4), 3..3);
        assert_eq!(slice_range(-2, 4, 4), 2..4);
        assert_eq!(slice_range(-10, -1, 4), 0..3);
        assert_eq!(slice_range(10, 20, 4), 4..4);
    }

    #[test]
    fn test_walk_mut_mutates_in_place() {
        let mut tree = make_test_tree();
        let path = Parser::parse("items.[0]").unwrap();
        let node = walk_mut(&mut tree, &path.segments, &path)
            .unwrap()
            .into_node()
            .unwrap();
        *node = YamlNode::string("z");

        assert_eq!(eval(&tree, "items.[0]").unwrap().as_node(), Some(&YamlNode::string("z")));
    }
}
