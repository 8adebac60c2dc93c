//! Dot-path addressing for nested YAML structures.
//!
//! A path is a `.`-separated list of segments, similar to a restricted `jq`
//! accessor. It is used to locate values, their parent containers and the
//! indentation at which they are written, so generated files can carry
//! comments next to specific keys and list items.
//!
//! # Supported Syntax
//!
//! - `name` - Mapping key
//! - `[index]` - Zero-based sequence element
//! - `[start:end]` - Half-open sequence slice (bounds are clamped)
//!
//! # Examples
//!
//! ```
//! use yamlscribe::document::parser::parse_yaml;
//! use yamlscribe::yamlpath::{final_key, resolve, PathSegment};
//!
//! let tree = parse_yaml(
//!     "friends:\n  - name: murphy\n  - name: jobillydoo\n  - name: barrpiddles\n",
//! )
//! .unwrap();
//!
//! let name = resolve("friends.[1].name", tree.root()).unwrap();
//! assert_eq!(name.to_serde_value(), serde_yaml::Value::from("jobillydoo"));
//! assert_eq!(final_key("items.[2]").unwrap(), PathSegment::Index(2));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod indent;
pub mod parser;

pub use ast::{PathSegment, YamlPath};
pub use error::YamlPathError;
pub use evaluator::{Evaluator, Location, Resolved, ResolvedMut};
pub use indent::{distinct_key_segment_count, indentation_for};
pub use parser::Parser;

use crate::document::node::{YamlNode, YamlValue};
use evaluator::{element_position, slice_range, walk_mut};

/// Resolves `path` against `root` and returns a live borrow of the value.
pub fn resolve<'a>(path: &str, root: &'a YamlNode) -> Result<Resolved<'a>, YamlPathError> {
    let parsed = Parser::parse(path)?;
    Evaluator::new(root)
        .evaluate(&parsed)
        .inspect_err(|err| tracing::debug!(%path, %err, "path resolution failed"))
}

/// Resolves `path` against `root` and returns a mutable borrow of the value.
///
/// Mutating through the result mutates `root`.
pub fn resolve_mut<'a>(
    path: &str,
    root: &'a mut YamlNode,
) -> Result<ResolvedMut<'a>, YamlPathError> {
    let parsed = Parser::parse(path)?;
    walk_mut(root, &parsed.segments, &parsed)
        .inspect_err(|err| tracing::debug!(%path, %err, "path resolution failed"))
}

/// Resolves the parent container of the value addressed by `path`.
///
/// For a single-segment path the container is `root` itself. The final
/// segment is not parsed, so only the container part of `path` can fail.
pub fn resolve_container<'a>(
    path: &str,
    root: &'a YamlNode,
) -> Result<Resolved<'a>, YamlPathError> {
    let container = Parser::parse_container(path)?;
    Evaluator::new(root)
        .evaluate(&container)
        .inspect_err(|err| tracing::debug!(%path, %err, "container resolution failed"))
}

/// Mutable counterpart of [`resolve_container`].
pub fn resolve_container_mut<'a>(
    path: &str,
    root: &'a mut YamlNode,
) -> Result<ResolvedMut<'a>, YamlPathError> {
    let container = Parser::parse_container(path)?;
    walk_mut(root, &container.segments, &container)
        .inspect_err(|err| tracing::debug!(%path, %err, "container resolution failed"))
}

/// Returns the last segment of `path` in scalar form.
///
/// `friends.[1].name` yields `Key("name")`, `items.[2]` yields `Index(2)`.
/// No structure is consulted.
pub fn final_key(path: &str) -> Result<PathSegment, YamlPathError> {
    let mut parsed = Parser::parse(path)?;
    parsed.segments.pop().ok_or(YamlPathError::EmptyPath)
}

/// Returns the tree location of the single key or list item `path` addresses.
///
/// The location can be used with [`crate::document::tree::YamlTree::get_node`]
/// and `get_node_mut`.
pub fn locate(path: &str, root: &YamlNode) -> Result<Vec<usize>, YamlPathError> {
    let parsed = Parser::parse(path)?;
    let (_, location) = Evaluator::new(root).evaluate_located(&parsed)?;
    match location.range {
        None => Ok(location.path),
        Some(_) => Err(YamlPathError::SliceNotAddressable {
            path: parsed.to_string(),
        }),
    }
}

/// Writes `value` at the location addressed by `path`.
///
/// - a key is replaced in place, or appended when the mapping lacks it
/// - `[i]` replaces an existing element
/// - `[n:m]` replaces that range of the sequence with the items of `value`,
///   which must itself be a sequence
pub fn assign(path: &str, root: &mut YamlNode, value: YamlNode) -> Result<(), YamlPathError> {
    let parsed = Parser::parse(path)?;
    let container = walk_mut(root, parsed.container_segments(), &parsed)?;
    let last = parsed.final_segment().ok_or(YamlPathError::EmptyPath)?;

    let mismatch = |expected: &'static str, found: &'static str| YamlPathError::TypeMismatch {
        segment: last.to_string(),
        expected,
        found,
        path: parsed.to_string(),
    };

    match (container, last) {
        (ResolvedMut::Node(node), PathSegment::Key(key)) => {
            let found = node.value().type_name();
            match node.value_mut() {
                YamlValue::Object(entries) => {
                    entries.insert(key.clone(), value);
                    Ok(())
                }
                _ => Err(mismatch("mapping", found)),
            }
        }
        (ResolvedMut::Items(_), PathSegment::Key(_)) => Err(mismatch("mapping", "sequence")),
        (ResolvedMut::Node(node), PathSegment::Index(index)) => {
            let found = node.value().type_name();
            match node.value_mut() {
                YamlValue::Array(items) => {
                    let position = element_position(*index, items.len(), &parsed)?;
                    items[position] = value;
                    Ok(())
                }
                _ => Err(mismatch("sequence", found)),
            }
        }
        (ResolvedMut::Items(items), PathSegment::Index(index)) => {
            let position = element_position(*index, items.len(), &parsed)?;
            items[position] = value;
            Ok(())
        }
        (ResolvedMut::Node(node), PathSegment::Slice(start, end)) => {
            if !node.value().is_array() {
                return Err(mismatch("sequence", node.value().type_name()));
            }
            let replacement = match value.into_value() {
                YamlValue::Array(replacement) => replacement,
                other => return Err(mismatch("sequence", other.type_name())),
            };
            if let YamlValue::Array(items) = node.value_mut() {
                let range = slice_range(*start, *end, items.len());
                items.splice(range, replacement);
            }
            Ok(())
        }
        (ResolvedMut::Items(_), PathSegment::Slice(..)) => Err(YamlPathError::SliceNotAddressable {
            path: parsed.to_string(),
        }),
    }
}
