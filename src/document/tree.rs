//! Tree-based navigation for YAML documents.
//!
//! `YamlTree` addresses nodes by *location*: a sequence of positions from the
//! root, where a position selects the nth entry of a mapping or the nth element
//! of a sequence. The path addressor can translate a dot-path into a location
//! (see [`crate::yamlpath::locate`]) for callers that want to write back later
//! without holding a borrow.
//!
//! # Example
//!
//! ```
//! use yamlscribe::document::tree::YamlTree;
//! use yamlscribe::document::node::{YamlNode, YamlValue};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), YamlNode::string("Alice"));
//! let tree = YamlTree::new(YamlNode::new(YamlValue::Object(map)));
//!
//! let child = tree.get_node(&[0]).unwrap();
//! assert_eq!(child.value(), &YamlValue::String("Alice".to_string()));
//! ```

use super::node::{YamlNode, YamlValue};

/// A complete YAML document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlTree {
    root: YamlNode,
}

impl YamlTree {
    /// Creates a new YAML tree with the given root node.
    pub fn new(root: YamlNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &YamlNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut YamlNode {
        &mut self.root
    }

    /// Gets an immutable reference to a node at the specified location.
    ///
    /// Returns `None` if the location is out of bounds at any level or tries
    /// to descend into a scalar.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlscribe::document::tree::YamlTree;
    /// use yamlscribe::document::node::{YamlNode, YamlValue};
    ///
    /// let tree = YamlTree::new(YamlNode::new(YamlValue::Array(vec![
    ///     YamlNode::integer(1),
    ///     YamlNode::integer(2),
    /// ])));
    ///
    /// assert_eq!(tree.get_node(&[1]), Some(&YamlNode::integer(2)));
    /// assert!(tree.get_node(&[9]).is_none());
    /// ```
    pub fn get_node(&self, path: &[usize]) -> Option<&YamlNode> {
        let mut current = &self.root;

        for &index in path {
            match current.value() {
                YamlValue::Object(entries) => {
                    current = entries.get_index(index)?.1;
                }
                YamlValue::Array(elements) => {
                    current = elements.get(index)?;
                }
                _ => return None,
            }
        }

        Some(current)
    }

    /// Gets a mutable reference to a node at the specified location.
    ///
    /// Follows the same rules as `get_node`. Every container passed on the way
    /// down is marked as modified.
    pub fn get_node_mut(&mut self, path: &[usize]) -> Option<&mut YamlNode> {
        let mut current = &mut self.root;

        for &index in path {
            current = match current.value_mut() {
                YamlValue::Object(entries) => {
                    let (_key, value) = entries.get_index_mut(index)?;
                    value
                }
                YamlValue::Array(elements) => elements.get_mut(index)?,
                _ => return None,
            };
        }

        Some(current)
    }

    /// Returns the mapping key at a location, or `None` when the location
    /// names a sequence element or does not exist.
    pub fn key_at(&self, path: &[usize]) -> Option<&str> {
        let (&last, parent_path) = path.split_last()?;
        match self.get_node(parent_path)?.value() {
            YamlValue::Object(entries) => entries.get_index(last).map(|(key, _)| key.as_str()),
            _ => None,
        }
    }
}
