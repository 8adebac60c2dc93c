//! YAML node representation with modification tracking.
//!
//! Every value in a yamlscribe document is wrapped in a `YamlNode` so that the
//! path addressor can hand out borrows of live nodes and callers can tell which
//! parts of a document were touched after loading.
//!
//! # Example
//!
//! ```
//! use yamlscribe::document::node::{YamlNode, YamlValue, YamlNumber};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), YamlNode::string("cool-package"));
//! map.insert("version".to_string(), YamlNode::new(YamlValue::Number(YamlNumber::Integer(1))));
//! let object = YamlNode::new(YamlValue::Object(map));
//!
//! assert!(object.value().is_object());
//! ```

use indexmap::IndexMap;

/// Represents YAML numbers (integer or float)
#[derive(Debug, Clone, PartialEq)]
pub enum YamlNumber {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for YamlNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YamlNumber::Integer(i) => write!(f, "{}", i),
            YamlNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl YamlNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            YamlNumber::Integer(i) => *i as f64,
            YamlNumber::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, YamlNumber::Integer(_))
    }
}

/// A YAML value without metadata.
///
/// Mappings keep insertion order so a re-serialized document lists keys the way
/// they were written. Containers hold `YamlNode`s, never bare values.
#[derive(Debug, Clone, PartialEq)]
pub enum YamlValue {
    /// A mapping of unique keys to nodes
    Object(IndexMap<String, YamlNode>),
    /// An ordered sequence of nodes
    Array(Vec<YamlNode>),
    String(String),
    Number(YamlNumber),
    Boolean(bool),
    Null,
}

impl YamlValue {
    /// Returns true if this value is a mapping.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlscribe::document::node::{YamlValue, YamlNumber};
    /// use indexmap::IndexMap;
    ///
    /// assert!(YamlValue::Object(IndexMap::new()).is_object());
    /// assert!(!YamlValue::Number(YamlNumber::Integer(42)).is_object());
    /// ```
    pub fn is_object(&self) -> bool {
        matches!(self, YamlValue::Object(_))
    }

    /// Returns true if this value is a sequence.
    pub fn is_array(&self) -> bool {
        matches!(self, YamlValue::Array(_))
    }

    /// Returns true if this value is a mapping or a sequence.
    pub fn is_container(&self) -> bool {
        matches!(self, YamlValue::Object(_) | YamlValue::Array(_))
    }

    pub fn is_scalar(&self) -> bool {
        !self.is_container()
    }

    /// Short human-readable name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            YamlValue::Object(_) => "mapping",
            YamlValue::Array(_) => "sequence",
            YamlValue::String(_) => "string",
            YamlValue::Number(_) => "number",
            YamlValue::Boolean(_) => "boolean",
            YamlValue::Null => "null",
        }
    }
}

/// A YAML value wrapped with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    pub(crate) value: YamlValue,
    pub(crate) metadata: NodeMetadata,
}

/// Metadata associated with a YAML node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMetadata {
    /// Whether this node has been modified since it was loaded
    pub modified: bool,
}

impl YamlNode {
    /// Creates a new `YamlNode` with the given value.
    ///
    /// The node is marked as modified since it did not come from a source file.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlscribe::document::node::{YamlNode, YamlValue};
    ///
    /// let node = YamlNode::new(YamlValue::Null);
    /// assert!(node.is_modified());
    /// ```
    pub fn new(value: YamlValue) -> Self {
        Self {
            value,
            metadata: NodeMetadata { modified: true },
        }
    }

    /// Creates a node that is considered part of the loaded source.
    pub(crate) fn loaded(value: YamlValue) -> Self {
        Self {
            value,
            metadata: NodeMetadata { modified: false },
        }
    }

    /// Shorthand for a string scalar node.
    pub fn string(s: impl Into<String>) -> Self {
        Self::new(YamlValue::String(s.into()))
    }

    /// Shorthand for an integer scalar node.
    pub fn integer(i: i64) -> Self {
        Self::new(YamlValue::Number(YamlNumber::Integer(i)))
    }

    /// Returns an immutable reference to the node's value.
    pub fn value(&self) -> &YamlValue {
        &self.value
    }

    /// Returns a mutable reference to the node's value.
    ///
    /// Calling this method marks the node as modified, even if the value is
    /// not actually changed.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlscribe::document::node::{YamlNode, YamlValue};
    ///
    /// let mut node = YamlNode::string("old");
    /// *node.value_mut() = YamlValue::String("new".to_string());
    /// assert!(node.is_modified());
    /// ```
    pub fn value_mut(&mut self) -> &mut YamlValue {
        self.metadata.modified = true;
        &mut self.value
    }

    /// Consumes the node and returns its value.
    pub fn into_value(self) -> YamlValue {
        self.value
    }

    pub fn is_modified(&self) -> bool {
        self.metadata.modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_number_display() {
        assert_eq!(format!("{}", YamlNumber::Integer(42)), "42");
        assert_eq!(format!("{}", YamlNumber::Float(42.5)), "42.5");
    }

    #[test]
    fn test_yaml_number_type_checks() {
        assert!(YamlNumber::Integer(42).is_integer());
        assert!(!YamlNumber::Float(42.0).is_integer());
        assert_eq!(YamlNumber::Integer(3).as_f64(), 3.0);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(YamlValue::Object(IndexMap::new()).type_name(), "mapping");
        assert_eq!(YamlValue::Array(vec![]).type_name(), "sequence");
        assert_eq!(YamlValue::String("x".to_string()).type_name(), "string");
        assert_eq!(YamlValue::Boolean(true).type_name(), "boolean");
        assert_eq!(YamlValue::Null.type_name(), "null");
    }

    #[test]
    fn test_loaded_nodes_start_unmodified() {
        let mut node = YamlNode::loaded(YamlValue::Boolean(false));
        assert!(!node.is_modified());

        let _ = node.value_mut();
        assert!(node.is_modified());
    }

    #[test]
    fn test_scalar_and_container() {
        assert!(YamlValue::Null.is_scalar());
        assert!(YamlValue::Array(vec![]).is_container());
        assert!(!YamlValue::Array(vec![]).is_scalar());
    }
}
