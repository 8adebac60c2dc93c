//! Conversion between `YamlNode` and `serde_yaml::Value`.
//!
//! serde values are the interchange format for anything that needs a standard
//! serializer: printing resolved values as YAML or JSON and emitting scalars
//! with correct quoting.

use super::node::{YamlNode, YamlNumber, YamlValue};
use indexmap::IndexMap;
use serde_yaml::{Mapping, Number, Value};

/// Converts a node (recursively) into a `serde_yaml::Value`.
///
/// # Example
///
/// ```
/// use yamlscribe::document::convert::to_serde_value;
/// use yamlscribe::document::node::YamlNode;
///
/// let value = to_serde_value(&YamlNode::string("hello"));
/// assert_eq!(value, serde_yaml::Value::String("hello".to_string()));
/// ```
pub fn to_serde_value(node: &YamlNode) -> Value {
    value_to_serde(node.value())
}

/// Converts a run of sequence items, such as a resolved slice.
pub fn items_to_serde_value(items: &[YamlNode]) -> Value {
    Value::Sequence(items.iter().map(to_serde_value).collect())
}

pub fn value_to_serde(value: &YamlValue) -> Value {
    match value {
        YamlValue::Object(entries) => {
            let map: Mapping = entries
                .iter()
                .map(|(k, v)| (Value::String(k.clone()), to_serde_value(v)))
                .collect();
            Value::Mapping(map)
        }
        YamlValue::Array(elements) => Value::Sequence(elements.iter().map(to_serde_value).collect()),
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Number(YamlNumber::Integer(i)) => Value::Number(Number::from(*i)),
        YamlValue::Number(YamlNumber::Float(f)) => Value::Number(Number::from(*f)),
        YamlValue::Boolean(b) => Value::Bool(*b),
        YamlValue::Null => Value::Null,
    }
}

/// Converts a `serde_yaml::Value` into a new (modified) node.
///
/// Non-string mapping keys are stringified; tagged values lose their tag.
pub fn from_serde_value(value: &Value) -> YamlNode {
    let converted = match value {
        Value::Null => YamlValue::Null,
        Value::Bool(b) => YamlValue::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => YamlValue::Number(YamlNumber::Integer(i)),
            None => YamlValue::Number(YamlNumber::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        Value::String(s) => YamlValue::String(s.clone()),
        Value::Sequence(items) => YamlValue::Array(items.iter().map(from_serde_value).collect()),
        Value::Mapping(map) => {
            let mut entries = IndexMap::with_capacity(map.len());
            for (k, v) in map {
                entries.insert(scalar_key(k), from_serde_value(v));
            }
            YamlValue::Object(entries)
        }
        Value::Tagged(tagged) => return from_serde_value(&tagged.value),
    };
    YamlNode::new(converted)
}

fn scalar_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_keeps_order_through_serde() {
        let mut entries = IndexMap::new();
        entries.insert("b".to_string(), YamlNode::integer(1));
        entries.insert("a".to_string(), YamlNode::integer(2));
        let node = YamlNode::new(YamlValue::Object(entries));

        let yaml = serde_yaml::to_string(&to_serde_value(&node)).unwrap();
        assert_eq!(yaml, "b: 1\na: 2\n");
    }

    #[test]
    fn test_from_serde_value_roundtrip() {
        let value: Value = serde_yaml::from_str("x: [1, 2.5, true, null, s]").unwrap();
        let node = from_serde_value(&value);
        assert_eq!(to_serde_value(&node), value);
    }

    #[test]
    fn test_numeric_keys_are_stringified() {
        let value: Value = serde_yaml::from_str("1: one").unwrap();
        match from_serde_value(&value).value() {
            YamlValue::Object(entries) => assert!(entries.contains_key("1")),
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_items_to_serde_value() {
        let items = vec![YamlNode::string("b"), YamlNode::string("c")];
        let value = items_to_serde_value(&items);
        assert_eq!(serde_yaml::to_string(&value).unwrap(), "- b\n- c\n");
    }
}
