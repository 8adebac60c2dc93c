//! YAML parsing into `YamlTree` structures.
//!
//! Parsing is delegated to `yaml-rust2`, whose loader keeps mapping order and
//! resolves aliases. The loaded `Yaml` values are converted into our node
//! representation, with every node marked as unmodified.
//!
//! # Example
//!
//! ```
//! use yamlscribe::document::parser::parse_yaml;
//!
//! let tree = parse_yaml("name: Alice\nage: 30\n").unwrap();
//! let name_node = tree.get_node(&[0]).unwrap();
//! assert!(name_node.value().is_scalar());
//! ```

use super::node::{YamlNode, YamlNumber, YamlValue};
use super::tree::YamlTree;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use yaml_rust2::{Yaml, YamlLoader};

/// Parses a YAML document into a tree.
///
/// Only the first document of a multi-document stream is kept. An empty
/// input yields a tree with a `Null` root.
///
/// # Errors
///
/// Returns an error if the input is not valid YAML.
pub fn parse_yaml(source: &str) -> Result<YamlTree> {
    let root = parse_value(source)?;
    Ok(YamlTree::new(root))
}

/// Parses a single YAML value, such as a command-line argument.
///
/// # Example
///
/// ```
/// use yamlscribe::document::parser::parse_value;
/// use yamlscribe::document::node::{YamlValue, YamlNumber};
///
/// let node = parse_value("42").unwrap();
/// assert_eq!(node.value(), &YamlValue::Number(YamlNumber::Integer(42)));
/// ```
pub fn parse_value(source: &str) -> Result<YamlNode> {
    let mut documents = YamlLoader::load_from_str(source).context("Invalid YAML")?;
    if documents.len() > 1 {
        tracing::debug!(
            count = documents.len(),
            "multi-document YAML input, keeping the first document"
        );
    }
    if documents.is_empty() {
        return Ok(YamlNode::loaded(YamlValue::Null));
    }
    convert(documents.swap_remove(0))
}

fn convert(yaml: Yaml) -> Result<YamlNode> {
    let value = match yaml {
        Yaml::Hash(hash) => {
            let mut entries = IndexMap::with_capacity(hash.len());
            for (key, value) in hash {
                let key = key_to_string(&key)?;
                entries.insert(key, convert(value)?);
            }
            YamlValue::Object(entries)
        }
        Yaml::Array(items) => YamlValue::Array(
            items
                .into_iter()
                .map(convert)
                .collect::<Result<Vec<_>>>()?,
        ),
        Yaml::String(s) => YamlValue::String(s),
        Yaml::Integer(i) => YamlValue::Number(YamlNumber::Integer(i)),
        Yaml::Real(text) => match parse_real(&text) {
            Some(f) => YamlValue::Number(YamlNumber::Float(f)),
            None => anyhow::bail!("Invalid floating point value: {}", text),
        },
        Yaml::Boolean(b) => YamlValue::Boolean(b),
        Yaml::Null => YamlValue::Null,
        Yaml::Alias(id) => anyhow::bail!("Unresolved YAML alias (anchor id {})", id),
        Yaml::BadValue => anyhow::bail!("Invalid YAML value"),
    };
    Ok(YamlNode::loaded(value))
}

fn parse_real(text: &str) -> Option<f64> {
    match text {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => Some(f64::NAN),
        _ => text.parse().ok(),
    }
}

/// Mapping keys are addressed by string; scalar keys are stringified the way
/// they are written.
fn key_to_string(key: &Yaml) -> Result<String> {
    match key {
        Yaml::String(s) | Yaml::Real(s) => Ok(s.clone()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Boolean(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        _ => anyhow::bail!("Unsupported mapping key: only scalar keys can be addressed"),
    }
}
