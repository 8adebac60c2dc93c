//! YAML document model.
//!
//! - [`node`]: the tagged value tree (`YamlNode`/`YamlValue`)
//! - [`tree`]: location-based navigation over a whole document
//! - [`parser`]: YAML text to tree
//! - [`convert`]: interop with `serde_yaml::Value`

pub mod convert;
pub mod node;
pub mod parser;
pub mod tree;
