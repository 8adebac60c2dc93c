//! Dot-path addressing for YAML documents, and comment placement for generated
//! YAML files.
//!
//! - [`yamlpath`] parses paths such as `repos.[0].hooks` and resolves them
//!   against a document, its parent containers, or an indentation column.
//! - [`document`] holds the ordered value tree paths are resolved against.
//! - [`commentable`] renders a tree with comments attached by path.
//! - [`file`], [`config`] and [`logging`] support the `yamlscribe` binary.

pub mod commentable;
pub mod config;
pub mod document;
pub mod file;
pub mod logging;
pub mod yamlpath;
