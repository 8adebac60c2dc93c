//! Commentable YAML files.
//!
//! The body is emitted block-style with a fixed layout so that the column of
//! every key and list item is predictable from its path:
//!
//! ```yaml
//! repos:
//!   -   repo: https://github.com/pre-commit/pre-commit-hooks
//!       hooks:
//!         -   id: trailing-whitespace
//! ```
//!
//! Mapping children sit `indent` columns right of their key, sequence dashes
//! `list_item_indent` columns right of their key, and a mapping inside a list
//! item starts on the dash line, padded to `indent`. With this layout
//! [`indentation_for`] gives the column of the line a path addresses, which is
//! where comments are written.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::{CommentStyle, CommentableFile};
use crate::document::convert::value_to_serde;
use crate::document::node::{YamlNode, YamlValue};
use crate::document::tree::YamlTree;
use crate::yamlpath::{indentation_for, locate, Parser, YamlPathError};

/// A YAML document plus the comments to weave into it.
///
/// # Example
///
/// ```
/// use yamlscribe::commentable::{CommentableFile, CommentableYamlFile, CommentStyle};
/// use yamlscribe::document::parser::parse_yaml;
///
/// let tree = parse_yaml("metadata:\n  name: cool-package\n").unwrap();
/// let mut file = CommentableYamlFile::new(tree, CommentStyle::default());
/// file.set_eol_comment_at_path("metadata.name", "published name").unwrap();
///
/// assert_eq!(
///     file.synthesize_contents(),
///     "metadata:\n    name: cool-package # published name\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CommentableYamlFile {
    tree: YamlTree,
    style: CommentStyle,
    header: Option<String>,
    /// Keyed by canonical path; a later comment on the same path replaces
    /// the earlier one.
    before: IndexMap<String, String>,
    eol: IndexMap<String, String>,
}

impl CommentableYamlFile {
    pub fn new(tree: YamlTree, style: CommentStyle) -> Self {
        Self {
            tree,
            style: style.normalized(),
            header: None,
            before: IndexMap::new(),
            eol: IndexMap::new(),
        }
    }

    pub fn tree(&self) -> &YamlTree {
        &self.tree
    }

    /// Mutable access to the document.
    ///
    /// Comments stay attached to their paths; a comment whose path no longer
    /// resolves is dropped from the output with a warning.
    pub fn tree_mut(&mut self) -> &mut YamlTree {
        &mut self.tree
    }

    pub fn style(&self) -> &CommentStyle {
        &self.style
    }

    /// Validates that `path` names a single key or list item and returns its
    /// canonical spelling.
    fn attach_point(&self, path: &str) -> Result<String, YamlPathError> {
        locate(path, self.tree.root())?;
        Ok(Parser::parse(path)?.to_string())
    }

    /// Resolves every attached comment to a tree location.
    fn placements(&self) -> Placements<'_> {
        let mut placements = Placements::default();
        let root = self.tree.root();

        for (path, text) in &self.before {
            match locate(path, root) {
                Ok(location) => {
                    let column = indentation_for(path, self.style.indent, self.style.list_item_indent);
                    placements.before.insert(location, (column, text.as_str()));
                }
                Err(err) => tracing::warn!(%path, %err, "dropping comment on unresolvable path"),
            }
        }

        for (path, text) in &self.eol {
            match locate(path, root) {
                Ok(location) => {
                    placements.eol.insert(location, text.as_str());
                }
                Err(err) => tracing::warn!(%path, %err, "dropping comment on unresolvable path"),
            }
        }

        placements
    }
}

impl CommentableFile for CommentableYamlFile {
    fn synthesize_contents(&self) -> String {
        let emitter = Emitter {
            style: &self.style,
            placements: self.placements(),
        };

        let mut lines = Vec::new();
        if let Some(header) = &self.header {
            lines.extend(comment_lines(header).into_iter().map(make_comment));
        }
        emitter.emit_root(self.tree.root(), &mut lines);

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn set_header_comment(&mut self, comment: &str) {
        self.header = Some(comment.to_string());
    }

    fn set_comment_before_key_at_path(
        &mut self,
        path: &str,
        comment: &str,
    ) -> Result<(), YamlPathError> {
        let key = self.attach_point(path)?;
        tracing::debug!(path = %key, "attaching comment before key");
        self.before.insert(key, comment.to_string());
        Ok(())
    }

    fn set_eol_comment_at_path(
        &mut self,
        path: &str,
        comment: &str,
    ) -> Result<(), YamlPathError> {
        let key = self.attach_point(path)?;
        tracing::debug!(path = %key, "attaching end-of-line comment");
        self.eol.insert(key, comment.to_string());
        Ok(())
    }

    fn make_single_line_comment(&self, comment: &str) -> String {
        make_comment(comment)
    }

    fn marker(&self) -> &str {
        &self.style.marker
    }
}

#[derive(Default)]
struct Placements<'a> {
    /// location → (column, text)
    before: HashMap<Vec<usize>, (usize, &'a str)>,
    eol: HashMap<Vec<usize>, &'a str>,
}

struct Emitter<'a> {
    style: &'a CommentStyle,
    placements: Placements<'a>,
}

impl Emitter<'_> {
    fn emit_root(&self, root: &YamlNode, out: &mut Vec<String>) {
        let mut location = Vec::new();
        match root.value() {
            YamlValue::Object(entries) if !entries.is_empty() => {
                self.emit_entries(entries, &mut location, 0, out)
            }
            YamlValue::Array(items) if !items.is_empty() => {
                self.emit_items(items, &mut location, self.style.list_item_indent, out)
            }
            scalar => out.push(format_scalar(scalar)),
        }
    }

    fn emit_entries(
        &self,
        entries: &IndexMap<String, YamlNode>,
        location: &mut Vec<usize>,
        col: usize,
        out: &mut Vec<String>,
    ) {
        for (i, (key, node)) in entries.iter().enumerate() {
            location.push(i);
            self.emit_before(location, out);
            let eol = self.eol_suffix(location);
            let key = format_key(key);

            match node.value() {
                YamlValue::Object(children) if !children.is_empty() => {
                    out.push(format!("{}{}:{}", pad(col), key, eol));
                    self.emit_entries(children, location, col + self.style.indent, out);
                }
                YamlValue::Array(items) if !items.is_empty() => {
                    out.push(format!("{}{}:{}", pad(col), key, eol));
                    self.emit_items(items, location, col + self.style.list_item_indent, out);
                }
                scalar => out.push(format!("{}{}: {}{}", pad(col), key, format_scalar(scalar), eol)),
            }

            location.pop();
        }
    }

    fn emit_items(
        &self,
        items: &[YamlNode],
        location: &mut Vec<usize>,
        dash_col: usize,
        out: &mut Vec<String>,
    ) {
        for (i, item) in items.iter().enumerate() {
            location.push(i);
            self.emit_before(location, out);
            let eol = self.eol_suffix(location);

            match item.value() {
                YamlValue::Object(entries) if !entries.is_empty() => {
                    let col = dash_col + self.style.indent;
                    let mut nested = Vec::new();
                    self.emit_entries(entries, location, col, &mut nested);
                    self.attach_to_dash(location, nested, dash_col, col, &eol, out);
                }
                YamlValue::Array(children) if !children.is_empty() => {
                    let col = dash_col + self.style.list_item_indent;
                    let mut nested = Vec::new();
                    self.emit_items(children, location, col, &mut nested);
                    self.attach_to_dash(location, nested, dash_col, col, &eol, out);
                }
                scalar => out.push(format!("{}- {}{}", pad(dash_col), format_scalar(scalar), eol)),
            }

            location.pop();
        }
    }

    /// Writes a container list item. Its first line joins the dash unless the
    /// item has an end-of-line comment or its first child has a comment above
    /// it; then the dash gets a line of its own.
    fn attach_to_dash(
        &self,
        location: &[usize],
        nested: Vec<String>,
        dash_col: usize,
        col: usize,
        eol: &str,
        out: &mut Vec<String>,
    ) {
        let mut first_child = location.to_vec();
        first_child.push(0);
        let inline = eol.is_empty() && !self.placements.before.contains_key(&first_child);

        let mut lines = nested.into_iter();
        match lines.next() {
            Some(first) if inline => {
                let body = first.get(col..).unwrap_or_else(|| first.trim_start());
                out.push(format!("{}-{}{}", pad(dash_col), pad(col - dash_col - 1), body));
            }
            Some(first) => {
                out.push(format!("{}-{}", pad(dash_col), eol));
                out.push(first);
            }
            None => out.push(format!("{}-{}", pad(dash_col), eol)),
        }
        out.extend(lines);
    }

    fn emit_before(&self, location: &[usize], out: &mut Vec<String>) {
        if let Some((column, text)) = self.placements.before.get(location) {
            for line in comment_lines(text) {
                out.push(format!("{}{}", pad(*column), make_comment(line)));
            }
        }
    }

    fn eol_suffix(&self, location: &[usize]) -> String {
        match self.placements.eol.get(location) {
            Some(text) => format!(" {}", make_comment(&comment_lines(text).join(" "))),
            None => String::new(),
        }
    }
}

fn make_comment(text: &str) -> String {
    if text.is_empty() {
        "#".to_string()
    } else {
        format!("# {}", text)
    }
}

/// Splits comment text into lines; empty text still yields one (empty) line.
fn comment_lines(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        vec![""]
    } else {
        lines
    }
}

fn pad(width: usize) -> String {
    " ".repeat(width)
}

fn format_key(key: &str) -> String {
    format_scalar(&YamlValue::String(key.to_string()))
}

/// Formats a scalar (or empty container) as a single line of YAML.
fn format_scalar(value: &YamlValue) -> String {
    match value {
        YamlValue::Object(_) => "{}".to_string(),
        YamlValue::Array(_) => "[]".to_string(),
        YamlValue::String(s) if s.contains('\n') || s.contains('\r') => quote_double(s),
        other => match serde_yaml::to_string(&value_to_serde(other)) {
            Ok(text) if !text.trim_end().contains('\n') => text.trim_end().to_string(),
            // long plain scalars may be folded by the emitter
            _ => match other {
                YamlValue::String(s) => quote_double(s),
                _ => String::from("null"),
            },
        },
    }
}

fn quote_double(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for ch in s.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => result.push_str(&format!("\\u{:04x}", c as u32)),
            c => result.push(c),
        }
    }
    result.push('"');
    result
}
