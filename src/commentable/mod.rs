//! Generated object files that carry comments.
//!
//! Object-like files such as YAML are produced from a value tree, so
//! comments cannot be stored in the tree itself. Instead they are attached by
//! dot-path and woven in when the file body is synthesized. The rendered file
//! starts with a marker comment that identifies it as generated.

pub mod yaml;

pub use yaml::CommentableYamlFile;

use crate::yamlpath::YamlPathError;

/// Layout settings for rendered files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStyle {
    /// Columns per level of mapping nesting
    pub indent: usize,
    /// Columns between a key and the dashes of its sequence items
    pub list_item_indent: usize,
    /// Text of the marker comment written on the first line
    pub marker: String,
}

impl CommentStyle {
    /// Widths below 2 leave no room for `- ` and are raised to 2.
    pub fn normalized(mut self) -> Self {
        self.indent = self.indent.max(2);
        self.list_item_indent = self.list_item_indent.max(2);
        self
    }
}

impl Default for CommentStyle {
    fn default() -> Self {
        crate::config::Config::default().comment_style()
    }
}

/// An object file whose keys and list items can be annotated by path.
pub trait CommentableFile {
    /// Generates the body of the file, comments included.
    fn synthesize_contents(&self) -> String;

    /// Sets a comment block at the beginning of the body.
    fn set_header_comment(&mut self, comment: &str);

    /// Sets a comment just before the key or list item at `path`.
    fn set_comment_before_key_at_path(
        &mut self,
        path: &str,
        comment: &str,
    ) -> Result<(), YamlPathError>;

    /// Sets an end-of-line comment after the key or list item at `path`.
    fn set_eol_comment_at_path(&mut self, path: &str, comment: &str)
        -> Result<(), YamlPathError>;

    /// Returns a commented-out version of a single line of text.
    ///
    /// YAML: `hi there` becomes `# hi there`.
    fn make_single_line_comment(&self, comment: &str) -> String;

    fn marker(&self) -> &str;

    /// The complete file: marker comment, a blank line, then the body.
    fn render(&self) -> String {
        let mut out = self.make_single_line_comment(self.marker());
        out.push_str("\n\n");
        out.push_str(&self.synthesize_contents());
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}
