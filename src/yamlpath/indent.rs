//! Indentation metric for values addressed by a dot-path.
//!
//! Writers of indentation-sensitive text use this to place a comment at the
//! same column as the key or list item it annotates.

use std::collections::HashSet;

use super::parser::is_index_segment;

/// Computes how many columns a value addressed by `path` is offset.
///
/// Each index segment costs `list_item_indent_width`. Each key segment costs
/// `key_indent_width`, except the root level. Key segments are counted as a
/// set (see [`distinct_key_segment_count`]); index segments are counted by
/// position. A path made only of index segments gets no root discount, so
/// the result never goes negative.
///
/// The computation is syntactic and never fails, even for segments that would
/// not parse. Oversized widths saturate at `usize::MAX`.
///
/// The result is the column of the addressed line in files rendered by
/// [`crate::commentable::CommentableYamlFile`] for paths under a top-level
/// key. Under a root-level sequence, keys inside items sit one extra
/// `key_indent_width` to the right (`[0].b` gives 2 while `b` is written at
/// column 6 with the default widths).
///
/// # Example
///
/// ```
/// use yamlscribe::yamlpath::indentation_for;
///
/// assert_eq!(indentation_for("options.extras.etc", 4, 2), 8);
/// assert_eq!(indentation_for("a.[0].b", 4, 2), 6);
/// ```
pub fn indentation_for(path: &str, key_indent_width: usize, list_item_indent_width: usize) -> usize {
    let segments: Vec<&str> = path.split('.').collect();

    let index_segments = segments.iter().filter(|s| is_index_segment(s)).count();
    let key_segments = distinct_key_segment_count(&segments);

    index_segments
        .saturating_mul(list_item_indent_width)
        .saturating_add(key_segments.saturating_sub(1).saturating_mul(key_indent_width))
}

/// Number of key segments, deduplicated by value.
///
/// A path that repeats a key name at different depths (`a.b.a`) therefore
/// counts that name once. Generated files are laid out with this metric, so
/// switching to positional counting changes their comment columns.
pub fn distinct_key_segment_count(segments: &[&str]) -> usize {
    segments
        .iter()
        .filter(|s| !is_index_segment(s))
        .collect::<HashSet<_>>()
        .len()
}
