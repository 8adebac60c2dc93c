//! Integration tests for rendering generated YAML files with comments.

use yamlscribe::commentable::{CommentStyle, CommentableFile, CommentableYamlFile};
use yamlscribe::config::Config;
use yamlscribe::document::parser::parse_yaml;
use yamlscribe::yamlpath::{indentation_for, YamlPathError};

const PRE_COMMIT: &str = r#"
repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v4.5.0
    hooks:
      - id: trailing-whitespace
      - id: end-of-file-fixer
  - repo: https://github.com/psf/black
    rev: 24.1.0
    hooks:
      - id: black
"#;

fn pre_commit_file() -> CommentableYamlFile {
    CommentableYamlFile::new(parse_yaml(PRE_COMMIT).unwrap(), CommentStyle::default())
}

#[test]
fn test_pre_commit_layout() {
    let expected = "\
repos:
  -   repo: https://github.com/pre-commit/pre-commit-hooks
      rev: v4.5.0
      hooks:
        -   id: trailing-whitespace
        -   id: end-of-file-fixer
  -   repo: https://github.com/psf/black
      rev: 24.1.0
      hooks:
        -   id: black
";
    assert_eq!(pre_commit_file().synthesize_contents(), expected);
}

#[test]
fn test_comments_land_on_their_lines() {
    let mut file = pre_commit_file();
    file.set_comment_before_key_at_path("repos.[1]", "formatting")
        .unwrap();
    file.set_comment_before_key_at_path("repos.[0].rev", "keep in sync with CI")
        .unwrap();
    file.set_eol_comment_at_path("repos.[0].hooks.[1].id", "fixes EOF")
        .unwrap();

    let contents = file.synthesize_contents();
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(lines[2], "      # keep in sync with CI");
    assert_eq!(lines[3], "      rev: v4.5.0");
    assert_eq!(lines[6], "        -   id: end-of-file-fixer # fixes EOF");
    assert_eq!(lines[7], "  # formatting");
    assert_eq!(lines[8], "  -   repo: https://github.com/psf/black");
}

#[test]
fn test_before_comment_column_matches_metric() {
    let mut file = pre_commit_file();
    let path = "repos.[0].hooks";
    file.set_comment_before_key_at_path(path, "hooks").unwrap();

    let contents = file.synthesize_contents();
    let comment = contents
        .lines()
        .find(|line| line.trim_start() == "# hooks")
        .unwrap();
    let column = comment.len() - comment.trim_start().len();
    assert_eq!(column, indentation_for(path, 4, 2));
}

#[test]
fn test_multiline_before_comment() {
    let mut file = CommentableYamlFile::new(
        parse_yaml("a: 1\nb: 2\n").unwrap(),
        CommentStyle::default(),
    );
    file.set_comment_before_key_at_path("b", "first\nsecond")
        .unwrap();
    assert_eq!(file.synthesize_contents(), "a: 1\n# first\n# second\nb: 2\n");
}

#[test]
fn test_errors_name_the_path() {
    let mut file = pre_commit_file();
    let err = file
        .set_comment_before_key_at_path("repos.[5]", "nope")
        .unwrap_err();
    assert_eq!(err.path(), Some("repos.[5]"));
    assert!(matches!(err, YamlPathError::IndexOutOfRange { len: 2, .. }));
}

#[test]
fn test_render_with_config_style() {
    let config = Config {
        indent_size: 2,
        marker: "generated".to_string(),
        ..Config::default()
    };
    let file = CommentableYamlFile::new(
        parse_yaml("a:\n  b: 1\n").unwrap(),
        config.comment_style(),
    );
    assert_eq!(file.render(), "# generated\n\na:\n  b: 1\n");
}

#[test]
fn test_eol_comment_on_mapping_item_gets_own_dash_line() {
    let mut file = pre_commit_file();
    file.set_eol_comment_at_path("repos.[1]", "formatter").unwrap();

    let contents = file.synthesize_contents();
    assert!(contents.contains("  - # formatter\n      repo: https://github.com/psf/black\n"));
}

#[test]
fn test_root_sequence_layout() {
    let file = CommentableYamlFile::new(
        parse_yaml("- a\n- b: 1\n").unwrap(),
        CommentStyle::default(),
    );
    assert_eq!(file.synthesize_contents(), "  - a\n  -   b: 1\n");
}

#[test]
fn test_root_sequence_item_keys_sit_one_indent_right_of_metric() {
    let mut file = CommentableYamlFile::new(
        parse_yaml("- a: 1\n  b: 2\n").unwrap(),
        CommentStyle::default(),
    );
    file.set_comment_before_key_at_path("[0].b", "note").unwrap();

    assert_eq!(indentation_for("[0].b", 4, 2), 2);
    assert_eq!(
        file.synthesize_contents(),
        "  -   a: 1\n  # note\n      b: 2\n"
    );
}
