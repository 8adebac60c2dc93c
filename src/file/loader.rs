//! YAML file loading.
//!
//! Files ending in `.gz`, and stdin input starting with the gzip magic bytes,
//! are decompressed before parsing.

use crate::document::parser::parse_yaml;
use crate::document::tree::YamlTree;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Loads and parses a YAML file from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use yamlscribe::file::loader::load_yaml_file;
///
/// let tree = load_yaml_file(".pre-commit-config.yaml").unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read, is corrupted gzip, or is not
/// valid YAML.
pub fn load_yaml_file<P: AsRef<Path>>(path: P) -> Result<YamlTree> {
    let path = path.as_ref();

    let content = if is_gzipped(path) {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?
    };

    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded file");
    parse_yaml(&content).with_context(|| format!("Failed to parse YAML in {}", path.display()))
}

/// Loads and parses YAML from stdin.
///
/// ```no_run
/// use yamlscribe::file::loader::load_yaml_from_stdin;
///
/// // Usage: cat config.yaml | yamlscribe get - some.path
/// let tree = load_yaml_from_stdin().unwrap();
/// ```
pub fn load_yaml_from_stdin() -> Result<YamlTree> {
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    parse_yaml(&decode_bytes(buffer)?).context("Failed to parse YAML from stdin")
}

/// Loads `source`, where `-` means stdin.
pub fn load_yaml_source(source: &str) -> Result<YamlTree> {
    if source == "-" {
        load_yaml_from_stdin()
    } else {
        load_yaml_file(source)
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension().map(|ext| ext == "gz").unwrap_or(false)
}

/// Turns raw input into text, decompressing when it carries the gzip magic
/// bytes (0x1f 0x8b).
fn decode_bytes(buffer: Vec<u8>) -> Result<String> {
    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")
    }
}

fn read_gzipped_file(path: &Path) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open gzipped file {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::YamlValue;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_load_plain_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "name: demo\nversion: 2\n").unwrap();

        let tree = load_yaml_file(&path).unwrap();
        match tree.root().value() {
            YamlValue::Object(entries) => assert_eq!(entries.len(), 2),
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_load_gzipped_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml.gz");
        fs::write(&path, gzip(b"items: [1, 2, 3]\n")).unwrap();

        let tree = load_yaml_file(&path).unwrap();
        assert!(tree.root().value().is_object());
    }

    #[test]
    fn test_corrupted_gzip_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml.gz");
        fs::write(&path, b"not gzip data").unwrap();

        assert!(load_yaml_file(&path).is_err());
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = load_yaml_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read file"));
    }

    #[test]
    fn test_decode_bytes_detects_gzip_magic() {
        assert_eq!(decode_bytes(gzip(b"a: 1\n")).unwrap(), "a: 1\n");
        assert_eq!(decode_bytes(b"a: 1\n".to_vec()).unwrap(), "a: 1\n");
        assert!(decode_bytes(vec![0xff, 0xfe, 0x00]).is_err());
    }
}
