//! Writing rendered files.
//!
//! Writes are atomic (temp file, then rename) and a `.bak` copy of the
//! previous contents can be kept. Targets ending in `.gz` are compressed.

use crate::config::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Saves rendered YAML text to `path`.
///
/// The text is parsed once before anything touches the disk, so a rendering
/// bug can never replace a good file with a broken one.
///
/// # Examples
///
/// ```no_run
/// use yamlscribe::config::Config;
/// use yamlscribe::file::saver::save_yaml_file;
///
/// save_yaml_file("output.yaml", "name: demo\n", &Config::default()).unwrap();
/// ```
pub fn save_yaml_file<P: AsRef<Path>>(path: P, contents: &str, config: &Config) -> Result<()> {
    let path = path.as_ref();

    serde_yaml::from_str::<serde_yaml::Value>(contents)
        .context("Generated invalid YAML - refusing to write it")?;

    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    let compress = path.to_string_lossy().ends_with(".gz");
    write_file_atomic(path, contents.as_bytes(), compress)?;

    tracing::info!(path = %path.display(), compress, "saved file");
    Ok(())
}

/// Copies `path` to `path.bak`.
fn create_backup(path: &Path) -> Result<()> {
    let original_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    let backup_path = path.with_file_name(format!("{}.bak", original_name));
    fs::copy(path, &backup_path).context("Failed to create backup")?;
    tracing::debug!(backup = %backup_path.display(), "created backup");
    Ok(())
}

/// Writes through a uniquely named temp file in the target's directory, then
/// renames it over `path`. On failure the temp file is removed.
fn write_file_atomic(path: &Path, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).context("Failed to create temp file")?;

    if compress {
        let mut encoder = GzEncoder::new(temp.as_file_mut(), Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        temp.write_all(data).context("Failed to write temp file")?;
    }

    temp.persist(path)
        .map_err(|err| err.error)
        .context("Failed to rename temp file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_writes_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.yaml");

        save_yaml_file(&path, "a: 1\n", &Config::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a: 1\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_leaves_sibling_tmp_file_alone() {
        let dir = TempDir::new().unwrap();
        let sibling = dir.path().join("out.tmp");
        fs::write(&sibling, "user data").unwrap();

        save_yaml_file(dir.path().join("out.yaml"), "a: 1\n", &Config::default()).unwrap();

        assert_eq!(fs::read_to_string(&sibling).unwrap(), "user data");
    }

    #[test]
    fn test_save_to_tmp_named_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.tmp");
        fs::write(&path, "old: true\n").unwrap();

        save_yaml_file(&path, "new: true\n", &Config::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new: true\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_backup_keeps_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.yaml");
        fs::write(&path, "old: true\n").unwrap();

        let config = Config {
            create_backup: true,
            ..Config::default()
        };
        save_yaml_file(&path, "new: true\n", &config).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new: true\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("out.yaml.bak")).unwrap(),
            "old: true\n"
        );
    }

    #[test]
    fn test_no_backup_by_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.yaml");
        fs::write(&path, "old: true\n").unwrap();

        save_yaml_file(&path, "new: true\n", &Config::default()).unwrap();

        assert!(!dir.path().join("out.yaml.bak").exists());
    }

    #[test]
    fn test_invalid_yaml_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.yaml");
        fs::write(&path, "keep: me\n").unwrap();

        assert!(save_yaml_file(&path, "a: [unclosed\n", &Config::default()).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep: me\n");
    }

    #[test]
    fn test_gz_target_is_compressed() {
        use flate2::read::GzDecoder;
        use std::io::Read;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.yaml.gz");
        save_yaml_file(&path, "a: 1\n", &Config::default()).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0x1f, 0x8b]));
        let mut text = String::new();
        GzDecoder::new(&bytes[..]).read_to_string(&mut text).unwrap();
        assert_eq!(text, "a: 1\n");
    }
}
