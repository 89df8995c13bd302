//! Grid defaults stored in `gridstate.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::types::GridDefaults;

/// File name looked up in the working directory when no path is given.
pub const SETTINGS_FILE: &str = "gridstate.toml";

/// Load defaults from a TOML file.
///
/// If the file is missing, returns `GridDefaults::default()`.
pub fn load_settings(path: &Path) -> Result<GridDefaults> {
    if !path.exists() {
        return Ok(GridDefaults::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let settings: GridDefaults =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("invalid settings {}", path.display()))?;
    Ok(settings)
}

/// Atomically write defaults to disk (temp file + rename).
pub fn write_settings(path: &Path, settings: &GridDefaults) -> Result<()> {
    settings.validate()?;
    let mut buf = toml::to_string_pretty(settings).context("serialize settings toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("settings path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp settings {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace settings {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let settings = load_settings(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(settings, GridDefaults::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(SETTINGS_FILE);
        let settings = GridDefaults {
            default_page_size: 25,
            default_show_settings: true,
        };
        write_settings(&path, &settings).expect("write");
        assert_eq!(load_settings(&path).expect("load"), settings);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(SETTINGS_FILE);
        fs::write(&path, "default_page_size = 50\n").expect("write");
        let settings = load_settings(&path).expect("load");
        assert_eq!(settings.default_page_size, 50);
        assert!(!settings.default_show_settings);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(SETTINGS_FILE);
        fs::write(&path, "default_page_size = 0\n").expect("write");
        let err = load_settings(&path).expect_err("expected error");
        assert!(format!("{:#}", err).contains("default_page_size"));
    }
}
