//! Optional JSON configuration for the fixer.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::project::{BuildLayout, DEFAULT_BACKUP_SUFFIX, DEFAULT_EXTENSIONS};

/// File name looked up in the project directory (the parent of the default build root).
pub const DEFAULT_CONFIG_FILE: &str = "fix-build-paths.json";

/// Discoverable configuration describing where the build lives and what gets rewritten.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FixerConfig {
    /// Build root override. Relative paths resolve against the configuration file's directory.
    pub build_dir: Option<PathBuf>,
    /// Suffix appended to each file name for its backup copy.
    pub backup_suffix: String,
    /// Eligible extensions; case-insensitive, leading dot optional.
    pub extensions: Vec<String>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            build_dir: None,
            backup_suffix: DEFAULT_BACKUP_SUFFIX.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            base_dir: None,
        }
    }
}

impl FixerConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// A missing or unparsable file falls back to the defaults, which reproduce the plain
    /// `<exe dir>/../build` behavior.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Build root from the configuration, resolved against the file it was read from.
    pub fn configured_build_root(&self) -> Option<PathBuf> {
        let dir = self.build_dir.as_ref()?;
        Some(match &self.base_dir {
            Some(base) if dir.is_relative() => base.join(dir),
            _ => dir.clone(),
        })
    }

    /// Convert the configuration into the runtime layout rooted at `build_root`.
    ///
    /// Fails when the backup suffix would make backups overwrite or be rewritten as
    /// eligible files.
    pub fn into_layout(self, build_root: PathBuf) -> Result<BuildLayout> {
        let mut layout = BuildLayout::new(build_root);
        layout.backup_suffix = self.backup_suffix;
        layout.extensions = self
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        layout
            .validate()
            .context("invalid backup_suffix in configuration")?;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_cover_the_four_web_extensions() {
        let layout = FixerConfig::default()
            .into_layout(PathBuf::from("build"))
            .unwrap();
        assert_eq!(layout.backup_suffix, ".bak");
        assert_eq!(
            layout.extensions.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["css", "html", "js", "json"]
        );
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(FixerConfig::discover(dir.path()), FixerConfig::default());

        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(FixerConfig::discover(dir.path()), FixerConfig::default());
    }

    #[test]
    fn reads_partial_config_and_normalises_extensions() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"{ "build_dir": "dist", "extensions": [".HTML", "svg", ""] }"#,
        )?;

        let config = FixerConfig::from_path(&path)?;
        assert_eq!(config.backup_suffix, ".bak");
        assert_eq!(config.configured_build_root(), Some(dir.path().join("dist")));

        let layout = config.into_layout(dir.path().join("dist"))?;
        assert!(layout.extensions.contains("html"));
        assert!(layout.extensions.contains("svg"));
        assert_eq!(layout.extensions.len(), 2);
        Ok(())
    }

    #[test]
    fn absolute_build_dir_is_kept() -> Result<()> {
        let dir = tempdir()?;
        let absolute = dir.path().join("elsewhere");
        let path = dir.path().join("custom.json");
        fs::write(&path, serde_json::json!({ "build_dir": absolute }).to_string())?;

        let config = FixerConfig::from_path(&path)?;
        assert_eq!(config.configured_build_root(), Some(absolute));
        Ok(())
    }

    #[test]
    fn empty_backup_suffix_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, r#"{ "backup_suffix": "" }"#)?;

        let err = FixerConfig::from_path(&path)?
            .into_layout(dir.path().join("build"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("must not be empty"));
        Ok(())
    }

    #[test]
    fn backup_suffix_with_eligible_extension_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, r#"{ "backup_suffix": ".html" }"#)?;

        let result = FixerConfig::from_path(&path)?.into_layout(dir.path().join("build"));
        assert!(result.is_err());

        fs::write(&path, r#"{ "backup_suffix": ".html", "extensions": ["js"] }"#)?;
        let layout = FixerConfig::from_path(&path)?.into_layout(dir.path().join("build"))?;
        assert_eq!(layout.backup_suffix, ".html");
        Ok(())
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(FixerConfig::from_path(&dir.path().join("missing.json")).is_err());
    }
}
