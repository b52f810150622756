//! Resolved layout of the build directory being fixed.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};

use crate::backup::backup_path;
use crate::models::AssetKind;

/// Extensions inspected when no configuration narrows or widens the set.
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["html", "js", "css", "json"];

/// Suffix appended to a file name to form its backup path.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

/// Name of the build output directory, a sibling of the directory holding the executable.
pub const DEFAULT_BUILD_DIR_NAME: &str = "build";

/// Runtime description of where the build lives and which files are eligible.
#[derive(Debug, Clone)]
pub struct BuildLayout {
  /// Root directory that is walked.
  pub build_root: PathBuf,
  /// Suffix appended to each eligible file name for its backup copy.
  pub backup_suffix: String,
  /// Lowercase eligible extensions without the leading dot.
  pub extensions: BTreeSet<String>,
}

impl BuildLayout {
  /// Layout with default suffix and extensions rooted at `build_root`.
  pub fn new(build_root: impl Into<PathBuf>) -> Self {
    Self {
      build_root: build_root.into(),
      backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
      extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
    }
  }

  /// Classify `path` by extension, returning `None` when it should be skipped.
  ///
  /// Extensions enabled through configuration that are not one of the built-in kinds are
  /// treated as markup, so only the attribute and `url()` rules touch them.
  pub fn classify(&self, path: &Path) -> Option<AssetKind> {
    let extension = normalized_extension(path)?;
    if !self.extensions.contains(&extension) {
      return None;
    }
    Some(AssetKind::from_extension(&extension).unwrap_or(AssetKind::Markup))
  }

  /// Check that backups can never collide with, or be mistaken for, eligible files.
  ///
  /// An empty suffix would make the backup path the file itself, and a suffix ending in an
  /// eligible extension would have later runs rewrite the backups.
  pub fn validate(&self) -> Result<()> {
    let suffix = &self.backup_suffix;
    if suffix.is_empty() {
      return Err(anyhow!("backup suffix must not be empty"));
    }
    if suffix.contains(['/', '\\']) {
      return Err(anyhow!("backup suffix {suffix:?} must not contain a path separator"));
    }
    if let Some(kind) = self.classify(&backup_path(Path::new("file"), suffix)) {
      return Err(anyhow!(
        "backup suffix {suffix:?} ends in an eligible extension ({kind:?}); backups would be rewritten"
      ));
    }
    Ok(())
  }
}

/// Lowercase extension of `path` without the leading dot.
pub fn normalized_extension(path: &Path) -> Option<String> {
  path
    .extension()
    .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// Build root used when nothing else is configured: `<exe dir>/../build`.
pub fn default_build_root(executable: &Path) -> PathBuf {
  let exe_dir = executable.parent().unwrap_or(Path::new(""));
  let base = exe_dir.parent().unwrap_or(exe_dir);
  base.join(DEFAULT_BUILD_DIR_NAME)
}
