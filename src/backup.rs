//! Create-once backups of build files before they are rewritten.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Sibling path formed by appending `suffix` to the full file name of `path`.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
  let mut name = OsString::from(path.as_os_str());
  name.push(suffix);
  PathBuf::from(name)
}

/// Write `original` to the backup path of `path` unless something already exists there.
///
/// Returns `true` when a backup was written. An existing backup is left untouched so it
/// keeps the content from the first run.
pub fn write_backup_once(path: &Path, original: &str, suffix: &str) -> Result<bool> {
  let target = backup_path(path, suffix);
  if target.exists() {
    debug!(backup = %target.display(), "keeping existing backup");
    return Ok(false);
  }

  fs::write(&target, original)
    .with_context(|| format!("failed to write backup {}", target.display()))?;
  debug!(backup = %target.display(), "wrote backup");
  Ok(true)
}
