//! Directory scanning for build output files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::trace;

/// Recursively collect every regular file below `root`.
///
/// Directories are descended into but never returned. Entries are sorted within each
/// directory so repeated runs report files in the same order.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
  let mut files = Vec::new();
  collect_files_recursively(root, &mut files)?;
  Ok(files)
}

fn collect_files_recursively(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
  trace!(dir = %dir.display(), "scanning directory");

  let mut entries = fs::read_dir(dir)
    .with_context(|| format!("failed to read directory {}", dir.display()))?
    .map(|entry| entry.map(|entry| entry.path()))
    .collect::<std::io::Result<Vec<_>>>()
    .with_context(|| format!("failed to list {}", dir.display()))?;
  entries.sort();

  for path in entries {
    // Follows symlinks, so a linked directory is walked like a real one.
    let metadata =
      fs::metadata(&path).with_context(|| format!("failed to stat {}", path.display()))?;
    if metadata.is_dir() {
      collect_files_recursively(&path, files)?;
    } else {
      files.push(path);
    }
  }

  Ok(())
}
