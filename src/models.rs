//! Data structures produced while fixing a build directory.

use std::path::{Path, PathBuf};

/// Category of an eligible build file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
  /// `.html` documents, and any extra extension enabled through configuration.
  Markup,
  /// `.js` bundles.
  Script,
  /// `.css` stylesheets.
  Stylesheet,
  /// `.json` manifests and data files.
  Data,
}

impl AssetKind {
  /// Map a lowercase extension (without the leading dot) to a known kind.
  pub fn from_extension(extension: &str) -> Option<Self> {
    match extension {
      "html" => Some(Self::Markup),
      "js" => Some(Self::Script),
      "css" => Some(Self::Stylesheet),
      "json" => Some(Self::Data),
      _ => None,
    }
  }

  /// Whether quoted string literals starting with `/` are rewritten for this kind.
  pub fn rewrites_string_literals(self) -> bool {
    matches!(self, Self::Script | Self::Data)
  }
}

/// A single eligible file moving through the fixer.
#[derive(Debug, Clone)]
pub struct FileEntry {
  /// Absolute (or root-joined) path of the file.
  pub path: PathBuf,
  /// Kind derived from the extension.
  pub kind: AssetKind,
  /// Text content, original after loading and rewritten afterwards.
  pub content: String,
  /// Whether a backup already existed when the entry was processed.
  pub had_backup: bool,
}

impl FileEntry {
  /// Path of the entry relative to `root`, always using forward slashes.
  pub fn relative_display(&self, root: &Path) -> String {
    let relative = self.path.strip_prefix(root).unwrap_or(&self.path);
    relative.to_string_lossy().replace('\\', "/")
  }
}

/// Summary of a completed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FixReport {
  /// Relative paths of every eligible file that was rewritten in place.
  pub fixed: Vec<String>,
  /// Files skipped because of their extension.
  pub skipped: usize,
  /// Backups written during this run.
  pub backups_created: usize,
  /// Files whose content differed after rewriting.
  pub changed: usize,
}
