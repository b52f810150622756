//! Build directory fixer: walks the output, backs files up once and rewrites them in place.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::backup::write_backup_once;
use crate::models::{AssetKind, FileEntry, FixReport};
use crate::project::BuildLayout;
use crate::rewrite::rewrite_text;
use crate::scanning::collect_files;

/// Line printed after every file has been processed.
pub const DONE_MESSAGE: &str = "Done fixing build paths";

/// Failures the binary reports with a dedicated message.
#[derive(Debug, Error)]
pub enum FixError {
  /// The build root does not exist or is not a directory.
  #[error("build directory not found: {}", .0.display())]
  MissingBuildRoot(PathBuf),
}

/// High-level helper that rewrites every eligible file under a build root.
pub struct BuildPathFixer {
  layout: BuildLayout,
}

impl BuildPathFixer {
  /// Create a fixer for the provided layout.
  pub fn new(layout: BuildLayout) -> Self {
    Self { layout }
  }

  /// Fix every eligible file, writing one `Fixed <path>` line per file and a final
  /// completion line to `out`.
  ///
  /// Stops at the first I/O error. Files handled before the failure stay rewritten.
  pub fn run<W: Write>(&self, out: &mut W) -> Result<FixReport> {
    let root = &self.layout.build_root;
    if !root.is_dir() {
      return Err(FixError::MissingBuildRoot(root.clone()).into());
    }
    self.layout.validate()?;

    let mut report = FixReport::default();
    for path in collect_files(root)? {
      let Some(kind) = self.layout.classify(&path) else {
        trace!(file = %path.display(), "skipping ineligible file");
        report.skipped += 1;
        continue;
      };

      let entry = self.fix_file(path, kind, &mut report)?;
      if !entry.had_backup {
        report.backups_created += 1;
      }
      let relative = entry.relative_display(root);
      writeln!(out, "Fixed {relative}").context("failed to write progress line")?;
      report.fixed.push(relative);
    }

    writeln!(out, "{DONE_MESSAGE}").context("failed to write completion line")?;
    info!(
      fixed = report.fixed.len(),
      changed = report.changed,
      skipped = report.skipped,
      backups = report.backups_created,
      "finished fixing build paths"
    );
    Ok(report)
  }

  fn fix_file(&self, path: PathBuf, kind: AssetKind, report: &mut FixReport) -> Result<FileEntry> {
    let mut entry = load_entry(path, kind)?;

    let created = write_backup_once(&entry.path, &entry.content, &self.layout.backup_suffix)?;
    entry.had_backup = !created;

    let rewritten = rewrite_text(&entry.content, entry.kind);
    if rewritten != entry.content {
      debug!(
        file = %entry.path.display(),
        had_backup = entry.had_backup,
        "rewrote root-relative references"
      );
      report.changed += 1;
    }
    entry.content = rewritten;

    fs::write(&entry.path, &entry.content)
      .with_context(|| format!("failed to write {}", entry.path.display()))?;
    Ok(entry)
  }
}

fn load_entry(path: PathBuf, kind: AssetKind) -> Result<FileEntry> {
  let content =
    fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
  Ok(FileEntry {
    path,
    kind,
    content,
    had_backup: false,
  })
}

/// Convenience wrapper running a default-configured fixer over `build_root`.
pub fn fix_build_paths<W: Write>(build_root: &Path, out: &mut W) -> Result<FixReport> {
  BuildPathFixer::new(BuildLayout::new(build_root)).run(out)
}
