use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use relative_build_paths::BuildLayout;
use relative_build_paths::config::FixerConfig;
use relative_build_paths::project::default_build_root;

#[derive(Debug, Clone, ValueEnum, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Trace => Some(tracing::Level::TRACE),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

/// Rewrite root-relative asset references in a build directory into relative ones.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Build directory to fix. Defaults to `../build` next to this executable.
    #[clap(long, short)]
    pub build_dir: Option<PathBuf>,

    /// JSON configuration file. Defaults to `fix-build-paths.json` beside the build directory.
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

impl Cli {
    /// Resolve the layout: `--build-dir`, then the config's `build_dir`, then `<exe dir>/../build`.
    pub fn into_layout(self, executable: &Path) -> Result<BuildLayout> {
        let default_root = default_build_root(executable);
        let config = match &self.config {
            Some(path) => FixerConfig::from_path(path)?,
            None => FixerConfig::discover(default_root.parent().unwrap_or(Path::new("."))),
        };

        let build_root = self
            .build_dir
            .or_else(|| config.configured_build_root())
            .unwrap_or(default_root);
        config.into_layout(build_root)
    }
}
