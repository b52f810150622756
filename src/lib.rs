#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod backup;
pub mod config;
pub mod fixer;
pub mod models;
pub mod project;
pub mod rewrite;
pub mod scanning;

pub use config::FixerConfig;
pub use fixer::{BuildPathFixer, FixError};
pub use models::{AssetKind, FixReport};
pub use project::BuildLayout;
pub use rewrite::rewrite_text;
