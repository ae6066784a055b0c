//! # tsgen-cli
//!
//! CLI library for generating TypeScript interfaces and classes from PHP
//! classes.
//!
//! This crate provides everything around the `tsgen` core: discovering PHP
//! sources, parsing class declarations, reading property metadata from
//! docblocks, native types and Doctrine mapping, rendering declarations and
//! writing them to disk.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`scanner`] - Source file discovery and filtering
//! - [`parser`] - PHP source parsing and class extraction
//! - [`reflection`] - Property listing and candidate type extraction
//! - [`renderer`] - TypeScript interface and class templates
//! - [`generator`] - Drives a full generation run
//! - [`writer`] - File output and dry-run support
//! - [`watcher`] - File system watching for development mode
//! - [`error`] - Error types and handling

pub mod config;
pub mod error;
pub mod generator;
pub mod parser;
pub mod reflection;
pub mod renderer;
pub mod scanner;
pub mod watcher;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use generator::{GenerationReport, TypeScriptGenerator};
pub use parser::{PhpClass, PhpParser};
pub use reflection::PropertyInfo;
pub use renderer::{Renderer, TemplateKind, TypeScriptRenderer};
pub use scanner::{SourceFile, SourceScanner};
pub use watcher::FileWatcher;
pub use writer::FileWriter;
