//! Error types for the CLI.
//!
//! This module defines all error types used throughout the CLI,
//! providing detailed error messages with context for debugging.
//!
//! A property whose type cannot be resolved is not an error; it becomes `any`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error during source file scanning.
    #[error("Failed to scan directory: {0}")]
    Scan(#[from] ScanError),

    /// Error during PHP source parsing.
    #[error("Failed to parse source file: {0}")]
    Parse(#[from] ParseError),

    /// Error reading class metadata.
    #[error("Failed to read class metadata: {0}")]
    Reflection(#[from] ReflectionError),

    /// Error during generation.
    #[error("Failed to generate declarations: {0}")]
    Generate(#[from] GenerateError),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// Error during file watching.
    #[error("Watch error: {0}")]
    Watch(#[from] WatchError),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error during source file scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Directory does not exist.
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Invalid filter pattern.
    #[error("Invalid filter pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// IO error during scanning.
    #[error("IO error scanning {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from ignore crate walker.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Error during PHP source parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The syntax tree contains an error or missing node.
    #[error("Syntax error in {file}:{line}: {message}")]
    Syntax {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// The PHP grammar could not be loaded into the parser.
    #[error("Failed to load PHP grammar: {0}")]
    Grammar(String),

    /// IO error reading file.
    #[error("Failed to read {file}: {source}")]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error querying the reflection provider.
#[derive(Debug, Error)]
pub enum ReflectionError {
    /// The class was never registered with the provider.
    #[error("Class '{fqcn}' does not exist")]
    UnknownClass { fqcn: String },

    /// The class has no such property.
    #[error("Property '{property}' does not exist on class '{fqcn}'")]
    UnknownProperty { fqcn: String, property: String },
}

/// Error during generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Input or output path is not an existing directory.
    #[error("The provided path {} is not a directory", .path.display())]
    InvalidInput { path: PathBuf },
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error during file watching.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Failed to initialize watcher.
    #[error("Failed to initialize file watcher: {0}")]
    Init(String),

    /// Error from notify crate.
    #[error("Watch notification error: {0}")]
    Notify(String),
}

impl CliError {
    /// Whether the error comes from invalid user input rather than a failure while running.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            CliError::Generate(GenerateError::InvalidInput { .. })
                | CliError::Config(ConfigError::InvalidValue { .. })
        )
    }
}

impl ParseError {
    /// Create a syntax error with location information.
    pub fn syntax(file: PathBuf, line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            file,
            line,
            message: message.into(),
        }
    }
}

impl ScanError {
    /// Create a directory not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::DirectoryNotFound { path }
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl ReflectionError {
    pub fn unknown_class(fqcn: impl Into<String>) -> Self {
        Self::UnknownClass { fqcn: fqcn.into() }
    }

    pub fn unknown_property(fqcn: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            fqcn: fqcn.into(),
            property: property.into(),
        }
    }
}

impl GenerateError {
    /// Create an invalid input error.
    pub fn invalid_input(path: impl Into<PathBuf>) -> Self {
        Self::InvalidInput { path: path.into() }
    }
}

impl ConfigError {
    /// Create a not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::NotFound { path }
    }

    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
