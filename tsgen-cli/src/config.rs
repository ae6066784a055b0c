//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `tsgen.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tsgen::resolver::{DEFAULT_COLLECTION_WRAPPER, DEFAULT_DATE_CLASS, DEFAULT_MAX_DEPTH};
use tsgen::{ResolverOptions, TypeTranslation};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "tsgen.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Type resolution settings.
    pub types: TypesConfig,

    /// Enabled metadata extractors.
    pub reflection: ReflectionConfig,

    /// Run behavior.
    pub generation: GenerationConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Extension of generated files, without the dot.
    pub extension: String,

    /// Module path prefix used in import statements.
    pub import_prefix: String,

    /// Whether to emit the "auto-generated" header comment.
    pub header: bool,
}

/// Type resolution configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TypesConfig {
    /// Fully-qualified name of the date class; it is never imported.
    pub date_class: String,

    /// Fully-qualified name of the collection wrapper class skipped as a candidate.
    pub collection_wrapper: String,

    /// Extra translations merged over the defaults.
    pub translations: BTreeMap<String, String>,

    /// Maximum nesting of array types.
    pub max_depth: usize,
}

/// Metadata extractor configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReflectionConfig {
    /// Read `@var`, `@param` and `@return` docblock tags.
    pub phpdoc: bool,

    /// Read native type declarations.
    pub native: bool,

    /// Read Doctrine ORM mapping annotations and attributes.
    pub doctrine: bool,

    /// List properties derived from public getters.
    pub include_accessors: bool,
}

/// Generation run configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Skip classes whose metadata cannot be read instead of aborting.
    pub skip_failed_classes: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: "ts".to_string(),
            import_prefix: "./".to_string(),
            header: true,
        }
    }
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            date_class: DEFAULT_DATE_CLASS.to_string(),
            collection_wrapper: DEFAULT_COLLECTION_WRAPPER.to_string(),
            translations: BTreeMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            phpdoc: true,
            native: true,
            doctrine: true,
            include_accessors: true,
        }
    }
}

impl TypesConfig {
    /// Resolver options built from this configuration.
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            translation: TypeTranslation::default().with_overrides(self.translations.clone()),
            date_class: self.date_class.trim_start_matches('\\').to_string(),
            collection_wrapper: self.collection_wrapper.trim_start_matches('\\').to_string(),
            max_depth: self.max_depth,
        }
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// If the path is None, attempts to load from the default location and
    /// falls back to the default configuration when that file is absent. An
    /// explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::not_found(path.to_path_buf()).into());
                }
                path.to_path_buf()
            }
            None => {
                let default = PathBuf::from(CONFIG_FILENAME);
                if !default.exists() {
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config = Self::parse(&content, &config_path)?;
        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration content.
    pub fn parse(content: &str, path: &Path) -> CliResult<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(path.to_path_buf(), e.to_string()))?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Reject values that would produce unusable output.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.output.extension.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "output.extension",
                "must not be empty",
            ));
        }

        let extension = &config.output.extension;
        if extension.starts_with('.') || extension.contains('/') || extension.contains('\\') {
            return Err(ConfigError::invalid_value(
                "output.extension",
                "must be an extension without a leading dot, such as \"ts\" or \"d.ts\"",
            ));
        }

        if config.types.date_class.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "types.date_class",
                "must not be empty",
            ));
        }

        if config.types.max_depth == 0 {
            return Err(ConfigError::invalid_value(
                "types.max_depth",
                "must be at least 1",
            ));
        }

        Ok(())
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref extension) = args.extension {
            config.output.extension = extension.clone();
        }

        if let Some(ref import_prefix) = args.import_prefix {
            config.output.import_prefix = import_prefix.clone();
        }

        if let Some(skip_failed) = args.skip_failed_classes {
            config.generation.skip_failed_classes = skip_failed;
        }

        config
    }

    /// Get default configuration.
    pub fn default_config() -> Config {
        Config::default()
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# tsgen configuration file

[output]
# Extension of generated files
extension = "ts"

# Module path prefix used in import statements (import { Item } from './Item')
import_prefix = "./"

# Whether to emit an "auto-generated" header comment
header = true

[types]
# Date class rendered as the native Date type, never imported
date_class = "DateTime"

# Collection wrapper skipped in favour of the next declared type (e.g. Item[])
collection_wrapper = "Doctrine\\Common\\Collections\\ArrayCollection"

# Maximum nesting of array types before falling back to any
max_depth = 32

[types.translations]
# Extra source-name to TypeScript-name translations, merged over the defaults
# (DateTime = "Date", int = "number", float = "number", bool = "boolean")
# DateTimeImmutable = "Date"

[reflection]
# Read @var / @param / @return docblock tags
phpdoc = true

# Read native type declarations
native = true

# Read Doctrine ORM mapping (annotations and attributes)
doctrine = true

# List properties derived from public getters (getFoo, isFoo, hasFoo, canFoo)
include_accessors = true

[generation]
# Skip classes whose metadata cannot be read instead of aborting the run
skip_failed_classes = false
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output extension override.
    pub extension: Option<String>,

    /// Import prefix override.
    pub import_prefix: Option<String>,

    /// Skip failed classes override.
    pub skip_failed_classes: Option<bool>,
}
