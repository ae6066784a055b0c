//! Declaration generator driving a full run.
//!
//! Scans the input directory for PHP classes, builds a [`ClassDefinition`]
//! per class, renders it with the selected template and writes one file per
//! class into the output directory.

use crate::config::Config;
use crate::error::{CliError, CliResult, GenerateError, ParseError};
use crate::parser::PhpParser;
use crate::reflection::PropertyInfo;
use crate::renderer::{Renderer, TemplateKind, TypeScriptRenderer};
use crate::scanner::SourceScanner;
use crate::writer::{FileWriter, WriteResult};
use std::collections::HashMap;
use std::path::Path;
use tsgen::{ClassDefinition, ClassDefinitionBuilder, TypeResolver};

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// One entry per generated class, in generation order.
    pub declarations: Vec<GeneratedDeclaration>,

    /// Classes or files left out because their metadata could not be read.
    pub skipped: Vec<SkippedClass>,

    /// Classes whose output file was overwritten by a later class.
    pub collisions: Vec<NameCollision>,
}

/// A generated declaration and where it went.
#[derive(Debug)]
pub struct GeneratedDeclaration {
    /// Fully-qualified name of the source class.
    pub fqcn: String,

    pub definition: ClassDefinition,

    pub result: WriteResult,
}

/// A class or source file that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedClass {
    /// Class name, or file path for parse failures.
    pub name: String,

    pub reason: String,
}

/// Two classes mapping to the same output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    /// Output name shared by both classes.
    pub name: String,

    /// Class whose file was overwritten.
    pub overwritten: String,

    /// Class whose file was kept.
    pub kept: String,
}

impl GenerationReport {
    /// Number of files actually written.
    pub fn written_count(&self) -> usize {
        self.declarations
            .iter()
            .filter(|d| d.result.was_written())
            .count()
    }

    /// Total bytes written.
    pub fn bytes_written(&self) -> usize {
        self.declarations.iter().map(|d| d.result.bytes()).sum()
    }

    /// Look up the declaration generated for a class name.
    pub fn declaration(&self, name: &str) -> Option<&GeneratedDeclaration> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.definition.name == name)
    }
}

/// Generator for TypeScript interface and class declarations.
pub struct TypeScriptGenerator {
    config: Config,
    kind: TemplateKind,
    filter: Option<String>,
    dry_run: bool,
}

impl TypeScriptGenerator {
    /// Create a generator with the given configuration and template.
    pub fn new(config: Config, kind: TemplateKind) -> Self {
        Self {
            config,
            kind,
            filter: None,
            dry_run: false,
        }
    }

    /// Only read sources whose path relative to the input matches `pattern`.
    pub fn with_filter(mut self, pattern: Option<String>) -> Self {
        self.filter = pattern;
        self
    }

    /// Render without writing.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Generate one declaration file per class found under `input`.
    ///
    /// Both paths must be existing directories; this is checked before
    /// anything is scanned or written.
    #[tracing::instrument(skip(self), fields(template = %self.kind, dry_run = self.dry_run))]
    pub fn generate(&self, input: &Path, output: &Path) -> CliResult<GenerationReport> {
        for path in [input, output] {
            if !path.is_dir() {
                return Err(GenerateError::invalid_input(path).into());
            }
        }

        let mut report = GenerationReport::default();
        let definitions = self.collect(input, &mut report.skipped)?;

        let renderer = TypeScriptRenderer::from_config(self.kind, &self.config.output);
        let writer = FileWriter::new(self.dry_run).with_extension(&self.config.output.extension);
        let mut owners: HashMap<String, String> = HashMap::new();

        for (fqcn, definition) in definitions {
            if let Some(previous) = owners.insert(definition.name.clone(), fqcn.clone()) {
                tracing::warn!(
                    name = %definition.name,
                    overwritten = %previous,
                    kept = %fqcn,
                    "two classes share an output name, the later one wins"
                );
                report.collisions.push(NameCollision {
                    name: definition.name.clone(),
                    overwritten: previous,
                    kept: fqcn.clone(),
                });
            }

            let content = renderer.render(&definition);
            let result = writer.write_declaration(output, &definition.name, &content)?;
            report.declarations.push(GeneratedDeclaration {
                fqcn,
                definition,
                result,
            });
        }

        tracing::info!(
            classes = report.declarations.len(),
            skipped = report.skipped.len(),
            collisions = report.collisions.len(),
            "generation finished"
        );
        Ok(report)
    }

    /// Build the definitions of every class under `input` without rendering.
    pub fn definitions(&self, input: &Path) -> CliResult<Vec<(String, ClassDefinition)>> {
        if !input.is_dir() {
            return Err(GenerateError::invalid_input(input).into());
        }
        let mut skipped = Vec::new();
        self.collect(input, &mut skipped)
    }

    /// Scan, parse and build, honoring `skip_failed_classes`.
    fn collect(
        &self,
        input: &Path,
        skipped: &mut Vec<SkippedClass>,
    ) -> CliResult<Vec<(String, ClassDefinition)>> {
        let skip_failed = self.config.generation.skip_failed_classes;

        let mut scanner = SourceScanner::new(input);
        if let Some(ref pattern) = self.filter {
            scanner = scanner.with_filter(pattern)?;
        }
        let files = scanner.scan()?;
        if files.is_empty() {
            tracing::warn!(input = %input.display(), "no PHP files found");
        }

        let (classes, errors) = PhpParser::new().parse_files(&files);
        for error in errors {
            let Some(file) = parse_error_file(&error).filter(|_| skip_failed) else {
                return Err(error.into());
            };
            tracing::warn!(error = %error, "skipping unparsable file");
            skipped.push(SkippedClass {
                name: file,
                reason: error.to_string(),
            });
        }

        let info = PropertyInfo::from_config(&self.config.reflection).with_classes(classes);
        let builder = ClassDefinitionBuilder::with_resolver(TypeResolver::with_options(
            self.config.types.resolver_options(),
        ));

        let mut definitions = Vec::with_capacity(info.len());
        for class in info.classes() {
            match builder.build(&class.descriptor(), &info, &info) {
                Ok(definition) => {
                    tracing::debug!(
                        class = %class.fqcn,
                        properties = definition.properties.len(),
                        imports = definition.classes_to_import.len(),
                        "built class definition"
                    );
                    definitions.push((class.fqcn.clone(), definition));
                }
                Err(error) if skip_failed => {
                    tracing::warn!(class = %class.fqcn, error = %error, "skipping class");
                    skipped.push(SkippedClass {
                        name: class.fqcn.clone(),
                        reason: error.to_string(),
                    });
                }
                Err(error) => return Err(CliError::from(error)),
            }
        }

        Ok(definitions)
    }
}

/// The file a parse error belongs to. A grammar failure is not tied to one file.
fn parse_error_file(error: &ParseError) -> Option<String> {
    match error {
        ParseError::Syntax { file, .. } | ParseError::Io { file, .. } => {
            Some(file.display().to_string())
        }
        ParseError::Grammar(_) => None,
    }
}
