//! Parsed PHP class shapes.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tsgen::ClassDescriptor;

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// Namespace and `use` imports in effect for a class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameContext {
    /// Enclosing namespace, `None` for the global namespace.
    pub namespace: Option<String>,

    /// Imported names keyed by lowercased alias.
    pub imports: BTreeMap<String, String>,
}

impl NameContext {
    /// Register `use Fqcn as Alias;`. Without an alias the last segment is used.
    pub fn add_import(&mut self, fqcn: &str, alias: Option<&str>) {
        let fqcn = fqcn.trim_start_matches('\\');
        let alias = alias.unwrap_or_else(|| tsgen::descriptor::short_name(fqcn));
        self.imports.insert(alias.to_lowercase(), fqcn.to_string());
    }

    /// Qualify a class name within this namespace.
    pub fn qualify(&self, short: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}\\{short}"),
            None => short.to_string(),
        }
    }

    /// Resolve a class name as written in source to its fully-qualified form.
    ///
    /// ```
    /// use tsgen_cli::parser::NameContext;
    ///
    /// let mut ctx = NameContext {
    ///     namespace: Some("App\\Entity".to_string()),
    ///     ..Default::default()
    /// };
    /// ctx.add_import("Doctrine\\ORM\\Mapping", Some("ORM"));
    ///
    /// assert_eq!(ctx.resolve("Item"), "App\\Entity\\Item");
    /// assert_eq!(ctx.resolve("\\DateTime"), "DateTime");
    /// assert_eq!(ctx.resolve("ORM\\Column"), "Doctrine\\ORM\\Mapping\\Column");
    /// ```
    pub fn resolve(&self, name: &str) -> String {
        if let Some(absolute) = name.strip_prefix('\\') {
            return absolute.to_string();
        }

        if let Some(relative) = name.strip_prefix("namespace\\") {
            return self.qualify(relative);
        }

        let (first, rest) = match name.split_once('\\') {
            Some((first, rest)) => (first, Some(rest)),
            None => (name, None),
        };

        match (self.imports.get(&first.to_lowercase()), rest) {
            (Some(imported), Some(rest)) => format!("{imported}\\{rest}"),
            (Some(imported), None) => imported.clone(),
            (None, _) => self.qualify(name),
        }
    }
}

/// A declared or constructor-promoted property.
#[derive(Debug, Clone, Serialize)]
pub struct PhpProperty {
    /// Name without the leading `$`.
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_readonly: bool,

    /// Declared type exactly as written, e.g. `?Item` or `int|string`.
    pub native_type: Option<String>,

    /// Docblock attached to the declaration. For promoted properties this is
    /// the constructor's docblock.
    pub doc_comment: Option<String>,

    /// Raw `#[...]` attribute groups.
    pub attributes: Vec<String>,

    /// Declared through constructor promotion.
    pub promoted: bool,

    pub line: usize,
}

/// A method declaration.
#[derive(Debug, Clone, Serialize)]
pub struct PhpMethod {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,

    /// Number of parameters without a default value.
    pub required_parameters: usize,

    /// Declared return type exactly as written.
    pub return_type: Option<String>,

    pub doc_comment: Option<String>,
    pub line: usize,
}

/// A class declaration with everything the metadata extractors read.
#[derive(Debug, Clone, Serialize)]
pub struct PhpClass {
    /// Short class name.
    pub name: String,

    /// Fully-qualified class name.
    pub fqcn: String,

    /// Resolved parent class, if the class extends one.
    pub parent: Option<String>,

    pub is_abstract: bool,

    /// Names in effect where the class was declared.
    pub context: NameContext,

    /// Properties in source order; promoted ones are flagged with `promoted`.
    pub properties: Vec<PhpProperty>,

    pub methods: Vec<PhpMethod>,

    /// File the class was declared in.
    pub file: PathBuf,

    pub line: usize,
}

impl PhpClass {
    /// Descriptor handed to the generator.
    pub fn descriptor(&self) -> ClassDescriptor {
        ClassDescriptor::with_name(&self.fqcn, &self.name)
    }

    /// Look up a declared property by exact name.
    pub fn property(&self, name: &str) -> Option<&PhpProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Look up a method; PHP method names are case-insensitive.
    pub fn method(&self, name: &str) -> Option<&PhpMethod> {
        self.methods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a class name written inside this class.
    ///
    /// `self`, `static` and `$this` refer to the class itself and `parent` to
    /// its parent; `None` is returned for `parent` without one.
    pub fn resolve_name(&self, name: &str) -> Option<String> {
        match name.to_ascii_lowercase().as_str() {
            "self" | "static" | "$this" => Some(self.fqcn.clone()),
            "parent" => self.parent.clone(),
            _ => Some(self.context.resolve(name)),
        }
    }
}
