//! TypeScript renderer for class definitions.
//!
//! Turns a [`ClassDefinition`] into the content of one `.ts` module holding
//! an `export interface` or `export class` declaration.

use crate::config::OutputConfig;
use std::fmt;
use tsgen::ClassDefinition;

/// Header written at the top of every generated file.
pub const HEADER: &str = "// Auto-generated by tsgen\n// Do not edit manually\n";

/// Declaration template a renderer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// `export interface Name { ... }`
    Interface,
    /// `export class Name { ... }`
    Class,
}

impl TemplateKind {
    /// The TypeScript keyword of the declaration.
    pub fn keyword(&self) -> &'static str {
        match self {
            TemplateKind::Interface => "interface",
            TemplateKind::Class => "class",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Renders a class definition into file content.
pub trait Renderer {
    fn render(&self, definition: &ClassDefinition) -> String;
}

/// Renderer for TypeScript interface and class declarations.
#[derive(Debug, Clone)]
pub struct TypeScriptRenderer {
    kind: TemplateKind,
    import_prefix: String,
    header: bool,
}

impl TypeScriptRenderer {
    /// Create a renderer with default output settings.
    pub fn new(kind: TemplateKind) -> Self {
        Self::from_config(kind, &OutputConfig::default())
    }

    /// Create a renderer from output configuration.
    pub fn from_config(kind: TemplateKind, config: &OutputConfig) -> Self {
        Self {
            kind,
            import_prefix: config.import_prefix.clone(),
            header: config.header,
        }
    }

    /// Set the module path prefix of import statements.
    pub fn with_import_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.import_prefix = prefix.into();
        self
    }

    /// Set whether to emit the header comment.
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Import names in sorted order, without the class itself.
    fn imports<'d>(&self, definition: &'d ClassDefinition) -> Vec<&'d str> {
        let mut imports: Vec<&str> = definition
            .classes_to_import
            .iter()
            .map(String::as_str)
            .filter(|name| *name != definition.name)
            .collect();
        imports.sort_unstable();
        imports.dedup();
        imports
    }
}

impl Renderer for TypeScriptRenderer {
    fn render(&self, definition: &ClassDefinition) -> String {
        let mut output = String::new();

        if self.header {
            output.push_str(HEADER);
            output.push('\n');
        }

        let imports = self.imports(definition);
        for import in &imports {
            output.push_str(&format!(
                "import {{ {import} }} from '{}{import}';\n",
                self.import_prefix
            ));
        }
        if !imports.is_empty() {
            output.push('\n');
        }

        output.push_str(&format!(
            "export {} {} {{\n",
            self.kind.keyword(),
            definition.name
        ));
        for property in &definition.properties {
            output.push_str(&format!(
                "  {}: {};\n",
                property.name, property.type_expression
            ));
        }
        output.push_str("}\n");

        output
    }
}
