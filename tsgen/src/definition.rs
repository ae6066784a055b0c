//! Per-class definition records and the builder that assembles them.

use crate::descriptor::{ClassDescriptor, TypeDescriptor};
use crate::resolver::TypeResolver;

/// One property of a generated declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyDefinition {
    /// Property name as reported by the property lister.
    pub name: String,

    /// Resolved TypeScript type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_expression: String,
}

/// Everything a renderer needs to produce one declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ClassDefinition {
    /// Output identifier.
    pub name: String,

    /// Properties in the order the lister reported them.
    pub properties: Vec<PropertyDefinition>,

    /// Distinct import names, in first-seen order.
    pub classes_to_import: Vec<String>,
}

impl ClassDefinition {
    /// Create an empty definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a property.
    pub fn push_property(&mut self, name: impl Into<String>, type_expression: impl Into<String>) {
        self.properties.push(PropertyDefinition {
            name: name.into(),
            type_expression: type_expression.into(),
        });
    }

    /// Record an import unless it is already present.
    pub fn add_import(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.classes_to_import.contains(&name) {
            self.classes_to_import.push(name);
        }
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Whether the class appears in its own import list.
    pub fn imports_itself(&self) -> bool {
        self.classes_to_import.iter().any(|c| *c == self.name)
    }
}

/// Lists the declared property names of a class.
pub trait PropertyLister {
    type Error;

    /// Property names, in declaration order.
    fn list_properties(&self, class: &ClassDescriptor) -> Result<Vec<String>, Self::Error>;
}

/// Supplies the candidate types of a property.
pub trait TypeSource {
    type Error;

    /// Candidate types in the order the source trusts them. May be empty.
    fn candidate_types(
        &self,
        class: &ClassDescriptor,
        property: &str,
    ) -> Result<Vec<TypeDescriptor>, Self::Error>;
}

/// Builds [`ClassDefinition`]s from a property lister and a type source.
#[derive(Debug, Clone, Default)]
pub struct ClassDefinitionBuilder {
    resolver: TypeResolver,
}

impl ClassDefinitionBuilder {
    /// Create a builder with a default resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder around a configured resolver.
    pub fn with_resolver(resolver: TypeResolver) -> Self {
        Self { resolver }
    }

    /// Get the resolver.
    pub fn resolver(&self) -> &TypeResolver {
        &self.resolver
    }

    /// Build the definition of one class.
    ///
    /// Errors from either collaborator are returned unchanged.
    pub fn build<L, S, E>(
        &self,
        class: &ClassDescriptor,
        lister: &L,
        source: &S,
    ) -> Result<ClassDefinition, E>
    where
        L: PropertyLister<Error = E> + ?Sized,
        S: TypeSource<Error = E> + ?Sized,
    {
        let mut definition = ClassDefinition::new(&class.class_name);

        for property in lister.list_properties(class)? {
            let candidates = source.candidate_types(class, &property)?;
            let resolved = self.resolver.resolve(&candidates);

            tracing::trace!(
                class = %class.fqcn,
                property = %property,
                candidates = candidates.len(),
                resolved = %resolved.type_expression,
                "resolved property type"
            );

            if let Some(import) = resolved.import_name {
                definition.add_import(import);
            }
            definition.push_property(property, resolved.type_expression);
        }

        Ok(definition)
    }
}
