//! Input model: candidate type descriptors and class descriptors.
//!
//! A [`TypeDescriptor`] describes one possible declared type of a property,
//! as reported by an introspection source. A property may have several; the
//! resolver only uses the first one it recognizes.

use std::fmt;

/// The builtin kind of a candidate type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BuiltinKind {
    Bool,
    Float,
    Int,
    Null,
    String,
    Array,
    Object,
    /// A kind the resolver does not recognize (`mixed`, `callable`, `iterable`, ...).
    Unknown(String),
}

impl BuiltinKind {
    /// The canonical name of the kind, used as the translation key for primitives.
    pub fn name(&self) -> &str {
        match self {
            BuiltinKind::Bool => "bool",
            BuiltinKind::Float => "float",
            BuiltinKind::Int => "int",
            BuiltinKind::Null => "null",
            BuiltinKind::String => "string",
            BuiltinKind::Array => "array",
            BuiltinKind::Object => "object",
            BuiltinKind::Unknown(name) => name,
        }
    }

    /// Whether the kind is handled by the primitive rule.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            BuiltinKind::Bool
                | BuiltinKind::Float
                | BuiltinKind::Int
                | BuiltinKind::Null
                | BuiltinKind::String
        )
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One candidate type for a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDescriptor {
    /// Builtin kind of the type.
    pub builtin_kind: BuiltinKind,

    /// Whether `null` is an accepted value.
    pub nullable: bool,

    /// Fully-qualified class name, without a leading backslash. Only set for objects.
    pub class_name: Option<String>,

    /// Element type of a collection, when known.
    pub collection_value_type: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    /// Create a descriptor of the given kind.
    pub fn new(builtin_kind: BuiltinKind) -> Self {
        Self {
            builtin_kind,
            nullable: false,
            class_name: None,
            collection_value_type: None,
        }
    }

    pub fn bool() -> Self {
        Self::new(BuiltinKind::Bool)
    }

    pub fn int() -> Self {
        Self::new(BuiltinKind::Int)
    }

    pub fn float() -> Self {
        Self::new(BuiltinKind::Float)
    }

    pub fn string() -> Self {
        Self::new(BuiltinKind::String)
    }

    pub fn null() -> Self {
        Self::new(BuiltinKind::Null)
    }

    /// An array without a known element type.
    pub fn array() -> Self {
        Self::new(BuiltinKind::Array)
    }

    /// An array of `value`.
    pub fn array_of(value: TypeDescriptor) -> Self {
        Self::array().with_collection_value(value)
    }

    /// An object of the given class. A leading backslash is stripped.
    pub fn object(class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        let class_name = class_name.trim_start_matches('\\').to_string();
        Self {
            class_name: Some(class_name),
            ..Self::new(BuiltinKind::Object)
        }
    }

    /// A kind the resolver does not recognize.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::new(BuiltinKind::Unknown(name.into()))
    }

    /// Set whether the type accepts `null`.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Mark the type as nullable.
    pub fn nullable(self) -> Self {
        self.with_nullable(true)
    }

    /// Set the element type of a collection.
    pub fn with_collection_value(mut self, value: TypeDescriptor) -> Self {
        self.collection_value_type = Some(Box::new(value));
        self
    }

    /// Short (unqualified) class name: the segment after the last backslash.
    pub fn short_class_name(&self) -> Option<&str> {
        self.class_name.as_deref().map(short_name)
    }
}

/// Identifies one class to generate a declaration for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDescriptor {
    /// Fully-qualified class identifier (e.g. `App\Entity\Order`).
    pub fqcn: String,

    /// Short output name (e.g. `Order`).
    pub class_name: String,
}

impl ClassDescriptor {
    /// Create a descriptor; the output name is derived from the identifier.
    pub fn new(fqcn: impl Into<String>) -> Self {
        let fqcn = fqcn.into().trim_start_matches('\\').to_string();
        let class_name = short_name(&fqcn).to_string();
        Self { fqcn, class_name }
    }

    /// Create a descriptor with an explicit output name.
    pub fn with_name(fqcn: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            fqcn: fqcn.into().trim_start_matches('\\').to_string(),
            class_name: class_name.into(),
        }
    }
}

/// The unqualified part of a backslash-separated class identifier.
pub fn short_name(fqcn: &str) -> &str {
    fqcn.rsplit('\\').next().unwrap_or(fqcn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("App\\Entity\\Order"), "Order");
        assert_eq!(short_name("DateTime"), "DateTime");
        assert_eq!(short_name(""), "");
    }

    #[test]
    fn test_object_strips_leading_backslash() {
        let ty = TypeDescriptor::object("\\DateTime");
        assert_eq!(ty.class_name.as_deref(), Some("DateTime"));
        assert_eq!(ty.builtin_kind, BuiltinKind::Object);
    }

    #[test]
    fn test_short_class_name() {
        let ty = TypeDescriptor::object("App\\Entity\\Item");
        assert_eq!(ty.short_class_name(), Some("Item"));
        assert_eq!(TypeDescriptor::int().short_class_name(), None);
    }

    #[test]
    fn test_class_descriptor_derives_name() {
        let class = ClassDescriptor::new("\\App\\Entity\\Order");
        assert_eq!(class.fqcn, "App\\Entity\\Order");
        assert_eq!(class.class_name, "Order");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(BuiltinKind::Int.name(), "int");
        assert_eq!(BuiltinKind::Unknown("mixed".into()).to_string(), "mixed");
        assert!(BuiltinKind::Null.is_primitive());
        assert!(!BuiltinKind::Array.is_primitive());
        assert!(!BuiltinKind::Object.is_primitive());
    }

    #[test]
    fn test_array_of_sets_value_type() {
        let ty = TypeDescriptor::array_of(TypeDescriptor::int()).nullable();
        assert!(ty.nullable);
        assert_eq!(
            ty.collection_value_type.as_deref(),
            Some(&TypeDescriptor::int())
        );
    }
}
