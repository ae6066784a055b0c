//! Type resolution: candidate descriptors to a TypeScript type expression.
//!
//! The resolver walks the candidate list in the order the introspection
//! source reported it and dispatches on the first candidate it recognizes:
//!
//! | Kind | Rule | Example |
//! |------|------|---------|
//! | `bool`, `float`, `int`, `null`, `string` | primitive | `?int` → `number \| null` |
//! | `array` | container | `Item[]` → `Item[]` (imports `Item`) |
//! | `object` (not the collection wrapper) | object | `?DateTime` → `Date \| null` |
//!
//! Later candidates are never consulted once one matches. When nothing
//! matches the property resolves to `any`.

use crate::descriptor::{BuiltinKind, TypeDescriptor};
use crate::translation::TypeTranslation;

/// Type expression used when no candidate is recognized.
pub const FALLBACK_TYPE: &str = "any";

/// Suffix appended to nullable types.
pub const NULLABLE_SUFFIX: &str = " | null";

/// Suffix appended to the element type of a collection.
pub const ARRAY_SUFFIX: &str = "[]";

/// Identifier of the built-in date class.
pub const DEFAULT_DATE_CLASS: &str = "DateTime";

/// Identifier of the collection wrapper class skipped as a candidate.
pub const DEFAULT_COLLECTION_WRAPPER: &str = "Doctrine\\Common\\Collections\\ArrayCollection";

/// Maximum container nesting resolved before falling back to `any`.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// The resolved type of one property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyTypeResolution {
    /// Type in TypeScript syntax.
    pub type_expression: String,

    /// Short name of another generated type this one refers to.
    pub import_name: Option<String>,
}

impl PropertyTypeResolution {
    pub fn new(type_expression: impl Into<String>, import_name: Option<String>) -> Self {
        Self {
            type_expression: type_expression.into(),
            import_name,
        }
    }

    /// The `any` resolution.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_TYPE, None)
    }
}

/// Resolver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Name translation for primitives and class short names.
    pub translation: TypeTranslation,

    /// Fully-qualified identifier of the date class (no import is recorded for it).
    pub date_class: String,

    /// Fully-qualified identifier of the collection wrapper class.
    pub collection_wrapper: String,

    /// Maximum container nesting depth.
    pub max_depth: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            translation: TypeTranslation::default(),
            date_class: DEFAULT_DATE_CLASS.to_string(),
            collection_wrapper: DEFAULT_COLLECTION_WRAPPER.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Reduces candidate type descriptors to a single [`PropertyTypeResolution`].
///
/// The resolver holds no state between calls; the same candidates always
/// produce the same resolution.
///
/// # Example
///
/// ```rust
/// use tsgen::{TypeDescriptor, TypeResolver};
///
/// let resolver = TypeResolver::new();
/// let resolved = resolver.resolve(&[TypeDescriptor::array_of(TypeDescriptor::object("App\\Entity\\Item"))]);
/// assert_eq!(resolved.type_expression, "Item[]");
/// assert_eq!(resolved.import_name.as_deref(), Some("Item"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    options: ResolverOptions,
}

impl TypeResolver {
    /// Create a resolver with the default translation table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with custom options.
    pub fn with_options(options: ResolverOptions) -> Self {
        Self { options }
    }

    /// Get the resolver options.
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve a property's candidate types.
    pub fn resolve(&self, candidates: &[TypeDescriptor]) -> PropertyTypeResolution {
        self.resolve_at_depth(candidates, 0)
    }

    fn resolve_at_depth(&self, candidates: &[TypeDescriptor], depth: usize) -> PropertyTypeResolution {
        for candidate in candidates {
            match &candidate.builtin_kind {
                kind if kind.is_primitive() => return self.primitive(candidate),
                BuiltinKind::Array => return self.container(candidate, depth),
                BuiltinKind::Object
                    if candidate.class_name.is_some() && !self.is_collection_wrapper(candidate) =>
                {
                    return self.object(candidate)
                }
                _ => continue,
            }
        }

        PropertyTypeResolution::fallback()
    }

    fn primitive(&self, ty: &TypeDescriptor) -> PropertyTypeResolution {
        let base = self.options.translation.translate(ty.builtin_kind.name());
        PropertyTypeResolution::new(with_nullability(base, ty.nullable), None)
    }

    fn container(&self, ty: &TypeDescriptor, depth: usize) -> PropertyTypeResolution {
        let Some(value) = ty.collection_value_type.as_deref() else {
            return PropertyTypeResolution::new(ARRAY_SUFFIX, None);
        };

        if depth >= self.options.max_depth {
            tracing::warn!(depth, "container nesting too deep, falling back to any");
            return PropertyTypeResolution::fallback();
        }

        let inner = self.resolve_at_depth(std::slice::from_ref(value), depth + 1);
        PropertyTypeResolution::new(
            format!("{}{}", inner.type_expression, ARRAY_SUFFIX),
            inner.import_name,
        )
    }

    /// Only called for objects that carry a class name.
    fn object(&self, ty: &TypeDescriptor) -> PropertyTypeResolution {
        let fqcn = ty.class_name.as_deref().unwrap_or_default();
        let short = crate::descriptor::short_name(fqcn);
        let base = self.options.translation.translate(short);

        let import_name = if fqcn == self.options.date_class {
            None
        } else {
            Some(short.to_string())
        };

        PropertyTypeResolution::new(with_nullability(base, ty.nullable), import_name)
    }

    fn is_collection_wrapper(&self, ty: &TypeDescriptor) -> bool {
        ty.class_name.as_deref() == Some(self.options.collection_wrapper.as_str())
    }
}

fn with_nullability(base: &str, nullable: bool) -> String {
    if nullable {
        format!("{base}{NULLABLE_SUFFIX}")
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(candidates: &[TypeDescriptor]) -> PropertyTypeResolution {
        TypeResolver::new().resolve(candidates)
    }

    #[test]
    fn test_primitives_are_translated() {
        assert_eq!(resolve(&[TypeDescriptor::int()]).type_expression, "number");
        assert_eq!(resolve(&[TypeDescriptor::float()]).type_expression, "number");
        assert_eq!(resolve(&[TypeDescriptor::bool()]).type_expression, "boolean");
        assert_eq!(resolve(&[TypeDescriptor::string()]).type_expression, "string");
        assert_eq!(resolve(&[TypeDescriptor::null()]).type_expression, "null");
        assert_eq!(resolve(&[TypeDescriptor::int()]).import_name, None);
    }

    #[test]
    fn test_nullable_primitive() {
        let resolved = resolve(&[TypeDescriptor::string().nullable()]);
        assert_eq!(resolved.type_expression, "string | null");
        assert_eq!(resolved.import_name, None);
    }

    #[test]
    fn test_empty_candidates_fall_back_to_any() {
        assert_eq!(resolve(&[]), PropertyTypeResolution::fallback());
    }

    #[test]
    fn test_unrecognized_candidates_fall_back_to_any() {
        let resolved = resolve(&[
            TypeDescriptor::unknown("mixed"),
            TypeDescriptor::unknown("callable"),
        ]);
        assert_eq!(resolved.type_expression, "any");
        assert_eq!(resolved.import_name, None);
    }

    #[test]
    fn test_first_recognized_candidate_wins() {
        let resolved = resolve(&[
            TypeDescriptor::unknown("mixed"),
            TypeDescriptor::int(),
            TypeDescriptor::string(),
        ]);
        assert_eq!(resolved.type_expression, "number");

        let resolved = resolve(&[
            TypeDescriptor::object("App\\Entity\\Customer"),
            TypeDescriptor::int(),
        ]);
        assert_eq!(resolved.type_expression, "Customer");
        assert_eq!(resolved.import_name.as_deref(), Some("Customer"));
    }

    #[test]
    fn test_array_of_objects_imports_element() {
        let resolved = resolve(&[TypeDescriptor::array_of(TypeDescriptor::object(
            "App\\Entity\\Item",
        ))]);
        assert_eq!(resolved.type_expression, "Item[]");
        assert_eq!(resolved.import_name.as_deref(), Some("Item"));
    }

    #[test]
    fn test_untyped_array() {
        let resolved = resolve(&[TypeDescriptor::array()]);
        assert_eq!(resolved.type_expression, "[]");
        assert_eq!(resolved.import_name, None);
    }

    #[test]
    fn test_array_nullability_is_not_rendered() {
        let resolved = resolve(&[TypeDescriptor::array_of(TypeDescriptor::int()).nullable()]);
        assert_eq!(resolved.type_expression, "number[]");
    }

    #[test]
    fn test_nested_arrays() {
        let resolved = resolve(&[TypeDescriptor::array_of(TypeDescriptor::array_of(
            TypeDescriptor::int(),
        ))]);
        assert_eq!(resolved.type_expression, "number[][]");
    }

    #[test]
    fn test_nullable_element_keeps_suffix_before_brackets() {
        let resolved = resolve(&[TypeDescriptor::array_of(TypeDescriptor::int().nullable())]);
        assert_eq!(resolved.type_expression, "number | null[]");
    }

    #[test]
    fn test_date_class_is_translated_without_import() {
        let resolved = resolve(&[TypeDescriptor::object("\\DateTime").nullable()]);
        assert_eq!(resolved.type_expression, "Date | null");
        assert_eq!(resolved.import_name, None);
    }

    #[test]
    fn test_namespaced_date_short_name_still_imports() {
        let resolved = resolve(&[TypeDescriptor::object("App\\Model\\DateTime")]);
        assert_eq!(resolved.type_expression, "Date");
        assert_eq!(resolved.import_name.as_deref(), Some("DateTime"));
    }

    #[test]
    fn test_collection_wrapper_is_skipped() {
        let resolved = resolve(&[
            TypeDescriptor::object(DEFAULT_COLLECTION_WRAPPER),
            TypeDescriptor::array_of(TypeDescriptor::object("App\\Entity\\Item")),
        ]);
        assert_eq!(resolved.type_expression, "Item[]");
        assert_eq!(resolved.import_name.as_deref(), Some("Item"));
    }

    #[test]
    fn test_collection_wrapper_alone_is_any() {
        let resolved = resolve(&[TypeDescriptor::object(DEFAULT_COLLECTION_WRAPPER)]);
        assert_eq!(resolved, PropertyTypeResolution::fallback());
    }

    #[test]
    fn test_object_without_class_name_is_skipped() {
        let anonymous = TypeDescriptor::new(BuiltinKind::Object);
        assert_eq!(resolve(&[anonymous.clone()]), PropertyTypeResolution::fallback());

        let resolved = resolve(&[anonymous, TypeDescriptor::string()]);
        assert_eq!(resolved.type_expression, "string");
        assert_eq!(resolved.import_name, None);
    }

    #[test]
    fn test_custom_translation() {
        let options = ResolverOptions {
            translation: TypeTranslation::default().with_overrides([("DateTimeImmutable", "Date")]),
            ..ResolverOptions::default()
        };
        let resolver = TypeResolver::with_options(options);
        let resolved = resolver.resolve(&[TypeDescriptor::object("DateTimeImmutable")]);
        assert_eq!(resolved.type_expression, "Date");
        assert_eq!(resolved.import_name.as_deref(), Some("DateTimeImmutable"));
    }

    #[test]
    fn test_depth_guard() {
        let options = ResolverOptions {
            max_depth: 2,
            ..ResolverOptions::default()
        };
        let resolver = TypeResolver::with_options(options);

        let two = TypeDescriptor::array_of(TypeDescriptor::array_of(TypeDescriptor::int()));
        assert_eq!(resolver.resolve(&[two.clone()]).type_expression, "number[][]");

        let three = TypeDescriptor::array_of(two);
        assert_eq!(resolver.resolve(&[three]).type_expression, "any[][]");
    }
}
