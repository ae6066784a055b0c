//! Property-based tests for tsgen.
//!
//! Properties tested:
//! - Property 1: Primitive Translation
//! - Property 2: Nullable Suffix Appears Once
//! - Property 3: Container Nesting Depth
//! - Property 4: Object Imports
//! - Property 5: Fallback Totality
//! - Property 6: First Match Wins
//! - Property 7: Build Idempotence

use proptest::prelude::*;
use std::convert::Infallible;

use tsgen::{
    BuiltinKind, ClassDefinitionBuilder, ClassDescriptor, PropertyLister, TypeDescriptor,
    TypeResolver, TypeSource,
};

// =============================================================================
// Generators for property tests
// =============================================================================

/// Generate a non-nullable primitive descriptor with its expected TypeScript name.
fn arb_primitive() -> impl Strategy<Value = (TypeDescriptor, &'static str)> {
    prop_oneof![
        Just((TypeDescriptor::bool(), "boolean")),
        Just((TypeDescriptor::int(), "number")),
        Just((TypeDescriptor::float(), "number")),
        Just((TypeDescriptor::string(), "string")),
    ]
}

/// Generate a PHP class short name that is not in the translation table.
fn arb_short_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,12}".prop_filter("reserved by the translation table", |s| s != "DateTime")
}

/// Generate a namespaced class identifier.
fn arb_fqcn() -> impl Strategy<Value = (String, String)> {
    (
        prop::collection::vec("[A-Z][a-z]{1,8}", 0..4),
        arb_short_name(),
    )
        .prop_map(|(namespace, short)| {
            let mut segments = namespace;
            segments.push(short.clone());
            (segments.join("\\"), short)
        })
}

/// Generate a primitive or object leaf descriptor.
fn arb_leaf() -> impl Strategy<Value = TypeDescriptor> {
    prop_oneof![
        arb_primitive().prop_map(|(ty, _)| ty),
        arb_fqcn().prop_map(|(fqcn, _)| TypeDescriptor::object(fqcn)),
        Just(TypeDescriptor::object("DateTime")),
    ]
}

/// Generate a kind the resolver never matches.
fn arb_unrecognized() -> impl Strategy<Value = TypeDescriptor> {
    prop_oneof![
        Just(TypeDescriptor::unknown("mixed")),
        Just(TypeDescriptor::unknown("callable")),
        Just(TypeDescriptor::unknown("iterable")),
        Just(TypeDescriptor::unknown("resource")),
        Just(TypeDescriptor::object(
            "Doctrine\\Common\\Collections\\ArrayCollection"
        )),
    ]
}

// =============================================================================
// Property 1: Primitive Translation
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_primitive_translation((ty, expected) in arb_primitive()) {
        let resolved = TypeResolver::new().resolve(&[ty]);
        prop_assert_eq!(resolved.type_expression, expected);
        prop_assert_eq!(resolved.import_name, None);
    }
}

// =============================================================================
// Property 2: Nullable Suffix Appears Once
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_nullable_suffix_once(leaf in arb_leaf()) {
        let resolved = TypeResolver::new().resolve(&[leaf.nullable()]);

        prop_assert!(resolved.type_expression.ends_with(" | null"));
        prop_assert_eq!(resolved.type_expression.matches(" | null").count(), 1);
    }
}

// =============================================================================
// Property 3: Container Nesting Depth
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_container_nesting(depth in 1usize..8, (leaf, name) in arb_primitive()) {
        let mut ty = leaf;
        for _ in 0..depth {
            ty = TypeDescriptor::array_of(ty);
        }

        let resolved = TypeResolver::new().resolve(&[ty]);

        let expected = format!("{}{}", name, "[]".repeat(depth));
        prop_assert_eq!(resolved.type_expression, expected);
        prop_assert_eq!(resolved.import_name, None);
    }
}

// =============================================================================
// Property 4: Object Imports
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_object_imports_short_name((fqcn, short) in arb_fqcn(), nullable in any::<bool>()) {
        let resolved = TypeResolver::new()
            .resolve(&[TypeDescriptor::object(fqcn).with_nullable(nullable)]);

        prop_assert_eq!(resolved.import_name.as_deref(), Some(short.as_str()));
        prop_assert!(resolved.type_expression.starts_with(short.as_str()));
    }

    #[test]
    fn prop_date_class_never_imports(nullable in any::<bool>(), depth in 0usize..3) {
        let mut ty = TypeDescriptor::object("\\DateTime").with_nullable(nullable);
        for _ in 0..depth {
            ty = TypeDescriptor::array_of(ty);
        }

        let resolved = TypeResolver::new().resolve(&[ty]);

        prop_assert_eq!(resolved.import_name, None);
        prop_assert!(resolved.type_expression.starts_with("Date"));
    }
}

// =============================================================================
// Property 5: Fallback Totality
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_unrecognized_candidates_resolve_to_any(
        candidates in prop::collection::vec(arb_unrecognized(), 0..6)
    ) {
        let resolved = TypeResolver::new().resolve(&candidates);

        prop_assert_eq!(resolved.type_expression, "any");
        prop_assert_eq!(resolved.import_name, None);
    }
}

// =============================================================================
// Property 6: First Match Wins
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_first_recognized_candidate_wins(
        skipped in prop::collection::vec(arb_unrecognized(), 0..4),
        first in arb_leaf(),
        rest in prop::collection::vec(arb_leaf(), 0..4),
    ) {
        let resolver = TypeResolver::new();

        let mut candidates = skipped;
        candidates.push(first.clone());
        candidates.extend(rest);

        prop_assert_eq!(resolver.resolve(&candidates), resolver.resolve(&[first]));
    }
}

// =============================================================================
// Property 7: Build Idempotence
// =============================================================================

struct GeneratedClass {
    properties: Vec<(String, Vec<TypeDescriptor>)>,
}

impl PropertyLister for GeneratedClass {
    type Error = Infallible;

    fn list_properties(&self, _class: &ClassDescriptor) -> Result<Vec<String>, Infallible> {
        Ok(self.properties.iter().map(|(name, _)| name.clone()).collect())
    }
}

impl TypeSource for GeneratedClass {
    type Error = Infallible;

    fn candidate_types(
        &self,
        _class: &ClassDescriptor,
        property: &str,
    ) -> Result<Vec<TypeDescriptor>, Infallible> {
        Ok(self
            .properties
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, types)| types.clone())
            .unwrap_or_default())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_build_is_idempotent(
        types in prop::collection::vec(prop::collection::vec(arb_leaf(), 0..3), 0..8)
    ) {
        let class = GeneratedClass {
            properties: types
                .into_iter()
                .enumerate()
                .map(|(i, candidates)| (format!("field{i}"), candidates))
                .collect(),
        };
        let descriptor = ClassDescriptor::new("App\\Entity\\Generated");
        let builder = ClassDefinitionBuilder::new();

        let first = builder.build(&descriptor, &class, &class).unwrap();
        let second = builder.build(&descriptor, &class, &class).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.properties.len(), class.properties.len());

        let mut seen = std::collections::HashSet::new();
        for import in &first.classes_to_import {
            prop_assert!(seen.insert(import.clone()), "duplicate import {}", import);
        }
    }
}

#[test]
fn test_unknown_kind_keeps_its_name() {
    let ty = TypeDescriptor::unknown("iterable");
    assert_eq!(ty.builtin_kind, BuiltinKind::Unknown("iterable".to_string()));
}
