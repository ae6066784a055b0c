//! Native type declaration extractor.

use super::types::parse_type;
use super::{find_accessor, TypeExtractor};
use crate::parser::PhpClass;
use tsgen::TypeDescriptor;

/// Reads declared property types, falling back to the accessor's return type.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeTypeExtractor;

impl TypeExtractor for NativeTypeExtractor {
    fn name(&self) -> &'static str {
        "native"
    }

    fn extract_types(&self, class: &PhpClass, property: &str) -> Option<Vec<TypeDescriptor>> {
        let declared = class
            .property(property)
            .and_then(|p| p.native_type.as_deref());
        let returned = || find_accessor(class, property).and_then(|m| m.return_type.as_deref());

        let expression = declared.or_else(returned)?;
        let types = parse_type(expression, class);
        (!types.is_empty()).then_some(types)
    }
}
