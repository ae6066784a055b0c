//! # tsgen
//!
//! Type resolution for generating TypeScript declarations from PHP classes.
//!
//! Given the candidate types an introspection source reports for each
//! property of a class, this crate picks one TypeScript type expression per
//! property and records which other generated declarations must be imported.
//! Discovering classes, reading their metadata, rendering and writing files
//! live in `tsgen-cli`.
//!
//! ## Quick Start
//!
//! ```rust
//! use tsgen::{TypeDescriptor, TypeResolver};
//!
//! let resolver = TypeResolver::new();
//!
//! let id = resolver.resolve(&[TypeDescriptor::int()]);
//! assert_eq!(id.type_expression, "number");
//!
//! let created_at = resolver.resolve(&[TypeDescriptor::object("DateTime").nullable()]);
//! assert_eq!(created_at.type_expression, "Date | null");
//! assert_eq!(created_at.import_name, None);
//! ```
//!
//! ## Modules
//!
//! - [`descriptor`] - Candidate type and class descriptors
//! - [`translation`] - Source-to-TypeScript name table
//! - [`resolver`] - First-match type resolution
//! - [`definition`] - Class definition records and their builder
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `serde` | Serialize/deserialize descriptors and definitions | ✅ |

pub mod definition;
pub mod descriptor;
pub mod resolver;
pub mod translation;

pub use definition::{
    ClassDefinition, ClassDefinitionBuilder, PropertyDefinition, PropertyLister, TypeSource,
};
pub use descriptor::{BuiltinKind, ClassDescriptor, TypeDescriptor};
pub use resolver::{PropertyTypeResolution, ResolverOptions, TypeResolver};
pub use translation::TypeTranslation;
