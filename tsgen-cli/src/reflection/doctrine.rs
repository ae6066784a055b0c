//! Doctrine ORM mapping extractor.
//!
//! Reads `@ORM\...` docblock annotations and `#[ORM\...]` attributes on a
//! property. Columns map through the DBAL type table; associations become
//! the target entity (to-one) or a Doctrine collection of it (to-many).

use super::types::parse_type;
use super::TypeExtractor;
use crate::parser::{PhpClass, PhpProperty};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tsgen::{BuiltinKind, TypeDescriptor};

/// Interface every to-many association is exposed as.
pub const DOCTRINE_COLLECTION: &str = "Doctrine\\Common\\Collections\\Collection";

/// Column type assumed when the mapping names none.
const DEFAULT_COLUMN_TYPE: &str = "string";

const MAPPING_NAMES: &str = "Column|ManyToOne|OneToOne|OneToMany|ManyToMany|JoinColumn";

fn annotation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(
            r"@(?:[\w\\]*\\)?({MAPPING_NAMES})\b[ \t]*(?:\(([^)]*)\))?"
        ))
        .unwrap()
    })
}

fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(
            r"(?:^|,)\s*\\?(?:[\w\\]*\\)?({MAPPING_NAMES})\b\s*(?:\(([^)]*)\))?"
        ))
        .unwrap()
    })
}

fn argument_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(\w+)\s*[=:]\s*(?:"([^"]*)"|'([^']*)'|([\w\\:.]+))"#).unwrap()
    })
}

/// One mapping annotation or attribute with its named arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MappingTag {
    name: String,
    arguments: HashMap<String, String>,
}

impl MappingTag {
    fn argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).map(String::as_str)
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.argument(key).map(|v| v.eq_ignore_ascii_case("true"))
    }
}

fn parse_arguments(text: &str) -> HashMap<String, String> {
    argument_pattern()
        .captures_iter(text)
        .filter_map(|c| {
            let key = c.get(1)?.as_str().to_string();
            let value = c.get(2).or_else(|| c.get(3)).or_else(|| c.get(4))?;
            Some((key, value.as_str().to_string()))
        })
        .collect()
}

fn collect_tags(pattern: &Regex, text: &str, tags: &mut Vec<MappingTag>) {
    for captures in pattern.captures_iter(text) {
        let Some(name) = captures.get(1) else {
            continue;
        };
        tags.push(MappingTag {
            name: name.as_str().to_string(),
            arguments: captures
                .get(2)
                .map(|args| parse_arguments(args.as_str()))
                .unwrap_or_default(),
        });
    }
}

fn mapping_tags(property: &PhpProperty) -> Vec<MappingTag> {
    let mut tags = Vec::new();
    if let Some(doc) = &property.doc_comment {
        // A promoted property shares the constructor docblock, which cannot
        // carry its mapping.
        if !property.promoted {
            collect_tags(annotation_pattern(), doc, &mut tags);
        }
    }
    for attribute in &property.attributes {
        collect_tags(attribute_pattern(), attribute, &mut tags);
    }
    tags
}

/// Normalize `Types::DATETIME_MUTABLE`, `Type::INTEGER` or `"integer"`.
fn normalize_column_type(value: &str) -> String {
    let name = match value.rsplit_once("::") {
        Some((_, constant)) => constant,
        None => value,
    };
    let name = name.to_ascii_lowercase();
    name.strip_suffix("_mutable")
        .map(str::to_string)
        .unwrap_or(name)
}

/// Map a DBAL column type to a descriptor. Custom types are not understood.
pub fn column_type(dbal_type: &str) -> Option<TypeDescriptor> {
    let descriptor = match normalize_column_type(dbal_type).as_str() {
        "smallint" | "integer" => TypeDescriptor::int(),
        "bigint" | "decimal" | "string" | "text" | "guid" | "ascii_string" => {
            TypeDescriptor::string()
        }
        "float" => TypeDescriptor::float(),
        "boolean" => TypeDescriptor::bool(),
        "date" | "datetime" | "datetimetz" | "time" => TypeDescriptor::object("DateTime"),
        "date_immutable" | "datetime_immutable" | "datetimetz_immutable" | "time_immutable" => {
            TypeDescriptor::object("DateTimeImmutable")
        }
        "dateinterval" => TypeDescriptor::object("DateInterval"),
        "array" | "simple_array" | "json" | "json_array" => TypeDescriptor::array(),
        "blob" | "binary" => TypeDescriptor::unknown("resource"),
        "object" => TypeDescriptor::unknown("object"),
        _ => return None,
    };
    Some(descriptor)
}

/// Reads Doctrine ORM column and association mappings.
#[derive(Debug, Default, Clone, Copy)]
pub struct DoctrineExtractor;

impl DoctrineExtractor {
    /// Resolve `targetEntity`. String targets without a namespace are relative
    /// to the entity's namespace; `X::class` follows PHP name resolution.
    fn target_entity(&self, class: &PhpClass, property: &PhpProperty, tag: &MappingTag) -> Option<String> {
        match tag.argument("targetEntity") {
            Some(target) => match target.strip_suffix("::class") {
                Some(name) => class.resolve_name(name),
                None if target.contains('\\') => Some(target.trim_start_matches('\\').to_string()),
                None => Some(class.context.qualify(target)),
            },
            // Attribute mappings may omit the target and rely on the property type.
            None => {
                let native = property.native_type.as_deref()?;
                parse_type(native, class)
                    .into_iter()
                    .find(|t| t.builtin_kind == BuiltinKind::Object)
                    .and_then(|t| t.class_name)
            }
        }
    }
}

impl TypeExtractor for DoctrineExtractor {
    fn name(&self) -> &'static str {
        "doctrine"
    }

    fn extract_types(&self, class: &PhpClass, property_name: &str) -> Option<Vec<TypeDescriptor>> {
        let property = class.property(property_name)?;
        let tags = mapping_tags(property);

        let join_nullable = tags
            .iter()
            .find(|t| t.name == "JoinColumn")
            .and_then(|t| t.flag("nullable"))
            .unwrap_or(true);

        for tag in &tags {
            let descriptor = match tag.name.as_str() {
                "Column" => {
                    let dbal_type = tag.argument("type").unwrap_or(DEFAULT_COLUMN_TYPE);
                    column_type(dbal_type)?
                        .with_nullable(tag.flag("nullable").unwrap_or(false))
                }
                "ManyToOne" | "OneToOne" => {
                    TypeDescriptor::object(self.target_entity(class, property, tag)?)
                        .with_nullable(join_nullable)
                }
                "OneToMany" | "ManyToMany" => {
                    let target = self.target_entity(class, property, tag)?;
                    TypeDescriptor::object(DOCTRINE_COLLECTION)
                        .with_collection_value(TypeDescriptor::object(target))
                }
                _ => continue,
            };
            return Some(vec![descriptor]);
        }

        None
    }
}
