//! PHPDoc extractor: `@var`, `@param` and `@return` tags.

use super::types::parse_type;
use super::{find_accessor, find_mutator, TypeExtractor};
use crate::parser::PhpClass;
use regex::Regex;
use std::sync::OnceLock;
use tsgen::TypeDescriptor;

/// Kind of a type-carrying docblock tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Var,
    Param,
    Return,
}

/// One `@var`/`@param`/`@return` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    pub kind: TagKind,
    pub type_expression: String,
    /// Variable named after the type, without the `$`.
    pub variable: Option<String>,
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"@(var|param|return)\b").unwrap())
}

fn variable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[ \t]*&?[ \t]*(?:\.\.\.)?\$(\w+)").unwrap())
}

/// Strip the comment delimiters and leading asterisks.
fn clean(doc: &str) -> String {
    doc.trim()
        .trim_start_matches("/**")
        .trim_end_matches("*/")
        .lines()
        .map(|line| line.trim_start().trim_start_matches('*'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read a type expression: everything up to whitespace outside of brackets.
fn read_type_expression(text: &str) -> &str {
    let mut depth = 0i32;
    for (i, c) in text.char_indices() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth -= 1,
            '\n' => return &text[..i],
            c if c.is_whitespace() && depth <= 0 => return &text[..i],
            _ => {}
        }
    }
    text
}

/// Parse the type-carrying tags of a docblock, in order.
pub fn parse_tags(doc: &str) -> Vec<DocTag> {
    let (tags, variables) = (tag_pattern(), variable_pattern());
    let text = clean(doc);
    let mut result = Vec::new();

    for captures in tags.captures_iter(&text) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let kind = match name.as_str() {
            "var" => TagKind::Var,
            "param" => TagKind::Param,
            _ => TagKind::Return,
        };

        let rest = text[whole.end()..].trim_start_matches([' ', '\t']);
        let type_expression = read_type_expression(rest);
        if type_expression.is_empty() || type_expression.starts_with('$') {
            continue;
        }

        let variable = variables
            .captures(&rest[type_expression.len()..])
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        result.push(DocTag {
            kind,
            type_expression: type_expression.to_string(),
            variable,
        });
    }

    result
}

/// Reads types from docblocks.
///
/// A declared property is read from its `@var` tag, a promoted property from
/// the constructor's `@param` tag for it. Without one, the accessor's
/// `@return` and then the mutator's `@param` are tried.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhpDocExtractor;

impl PhpDocExtractor {
    fn from_property(&self, class: &PhpClass, property: &str) -> Option<Vec<TypeDescriptor>> {
        let declared = class.property(property)?;
        let doc = declared.doc_comment.as_deref()?;
        let wanted = if declared.promoted {
            TagKind::Param
        } else {
            TagKind::Var
        };

        let tag = parse_tags(doc).into_iter().find(|tag| {
            tag.kind == wanted
                && match &tag.variable {
                    Some(variable) => variable == property,
                    None => wanted == TagKind::Var,
                }
        })?;

        non_empty(parse_type(&tag.type_expression, class))
    }

    fn from_method_tag(
        &self,
        class: &PhpClass,
        doc: Option<&str>,
        kind: TagKind,
    ) -> Option<Vec<TypeDescriptor>> {
        let tag = parse_tags(doc?).into_iter().find(|tag| tag.kind == kind)?;
        non_empty(parse_type(&tag.type_expression, class))
    }
}

impl TypeExtractor for PhpDocExtractor {
    fn name(&self) -> &'static str {
        "phpdoc"
    }

    fn extract_types(&self, class: &PhpClass, property: &str) -> Option<Vec<TypeDescriptor>> {
        self.from_property(class, property)
            .or_else(|| {
                let accessor = find_accessor(class, property)?;
                self.from_method_tag(class, accessor.doc_comment.as_deref(), TagKind::Return)
            })
            .or_else(|| {
                let mutator = find_mutator(class, property)?;
                self.from_method_tag(class, mutator.doc_comment.as_deref(), TagKind::Param)
            })
    }
}

fn non_empty(types: Vec<TypeDescriptor>) -> Option<Vec<TypeDescriptor>> {
    (!types.is_empty()).then_some(types)
}
