//! Conversion of PHP type expressions into type descriptors.
//!
//! Handles both native declarations (`?int`, `int|string`, `(A&B)|null`) and
//! the richer PHPDoc dialect (`Item[]`, `array<int, Item>`, `list<string>`,
//! `Collection<int, Item>`, `positive-int`, literal types).

use crate::parser::PhpClass;
use tsgen::{BuiltinKind, TypeDescriptor};

/// Parse a type expression written inside `class`.
///
/// `null` members fold into the nullability of the others; a lone `null`
/// yields a single null descriptor. Members that cannot be understood are
/// dropped.
pub fn parse_type(expression: &str, class: &PhpClass) -> Vec<TypeDescriptor> {
    let expression = strip_outer_parens(expression.trim());
    let (expression, mut nullable) = match expression.strip_prefix('?') {
        Some(rest) => (rest.trim(), true),
        None => (expression, false),
    };

    let mut types = Vec::new();
    let mut has_null = false;
    for member in split_top_level(expression, '|') {
        let member = member.trim();
        if member.is_empty() {
            continue;
        }
        if member.eq_ignore_ascii_case("null") {
            has_null = true;
            continue;
        }
        if let Some(descriptor) = parse_member(member, class) {
            types.push(descriptor);
        }
    }

    if has_null && types.is_empty() {
        return vec![TypeDescriptor::null()];
    }

    nullable |= has_null;
    if nullable {
        types = types.into_iter().map(TypeDescriptor::nullable).collect();
    }
    types
}

fn parse_member(member: &str, class: &PhpClass) -> Option<TypeDescriptor> {
    if member.starts_with('(') && member.ends_with(')') {
        let inner = strip_outer_parens(member);
        // `(A)(B)` and `(A)&(B)` have no single enclosing pair.
        if inner.len() == member.len() {
            return Some(TypeDescriptor::unknown(member));
        }
        return parse_type(inner, class).into_iter().next();
    }

    if let Some(element) = member.strip_suffix("[]") {
        let element = parse_member(element.trim(), class);
        return Some(array_of(element));
    }

    if member.contains('&') && split_top_level(member, '&').len() > 1 {
        return Some(TypeDescriptor::unknown(member));
    }

    if let Some(open) = member.find('<') {
        if member.ends_with('>') {
            let base = member[..open].trim();
            let arguments = &member[open + 1..member.len() - 1];
            return parse_generic(base, arguments, class);
        }
        return None;
    }

    if member.contains('{') {
        // Array and object shapes.
        let base = member.split('{').next().unwrap_or_default().trim();
        return match base.to_ascii_lowercase().as_str() {
            "array" | "list" | "non-empty-array" | "non-empty-list" => Some(TypeDescriptor::array()),
            _ => Some(TypeDescriptor::unknown(base)),
        };
    }

    if let Some(literal) = parse_literal(member) {
        return Some(literal);
    }

    if let Some(keyword) = parse_keyword(member) {
        return Some(keyword);
    }

    match member.to_ascii_lowercase().as_str() {
        "self" | "static" | "$this" | "parent" => {
            return Some(match class.resolve_name(member) {
                Some(fqcn) => TypeDescriptor::object(fqcn),
                None => TypeDescriptor::unknown(member),
            });
        }
        _ => {}
    }

    if is_class_name(member) {
        return class.resolve_name(member).map(TypeDescriptor::object);
    }

    None
}

fn parse_generic(base: &str, arguments: &str, class: &PhpClass) -> Option<TypeDescriptor> {
    let arguments = split_top_level(arguments, ',');
    let value = arguments.last().and_then(|value| {
        parse_type(value, class).into_iter().next()
    });

    match base.to_ascii_lowercase().as_str() {
        "array" | "list" | "non-empty-array" | "non-empty-list" | "iterable" => Some(array_of(value)),
        "int" => Some(TypeDescriptor::int()),
        "class-string" => Some(TypeDescriptor::string()),
        _ if is_class_name(base) => {
            let collection = class.resolve_name(base).map(TypeDescriptor::object)?;
            Some(match value {
                Some(value) => collection.with_collection_value(value),
                None => collection,
            })
        }
        _ => None,
    }
}

/// Map built-in PHP and PHPDoc keywords.
fn parse_keyword(name: &str) -> Option<TypeDescriptor> {
    let descriptor = match name.to_ascii_lowercase().as_str() {
        "int" | "integer" | "positive-int" | "negative-int" | "non-negative-int"
        | "non-positive-int" | "non-zero-int" => TypeDescriptor::int(),
        "float" | "double" => TypeDescriptor::float(),
        "bool" | "boolean" | "true" | "false" => TypeDescriptor::bool(),
        "string" | "non-empty-string" | "numeric-string" | "class-string" | "literal-string"
        | "callable-string" | "lowercase-string" | "non-falsy-string" | "trait-string"
        | "interface-string" | "enum-string" => TypeDescriptor::string(),
        "array" | "non-empty-array" | "list" | "non-empty-list" => TypeDescriptor::array(),
        "mixed" | "callable" | "iterable" | "resource" | "closed-resource" | "void" | "never"
        | "noreturn" | "never-return" | "object" | "scalar" | "numeric" | "array-key"
        | "callable-object" => TypeDescriptor::unknown(name.to_ascii_lowercase()),
        _ => return None,
    };
    Some(descriptor)
}

fn parse_literal(member: &str) -> Option<TypeDescriptor> {
    if member.len() >= 2
        && ((member.starts_with('\'') && member.ends_with('\''))
            || (member.starts_with('"') && member.ends_with('"')))
    {
        return Some(TypeDescriptor::string());
    }
    if member.parse::<i64>().is_ok() {
        return Some(TypeDescriptor::int());
    }
    if member.contains('.') && member.parse::<f64>().is_ok() {
        return Some(TypeDescriptor::float());
    }
    None
}

/// `mixed` elements carry no information; the array stays untyped.
fn array_of(element: Option<TypeDescriptor>) -> TypeDescriptor {
    match element {
        Some(element) if element.builtin_kind == BuiltinKind::Unknown("mixed".to_string()) => {
            TypeDescriptor::array()
        }
        Some(element) => TypeDescriptor::array_of(element),
        None => TypeDescriptor::array(),
    }
}

fn is_class_name(name: &str) -> bool {
    let trimmed = name.trim_start_matches('\\');
    !trimmed.is_empty()
        && trimmed
            .split('\\')
            .all(|segment| {
                let mut chars = segment.chars();
                chars
                    .next()
                    .is_some_and(|c| c.is_alphabetic() || c == '_' || !c.is_ascii())
                    && chars.all(|c| c.is_alphanumeric() || c == '_' || !c.is_ascii())
            })
}

/// Drop one pair of parentheses wrapping the whole expression.
fn strip_outer_parens(expression: &str) -> &str {
    if !(expression.starts_with('(') && expression.ends_with(')')) {
        return expression;
    }

    let mut depth = 0usize;
    for (i, c) in expression.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && i != expression.len() - 1 {
                    return expression;
                }
            }
            _ => {}
        }
    }
    expression[1..expression.len() - 1].trim()
}

/// Split on `separator` outside of `<>`, `()`, `{}` and `[]` nesting.
pub(crate) fn split_top_level(expression: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in expression.char_indices() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth -= 1,
            c if c == separator && depth == 0 => {
                parts.push(&expression[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&expression[start..]);
    parts
}
