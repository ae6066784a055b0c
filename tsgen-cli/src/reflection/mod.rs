//! Property metadata read from parsed PHP classes.
//!
//! [`PropertyInfo`] holds every parsed class and answers the two questions
//! the definition builder asks: which properties a class has, and which
//! candidate types each property declares. Types come from a chain of
//! [`TypeExtractor`]s; the first one that reports anything wins.

pub mod doctrine;
pub mod native;
pub mod phpdoc;
pub mod types;

pub use doctrine::DoctrineExtractor;
pub use native::NativeTypeExtractor;
pub use phpdoc::PhpDocExtractor;

use crate::config::ReflectionConfig;
use crate::error::ReflectionError;
use crate::parser::{PhpClass, PhpMethod, Visibility};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tsgen::{ClassDescriptor, PropertyLister, TypeDescriptor, TypeSource};

/// Method prefixes that expose a property for reading.
pub const ACCESSOR_PREFIXES: &[&str] = &["get", "is", "has", "can"];

/// Method prefix that writes a whole property.
pub const SETTER_PREFIX: &str = "set";

/// Method prefixes that write a property. `add` and `remove` take one
/// element of a collection property.
pub const MUTATOR_PREFIXES: &[&str] = &[SETTER_PREFIX, "add", "remove"];

/// A source of candidate types for a property.
pub trait TypeExtractor: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Candidate types, or `None` when this source knows nothing about the property.
    fn extract_types(&self, class: &PhpClass, property: &str) -> Option<Vec<TypeDescriptor>>;
}

fn is_accessor(method: &PhpMethod) -> bool {
    method.visibility == Visibility::Public && !method.is_static && method.required_parameters == 0
}

fn is_mutator(method: &PhpMethod) -> bool {
    method.visibility == Visibility::Public && !method.is_static && method.required_parameters >= 1
}

/// The public getter of `property`, e.g. `getTotal()` or `isPaid()`.
pub(crate) fn find_accessor<'c>(class: &'c PhpClass, property: &str) -> Option<&'c PhpMethod> {
    ACCESSOR_PREFIXES.iter().find_map(|prefix| {
        class
            .method(&format!("{prefix}{property}"))
            .filter(|m| is_accessor(m))
    })
}

/// The public setter of `property`.
pub(crate) fn find_mutator<'c>(class: &'c PhpClass, property: &str) -> Option<&'c PhpMethod> {
    class
        .method(&format!("{SETTER_PREFIX}{property}"))
        .filter(|m| is_mutator(m))
}

/// Split `method` into a matching prefix and the non-empty rest. The rest
/// must not start lowercase, so `issue()` has no prefix.
fn split_prefix<'m>(method: &'m str, prefixes: &[&'static str]) -> Option<(&'static str, &'m str)> {
    prefixes.iter().find_map(|&prefix| {
        let head = method.get(..prefix.len())?;
        let rest = method.get(prefix.len()..)?;
        let first = rest.chars().next()?;
        (head.eq_ignore_ascii_case(prefix) && !first.is_lowercase()).then_some((prefix, rest))
    })
}

/// Property name exposed by an accessor or mutator method, if it is one.
///
/// The name after the prefix is kept as-is when the class declares it or when
/// it starts with two capitals (`getURL` gives `URL`), otherwise its first
/// letter is lowercased (`getCreatedAt` gives `createdAt`). `addItem` and
/// `removeItem` name the declared plural property (`items`) when there is one.
pub fn method_property_name(class: &PhpClass, method: &PhpMethod) -> Option<String> {
    let (prefix, rest) = if is_accessor(method) {
        split_prefix(&method.name, ACCESSOR_PREFIXES)?
    } else if is_mutator(method) {
        split_prefix(&method.name, MUTATOR_PREFIXES)?
    } else {
        return None;
    };

    if matches!(prefix, "add" | "remove") {
        if let Some(plural) = plural_property(class, rest) {
            return Some(plural);
        }
    }

    if class.property(rest).is_some() || starts_with_two_capitals(rest) {
        return Some(rest.to_string());
    }
    Some(lcfirst(rest))
}

/// A declared property whose name is a plural of `singular`.
fn plural_property(class: &PhpClass, singular: &str) -> Option<String> {
    let singular = singular.to_lowercase();
    let stem = singular.strip_suffix('y');
    class
        .properties
        .iter()
        .map(|p| p.name.as_str())
        .find(|name| {
            let name = name.to_lowercase();
            name == format!("{singular}s")
                || name == format!("{singular}es")
                || stem.is_some_and(|stem| name == format!("{stem}ies"))
        })
        .map(str::to_string)
}

fn starts_with_two_capitals(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(a), Some(b)) if a.is_uppercase() && b.is_uppercase())
}

fn lcfirst(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Registry of parsed classes plus the extractor chain.
#[derive(Debug)]
pub struct PropertyInfo {
    classes: Vec<PhpClass>,
    index: HashMap<String, usize>,
    extractors: Vec<Box<dyn TypeExtractor>>,
    include_accessors: bool,
}

impl Default for PropertyInfo {
    fn default() -> Self {
        Self::from_config(&ReflectionConfig::default())
    }
}

impl PropertyInfo {
    /// Create a provider with an explicit extractor chain.
    pub fn new(extractors: Vec<Box<dyn TypeExtractor>>, include_accessors: bool) -> Self {
        Self {
            classes: Vec::new(),
            index: HashMap::new(),
            extractors,
            include_accessors,
        }
    }

    /// Create a provider with the extractors enabled in `config`, in the
    /// order PHPDoc, native declarations, Doctrine mapping.
    pub fn from_config(config: &ReflectionConfig) -> Self {
        let mut extractors: Vec<Box<dyn TypeExtractor>> = Vec::new();
        if config.phpdoc {
            extractors.push(Box::new(PhpDocExtractor));
        }
        if config.native {
            extractors.push(Box::new(NativeTypeExtractor));
        }
        if config.doctrine {
            extractors.push(Box::new(DoctrineExtractor));
        }
        Self::new(extractors, config.include_accessors)
    }

    /// Add classes to the registry.
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = PhpClass>) -> Self {
        for class in classes {
            self.register(class);
        }
        self
    }

    /// Add one class. A class with an already registered name replaces it.
    pub fn register(&mut self, class: PhpClass) {
        match self.index.get(&class.fqcn) {
            Some(&position) => {
                tracing::warn!(
                    class = %class.fqcn,
                    first = %self.classes[position].file.display(),
                    second = %class.file.display(),
                    "class declared twice, keeping the later declaration"
                );
                self.classes[position] = class;
            }
            None => {
                self.index.insert(class.fqcn.clone(), self.classes.len());
                self.classes.push(class);
            }
        }
    }

    /// Look up a class by fully-qualified name.
    pub fn class(&self, fqcn: &str) -> Option<&PhpClass> {
        self.index.get(fqcn).map(|&i| &self.classes[i])
    }

    /// Registered classes in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &PhpClass> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Names of the active extractors, in chain order.
    pub fn extractor_names(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    /// The class followed by its registered ancestors, nearest first.
    /// Unregistered parents end the chain.
    pub fn lineage<'a>(&'a self, class: &'a PhpClass) -> Vec<&'a PhpClass> {
        let mut lineage = vec![class];
        let mut seen = HashSet::from([class.fqcn.as_str()]);
        let mut current = class;

        while let Some(parent) = current.parent.as_deref() {
            let Some(parent) = self.class(parent) else {
                tracing::debug!(class = %current.fqcn, parent, "parent class not registered");
                break;
            };
            if !seen.insert(parent.fqcn.as_str()) {
                tracing::warn!(class = %class.fqcn, "inheritance cycle");
                break;
            }
            lineage.push(parent);
            current = parent;
        }

        lineage
    }

    /// Property names of a class and its ancestors.
    ///
    /// Declared properties come first, then promoted ones, each walking from
    /// the class up through its parents. Names derived from accessors and
    /// mutators follow in the same order. Private ancestor properties are not
    /// visible and static properties are never listed.
    pub fn properties_of(&self, class: &PhpClass) -> Vec<String> {
        let lineage = self.lineage(class);
        let mut names: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        };

        for promoted in [false, true] {
            for (depth, owner) in lineage.iter().enumerate() {
                owner
                    .properties
                    .iter()
                    .filter(|p| !p.is_static && p.promoted == promoted)
                    .filter(|p| depth == 0 || p.visibility != Visibility::Private)
                    .for_each(|p| push(&p.name));
            }
        }

        if self.include_accessors {
            for owner in &lineage {
                for method in &owner.methods {
                    if let Some(name) = method_property_name(owner, method) {
                        push(&name);
                    }
                }
            }
        }

        names
    }

    /// The nearest class in the lineage that declares `property` or derives
    /// it from one of its methods.
    fn declaring_class<'a>(&'a self, class: &'a PhpClass, property: &str) -> &'a PhpClass {
        let lineage = self.lineage(class);
        lineage
            .iter()
            .enumerate()
            .find(|(depth, owner)| {
                owner
                    .property(property)
                    .is_some_and(|p| *depth == 0 || p.visibility != Visibility::Private)
            })
            .or_else(|| {
                lineage.iter().enumerate().find(|(_, owner)| {
                    owner
                        .methods
                        .iter()
                        .any(|m| method_property_name(owner, m).as_deref() == Some(property))
                })
            })
            .map_or(class, |(_, owner)| *owner)
    }

    fn lookup(&self, class: &ClassDescriptor) -> Result<&PhpClass, ReflectionError> {
        self.class(&class.fqcn)
            .ok_or_else(|| ReflectionError::unknown_class(&class.fqcn))
    }
}

impl PropertyLister for PropertyInfo {
    type Error = ReflectionError;

    fn list_properties(&self, class: &ClassDescriptor) -> Result<Vec<String>, Self::Error> {
        let php_class = self.lookup(class)?;
        Ok(self.properties_of(php_class))
    }
}

impl TypeSource for PropertyInfo {
    type Error = ReflectionError;

    fn candidate_types(
        &self,
        class: &ClassDescriptor,
        property: &str,
    ) -> Result<Vec<TypeDescriptor>, Self::Error> {
        let php_class = self.lookup(class)?;
        if !self.properties_of(php_class).iter().any(|p| p == property) {
            return Err(ReflectionError::unknown_property(&class.fqcn, property));
        }

        let owner = self.declaring_class(php_class, property);
        for extractor in &self.extractors {
            if let Some(types) = extractor.extract_types(owner, property) {
                if !types.is_empty() {
                    tracing::debug!(
                        class = %class.fqcn,
                        declared_in = %owner.fqcn,
                        property,
                        extractor = extractor.name(),
                        "found candidate types"
                    );
                    return Ok(types);
                }
            }
        }

        tracing::debug!(class = %class.fqcn, property, "no type information");
        Ok(Vec::new())
    }
}
