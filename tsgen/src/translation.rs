//! Source-type-name to TypeScript-type-name translation table.
//!
//! | Source name | TypeScript |
//! |-------------|------------|
//! | `DateTime`  | `Date`     |
//! | `int`       | `number`   |
//! | `float`     | `number`   |
//! | `bool`      | `boolean`  |
//!
//! Names absent from the table pass through unchanged, which is how `string`,
//! `null` and class short names such as `Order` keep their spelling.

use std::collections::BTreeMap;

/// Default translations.
pub const DEFAULT_TRANSLATIONS: &[(&str, &str)] = &[
    ("DateTime", "Date"),
    ("int", "number"),
    ("float", "number"),
    ("bool", "boolean"),
];

/// A mapping from source type names to target type names.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TypeTranslation {
    entries: BTreeMap<String, String>,
}

impl Default for TypeTranslation {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_TRANSLATIONS.iter().copied())
    }
}

impl TypeTranslation {
    /// An empty table: every name passes through.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build a table from `(source, target)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Add or replace one translation.
    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.entries.insert(source.into(), target.into());
    }

    /// Return a table with `overrides` merged over this one.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in overrides {
            self.insert(k, v);
        }
        self
    }

    /// Translate a name, falling back to the name itself.
    pub fn translate<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(source, target)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = TypeTranslation::default();
        assert_eq!(table.len(), 4);
        assert_eq!(table.translate("DateTime"), "Date");
        assert_eq!(table.translate("int"), "number");
        assert_eq!(table.translate("float"), "number");
        assert_eq!(table.translate("bool"), "boolean");
    }

    #[test]
    fn test_untranslated_names_pass_through() {
        let table = TypeTranslation::default();
        assert_eq!(table.translate("string"), "string");
        assert_eq!(table.translate("null"), "null");
        assert_eq!(table.translate("Order"), "Order");
        assert_eq!(table.translate("DateTimeImmutable"), "DateTimeImmutable");
    }

    #[test]
    fn test_overrides_extend_and_replace() {
        let table = TypeTranslation::default()
            .with_overrides([("DateTimeImmutable", "Date"), ("int", "bigint")]);
        assert_eq!(table.translate("DateTimeImmutable"), "Date");
        assert_eq!(table.translate("int"), "bigint");
        assert_eq!(table.translate("bool"), "boolean");
    }

    #[test]
    fn test_empty_table() {
        let table = TypeTranslation::empty();
        assert!(table.is_empty());
        assert_eq!(table.translate("int"), "int");
    }
}
