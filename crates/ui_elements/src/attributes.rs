//! Canonical attribute storage for element hosts.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered attribute store backing every element.
///
/// Attributes are the element's only state: typed property views read and write through this map.
pub struct AttributeMap {
    entries: BTreeMap<String, String>,
}

impl AttributeMap {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw attribute value, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns the attribute value, falling back to `default` when absent or empty.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        match self.get(name) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }

    /// Presence check for boolean attributes.
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Sets an attribute and returns the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    /// Removes an attribute and returns the previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    /// Number of attributes present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no attributes are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.set(name, value);
        }
        map
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One observed attribute mutation, as delivered to an element behavior.
pub struct AttributeChange {
    /// Attribute name.
    pub name: String,
    /// Value before the mutation (`None` when the attribute was absent).
    pub old_value: Option<String>,
    /// Value after the mutation (`None` when the attribute was removed).
    pub new_value: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_value_falls_back_to_default_but_still_counts_as_present() {
        let mut attrs = AttributeMap::new();
        attrs.set("variant", "");
        assert_eq!(attrs.get_or("variant", "primary"), "primary");
        assert!(attrs.has("variant"));
    }

    #[test]
    fn set_and_remove_report_previous_values() {
        let mut attrs = AttributeMap::new();
        assert_eq!(attrs.set("size", "large"), None);
        assert_eq!(attrs.set("size", "small"), Some("large".to_string()));
        assert_eq!(attrs.remove("size"), Some("small".to_string()));
        assert_eq!(attrs.remove("size"), None);
        assert!(attrs.is_empty());
    }

    #[test]
    fn iteration_is_name_ordered() {
        let attrs: AttributeMap = [("size", "small"), ("color", "info")].into_iter().collect();
        let names: Vec<_> = attrs.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["color", "size"]);
    }
}
