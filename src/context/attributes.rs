//! Request-scoped attribute bag.

use hashbrown::HashMap;
use url::Url;

/// Attributes shared by every stage handling one request, keyed by IRI.
///
/// Writes are first-writer-wins: there is no way to overwrite a value once
/// set, so the order in which stages seed attributes does not matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    values: HashMap<String, Url>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Url> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Store `value` unless `key` already holds one. Returns whether it wrote.
    pub fn set_if_absent(&mut self, key: impl Into<String>, value: Url) -> bool {
        match self.values.entry(key.into()) {
            hashbrown::hash_map::Entry::Occupied(_) => false,
            hashbrown::hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_writer_wins() {
        let mut attrs = Attributes::new();
        let a = Url::parse("http://ex/a").unwrap();
        let b = Url::parse("http://ex/b").unwrap();
        assert!(attrs.set_if_absent("k", a.clone()));
        assert!(!attrs.set_if_absent("k", b));
        assert_eq!(attrs.get("k"), Some(&a));
    }
}
