//! Property storage and string interpolation
//!
//! Properties are the build's shared named values. Any string handed to the
//! store may reference other properties with the `${name}` syntax; references
//! are expanded recursively and a reference chain that revisits a name fails
//! instead of looping.

use crate::error::{PropertyError, PropertyResult};
use regex::Regex;
use std::collections::HashMap;

/// Pattern for `${name}` reference tokens. The name is any non-empty
/// sequence of characters other than `}`, so an empty `${}` passes through
/// untouched.
const TOKEN_PATTERN: &str = r"\$\{([^}]+)\}";

/// Append-only mapping from property names to string values
///
/// Values are stored raw; expansion happens on every read, so a property may
/// reference names that are added later in the same invocation.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    values: HashMap<String, String>,
    token: Regex,
}

impl PropertyStore {
    /// Create an empty store
    pub fn new() -> Self {
        PropertyStore {
            values: HashMap::new(),
            token: Regex::new(TOKEN_PATTERN).unwrap(),
        }
    }

    /// Add a property
    ///
    /// Properties are append-only: adding a name that is already present
    /// fails, there is no silent overwrite.
    pub fn add(&mut self, name: &str, value: &str) -> PropertyResult<()> {
        if self.values.contains_key(name) {
            return Err(PropertyError::Duplicate(name.to_string()));
        }
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Check whether a property is defined, without expanding it
    pub fn exists(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Get a property value with all `${name}` references expanded
    pub fn get(&self, name: &str) -> PropertyResult<String> {
        let raw = self
            .values
            .get(name)
            .ok_or_else(|| PropertyError::Undefined(name.to_string()))?
            .clone();

        // Seed the expansion chain with the property itself so that a value
        // referencing its own name is reported as a cycle, not a blowup.
        let mut expanding = vec![name.to_string()];
        self.expand(&raw, &mut expanding)
    }

    /// Remove a property, returning its raw (unexpanded) value
    pub fn remove(&mut self, name: &str) -> PropertyResult<String> {
        self.values
            .remove(name)
            .ok_or_else(|| PropertyError::Undefined(name.to_string()))
    }

    /// Expand every `${name}` reference in an arbitrary string
    ///
    /// This is the primitive that `get` is built on. Referencing a name that
    /// is not defined (directly or through another property's value) is an
    /// error; so is a reference chain that revisits a name.
    pub fn filter(&self, input: &str) -> PropertyResult<String> {
        let mut expanding = Vec::new();
        self.expand(input, &mut expanding)
    }

    /// Bulk-add a mapping of properties
    ///
    /// The merge is atomic: every key is checked against the uniqueness
    /// contract first, and on any duplicate the store is left unchanged.
    pub fn merge(&mut self, properties: HashMap<String, String>) -> PropertyResult<()> {
        for name in properties.keys() {
            if self.values.contains_key(name) {
                return Err(PropertyError::Duplicate(name.clone()));
            }
        }
        self.values.extend(properties);
        Ok(())
    }

    /// Number of defined properties
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Recursive expansion with an explicit chain of names currently being
    /// expanded
    ///
    /// The loop finds the leftmost token, fully resolves the referenced
    /// value (recursively, sharing `expanding`), splices the result in place
    /// of the token, and rescans. A name is pushed onto `expanding` only for
    /// the duration of its own value's expansion, so the same name may appear
    /// again in a sibling position without tripping the cycle check.
    fn expand(&self, input: &str, expanding: &mut Vec<String>) -> PropertyResult<String> {
        let mut result = input.to_string();

        while let Some(token) = self.token.find(&result) {
            let range = token.range();
            // Token shape is ${name}; strip the two-byte prefix and the brace.
            let name = result[range.start + 2..range.end - 1].to_string();

            if expanding.iter().any(|n| *n == name) {
                let mut chain = expanding.clone();
                chain.push(name);
                return Err(PropertyError::Cycle(chain));
            }

            let raw = self
                .values
                .get(&name)
                .ok_or_else(|| PropertyError::Undefined(name.clone()))?
                .clone();

            expanding.push(name);
            let resolved = self.expand(&raw, expanding)?;
            expanding.pop();

            result.replace_range(range, &resolved);
        }

        Ok(result)
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(pairs: &[(&str, &str)]) -> PropertyStore {
        let mut store = PropertyStore::new();
        for (name, value) in pairs {
            store.add(name, value).unwrap();
        }
        store
    }

    #[test]
    fn test_filter_without_references() {
        let store = PropertyStore::new();
        let result = store.filter("no references here").unwrap();
        assert_eq!(result, "no references here");
    }

    #[test]
    fn test_filter_single_reference() {
        let store = store(&[("name", "world")]);
        assert_eq!(store.filter("hello ${name}!").unwrap(), "hello world!");
    }

    #[test]
    fn test_filter_multiple_references() {
        let store = store(&[("one", "two"), ("three", "${one}")]);
        let result = store.filter("test ${one} test ${three} test").unwrap();
        assert_eq!(result, "test two test two test");
    }

    #[test]
    fn test_filter_nested_reference() {
        let store = store(&[("inner", "value"), ("outer", "-${inner}-")]);
        assert_eq!(store.filter("${outer}").unwrap(), "-value-");
    }

    #[test]
    fn test_filter_sibling_repeats_allowed() {
        let store = store(&[("a", "x")]);
        assert_eq!(store.filter("${a} ${a} ${a}").unwrap(), "x x x");
    }

    #[test]
    fn test_filter_acyclic_chain_terminates_fully_expanded() {
        let store = store(&[("a", "${b}/${b}"), ("b", "${c}"), ("c", "end")]);
        let result = store.filter("${a}").unwrap();
        assert_eq!(result, "end/end");
        assert!(!result.contains("${"));
    }

    #[test]
    fn test_filter_undefined_reference() {
        let store = PropertyStore::new();
        let result = store.filter("${missing}");
        assert!(matches!(result, Err(PropertyError::Undefined(name)) if name == "missing"));
    }

    #[test]
    fn test_filter_transitively_undefined_reference() {
        let store = store(&[("a", "${gone}")]);
        let result = store.filter("${a}");
        assert!(matches!(result, Err(PropertyError::Undefined(name)) if name == "gone"));
    }

    #[test]
    fn test_filter_direct_cycle() {
        let store = store(&[("a", "${a}")]);
        let result = store.filter("${a}");
        assert!(matches!(result, Err(PropertyError::Cycle(_))));
    }

    #[test]
    fn test_filter_mutual_cycle_reports_chain() {
        let store = store(&[("a", "${b}"), ("b", "${a}")]);
        match store.filter("${a}") {
            Err(PropertyError::Cycle(chain)) => {
                assert_eq!(chain, vec!["a", "b", "a"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_empty_token_left_verbatim() {
        let store = PropertyStore::new();
        assert_eq!(store.filter("value: ${}").unwrap(), "value: ${}");
    }

    #[test]
    fn test_get_expands_value() {
        let store = store(&[("greeting", "hello ${name}"), ("name", "build")]);
        assert_eq!(store.get("greeting").unwrap(), "hello build");
    }

    #[test]
    fn test_get_undefined() {
        let store = PropertyStore::new();
        assert!(matches!(
            store.get("nope"),
            Err(PropertyError::Undefined(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_get_self_referential_value_is_cycle() {
        let store = store(&[("a", "prefix ${a}")]);
        assert!(matches!(store.get("a"), Err(PropertyError::Cycle(_))));
    }

    #[test]
    fn test_add_duplicate() {
        let mut store = PropertyStore::new();
        store.add("a", "1").unwrap();
        let result = store.add("a", "2");
        assert!(matches!(result, Err(PropertyError::Duplicate(name)) if name == "a"));
        // The first value wins.
        assert_eq!(store.get("a").unwrap(), "1");
    }

    #[test]
    fn test_exists() {
        let store = store(&[("a", "1")]);
        assert!(store.exists("a"));
        assert!(!store.exists("b"));
    }

    #[test]
    fn test_remove() {
        let mut store = store(&[("a", "1")]);
        assert_eq!(store.remove("a").unwrap(), "1");
        assert!(!store.exists("a"));
    }

    #[test]
    fn test_remove_undefined() {
        let mut store = PropertyStore::new();
        assert!(matches!(
            store.remove("a"),
            Err(PropertyError::Undefined(_))
        ));
    }

    #[test]
    fn test_merge_adds_all() {
        let mut store = PropertyStore::new();
        let mut incoming = HashMap::new();
        incoming.insert("a".to_string(), "1".to_string());
        incoming.insert("b".to_string(), "2".to_string());

        store.merge(incoming).unwrap();
        assert_eq!(store.get("a").unwrap(), "1");
        assert_eq!(store.get("b").unwrap(), "2");
    }

    #[test]
    fn test_merge_is_atomic_on_duplicate() {
        let mut store = store(&[("b", "old")]);
        let mut incoming = HashMap::new();
        incoming.insert("a".to_string(), "1".to_string());
        incoming.insert("b".to_string(), "new".to_string());

        let result = store.merge(incoming);
        assert!(matches!(result, Err(PropertyError::Duplicate(name)) if name == "b"));
        // Nothing from the failed merge landed.
        assert!(!store.exists("a"));
        assert_eq!(store.get("b").unwrap(), "old");
        assert_eq!(store.len(), 1);
    }
}
