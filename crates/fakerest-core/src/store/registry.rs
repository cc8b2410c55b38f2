//! Named collections owned by a single server.

use crate::matching::{ResourceMatch, ResourcePattern};
use crate::store::{Collection, CollectionError};

/// Collection registered under a resource name, with its compiled path matcher.
#[derive(Debug, Clone)]
pub struct RegisteredCollection {
    pattern: ResourcePattern,
    collection: Collection,
}

impl RegisteredCollection {
    pub fn name(&self) -> &str {
        self.pattern.name()
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }
}

/// Registry mapping resource names to collections.
///
/// Iteration follows registration order, so URL matching is deterministic even
/// when names could overlap. Re-registering a name replaces the collection but
/// keeps its original position.
#[derive(Debug, Clone)]
pub struct CollectionRegistry {
    /// Prefix of every resource URL
    base_url: String,
    /// Registered collections in registration order
    entries: Vec<RegisteredCollection>,
}

impl CollectionRegistry {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            entries: Vec::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register `collection` under `name`, returning the collection it replaced.
    pub fn insert(
        &mut self,
        name: &str,
        collection: Collection,
    ) -> Result<Option<Collection>, CollectionError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name() == name) {
            return Ok(Some(std::mem::replace(&mut entry.collection, collection)));
        }
        let pattern = ResourcePattern::new(&self.base_url, name).map_err(|err| {
            CollectionError::InvalidName {
                name: name.to_string(),
                reason: err.to_string(),
            }
        })?;
        self.entries.push(RegisteredCollection {
            pattern,
            collection,
        });
        Ok(None)
    }

    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.entries
            .iter()
            .find(|e| e.name() == name)
            .map(|e| &e.collection)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.entries
            .iter_mut()
            .find(|e| e.name() == name)
            .map(|e| &mut e.collection)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resource names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(RegisteredCollection::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCollection> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First registered resource whose path pattern matches `url`.
    pub fn match_url(&self, url: &str) -> Option<ResourceMatch> {
        self.entries.iter().find_map(|e| e.pattern.matches(url))
    }
}

impl Default for CollectionRegistry {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn seeded(values: Vec<serde_json::Value>) -> Collection {
        Collection::with_records(values, "id").expect("Should seed")
    }

    #[rstest]
    fn test_registry_new() {
        let registry = CollectionRegistry::new("/api");
        assert_eq!(registry.base_url(), "/api");
        assert!(registry.is_empty());
        assert_eq!(registry.names(), Vec::<&str>::new());
    }

    #[rstest]
    fn test_insert_and_get() {
        let mut registry = CollectionRegistry::default();
        let previous = registry
            .insert("books", seeded(vec![json!({"title": "War and Peace"})]))
            .expect("Should register");
        assert!(previous.is_none());
        assert!(registry.contains("books"));
        assert_eq!(registry.get("books").map(Collection::len), Some(1));
        assert!(registry.get("authors").is_none());
    }

    #[rstest]
    fn test_names_follow_registration_order() {
        let mut registry = CollectionRegistry::default();
        registry.insert("zebras", Collection::default()).expect("Should register");
        registry.insert("apples", Collection::default()).expect("Should register");
        registry.insert("mangos", Collection::default()).expect("Should register");
        assert_eq!(registry.names(), vec!["zebras", "apples", "mangos"]);
    }

    #[rstest]
    fn test_reinsert_replaces_in_place() {
        let mut registry = CollectionRegistry::default();
        registry.insert("books", Collection::default()).expect("Should register");
        registry.insert("authors", Collection::default()).expect("Should register");
        let previous = registry.insert("books", seeded(vec![json!({}), json!({})])).expect("Should register");
        assert_eq!(previous.map(|c| c.len()), Some(0));
        assert_eq!(registry.names(), vec!["books", "authors"]);
        assert_eq!(registry.get("books").map(Collection::len), Some(2));
        assert_eq!(registry.len(), 2);
    }

    #[rstest]
    fn test_get_mut_mutates_owned_collection() {
        let mut registry = CollectionRegistry::default();
        registry.insert("books", Collection::default()).expect("Should register");
        registry
            .get_mut("books")
            .expect("Should exist")
            .add_one(serde_json::Map::new())
            .expect("Should add");
        assert_eq!(registry.get("books").map(Collection::len), Some(1));
    }

    #[rstest]
    #[case("/books", Some(("books", None)))]
    #[case("/books/3", Some(("books", Some("3"))))]
    #[case("/authors?sort=name", Some(("authors", None)))]
    #[case("/publishers", None)]
    fn test_match_url(#[case] url: &str, #[case] expected: Option<(&str, Option<&str>)>) {
        let mut registry = CollectionRegistry::default();
        registry.insert("books", Collection::default()).expect("Should register");
        registry.insert("authors", Collection::default()).expect("Should register");
        let result = registry.match_url(url);
        assert_eq!(
            result.map(|m| (m.name, m.identifier)),
            expected.map(|(n, id)| (n.to_string(), id.map(str::to_string)))
        );
    }

    #[rstest]
    fn test_match_url_uses_base_url() {
        let mut registry = CollectionRegistry::new("http://localhost:3000");
        registry.insert("books", Collection::default()).expect("Should register");
        assert!(registry.match_url("http://localhost:3000/books").is_some());
        assert!(registry.match_url("/books").is_none());
    }

    #[rstest]
    fn test_iter_exposes_entries() {
        let mut registry = CollectionRegistry::default();
        registry.insert("books", seeded(vec![json!({})])).expect("Should register");
        let entry = registry.iter().next().expect("Should have entry");
        assert_eq!(entry.name(), "books");
        assert_eq!(entry.collection().len(), 1);
    }

    #[rstest]
    fn test_insert_rejects_uncompilable_name() {
        let mut registry = CollectionRegistry::default();
        let name = "x".repeat(1 << 20);
        let result = registry.insert(&name, Collection::default());
        assert!(matches!(result, Err(CollectionError::InvalidName { .. })));
        assert!(registry.is_empty());
    }
}
