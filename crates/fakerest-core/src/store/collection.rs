//! Ordered record collection with query and CRUD operations.
//!
//! Records keep insertion order, which is visible to clients: it is the default
//! listing order and breaks ties when sorting.

use crate::matching::{compare_values, record_matches, values_equal};
use crate::query::{Query, SortDirection, Window};
use crate::store::CollectionError;
use crate::types::record::{Record, DEFAULT_IDENTIFIER};
use serde_json::Value;

/// Records of a single resource.
///
/// Identifier values are unique within a collection at all times:
/// - [`Collection::add_one`] rejects an explicit identifier that is already taken
///   and allocates `max(numeric identifiers) + 1` (or `0`) when none is given
/// - [`Collection::update_one`] never changes the stored identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    /// Name of the field holding record identifiers
    identifier_field: String,
    /// Records in insertion order
    records: Vec<Record>,
}

impl Collection {
    /// Create an empty collection using `identifier_field` for identifiers.
    pub fn new(identifier_field: impl Into<String>) -> Self {
        Self {
            identifier_field: identifier_field.into(),
            records: Vec::new(),
        }
    }

    /// Create a collection seeded with `records`, added in order through
    /// [`Collection::add_one`] so that missing identifiers are allocated.
    pub fn with_records<I>(records: I, identifier_field: impl Into<String>) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut collection = Self::new(identifier_field);
        for value in records {
            collection.add_one(into_record(value)?)?;
        }
        Ok(collection)
    }

    pub fn identifier_field(&self) -> &str {
        &self.identifier_field
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records matching the query filter. Sort and windows are ignored.
    pub fn get_count(&self, query: &Query) -> usize {
        match &query.filter {
            Some(filter) => self
                .records
                .iter()
                .filter(|record| record_matches(record, filter))
                .count(),
            None => self.records.len(),
        }
    }

    /// Records matching the query: filter, then stable sort, then `slice`, then `range`.
    pub fn get_all(&self, query: &Query) -> Vec<Record> {
        let mut items: Vec<&Record> = match &query.filter {
            Some(filter) => self
                .records
                .iter()
                .filter(|record| record_matches(record, filter))
                .collect(),
            None => self.records.iter().collect(),
        };

        if let Some(sort) = &query.sort {
            // sort_by is stable; DESC flips the comparator so ties keep insertion order
            items.sort_by(|a, b| {
                let ordering = compare_values(a.get(&sort.field), b.get(&sort.field));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        if let Some(window) = &query.slice {
            items = apply_window(items, window);
        }
        if let Some(window) = &query.range {
            items = apply_window(items, window);
        }

        items.into_iter().cloned().collect()
    }

    pub fn contains(&self, identifier: &Value) -> bool {
        self.position(identifier).is_some()
    }

    /// Record holding `identifier`.
    pub fn get_one(&self, identifier: &Value) -> Result<Record, CollectionError> {
        let index = self.index_of(identifier)?;
        Ok(self.records[index].clone())
    }

    /// Append a record, allocating an identifier if it has none.
    ///
    /// Returns the stored record.
    pub fn add_one(&mut self, mut record: Record) -> Result<Record, CollectionError> {
        match record.get(&self.identifier_field) {
            Some(identifier) => {
                if self.position(identifier).is_some() {
                    return Err(CollectionError::DuplicateIdentifier {
                        identifier: identifier.clone(),
                    });
                }
            }
            None => {
                let identifier = self.next_identifier()?;
                record.insert(self.identifier_field.clone(), Value::from(identifier));
            }
        }
        self.records.push(record.clone());
        Ok(record)
    }

    /// Merge `patch` into the record holding `identifier`.
    ///
    /// Fields of the patch overwrite stored fields, other stored fields are kept,
    /// and the identifier keeps its original value whatever the patch says.
    pub fn update_one(&mut self, identifier: &Value, patch: Record) -> Result<Record, CollectionError> {
        let index = self.index_of(identifier)?;
        let stored = &mut self.records[index];
        for (field, value) in patch {
            if field != self.identifier_field {
                stored.insert(field, value);
            }
        }
        Ok(stored.clone())
    }

    /// Remove the record holding `identifier` and return it.
    pub fn remove_one(&mut self, identifier: &Value) -> Result<Record, CollectionError> {
        let index = self.index_of(identifier)?;
        Ok(self.records.remove(index))
    }

    /// Identifier the next [`Collection::add_one`] without identifier would get.
    pub fn next_identifier(&self) -> Result<i64, CollectionError> {
        let max = self
            .records
            .iter()
            .filter_map(|record| record.get(&self.identifier_field).and_then(Value::as_i64))
            .max();
        match max {
            Some(max) => max
                .checked_add(1)
                .ok_or(CollectionError::IdentifierExhausted { max }),
            None => Ok(0),
        }
    }

    fn position(&self, identifier: &Value) -> Option<usize> {
        self.records.iter().position(|record| {
            record
                .get(&self.identifier_field)
                .is_some_and(|stored| values_equal(stored, identifier))
        })
    }

    fn index_of(&self, identifier: &Value) -> Result<usize, CollectionError> {
        self.position(identifier)
            .ok_or_else(|| CollectionError::NotFound {
                identifier: identifier.clone(),
            })
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTIFIER)
    }
}

/// Unwrap a JSON object into a record.
pub(crate) fn into_record(value: Value) -> Result<Record, CollectionError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CollectionError::InvalidRecord {
            found: json_type_name(&other).to_string(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn apply_window<'a>(items: Vec<&'a Record>, window: &Window) -> Vec<&'a Record> {
    match window.clip(items.len()) {
        Some(range) => items[range].to_vec(),
        None => Vec::new(),
    }
}
