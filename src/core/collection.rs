//! A single category's records
//!
//! Records are kept in insertion order (file order for loaded records, then
//! additions in the order they were confirmed). Display paginates in that
//! order and the writer emits rows in that order.

use crate::types::{Category, ItemId, Record};
use indexmap::IndexMap;

/// Insertion-ordered map of item ID to record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    records: IndexMap<ItemId, Record>,
}

impl Collection {
    /// Create an empty collection
    pub fn new() -> Self {
        Collection {
            records: IndexMap::new(),
        }
    }

    /// Insert a record under its own ID
    ///
    /// A record with the same ID is replaced in place and returned.
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.id(), record)
    }

    pub fn get(&self, id: ItemId) -> Option<&Record> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Record> {
        self.records.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Highest ID in the collection, `None` when empty
    pub fn max_id(&self) -> Option<ItemId> {
        self.records.keys().copied().max()
    }

    /// Records whose searched fields contain `query`, case-insensitively
    ///
    /// Which fields are searched depends on `category`. An empty query
    /// matches nothing.
    pub fn query(&self, query: &str, category: Category) -> Vec<&Record> {
        let needle = query.to_lowercase();
        let search_fields = category.search_fields();

        self.iter()
            .filter(|record| record.matches(&needle, &search_fields))
            .collect()
    }

    /// Number of pages needed to show every record, `page_size` per page
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.records.len().div_ceil(page_size)
    }

    /// Records on the zero-based page `page`
    pub fn page(&self, page: usize, page_size: usize) -> Vec<&Record> {
        self.iter()
            .skip(page.saturating_mul(page_size))
            .take(page_size)
            .collect()
    }
}

impl FromIterator<Record> for Collection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut collection = Collection::new();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}
