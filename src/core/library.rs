//! The whole collection: books and movies together
//!
//! The library owns both collections and is the single in-memory source of
//! truth for a session. Check-in and check-out search both categories for the
//! requested ID; additions draw their ID from the highest ID across both, so
//! IDs stay unique library-wide.

use crate::core::collection::Collection;
use crate::types::{Category, CollectionError, ItemId, Record};
use tracing::debug;

/// Books and movies, addressed by [`Category`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    books: Collection,
    movies: Collection,
}

impl Library {
    pub fn new(books: Collection, movies: Collection) -> Self {
        Library { books, movies }
    }

    pub fn collection(&self, category: Category) -> &Collection {
        match category {
            Category::Books => &self.books,
            Category::Movies => &self.movies,
        }
    }

    pub fn collection_mut(&mut self, category: Category) -> &mut Collection {
        match category {
            Category::Books => &mut self.books,
            Category::Movies => &mut self.movies,
        }
    }

    /// Highest ID across both collections, `None` when both are empty
    pub fn max_id(&self) -> Option<ItemId> {
        Category::ALL
            .iter()
            .filter_map(|&category| self.collection(category).max_id())
            .max()
    }

    /// ID the next added item receives
    ///
    /// One past the highest existing ID; `1` for an empty library. `None`
    /// when the highest existing ID is already `ItemId::MAX`.
    pub fn next_id(&self) -> Option<ItemId> {
        match self.max_id() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Find a record by ID in either collection
    ///
    /// Books are searched before movies.
    pub fn find(&self, id: ItemId) -> Option<(Category, &Record)> {
        Category::ALL.iter().find_map(|&category| {
            self.collection(category)
                .get(id)
                .map(|record| (category, record))
        })
    }

    /// Check out one copy of the item with this ID
    ///
    /// # Returns
    ///
    /// The category the item was found in and the updated record.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if neither collection holds the ID
    /// - `NoCopiesAvailable` if every copy is already out
    pub fn check_out(&mut self, id: ItemId) -> Result<(Category, &Record), CollectionError> {
        let (category, record) = self.find_mut(id)?;
        record.check_out()?;
        debug!(id, %category, available = record.available(), "checked out");
        Ok((category, &*record))
    }

    /// Check in one copy of the item with this ID
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if neither collection holds the ID
    /// - `AllCopiesAvailable` if no copy is out
    pub fn check_in(&mut self, id: ItemId) -> Result<(Category, &Record), CollectionError> {
        let (category, record) = self.find_mut(id)?;
        record.check_in()?;
        debug!(id, %category, available = record.available(), "checked in");
        Ok((category, &*record))
    }

    /// Add a record to a collection and return its ID
    pub fn add(&mut self, category: Category, record: Record) -> ItemId {
        let id = record.id();
        self.collection_mut(category).insert(record);
        debug!(id, %category, "added item");
        id
    }

    fn find_mut(&mut self, id: ItemId) -> Result<(Category, &mut Record), CollectionError> {
        let category = self
            .find(id)
            .map(|(category, _)| category)
            .ok_or_else(|| CollectionError::item_not_found(id))?;

        self.collection_mut(category)
            .get_mut(id)
            .map(|record| (category, record))
            .ok_or_else(|| CollectionError::item_not_found(id))
    }
}
