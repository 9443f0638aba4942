//! Core traits for collection persistence
//!
//! The session talks to storage only through [`CollectionStore`], so the
//! menu loop and handlers can be driven against an in-memory store in tests
//! and against the CSV files in the real program.

use crate::core::collection::Collection;
use crate::types::{Category, CollectionError};

/// Trait for loading and saving one collection per category
pub trait CollectionStore {
    /// Load every record of a category
    fn load(&self, category: Category) -> Result<Collection, CollectionError>;

    /// Replace the stored records of a category with `collection`
    fn save(&self, category: Category, collection: &Collection) -> Result<(), CollectionError>;

    /// Human-readable location of a category's data, used in messages
    fn location(&self, category: Category) -> String;
}
