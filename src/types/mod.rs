//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `category`: The book/movie category and its column layout
//! - `record`: Records, field values and item identifiers
//! - `error`: Error types for the collection manager

pub mod category;
pub mod error;
pub mod record;

pub use category::{Category, AVAILABLE_FIELD, COPIES_FIELD, ID_FIELD};
pub use error::CollectionError;
pub use record::{FieldValue, ItemId, Record};
