//! Core business logic module
//!
//! This module contains the in-memory collection components:
//! - `traits` - Storage abstraction used by the session
//! - `collection` - One category's records, query and pagination
//! - `library` - Both collections, check-in/check-out and ID assignment

pub mod collection;
pub mod library;
pub mod traits;

pub use collection::Collection;
pub use library::Library;
pub use traits::CollectionStore;
