//! Collection Manager Library
//! # Overview
//!
//! This library manages a small personal collection of books and movies kept
//! in two flat CSV files, behind an interactive text menu.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Category, Record, CollectionError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - In-memory collection logic:
//!   - [`core::collection`] - One category's records, query and pagination
//!   - [`core::library`] - Both collections, check-in/check-out and ID assignment
//!   - [`core::traits`] - The `CollectionStore` persistence seam
//! - [`io`] - CSV reading and writing, and the file-backed store
//! - [`session`] - Menu loop, command dispatch and handlers
//!
//! # Records
//!
//! Every record carries three integer fields:
//!
//! - `ID`: unique across books and movies
//! - `Copies`: total owned copies
//! - `Available`: copies currently on the shelf, `0 <= Available <= Copies`
//!
//! Books add `Title`, `Author`, `Publisher`, `Pages` and `Year`; movies add
//! `Title`, `Director`, `Length`, `Genre` and `Year`.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod session;
pub mod types;

pub use core::{Collection, CollectionStore, Library};
pub use io::{write_collection_csv, CsvStore, StoreConfig};
pub use session::{run_session, Console, SessionConfig};
pub use types::{Category, CollectionError, FieldValue, ItemId, Record};
