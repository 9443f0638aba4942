//! I/O module
//!
//! Handles reading and writing the collection files.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `reader` - Streaming collection reader with iterator interface
//! - `store` - CSV-file backed `CollectionStore` with atomic saves

pub mod csv_format;
pub mod reader;
pub mod store;

pub use csv_format::{convert_csv_record, write_collection_csv, CsvRecord};
pub use reader::CollectionReader;
pub use store::{CsvStore, StoreConfig};
