//! CSV-file backed collection store
//!
//! Each category lives in its own file inside a data directory. Loading
//! streams the file through [`CollectionReader`]; saving serializes the whole
//! collection to a temporary file next to the target and renames it into
//! place, so a failed write never leaves a half-written collection behind.

use crate::core::{Collection, CollectionStore};
use crate::io::csv_format::write_collection_csv;
use crate::io::reader::CollectionReader;
use crate::types::{Category, CollectionError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Where the collection files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding both files
    pub data_dir: PathBuf,

    /// Books file name, relative to `data_dir`
    pub books_file: String,

    /// Movies file name, relative to `data_dir`
    pub movies_file: String,
}

impl StoreConfig {
    pub fn new(data_dir: PathBuf, books_file: String, movies_file: String) -> Self {
        StoreConfig {
            data_dir,
            books_file,
            movies_file,
        }
    }

    /// Configured file name for a category
    pub fn file_name(&self, category: Category) -> &str {
        match category {
            Category::Books => &self.books_file,
            Category::Movies => &self.movies_file,
        }
    }
}

impl Default for StoreConfig {
    /// `books.csv` and `movies.csv` in the working directory
    fn default() -> Self {
        StoreConfig {
            data_dir: PathBuf::from("."),
            books_file: Category::Books.default_file_name().to_string(),
            movies_file: Category::Movies.default_file_name().to_string(),
        }
    }
}

/// Collection store over one CSV file per category
#[derive(Debug, Clone)]
pub struct CsvStore {
    config: StoreConfig,
}

impl CsvStore {
    pub fn new(config: StoreConfig) -> Self {
        CsvStore { config }
    }

    /// Full path of a category's file
    pub fn path(&self, category: Category) -> PathBuf {
        self.config.data_dir.join(self.config.file_name(category))
    }
}

impl CollectionStore for CsvStore {
    fn load(&self, category: Category) -> Result<Collection, CollectionError> {
        let path = self.path(category);
        let collection = CollectionReader::new(&path)?.collect::<Result<Collection, _>>()?;

        info!(
            path = %path.display(),
            records = collection.len(),
            "loaded collection"
        );
        Ok(collection)
    }

    fn save(&self, category: Category, collection: &Collection) -> Result<(), CollectionError> {
        let path = self.path(category);
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut file = NamedTempFile::new_in(dir)?;
        write_collection_csv(collection, category, &mut file)?;
        file.flush()?;
        file.persist(&path).map_err(|e| CollectionError::from(e.error))?;

        debug!(
            path = %path.display(),
            records = collection.len(),
            "saved collection"
        );
        Ok(())
    }

    fn location(&self, category: Category) -> String {
        self.config.file_name(category).to_string()
    }
}
