use crate::io::StoreConfig;
use crate::session::{SessionConfig, DEFAULT_PAGE_SIZE};
use crate::types::Category;
use clap::Parser;
use std::path::PathBuf;

/// Manage a personal collection of books and movies
#[derive(Parser, Debug)]
#[command(name = "collection-manager")]
#[command(about = "Check items in and out, add, browse and search a book and movie collection", long_about = None)]
pub struct CliArgs {
    /// Directory holding the collection files
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory containing the books and movies CSV files"
    )]
    pub data_dir: PathBuf,

    /// Books file name
    #[arg(
        long = "books-file",
        value_name = "FILE",
        default_value = Category::Books.default_file_name(),
        help = "Books CSV file, relative to the data directory"
    )]
    pub books_file: String,

    /// Movies file name
    #[arg(
        long = "movies-file",
        value_name = "FILE",
        default_value = Category::Movies.default_file_name(),
        help = "Movies CSV file, relative to the data directory"
    )]
    pub movies_file: String,

    /// Records shown per display page
    #[arg(
        long = "page-size",
        value_name = "COUNT",
        default_value_t = DEFAULT_PAGE_SIZE,
        help = "Number of records per display page (default: 10)"
    )]
    pub page_size: usize,
}

impl CliArgs {
    /// Create a StoreConfig from CLI arguments
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig::new(
            self.data_dir.clone(),
            self.books_file.clone(),
            self.movies_file.clone(),
        )
    }

    /// Create a SessionConfig from CLI arguments
    ///
    /// A zero page size falls back to the default.
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig::new(self.page_size)
    }
}
