//! Collection categories
//!
//! Every record belongs to exactly one category. The category decides which
//! file the record lives in, which columns it carries, and which of those
//! columns a query searches.

use std::fmt;

/// Field name of the integer record identifier
pub const ID_FIELD: &str = "ID";

/// Field name of the total number of owned copies
pub const COPIES_FIELD: &str = "Copies";

/// Field name of the number of copies currently on the shelf
pub const AVAILABLE_FIELD: &str = "Available";

/// The two kinds of item held in the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Books, stored in `books.csv`
    Books,

    /// Movies, stored in `movies.csv`
    Movies,
}

impl Category {
    /// Both categories, in the order check-in/check-out searches them
    pub const ALL: [Category; 2] = [Category::Books, Category::Movies];

    /// Singular noun used in user-facing messages ("book", "movie")
    pub fn noun(self) -> &'static str {
        match self {
            Category::Books => "book",
            Category::Movies => "movie",
        }
    }

    /// File name the category is stored under when none is configured
    pub fn default_file_name(self) -> &'static str {
        match self {
            Category::Books => "books.csv",
            Category::Movies => "movies.csv",
        }
    }

    /// Canonical column order
    ///
    /// Used for newly added records and as the header of an empty collection.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Category::Books => &[
                ID_FIELD,
                "Title",
                "Author",
                "Publisher",
                "Pages",
                "Year",
                COPIES_FIELD,
                AVAILABLE_FIELD,
            ],
            Category::Movies => &[
                ID_FIELD,
                "Title",
                "Director",
                "Length",
                "Genre",
                "Year",
                COPIES_FIELD,
                AVAILABLE_FIELD,
            ],
        }
    }

    /// The three text fields a query matches against
    pub fn search_fields(self) -> [&'static str; 3] {
        match self {
            Category::Books => ["Title", "Author", "Publisher"],
            Category::Movies => ["Title", "Director", "Genre"],
        }
    }

    /// Fields the user is prompted for when adding an item, in prompt order
    ///
    /// `Available` is never prompted for; it starts equal to `Copies`.
    pub fn prompted_fields(self) -> &'static [&'static str] {
        match self {
            Category::Books => &["Title", "Author", "Publisher", "Pages", "Year", COPIES_FIELD],
            Category::Movies => &["Title", "Director", "Length", "Genre", "Year", COPIES_FIELD],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Books => write!(f, "books"),
            Category::Movies => write!(f, "movies"),
        }
    }
}
