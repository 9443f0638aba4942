//! Error types for the collection manager
//!
//! This module defines every error that can occur while loading, changing or
//! saving a collection. Errors are worded for direct display on the console.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: file not found, permission denied, etc. Fatal when
//!   loading, reported and survived when saving.
//! - **Data Errors**: malformed CSV rows, non-integer `ID`/`Copies`/`Available`.
//! - **Circulation Errors**: unknown item ID, no copy left to check out, every
//!   copy already checked in. These never change state.
//! - **ID Errors**: every item ID is taken, so nothing more can be added.
//! - **Console Errors**: standard input closed while a prompt was waiting.

use crate::types::category::Category;
use crate::types::record::ItemId;
use thiserror::Error;

/// Main error type for the collection manager
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Collection file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading or writing a file or the console
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The CSV itself could not be parsed
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// An integer field holds something that is not a non-negative integer
    #[error("Invalid value '{value}' for field {field}{}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidField {
        /// Field name (`ID`, `Copies` or `Available`)
        field: String,
        /// The offending text
        value: String,
        /// Line number (if the value came from a file)
        line: Option<u64>,
    },

    /// A required integer field is missing
    #[error("Missing field {field}{}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MissingField {
        /// Field name
        field: String,
        /// Line number (if the record came from a file)
        line: Option<u64>,
    },

    /// No record with this ID in either collection
    #[error("The item with ID {id} that you entered is NOT found.")]
    ItemNotFound {
        /// The requested ID, as entered; may lie outside the `ItemId` range
        id: i64,
    },

    /// Check-out attempted with `Available == 0`
    #[error("No copies of the item are available for check out.")]
    NoCopiesAvailable {
        /// The item ID
        id: ItemId,
    },

    /// Check-in attempted with `Available == Copies`
    #[error("All copies are already available, so this item can not be checked in.")]
    AllCopiesAvailable {
        /// The item ID
        id: ItemId,
    },

    /// The highest possible ID is already taken
    #[error("No item IDs are left, so the new {} can not be added.", category.noun())]
    IdsExhausted {
        /// Category being added to
        category: Category,
    },

    /// Standard input reached end of file while a prompt was waiting
    #[error("Input closed")]
    InputClosed,
}

// Conversion from io::Error to CollectionError
impl From<std::io::Error> for CollectionError {
    fn from(error: std::io::Error) -> Self {
        CollectionError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to CollectionError
impl From<csv::Error> for CollectionError {
    fn from(error: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io_error) = error.kind() {
            return CollectionError::IoError {
                message: io_error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        CollectionError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl CollectionError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        CollectionError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create an InvalidField error
    pub fn invalid_field(field: &str, value: &str, line: Option<u64>) -> Self {
        CollectionError::InvalidField {
            field: field.to_string(),
            value: value.to_string(),
            line,
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: &str, line: Option<u64>) -> Self {
        CollectionError::MissingField {
            field: field.to_string(),
            line,
        }
    }

    /// Create an ItemNotFound error
    pub fn item_not_found(id: impl Into<i64>) -> Self {
        CollectionError::ItemNotFound { id: id.into() }
    }

    /// Create a NoCopiesAvailable error
    pub fn no_copies_available(id: ItemId) -> Self {
        CollectionError::NoCopiesAvailable { id }
    }

    /// Create an AllCopiesAvailable error
    pub fn all_copies_available(id: ItemId) -> Self {
        CollectionError::AllCopiesAvailable { id }
    }

    /// Create an IdsExhausted error
    pub fn ids_exhausted(category: Category) -> Self {
        CollectionError::IdsExhausted { category }
    }

    /// Whether the error leaves the collection usable
    ///
    /// Circulation errors are reported to the user and the menu carries on.
    pub fn is_circulation(&self) -> bool {
        matches!(
            self,
            CollectionError::ItemNotFound { .. }
                | CollectionError::NoCopiesAvailable { .. }
                | CollectionError::AllCopiesAvailable { .. }
        )
    }
}
