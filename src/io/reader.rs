//! Collection file reader with iterator interface
//!
//! Provides a streaming iterator over the records of one collection file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The CollectionReader reads the header line once, then reads one row at a
//! time and deserializes it against that header into a [`CsvRecord`].
//! Conversion to a typed [`Record`] happens in `csv_format`.
//!
//! Files are plain comma-separated text with no quoting: quote characters are
//! kept as ordinary data. Whitespace around every field is trimmed, which
//! also drops a trailing carriage return. Blank lines are skipped.
//!
//! ```no_run
//! use collection_manager::io::reader::CollectionReader;
//! use std::path::Path;
//!
//! let reader = CollectionReader::new(Path::new("books.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("{}", record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Opening errors are returned from `new()`; a missing file is reported as
//!   `FileNotFound` so callers can word the message accordingly
//! - Individual row errors are yielded as Err variants carrying the line number

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{CollectionError, Record};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Streaming reader over one collection file
#[derive(Debug)]
pub struct CollectionReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
    row: StringRecord,
}

impl CollectionReader {
    /// Open a collection file and read its header line
    ///
    /// # Errors
    ///
    /// * `FileNotFound` if the path does not exist
    /// * `IoError` or `ParseError` if the file cannot be opened or the header
    ///   cannot be read
    pub fn new(path: &Path) -> Result<Self, CollectionError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CollectionError::file_not_found(&path.display().to_string()),
            _ => CollectionError::from(e),
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .quoting(false)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            row: StringRecord::new(),
        })
    }

    /// Field names from the header line
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }
}

impl Iterator for CollectionReader {
    type Item = Result<Record, CollectionError>;

    /// Read the next row and convert it to a Record
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Record))` - Successfully parsed record
    /// * `Some(Err(CollectionError))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.row) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => return Some(Err(e.into())),
        }

        let line = self.row.position().map(|pos| pos.line());

        Some(
            self.row
                .deserialize::<CsvRecord>(Some(&self.headers))
                .map_err(CollectionError::from)
                .and_then(|csv_record| convert_csv_record(csv_record, line)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    const BOOKS: &str = "ID,Title,Author,Publisher,Pages,Year,Copies,Available\n\
        1,Dune,Frank Herbert,Chilton,412,1965,2,2\n\
        2,Emma,Jane Austen,John Murray,474,1815,1,0\n";

    #[test]
    fn test_reader_new_opens_file() {
        let file = create_temp_csv(BOOKS);

        let result = CollectionReader::new(file.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_reader_new_reports_missing_file() {
        let result = CollectionReader::new(Path::new("nonexistent.csv"));
        assert!(matches!(
            result,
            Err(CollectionError::FileNotFound { ref path }) if path == "nonexistent.csv"
        ));
    }

    #[test]
    fn test_reader_reads_headers() {
        let file = create_temp_csv(BOOKS);

        let reader = CollectionReader::new(file.path()).unwrap();
        let headers: Vec<_> = reader.headers().collect();
        assert_eq!(
            headers,
            vec!["ID", "Title", "Author", "Publisher", "Pages", "Year", "Copies", "Available"]
        );
    }

    #[test]
    fn test_reader_iterates_records() {
        let file = create_temp_csv(BOOKS);

        let reader = CollectionReader::new(file.path()).unwrap();
        let records: Vec<Record> = reader.collect::<Result<_, _>>().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), 1);
        assert_eq!(records[0].copies(), 2);
        assert_eq!(records[1].available(), 0);
        assert_eq!(
            records[1].get("Author"),
            Some(&FieldValue::Text("Jane Austen".to_string()))
        );
    }

    #[test]
    fn test_reader_handles_crlf_and_whitespace() {
        let file = create_temp_csv("ID, Title ,Copies,Available\r\n 4 , Heat ,1,1\r\n");

        let records: Vec<Record> = CollectionReader::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), 4);
        assert_eq!(
            records[0].get("Title"),
            Some(&FieldValue::Text("Heat".to_string()))
        );
    }

    #[test]
    fn test_reader_does_not_interpret_quotes() {
        let file = create_temp_csv("ID,Title,Copies,Available\n1,\"Dune\",1,1\n");

        let records: Vec<Record> = CollectionReader::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            records[0].get("Title"),
            Some(&FieldValue::Text("\"Dune\"".to_string()))
        );
    }

    #[test]
    fn test_reader_includes_line_numbers_in_errors() {
        let file = create_temp_csv(
            "ID,Title,Copies,Available\n1,Dune,1,1\n2,Emma,many,1\n3,Heat,1,1\n",
        );

        let records: Vec<_> = CollectionReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[2].is_ok());
        match &records[1] {
            Err(CollectionError::InvalidField { field, value, line }) => {
                assert_eq!(field, "Copies");
                assert_eq!(value, "many");
                assert_eq!(*line, Some(3));
            }
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_reader_short_row_is_parse_error() {
        let file = create_temp_csv("ID,Title,Copies,Available\n1,Dune,1\n");

        let records: Vec<_> = CollectionReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 1);
        assert!(matches!(records[0], Err(CollectionError::ParseError { .. })));
    }

    #[test]
    fn test_reader_missing_integer_column() {
        let file = create_temp_csv("ID,Title,Copies\n1,Dune,1\n");

        let records: Vec<_> = CollectionReader::new(file.path()).unwrap().collect();

        assert!(matches!(
            records[0],
            Err(CollectionError::MissingField { ref field, line: Some(2) }) if field == "Available"
        ));
    }

    #[test]
    fn test_reader_handles_empty_file_after_header() {
        let file = create_temp_csv("ID,Title,Copies,Available\n");

        let records: Vec<_> = CollectionReader::new(file.path()).unwrap().collect();
        assert!(records.is_empty());
    }

    #[test]
    fn test_reader_skips_blank_lines() {
        let file = create_temp_csv("ID,Title,Copies,Available\n1,Dune,1,1\n\n2,Emma,1,1\n");

        let records: Vec<Record> = CollectionReader::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
    }
}
