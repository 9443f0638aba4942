//! CSV format handling for collection files
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord, the raw header-keyed row
//! - Conversion from a CsvRecord to a typed Record
//! - Collection output serialization
//!
//! All functions are pure (no file handling) for easy testing.

use crate::core::Collection;
use crate::types::{Category, CollectionError, FieldValue, Record};
use csv::{QuoteStyle, WriterBuilder};
use indexmap::IndexMap;
use std::io::Write;

/// A raw CSV row keyed by header name, in header order
pub type CsvRecord = IndexMap<String, String>;

/// Convert a CsvRecord to a Record
///
/// `ID`, `Copies` and `Available` are parsed as non-negative integers; every
/// other column is kept as text.
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV row
/// * `line` - Line number of the row, used in error messages
///
/// # Errors
///
/// - `InvalidField` if an integer column holds anything else
/// - `MissingField` if an integer column is absent from the row
pub fn convert_csv_record(
    csv_record: CsvRecord,
    line: Option<u64>,
) -> Result<Record, CollectionError> {
    let fields = csv_record
        .into_iter()
        .map(|(name, value)| -> Result<(String, FieldValue), CollectionError> {
            let value = if FieldValue::is_integer_field(&name) {
                value
                    .trim()
                    .parse::<u32>()
                    .map(FieldValue::Integer)
                    .map_err(|_| CollectionError::invalid_field(&name, &value, line))?
            } else {
                FieldValue::Text(value)
            };
            Ok((name, value))
        })
        .collect::<Result<IndexMap<_, _>, _>>()?;

    Record::from_fields(fields, line)
}

/// Header for a collection: the first record's field order
///
/// An empty collection falls back to the category's canonical columns.
pub fn collection_header(collection: &Collection, category: Category) -> Vec<String> {
    match collection.iter().next() {
        Some(first) => first.field_names().map(str::to_string).collect(),
        None => category.columns().iter().map(|c| c.to_string()).collect(),
    }
}

/// Write a collection in CSV format
///
/// The header is taken from the first record. Each row writes the header's
/// fields by name, so records with a different internal field order still
/// line up; a field a record lacks is written empty. Fields are never
/// quoted, matching the loader which does not interpret quotes.
///
/// # Arguments
///
/// * `collection` - The records to write, in collection order
/// * `category` - Supplies the header when the collection is empty
/// * `output` - Destination writer
pub fn write_collection_csv(
    collection: &Collection,
    category: Category,
    output: &mut dyn Write,
) -> Result<(), CollectionError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(output);

    let header = collection_header(collection, category);
    writer.write_record(&header)?;

    for record in collection.iter() {
        let row: Vec<String> = header
            .iter()
            .map(|name| {
                record
                    .get(name)
                    .map(ToString::to_string)
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;

    Ok(())
}
