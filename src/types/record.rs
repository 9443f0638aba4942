//! Record types for the collection manager
//!
//! A record is an ordered mapping of field name to value. Three fields are
//! always present and always integers (`ID`, `Copies`, `Available`); every
//! other field is free text. Field order follows the CSV header the record
//! was loaded from, so a record written back out keeps its column layout.

use super::category::{Category, AVAILABLE_FIELD, COPIES_FIELD, ID_FIELD};
use super::error::CollectionError;
use indexmap::IndexMap;
use std::fmt;

/// Item identifier, unique across both collections
pub type ItemId = u32;

/// Value of a single record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// One of the coerced integer fields (`ID`, `Copies`, `Available`)
    Integer(u32),

    /// Any other field, kept exactly as read or entered
    Text(String),
}

impl FieldValue {
    /// Whether a field with this name is coerced to an integer on load
    pub fn is_integer_field(name: &str) -> bool {
        name == ID_FIELD || name == COPIES_FIELD || name == AVAILABLE_FIELD
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// One book or movie entry
///
/// Construction goes through [`Record::from_fields`] or [`Record::new_item`],
/// both of which guarantee the integer fields are present. Only check-in and
/// check-out mutate a record, and both keep `0 <= Available <= Copies`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Build a record from already-typed fields
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if `ID`, `Copies` or `Available` is absent, and
    /// `InvalidField` if one of them is present as text.
    pub fn from_fields(
        fields: IndexMap<String, FieldValue>,
        line: Option<u64>,
    ) -> Result<Self, CollectionError> {
        for name in [ID_FIELD, COPIES_FIELD, AVAILABLE_FIELD] {
            match fields.get(name) {
                Some(FieldValue::Integer(_)) => {}
                Some(FieldValue::Text(value)) => {
                    return Err(CollectionError::invalid_field(name, value, line))
                }
                None => return Err(CollectionError::missing_field(name, line)),
            }
        }

        Ok(Record { fields })
    }

    /// Build a freshly added item in the category's canonical column order
    ///
    /// `Available` starts equal to `copies`. Text fields missing from
    /// `attributes` are left empty.
    pub fn new_item(
        category: Category,
        id: ItemId,
        attributes: &IndexMap<String, String>,
        copies: u32,
    ) -> Self {
        let fields = category
            .columns()
            .iter()
            .map(|&name| {
                let value = match name {
                    ID_FIELD => FieldValue::Integer(id),
                    COPIES_FIELD | AVAILABLE_FIELD => FieldValue::Integer(copies),
                    _ => FieldValue::Text(attributes.get(name).cloned().unwrap_or_default()),
                };
                (name.to_string(), value)
            })
            .collect();

        Record { fields }
    }

    pub fn id(&self) -> ItemId {
        self.integer(ID_FIELD)
    }

    pub fn copies(&self) -> u32 {
        self.integer(COPIES_FIELD)
    }

    pub fn available(&self) -> u32 {
        self.integer(AVAILABLE_FIELD)
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Field names in record order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in record order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Take one copy off the shelf
    ///
    /// # Errors
    ///
    /// `NoCopiesAvailable` when `Available` is already zero; the record is
    /// left unchanged.
    pub fn check_out(&mut self) -> Result<(), CollectionError> {
        let available = self.available();
        if available == 0 {
            return Err(CollectionError::no_copies_available(self.id()));
        }
        self.set_integer(AVAILABLE_FIELD, available - 1);
        Ok(())
    }

    /// Return one copy to the shelf
    ///
    /// # Errors
    ///
    /// `AllCopiesAvailable` when `Available` already equals `Copies`; the
    /// record is left unchanged.
    pub fn check_in(&mut self) -> Result<(), CollectionError> {
        let available = self.available();
        if available >= self.copies() {
            return Err(CollectionError::all_copies_available(self.id()));
        }
        self.set_integer(AVAILABLE_FIELD, available + 1);
        Ok(())
    }

    /// Case-insensitive substring match against the named text fields
    ///
    /// `needle` must already be lowercased. An empty needle never matches.
    pub fn matches(&self, needle: &str, search_fields: &[&str]) -> bool {
        if needle.is_empty() {
            return false;
        }

        search_fields.iter().any(|name| match self.fields.get(*name) {
            Some(FieldValue::Text(value)) => value.to_lowercase().contains(needle),
            _ => false,
        })
    }

    // Integer fields are guaranteed present by both constructors.
    fn integer(&self, name: &str) -> u32 {
        match self.fields.get(name) {
            Some(FieldValue::Integer(n)) => *n,
            _ => 0,
        }
    }

    fn set_integer(&mut self, name: &str, value: u32) {
        if let Some(field) = self.fields.get_mut(name) {
            *field = FieldValue::Integer(value);
        }
    }
}

impl fmt::Display for Record {
    /// `ID: <id>` first, then every other field as `<name>: <value>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", ID_FIELD, self.id())?;
        for (name, value) in self.fields.iter().filter(|(name, _)| *name != ID_FIELD) {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}
