//! Menu command handlers
//!
//! Each handler runs one menu command against the in-memory library. A
//! handler that changes a collection reports which category changed so the
//! session can persist exactly that file; handlers never touch storage.

use crate::core::{Collection, Library};
use crate::session::console::{Console, LineInput};
use crate::types::{Category, CollectionError, ItemId, Record, COPIES_FIELD, ID_FIELD};
use indexmap::IndexMap;
use std::io::Write;
use tracing::{debug, info, warn};

const MORE_PROMPT: &str = "Press <enter> to show more items, or type 'm' to return to the menu: ";
const MORE_RETRY: &str =
    "Invalid input. Press <enter> to show more items, or type 'm' to return to the menu: ";
const CONFIRM_PROMPT: &str =
    "Press <enter> to add this item to the collection.  Enter 'x' to cancel.";
const CONFIRM_RETRY: &str =
    "Invalid input. Press <enter> to add this item, or enter 'x' to cancel.";

/// Result of an add command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was confirmed and inserted under this ID, now the library's max ID
    Added(ItemId),

    /// The user cancelled; the library and its max ID are unchanged
    Cancelled,

    /// No ID was left to give the item; nothing was prompted or changed
    Refused,
}

/// Print a record followed by a blank line
pub fn show_record<R: LineInput, W: Write>(
    console: &mut Console<R, W>,
    record: &Record,
) -> Result<(), CollectionError> {
    console.write(record)?;
    console.say("")
}

/// Check out one copy of an item chosen by ID
///
/// # Returns
///
/// The category of the changed record, or `None` when nothing changed
/// (unknown ID or no copy available; both are reported on the console).
pub fn check_out<R: LineInput, W: Write>(
    console: &mut Console<R, W>,
    library: &mut Library,
) -> Result<Option<Category>, CollectionError> {
    let requested = console.prompt_id("Enter the ID for the item you wish to check out: ")?;
    let result = match ItemId::try_from(requested) {
        Ok(id) => library.check_out(id),
        Err(_) => Err(CollectionError::item_not_found(requested)),
    };

    match result {
        Ok((category, record)) => {
            console.say("Your check out has succeeded.")?;
            show_record(console, record)?;
            Ok(Some(category))
        }
        Err(e) if e.is_circulation() => {
            info!(id = requested, reason = %e, "check out refused");
            console.say(&e)?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Check in one copy of an item chosen by ID
///
/// # Returns
///
/// The category of the changed record, or `None` when nothing changed.
pub fn check_in<R: LineInput, W: Write>(
    console: &mut Console<R, W>,
    library: &mut Library,
) -> Result<Option<Category>, CollectionError> {
    let requested = console.prompt_id("Enter the ID for the item you wish to check in: ")?;
    let result = match ItemId::try_from(requested) {
        Ok(id) => library.check_in(id),
        Err(_) => Err(CollectionError::item_not_found(requested)),
    };

    match result {
        Ok((category, record)) => {
            console.say("Your check in has succeeded.")?;
            show_record(console, record)?;
            Ok(Some(category))
        }
        Err(e) if e.is_circulation() => {
            info!(id = requested, reason = %e, "check in refused");
            console.say(&e)?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Page through a collection, `page_size` records at a time
///
/// Between pages the user presses enter to continue or `m` to return to the
/// menu early. The completion message is printed only when the last page
/// has been shown.
pub fn display<R: LineInput, W: Write>(
    console: &mut Console<R, W>,
    collection: &Collection,
    page_size: usize,
) -> Result<(), CollectionError> {
    let pages = collection.page_count(page_size);

    for page in 0..pages {
        for record in collection.page(page, page_size) {
            show_record(console, record)?;
        }

        if page + 1 == pages {
            break;
        }

        if console.prompt_choice(MORE_PROMPT, MORE_RETRY, &["", "m"])? == "m" {
            debug!(page, pages, "display stopped early");
            return Ok(());
        }
    }

    console.say("The entire collection has been shown.")
}

/// Search a collection and print every match
///
/// # Returns
///
/// The number of matching records.
pub fn query<R: LineInput, W: Write>(
    console: &mut Console<R, W>,
    collection: &Collection,
    category: Category,
) -> Result<usize, CollectionError> {
    let input = console.prompt("Enter a query string to use for the search: ")?;
    let matches = collection.query(&input, category);

    if matches.is_empty() {
        console.say(format!("The {} you searched is NOT found.", category.noun()))?;
    }
    for record in &matches {
        show_record(console, record)?;
    }

    debug!(%category, query = %input, matches = matches.len(), "query");
    Ok(matches.len())
}

/// Prompt for a new item and add it on confirmation
///
/// The new item's ID is one past the highest ID in the whole library.
/// `Available` starts equal to `Copies`. When the highest ID is already
/// `ItemId::MAX` the add is refused before any prompt.
pub fn add_item<R: LineInput, W: Write>(
    console: &mut Console<R, W>,
    library: &mut Library,
    category: Category,
) -> Result<AddOutcome, CollectionError> {
    let Some(id) = library.next_id() else {
        let e = CollectionError::ids_exhausted(category);
        warn!(%category, "no item IDs left");
        console.say(&e)?;
        return Ok(AddOutcome::Refused);
    };

    console.say(format!(
        "Please enter the following attributes for the new {}.",
        category.noun()
    ))?;

    let mut attributes = IndexMap::new();
    let mut copies = 0;
    for &field in category.prompted_fields() {
        if field == COPIES_FIELD {
            copies = prompt_copies(console)?;
        } else {
            let value = prompt_text(console, field)?;
            attributes.insert(field.to_string(), value);
        }
    }

    let record = Record::new_item(category, id, &attributes, copies);

    console.say("You have entered the following data:")?;
    for (name, value) in record.fields().filter(|(name, _)| *name != ID_FIELD) {
        console.say(format!("{}: {}", name, value))?;
    }

    if console.prompt_choice(CONFIRM_PROMPT, CONFIRM_RETRY, &["", "x"])? == "x" {
        debug!(%category, "add cancelled");
        return Ok(AddOutcome::Cancelled);
    }

    let id = library.add(category, record);
    console.say(format!("The new {} is saved to file.", category.noun()))?;
    Ok(AddOutcome::Added(id))
}

// Commas would split the value into extra columns on the next load.
fn prompt_text<R: LineInput, W: Write>(
    console: &mut Console<R, W>,
    field: &str,
) -> Result<String, CollectionError> {
    loop {
        let value = console.prompt(&format!("{}: ", field))?;
        if !value.contains(',') {
            return Ok(value);
        }
        console.say("Values cannot contain commas. Try again.")?;
    }
}

fn prompt_copies<R: LineInput, W: Write>(
    console: &mut Console<R, W>,
) -> Result<u32, CollectionError> {
    loop {
        match console.prompt(&format!("{}: ", COPIES_FIELD))?.trim().parse::<u32>() {
            Ok(copies) => return Ok(copies),
            Err(_) => console.say("Copies must be a whole number. Try again.")?,
        }
    }
}
