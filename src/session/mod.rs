//! Interactive menu session
//!
//! This module drives the text menu: it loads both collections through a
//! [`CollectionStore`], reads one command per menu round, dispatches it to a
//! handler, and persists the category a handler changed. The in-memory
//! [`Library`] is the single source of truth for the whole session; files are
//! read once at start-up and written only after a successful change.
//!
//! # Commands
//!
//! | Code | Command |
//! |------|---------|
//! | `ci` | Check in an item |
//! | `co` | Check out an item |
//! | `ab` | Add a new book |
//! | `am` | Add a new movie |
//! | `db` | Display books |
//! | `dm` | Display movies |
//! | `qb` | Query for books (matched case-insensitively) |
//! | `qm` | Query for movies |
//! | `x`  | Exit |

pub mod console;
pub mod handlers;

pub use console::{Console, LineInput, Terminal};
pub use handlers::AddOutcome;

use crate::core::{CollectionStore, Library};
use indexmap::IndexSet;
use crate::types::{Category, CollectionError};
use std::io::Write;
use tracing::{error, info, warn};

/// Records shown per display page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

const MENU: &str = "\n\n********** Welcome to the Collection Manager. **********\n\
COMMAND    FUNCTION\n  \
ci         Check in an item\n  \
co         Check out an item\n  \
ab         Add a new book\n  \
am         Add a new movie\n  \
db         Display books\n  \
dm         Display movies\n  \
qb         Query for books\n  \
qm         Query for movies\n  \
x          Exit";

/// Session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Records per display page
    pub page_size: usize,
}

impl SessionConfig {
    /// Create a session config
    ///
    /// A zero page size falls back to [`DEFAULT_PAGE_SIZE`] with a warning.
    pub fn new(page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            warn!(
                default = DEFAULT_PAGE_SIZE,
                "page size must be at least 1, using default"
            );
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        SessionConfig { page_size }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A menu command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CheckIn,
    CheckOut,
    Add(Category),
    Display(Category),
    Query(Category),
    Exit,
}

impl Command {
    /// Parse a menu code
    ///
    /// Codes match exactly, except `qb` which is case-insensitive.
    pub fn parse(input: &str) -> Option<Command> {
        match input {
            "ci" => Some(Command::CheckIn),
            "co" => Some(Command::CheckOut),
            "ab" => Some(Command::Add(Category::Books)),
            "am" => Some(Command::Add(Category::Movies)),
            "db" => Some(Command::Display(Category::Books)),
            "dm" => Some(Command::Display(Category::Movies)),
            "qm" => Some(Command::Query(Category::Movies)),
            "x" => Some(Command::Exit),
            _ if input.eq_ignore_ascii_case("qb") => Some(Command::Query(Category::Books)),
            _ => None,
        }
    }
}

/// Whether the menu loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// A loaded, running menu session
pub struct Session<'a, S, R, W> {
    store: &'a S,
    console: Console<R, W>,
    library: Library,
    config: SessionConfig,
    unsaved: IndexSet<Category>,
}

impl<'a, S, R, W> Session<'a, S, R, W>
where
    S: CollectionStore,
    R: LineInput,
    W: Write,
{
    /// Start a session over an already-loaded library
    pub fn new(store: &'a S, library: Library, console: Console<R, W>, config: SessionConfig) -> Self {
        Session {
            store,
            console,
            library,
            config,
            unsaved: IndexSet::new(),
        }
    }

    /// Load both collections and start a session
    ///
    /// Every category is attempted so the user hears about each file that
    /// failed. Any failure is fatal for the session.
    ///
    /// # Returns
    ///
    /// * `Ok(Ok(session))` when both collections loaded
    /// * `Ok(Err(console))` when loading failed; the failure has already been
    ///   reported and the console is handed back
    /// * `Err(_)` if the console itself failed
    pub fn open(
        store: &'a S,
        mut console: Console<R, W>,
        config: SessionConfig,
    ) -> Result<Result<Self, Console<R, W>>, CollectionError> {
        let mut failed = false;
        let mut library = Library::default();

        for category in Category::ALL {
            match store.load(category) {
                Ok(collection) => *library.collection_mut(category) = collection,
                Err(e) => {
                    failed = true;
                    let location = store.location(category);
                    error!(file = %location, error = %e, "failed to load collection");
                    match e {
                        CollectionError::FileNotFound { .. } => console.say(format!(
                            "File not found when attempting to read {}",
                            location
                        ))?,
                        _ => console.say(format!("Error in data file when reading {}", location))?,
                    }
                }
            }
        }

        if failed {
            console.say("The collections could not be loaded. Exiting.")?;
            return Ok(Err(console));
        }

        console.say("The collections have loaded successfully.")?;
        Ok(Ok(Session::new(store, library, console, config)))
    }

    /// Run the menu loop until `x` or end of input
    pub fn run(&mut self) -> Result<(), CollectionError> {
        loop {
            self.console.say(MENU)?;
            let input = match self.console.prompt("Please enter a command to proceed: ") {
                Ok(input) => input,
                Err(CollectionError::InputClosed) => break,
                Err(e) => return Err(e),
            };

            let flow = match Command::parse(&input) {
                Some(command) => match self.dispatch(command) {
                    Ok(flow) => flow,
                    Err(CollectionError::InputClosed) => Flow::Exit,
                    Err(e) => return Err(e),
                },
                None => {
                    self.console.say("Unknown command.  Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        if self.unsaved.is_empty() {
            self.console
                .say("All updated information has been saved to file.")?;
        } else {
            let files: Vec<String> = self
                .unsaved
                .iter()
                .map(|&category| self.store.location(category))
                .collect();
            self.console.say(format!(
                "Some changes could not be saved to file: {}",
                files.join(", ")
            ))?;
        }
        self.console
            .say("Thank you for using the Collection Manager. See you next time!")?;
        info!("session ended");
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow, CollectionError> {
        let changed = match command {
            Command::CheckIn => handlers::check_in(&mut self.console, &mut self.library)?,
            Command::CheckOut => handlers::check_out(&mut self.console, &mut self.library)?,
            Command::Add(category) => {
                match handlers::add_item(&mut self.console, &mut self.library, category)? {
                    AddOutcome::Added(_) => Some(category),
                    AddOutcome::Cancelled | AddOutcome::Refused => None,
                }
            }
            Command::Display(category) => {
                handlers::display(
                    &mut self.console,
                    self.library.collection(category),
                    self.config.page_size,
                )?;
                None
            }
            Command::Query(category) => {
                handlers::query(&mut self.console, self.library.collection(category), category)?;
                None
            }
            Command::Exit => return Ok(Flow::Exit),
        };

        if let Some(category) = changed {
            self.persist(category)?;
        }
        Ok(Flow::Continue)
    }

    // A failed save is reported and the session carries on with the
    // in-memory state; the next successful save writes it out.
    fn persist(&mut self, category: Category) -> Result<(), CollectionError> {
        match self.store.save(category, self.library.collection(category)) {
            Ok(()) => {
                self.unsaved.shift_remove(&category);
            }
            Err(e) => {
                let location = self.store.location(category);
                warn!(file = %location, error = %e, "failed to save collection");
                self.unsaved.insert(category);
                self.console
                    .say(format!("Failed to save {}: {}", location, e))?;
            }
        }
        Ok(())
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}

/// Load the collections and run the menu until the user exits
///
/// A load failure is reported on the console and ends the session normally.
pub fn run_session<S, R, W>(
    store: &S,
    console: Console<R, W>,
    config: SessionConfig,
) -> Result<(), CollectionError>
where
    S: CollectionStore,
    R: LineInput,
    W: Write,
{
    match Session::open(store, console, config)? {
        Ok(mut session) => session.run(),
        Err(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Collection;
    use crate::types::{FieldValue, ItemId, Record};
    use indexmap::IndexMap;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory store recording every save
    #[derive(Default)]
    struct MemoryStore {
        collections: RefCell<HashMap<Category, Collection>>,
        saves: RefCell<Vec<Category>>,
        fail_saves: bool,
    }

    impl MemoryStore {
        fn with(books: Collection, movies: Collection) -> Self {
            let store = MemoryStore::default();
            store.collections.borrow_mut().insert(Category::Books, books);
            store.collections.borrow_mut().insert(Category::Movies, movies);
            store
        }

        fn stored(&self, category: Category) -> Collection {
            self.collections.borrow()[&category].clone()
        }
    }

    impl CollectionStore for MemoryStore {
        fn load(&self, category: Category) -> Result<Collection, CollectionError> {
            self.collections
                .borrow()
                .get(&category)
                .cloned()
                .ok_or_else(|| CollectionError::file_not_found(&self.location(category)))
        }

        fn save(&self, category: Category, collection: &Collection) -> Result<(), CollectionError> {
            if self.fail_saves {
                return Err(CollectionError::IoError {
                    message: "disk full".to_string(),
                });
            }
            self.saves.borrow_mut().push(category);
            self.collections
                .borrow_mut()
                .insert(category, collection.clone());
            Ok(())
        }

        fn location(&self, category: Category) -> String {
            category.default_file_name().to_string()
        }
    }

    fn item(id: ItemId, title: &str, copies: u32, available: u32) -> Record {
        let fields = IndexMap::from([
            ("ID".to_string(), FieldValue::Integer(id)),
            ("Title".to_string(), FieldValue::Text(title.to_string())),
            ("Copies".to_string(), FieldValue::Integer(copies)),
            ("Available".to_string(), FieldValue::Integer(available)),
        ]);
        Record::from_fields(fields, None).unwrap()
    }

    fn store() -> MemoryStore {
        MemoryStore::with(
            vec![item(1, "Dune", 2, 2)].into_iter().collect(),
            vec![item(2, "Alien", 1, 1)].into_iter().collect(),
        )
    }

    fn run_script(store: &MemoryStore, script: &str) -> String {
        let mut output = Vec::new();
        let console = Console::new(script.as_bytes(), &mut output);
        run_session(store, console, SessionConfig::default()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[rstest]
    #[case::check_in("ci", Some(Command::CheckIn))]
    #[case::check_out("co", Some(Command::CheckOut))]
    #[case::add_book("ab", Some(Command::Add(Category::Books)))]
    #[case::add_movie("am", Some(Command::Add(Category::Movies)))]
    #[case::display_books("db", Some(Command::Display(Category::Books)))]
    #[case::display_movies("dm", Some(Command::Display(Category::Movies)))]
    #[case::query_books("qb", Some(Command::Query(Category::Books)))]
    #[case::query_books_upper("QB", Some(Command::Query(Category::Books)))]
    #[case::query_books_mixed("qB", Some(Command::Query(Category::Books)))]
    #[case::query_movies("qm", Some(Command::Query(Category::Movies)))]
    #[case::exit("x", Some(Command::Exit))]
    #[case::check_in_upper("CI", None)]
    #[case::query_movies_upper("QM", None)]
    #[case::exit_upper("X", None)]
    #[case::padded(" co", None)]
    #[case::empty("", None)]
    fn test_command_parse(#[case] input: &str, #[case] expected: Option<Command>) {
        assert_eq!(Command::parse(input), expected);
    }

    #[rstest]
    #[case::zero(0, DEFAULT_PAGE_SIZE)]
    #[case::one(1, 1)]
    #[case::custom(25, 25)]
    fn test_session_config_page_size(#[case] requested: usize, #[case] expected: usize) {
        assert_eq!(SessionConfig::new(requested).page_size, expected);
    }

    #[test]
    fn test_exit_immediately() {
        let store = store();
        let output = run_script(&store, "x\n");

        assert!(output.starts_with("The collections have loaded successfully.\n"));
        assert!(output.contains("********** Welcome to the Collection Manager. **********"));
        assert!(output.ends_with(
            "All updated information has been saved to file.\n\
             Thank you for using the Collection Manager. See you next time!\n"
        ));
        assert!(store.saves.borrow().is_empty());
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let store = store();
        let output = run_script(&store, "");
        assert!(output.ends_with("See you next time!\n"));
    }

    #[test]
    fn test_end_of_input_inside_handler_ends_session() {
        let store = store();
        let output = run_script(&store, "co\n");
        assert!(output.ends_with("See you next time!\n"));
        assert!(store.saves.borrow().is_empty());
    }

    #[test]
    fn test_unknown_command_reprompts() {
        let store = store();
        let output = run_script(&store, "zz\nx\n");

        assert!(output.contains("Unknown command.  Please try again."));
        assert_eq!(output.matches("Please enter a command to proceed: ").count(), 2);
    }

    #[test]
    fn test_check_out_persists_affected_category_only() {
        let store = store();
        run_script(&store, "co\n2\nx\n");

        assert_eq!(*store.saves.borrow(), vec![Category::Movies]);
        assert_eq!(store.stored(Category::Movies).get(2).map(Record::available), Some(0));
        assert_eq!(store.stored(Category::Books).get(1).map(Record::available), Some(2));
    }

    #[test]
    fn test_refused_check_in_does_not_persist() {
        let store = store();
        let output = run_script(&store, "ci\n1\nci\n99\nx\n");

        assert!(store.saves.borrow().is_empty());
        assert!(output.contains("All copies are already available"));
        assert!(output.contains("The item with ID 99 that you entered is NOT found."));
    }

    #[test]
    fn test_state_carries_across_commands() {
        let store = store();
        let output = run_script(&store, "co\n1\nco\n1\nco\n1\nx\n");

        assert_eq!(output.matches("Your check out has succeeded.").count(), 2);
        assert!(output.contains("No copies of the item are available for check out."));
        assert_eq!(store.saves.borrow().len(), 2);
        assert_eq!(store.stored(Category::Books).get(1).map(Record::available), Some(0));
    }

    #[test]
    fn test_add_then_add_uses_library_wide_ids() {
        let store = store();
        run_script(
            &store,
            "ab\nUbik\nPKD\nDoubleday\n202\n1969\n1\n\n\
             am\nHeat\nMann\n170\nCrime\n1995\n2\n\nx\n",
        );

        assert_eq!(
            *store.saves.borrow(),
            vec![Category::Books, Category::Movies]
        );
        assert!(store.stored(Category::Books).get(3).is_some());
        assert!(store.stored(Category::Movies).get(4).is_some());
    }

    #[test]
    fn test_cancelled_add_does_not_persist() {
        let store = store();
        run_script(&store, "am\nHeat\nMann\n170\nCrime\n1995\n2\nx\nx\n");

        assert!(store.saves.borrow().is_empty());
        assert_eq!(store.stored(Category::Movies).len(), 1);
    }

    #[test]
    fn test_query_uses_explicit_category() {
        let store = store();
        let output = run_script(&store, "qm\ndune\nQB\nalien\nqb\nDUNE\nx\n");

        assert!(output.contains("The movie you searched is NOT found."));
        assert!(output.contains("The book you searched is NOT found."));
        assert!(output.contains("ID: 1\nTitle: Dune\n"));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut store = store();
        store.fail_saves = true;

        let output = run_script(&store, "co\n1\nx\n");

        assert!(output.contains("Failed to save books.csv: I/O error: disk full"));
        assert!(output.ends_with(
            "Some changes could not be saved to file: books.csv\n\
             Thank you for using the Collection Manager. See you next time!\n"
        ));
        assert!(!output.contains("All updated information has been saved to file."));
    }

    #[test]
    fn test_later_save_clears_unsaved_category() {
        let store = store();
        let console = Console::new(&b"co\n1\nco\n1\nx\n"[..], Vec::new());
        let mut session = match Session::open(&store, console, SessionConfig::default()).unwrap() {
            Ok(session) => session,
            Err(_) => panic!("Expected session to open"),
        };
        session.unsaved.insert(Category::Books);

        session.run().unwrap();

        let (_, output) = session.into_console().into_parts();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("All updated information has been saved to file."));
        assert_eq!(store.stored(Category::Books).get(1).map(Record::available), Some(0));
    }

    #[test]
    fn test_refused_add_does_not_persist() {
        let store = MemoryStore::with(
            vec![item(ItemId::MAX, "Keep", 1, 1)].into_iter().collect(),
            Collection::new(),
        );

        let output = run_script(&store, "am\nx\n");

        assert!(output.contains("No item IDs are left, so the new movie can not be added."));
        assert!(store.saves.borrow().is_empty());
        assert!(store.stored(Category::Movies).is_empty());
    }

    #[test]
    fn test_load_failure_reports_and_exits() {
        let store = MemoryStore::default();
        store
            .collections
            .borrow_mut()
            .insert(Category::Books, Collection::new());

        let output = run_script(&store, "co\n1\nx\n");

        assert_eq!(
            output,
            "File not found when attempting to read movies.csv\n\
             The collections could not be loaded. Exiting.\n"
        );
    }

    #[test]
    fn test_open_exposes_loaded_library() {
        let store = store();
        let console = Console::new(&b""[..], Vec::new());

        let session = match Session::open(&store, console, SessionConfig::default()).unwrap() {
            Ok(session) => session,
            Err(_) => panic!("Expected session to open"),
        };

        assert_eq!(session.library().max_id(), Some(2));
        let (_, output) = session.into_console().into_parts();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "The collections have loaded successfully.\n"
        );
    }
}
