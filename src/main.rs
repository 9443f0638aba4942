//! Collection Manager CLI
//!
//! Interactive text menu over `books.csv` and `movies.csv`.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-dir ~/library
//! cargo run -- --books-file my-books.csv --page-size 20
//! RUST_LOG=debug cargo run
//! ```
//!
//! Menu output goes to stdout; diagnostics go to stderr and are filtered by
//! `RUST_LOG` (default `warn`). When stdin is a terminal, answers are read
//! through a line editor with history; otherwise stdin is read line by line.
//!
//! The process always exits with status 0; failures are reported as messages.

use collection_manager::cli;
use collection_manager::io::CsvStore;
use collection_manager::session::{self, Console, LineInput, SessionConfig, Terminal};
use collection_manager::CollectionError;
use std::io::{self, IsTerminal};
use tracing::{error, warn};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = cli::parse_args();
    let store = CsvStore::new(args.to_store_config());

    let config = args.to_session_config();

    // Line editing only when a person is typing; piped input is read as-is.
    let result = if io::stdin().is_terminal() {
        match Terminal::new() {
            Ok(terminal) => run(&store, terminal, config),
            Err(e) => {
                warn!(error = %e, "line editor unavailable, reading stdin directly");
                run(&store, io::stdin().lock(), config)
            }
        }
    } else {
        run(&store, io::stdin().lock(), config)
    };

    if let Err(e) = result {
        error!(error = %e, "session aborted");
        eprintln!("Error: {}", e);
    }
}

fn run<I: LineInput>(
    store: &CsvStore,
    input: I,
    config: SessionConfig,
) -> Result<(), CollectionError> {
    let console = Console::new(input, io::stdout().lock());
    session::run_session(store, console, config)
}
