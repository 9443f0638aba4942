//! Line-oriented console over a line source and a writer
//!
//! Prompts are shown without a trailing newline before the answer is read.
//! Answers have their line terminator removed and nothing else; callers
//! decide whether surrounding whitespace matters.
//!
//! Two line sources exist: any [`BufRead`] (piped input and tests), and
//! [`Terminal`], a `rustyline` editor used when stdin is a terminal.

use crate::types::CollectionError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Message shown when an item ID does not parse
pub const INVALID_ID_MESSAGE: &str = "The ID you enter must be a valid integer. Try again.";

/// Where answers to prompts come from
pub trait LineInput {
    /// Show `prompt` and read one line without its terminator
    ///
    /// Returns `None` once the input is exhausted.
    fn read_line<W: Write>(
        &mut self,
        prompt: &str,
        output: &mut W,
    ) -> Result<Option<String>, CollectionError>;
}

impl<R: BufRead> LineInput for R {
    fn read_line<W: Write>(
        &mut self,
        prompt: &str,
        output: &mut W,
    ) -> Result<Option<String>, CollectionError> {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if BufRead::read_line(self, &mut line)? == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Interactive line editor with history
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    /// Create a line editor on the controlling terminal
    pub fn new() -> Result<Self, CollectionError> {
        let editor = DefaultEditor::new().map_err(readline_error)?;
        Ok(Terminal { editor })
    }
}

impl LineInput for Terminal {
    // The editor draws the prompt itself; anything already buffered in
    // `output` must reach the screen first.
    fn read_line<W: Write>(
        &mut self,
        prompt: &str,
        output: &mut W,
    ) -> Result<Option<String>, CollectionError> {
        output.flush()?;

        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(readline_error(e)),
        }
    }
}

fn readline_error(error: ReadlineError) -> CollectionError {
    match error {
        ReadlineError::Io(e) => CollectionError::from(e),
        other => CollectionError::IoError {
            message: other.to_string(),
        },
    }
}

/// Blocking console used by the session and its handlers
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: LineInput, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Write one line
    pub fn say(&mut self, text: impl Display) -> Result<(), CollectionError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Write text as-is, without adding a newline
    pub fn write(&mut self, text: impl Display) -> Result<(), CollectionError> {
        write!(self.output, "{}", text)?;
        Ok(())
    }

    /// Show `message` and read one line of input
    ///
    /// # Errors
    ///
    /// `InputClosed` when the input is exhausted.
    pub fn prompt(&mut self, message: &str) -> Result<String, CollectionError> {
        self.input
            .read_line(message, &mut self.output)?
            .ok_or(CollectionError::InputClosed)
    }

    /// Prompt until the answer parses as an integer
    ///
    /// Any integer is accepted, including negative ones; whether it names an
    /// item is for the caller to decide.
    pub fn prompt_id(&mut self, message: &str) -> Result<i64, CollectionError> {
        loop {
            match self.prompt(message)?.trim().parse::<i64>() {
                Ok(id) => return Ok(id),
                Err(_) => self.say(INVALID_ID_MESSAGE)?,
            }
        }
    }

    /// Prompt until the answer is one of `choices`
    ///
    /// After the first invalid answer, `retry_message` replaces `message`.
    pub fn prompt_choice(
        &mut self,
        message: &str,
        retry_message: &str,
        choices: &[&str],
    ) -> Result<String, CollectionError> {
        let mut answer = self.prompt(message)?;
        while !choices.contains(&answer.as_str()) {
            answer = self.prompt(retry_message)?;
        }
        Ok(answer)
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}
