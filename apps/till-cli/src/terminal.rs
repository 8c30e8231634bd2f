//! # Terminal Prompter
//!
//! Line and token input over any `BufRead`, output to any `Write`.
//!
//! ## Input Model
//! ```text
//!   input:  "2\nWidget, large\nW1 10.50\n"
//!
//!   next_token()  → "2"
//!   read_line()   → "Widget, large"     whole line, inner spaces kept
//!   next_token()  → "W1"
//!   next_token()  → "10.50"             same line, still buffered
//!   next_token()  → Err(InputClosed)
//! ```
//!
//! Tokens are whitespace-delimited and may span lines. `read_line` returns
//! what is left of the current line if anything is, otherwise the next line.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::{CliError, CliResult};

pub struct Prompter<R, W> {
    input: R,
    output: W,
    /// Unconsumed rest of the last line read.
    pending: String,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter {
            input,
            output,
            pending: String::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Writes a line.
    pub fn say(&mut self, text: impl std::fmt::Display) -> CliResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Writes a label without a newline and flushes it.
    fn label(&mut self, label: &str) -> CliResult<()> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        Ok(())
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Fills `pending` with the next raw line. `false` at end of input.
    ///
    /// Bytes that are not UTF-8 become U+FFFD.
    fn fill(&mut self) -> CliResult<bool> {
        let mut raw = Vec::new();
        let read = self.input.read_until(b'\n', &mut raw)?;
        self.pending = String::from_utf8_lossy(&raw).into_owned();
        Ok(read > 0)
    }

    /// Next whitespace-delimited token.
    pub fn next_token(&mut self) -> CliResult<String> {
        loop {
            let rest = self.pending.trim_start();
            if !rest.is_empty() {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let token = rest[..end].to_string();
                self.pending = rest[end..].to_string();
                return Ok(token);
            }
            if !self.fill()? {
                return Err(CliError::InputClosed);
            }
        }
    }

    /// Rest of the current line, or the next line, trimmed.
    pub fn read_line(&mut self) -> CliResult<String> {
        if self.pending.trim().is_empty() && !self.fill()? {
            return Err(CliError::InputClosed);
        }
        let line = self.pending.trim().to_string();
        self.pending.clear();
        Ok(line)
    }

    // =========================================================================
    // Prompts
    // =========================================================================

    /// Prints `label` and reads one token.
    pub fn ask(&mut self, label: &str) -> CliResult<String> {
        self.label(label)?;
        self.next_token()
    }

    /// Prints `label` and reads a whole line.
    pub fn ask_line(&mut self, label: &str) -> CliResult<String> {
        self.label(label)?;
        self.read_line()
    }

    /// Prints `label` and parses one token.
    ///
    /// Returns `None` after printing `Invalid {field}!` when the token does
    /// not parse.
    pub fn ask_parsed<T: FromStr>(&mut self, label: &str, field: &str) -> CliResult<Option<T>> {
        let token = self.ask(label)?;
        match token.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                self.say(format!("\nInvalid {}: '{}'", field, token))?;
                Ok(None)
            }
        }
    }
}
