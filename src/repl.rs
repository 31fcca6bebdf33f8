//! The read-dispatch-print loop.
//!
//! Each turn prints the prompt, reads one line and either handles it as a
//! meta-command or runs it through prepare, execute and the formatter.
//! Statement errors are printed and the loop carries on; only I/O errors on
//! the streams themselves end a session early.

use std::io::{BufRead, Read, Write};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::executor;
use crate::output;
use crate::statement::Statement;
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    AwaitingLine,
    Dispatching,
    Terminated,
}

/// Longest accepted input line, terminator excluded. Longer lines are
/// skipped up to their newline and reported as syntax errors.
pub const MAX_LINE_LEN: usize = 4096;

// Lines starting with '.' are handled by the loop itself.
enum MetaCommand {
    Exit,
    Unrecognized,
}

impl MetaCommand {
    fn parse(input: &str) -> Option<MetaCommand> {
        match input {
            ".exit" => Some(MetaCommand::Exit),
            _ if input.starts_with('.') => Some(MetaCommand::Unrecognized),
            _ => None,
        }
    }
}

enum Input {
    Line,
    Oversized,
    End,
}

pub struct Repl<R, W> {
    table: Table,
    input: R,
    output: W,
    buffer: Vec<u8>,
    state: State,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(table: Table, input: R, output: W) -> Self {
        Self {
            table,
            input,
            output,
            buffer: Vec::new(),
            state: State::AwaitingLine,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_parts(self) -> (Table, W) {
        (self.table, self.output)
    }

    /// Runs turns until `.exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        info!("Starting REPL session...");
        while self.step()? != State::Terminated {}
        info!(rows = self.table.len(), "REPL session ended.");
        Ok(())
    }

    /// Runs a single turn and returns the state the loop ends up in.
    ///
    /// A stream error ends the session: the state becomes
    /// [`State::Terminated`] and the error is returned.
    pub fn step(&mut self) -> Result<State> {
        if self.state == State::Terminated {
            return Ok(State::Terminated);
        }

        match self.turn() {
            Ok(state) => {
                self.state = state;
                Ok(state)
            }
            Err(err) => {
                warn!(%err, "Stream failed, ending session.");
                self.state = State::Terminated;
                Err(err)
            }
        }
    }

    fn turn(&mut self) -> Result<State> {
        output::write_prompt(&mut self.output)?;
        match self.read_input()? {
            Input::End => {
                debug!("End of input.");
                Ok(State::Terminated)
            }
            Input::Oversized => {
                warn!(limit = MAX_LINE_LEN, "Skipped an oversized line.");
                output::write_error(&mut self.output, &Error::Syntax)?;
                Ok(State::AwaitingLine)
            }
            Input::Line => {
                self.state = State::Dispatching;
                self.dispatch()
            }
        }
    }

    /// Reads the next line into the buffer without its line terminator.
    fn read_input(&mut self) -> Result<Input> {
        self.buffer.clear();
        let limit = MAX_LINE_LEN as u64 + 1;
        let n = (&mut self.input)
            .take(limit)
            .read_until(b'\n', &mut self.buffer)?;
        if n == 0 {
            return Ok(Input::End);
        }
        if n as u64 == limit && self.buffer.last() != Some(&b'\n') {
            self.skip_rest_of_line()?;
            return Ok(Input::Oversized);
        }

        while matches!(self.buffer.last(), Some(b'\n' | b'\r')) {
            self.buffer.pop();
        }
        Ok(Input::Line)
    }

    fn skip_rest_of_line(&mut self) -> Result<()> {
        loop {
            let (consumed, found_newline) = {
                let available = self.input.fill_buf()?;
                if available.is_empty() {
                    return Ok(());
                }
                match available.iter().position(|&b| b == b'\n') {
                    Some(i) => (i + 1, true),
                    None => (available.len(), false),
                }
            };
            self.input.consume(consumed);
            if found_newline {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self) -> Result<State> {
        let Ok(line) = std::str::from_utf8(&self.buffer) else {
            debug!("Line is not valid UTF-8.");
            output::write_error(&mut self.output, &Error::Syntax)?;
            return Ok(State::AwaitingLine);
        };
        debug!(line, "Dispatching a line.");

        match MetaCommand::parse(line) {
            Some(MetaCommand::Exit) => return Ok(State::Terminated),
            Some(MetaCommand::Unrecognized) => {
                let err = Error::UnrecognizedCommand(line.to_string());
                output::write_error(&mut self.output, &err)?;
            }
            None => {
                let result = match Statement::prepare(line) {
                    Ok(statement) => executor::execute(statement, &mut self.table),
                    Err(err) => Err(err),
                };
                match result {
                    Ok(executed) => output::write_executed(&mut self.output, executed)?,
                    Err(err) if err.is_recoverable() => {
                        debug!(%err, "Statement failed.");
                        output::write_error(&mut self.output, &err)?;
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        Ok(State::AwaitingLine)
    }
}
