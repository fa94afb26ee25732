//! Line-oriented terminal I/O that keeps a transcript.
//!
//! All user interaction goes through [`Console`] so that the session log sees
//! exactly what the user saw and typed. The reader and writer are generic,
//! which lets tests drive a whole session from an in-memory script.

use std::io::{BufRead, Write};
use tracing::trace;

use crate::error::{AppError, Result};
use crate::store::SessionLog;

pub struct Console<R, W> {
    input: R,
    output: W,
    log: SessionLog,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            log: SessionLog::new(),
        }
    }

    /// Prints a line and records it in the transcript.
    pub fn say(&mut self, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        self.log.record(message);
        Ok(())
    }

    /// Reads one line (without its line terminator) and records it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InputClosed` at end of input.
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        trace!("Read input line {:?}", line);
        self.log.record(line.clone());
        Ok(line)
    }

    /// Prints `message` and returns the user's reply.
    pub fn prompt(&mut self, message: impl Into<String>) -> Result<String> {
        self.say(message)?;
        self.read_line()
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}
