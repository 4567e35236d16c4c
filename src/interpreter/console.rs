//==================================================
// File: interpreter/console.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Script console
// Objective: Line output and blocking line input behind swappable sinks so
//            hosts and tests can capture what a script prints
//==================================================

use std::cell::RefCell;
use std::io::{self, BufRead, Cursor, Write};
use std::rc::Rc;

use tracing::warn;

/// ANSI "clear screen and home cursor".
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

pub struct Console {
    output: Box<dyn Write>,
    input: Box<dyn BufRead>,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdio()
    }
}

impl Console {
    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::BufReader::new(io::stdin())))
    }

    pub fn new(output: Box<dyn Write>, input: Box<dyn BufRead>) -> Self {
        Self { output, input }
    }

    /// A console that records output in memory and reads `input` as stdin.
    pub fn captured(input: &str) -> (Self, CapturedOutput) {
        let buffer = CapturedOutput::default();
        let console = Self::new(
            Box::new(buffer.clone()),
            Box::new(Cursor::new(input.as_bytes().to_vec())),
        );
        (console, buffer)
    }

    pub fn print_line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.output, "{text}") {
            warn!(error = %err, "console write failed");
        }
    }

    /// Writes without a newline and flushes, for prompts.
    pub fn print(&mut self, text: &str) {
        let result = write!(self.output, "{text}").and_then(|_| self.output.flush());
        if let Err(err) = result {
            warn!(error = %err, "console write failed");
        }
    }

    /// Reads one line without its line terminator. EOF reads as empty.
    pub fn read_line(&mut self) -> String {
        let mut line = String::new();
        if let Err(err) = self.input.read_line(&mut line) {
            warn!(error = %err, "console read failed");
            return String::new();
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        line
    }

    pub fn clear(&mut self) {
        self.print(CLEAR_SCREEN);
    }

    pub fn flush(&mut self) {
        if let Err(err) = self.output.flush() {
            warn!(error = %err, "console flush failed");
        }
    }
}

/// Shared in-memory output buffer.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput(Rc<RefCell<Vec<u8>>>);

impl CapturedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}


//==================================================
// End of file
//==================================================
