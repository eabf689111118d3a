//! Logging.
//!
//! Two independent channels:
//! - `debug!`/`warn!` re-export `tracing` when the `tracing` feature is on,
//!   and expand to nothing otherwise.
//! - [`DebugTrace`] is the `[DEBUG]` stream a program writes when run with
//!   `Config::debug`. It needs no feature and goes to stderr unless
//!   redirected.

use std::fmt;
use std::io::{self, Write};

use crate::instruction::Instruction;
use crate::stack::Stack;

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};

/// Writer for the human-readable execution trace.
///
/// Write failures are dropped; a broken diagnostic stream never stops a
/// program.
pub struct DebugTrace<'a> {
    out: Box<dyn Write + 'a>,
}

impl<'a> DebugTrace<'a> {
    pub fn new(out: impl Write + 'a) -> Self {
        Self { out: Box::new(out) }
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    pub fn listing(&mut self, instructions: &[Instruction]) {
        self.line(format_args!("--- Instructions ---"));
        for inst in instructions {
            self.line(format_args!("{inst}"));
        }
        self.line(format_args!("--------------------"));
    }

    pub fn step(&mut self, pc: usize, inst: &Instruction, stack: &Stack) {
        self.line(format_args!("Stack: {stack}"));
        self.line(format_args!("PC: {pc:4}, {inst}"));
    }

    pub fn error(&mut self, err: &dyn fmt::Display, cause: &dyn fmt::Display) {
        self.line(format_args!("Error: {err}: {cause}"));
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "[DEBUG] {args}");
    }
}
