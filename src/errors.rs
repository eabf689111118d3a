//! Error types with rich diagnostics using miette
//!
//! Compile errors carry source spans so a bad path can be pointed at in the
//! source. Runtime errors name the instruction that failed.

use std::io;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::geom::Point;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Decode raw source bytes; invalid UTF-8 becomes U+FFFD, which is inert.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(name, String::from_utf8_lossy(bytes).into_owned())
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Zero-width span at the end of the source
    pub fn end_span(&self) -> SourceSpan {
        (self.source.len(), 0).into()
    }
}

// ============================================================================
// Compile Errors
// ============================================================================

/// Errors that abort compilation
#[derive(Error, Diagnostic, Debug)]
pub enum CompileError {
    #[error("failed to read the source")]
    #[diagnostic(code(tsp::compile::read))]
    Read(#[source] io::Error),

    #[error("failed to tokenize the source: {message}")]
    #[diagnostic(code(tsp::compile::tokenize))]
    Tokenize { message: String },

    #[error(
        "instruction {first} at {first_point} and instruction {second} at {second_point} \
         share Chebyshev distance {chebyshev} and Manhattan distance {manhattan} from the origin"
    )]
    #[diagnostic(
        code(tsp::compile::duplicate_distance_key),
        help("no two visited points may have both the same Chebyshev and the same Manhattan distance from the origin")
    )]
    DuplicateDistanceKey {
        first: usize,
        first_point: Point,
        second: usize,
        second_point: Point,
        chebyshev: u32,
        manhattan: u32,
        #[source_code]
        src: NamedSource<String>,
        #[label("first visited here")]
        first_span: SourceSpan,
        #[label("conflicting visit")]
        second_span: SourceSpan,
    },

    #[error("the salesperson never returns to (0, 0); the path ends at {end}")]
    #[diagnostic(
        code(tsp::compile::missing_termination),
        help("walk back to the origin and visit it with `$` to end the program")
    )]
    MissingTermination {
        end: Point,
        #[source_code]
        src: NamedSource<String>,
        #[label("source ends here")]
        span: SourceSpan,
    },
}

// ============================================================================
// Compile Warnings
// ============================================================================

/// Moves after the origin visit. Scanning stops there, but compilation
/// still succeeds with what came before.
#[derive(Error, Diagnostic, Debug)]
#[error("code remaining after visiting the origin is ignored")]
#[diagnostic(code(tsp::compile::trailing_code), severity(Warning))]
pub struct TrailingCode {
    #[source_code]
    pub src: NamedSource<String>,
    #[label("ignored from here on")]
    pub span: SourceSpan,
}

// ============================================================================
// Runtime Errors
// ============================================================================

/// Failures of the stack itself
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    #[error("insufficient number of elements in the stack")]
    #[diagnostic(code(tsp::stack::underflow))]
    Underflow,

    #[error("cannot swap with depth {depth} on a stack of {len}")]
    #[diagnostic(
        code(tsp::stack::out_of_range),
        help("swap depth must be between 1 and the stack length")
    )]
    OutOfRange { depth: usize, len: usize },
}

/// What went wrong while executing one instruction
#[derive(Error, Diagnostic, Debug)]
pub enum ExecError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Stack(#[from] StackError),

    #[error("failed to read a char")]
    #[diagnostic(code(tsp::io::read))]
    Read(#[source] io::Error),

    #[error("failed to write a char")]
    #[diagnostic(code(tsp::io::write))]
    Write(#[source] io::Error),
}

/// An instruction failure, tagged with where it happened
#[derive(Error, Diagnostic, Debug)]
#[error("instruction {pc} ({instruction}) failed")]
#[diagnostic(code(tsp::runtime))]
pub struct RuntimeError {
    pub pc: usize,
    /// Display form of the failing instruction
    pub instruction: String,
    #[source]
    pub cause: ExecError,
}
