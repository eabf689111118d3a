//! A compiler and stack machine for path programs.
//!
//! A program is a walk on the integer grid. `A`, `S`, `D` and `W` move the
//! salesperson left, down, right and up; `$` visits the current point. Every
//! other character is a comment. Each visit compiles to one instruction
//! picked by the octant the point lies in, and instructions run in order of
//! their distance from the origin, not in source order. The walk ends by
//! visiting the origin.
//!
//! ```
//! // five moves to (4, 1) push 5, then walk home
//! let compiled = tsp::compile_str("push.tsp", "DDDDW$ ASAAA$", tsp::Config::default()).unwrap();
//! assert_eq!(compiled.program.listing(), "push 5 (4, 1)");
//!
//! let mut out = Vec::new();
//! compiled.program.run(&b""[..], &mut out).unwrap();
//! assert!(out.is_empty());
//! ```

use pest_derive::Parser;

pub mod compile;
pub mod errors;
pub mod geom;
pub mod instruction;
pub mod log;
pub mod machine;
pub mod program;
pub mod stack;
pub mod types;

pub use compile::{Compilation, compile, compile_named, compile_str};
pub use errors::{CompileError, RuntimeError};
pub use machine::{Machine, RunReport};
pub use program::{Config, Program};

#[derive(Parser)]
#[grammar = "tsp.pest"]
pub struct TspParser;

/// Compile `source` and run it leniently against `input`.
///
/// Returns everything the program printed, or an error with diagnostics.
/// Trailing code after the origin visit is ignored.
pub fn interpret(source: &str, input: &[u8]) -> Result<Vec<u8>, miette::Report> {
    let compilation = compile_str("<input>", source, Config::default())?;
    let mut output = Vec::new();
    compilation.program.run(input, &mut output)?;
    Ok(output)
}
