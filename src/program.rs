//! Compiled programs and their run configuration.

use std::io::{self, BufRead, Write};

use crate::errors::RuntimeError;
use crate::instruction::Instruction;
use crate::machine::{Machine, RunReport};

/// How a program reacts to failures and whether it traces itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Stop at the first failing instruction instead of skipping it.
    pub strict: bool,
    /// Write the instruction listing and a per-step trace to the
    /// diagnostic stream.
    pub debug: bool,
}

/// A compiled program.
///
/// Instructions are always ordered by `(chebyshev_radius, manhattan_radius)`;
/// jump resolution relies on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    config: Config,
}

impl Program {
    pub fn new(mut instructions: Vec<Instruction>, config: Config) -> Self {
        instructions.sort_by_key(|inst| inst.sort_key());
        Self {
            instructions,
            config,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Index of the first instruction whose Chebyshev radius is at least
    /// `radius`, or `len()` when there is none. An exact match is not
    /// required.
    pub fn jump_target(&self, radius: u32) -> usize {
        self.instructions
            .partition_point(|inst| inst.chebyshev_radius < radius)
    }

    /// One instruction per line, in execution order.
    pub fn listing(&self) -> String {
        self.instructions
            .iter()
            .map(|inst| inst.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn machine<R: BufRead, W: Write>(&self, input: R, output: W) -> Machine<'_, R, W> {
        Machine::new(self, input, output)
    }

    /// Run to completion against the given streams.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<RunReport, RuntimeError> {
        self.machine(input, output).run()
    }

    /// Run to completion on process stdin and stdout.
    pub fn run_stdio(&self) -> Result<RunReport, RuntimeError> {
        self.run(io::stdin().lock(), io::stdout().lock())
    }
}
