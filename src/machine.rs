//! The stack machine that executes a [`Program`].
//!
//! One step runs `instructions[pc]`, flushes output, then moves `pc` on by
//! one unless the instruction jumped. `pc == len` is the halted state. There
//! is no step limit, so a program that loops forever runs forever.

use std::io::{self, BufRead, BufWriter, Write};

use crate::errors::{ExecError, RuntimeError};
use crate::instruction::Opcode;
use crate::log::DebugTrace;
use crate::program::Program;
use crate::stack::Stack;
use crate::types::Value;

/// What happens to `pc` after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    Jump(usize),
}

/// Totals from a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Instructions executed, failed ones included
    pub steps: u64,
    /// Failures skipped in lenient mode
    pub recovered: u64,
}

/// Execution state for one run of a program.
pub struct Machine<'p, R, W: Write> {
    program: &'p Program,
    pc: usize,
    stack: Stack,
    input: R,
    output: BufWriter<W>,
    trace: DebugTrace<'p>,
}

impl<'p, R: BufRead, W: Write> Machine<'p, R, W> {
    pub fn new(program: &'p Program, input: R, output: W) -> Self {
        Self {
            program,
            pc: 0,
            stack: Stack::new(),
            input,
            output: BufWriter::new(output),
            trace: DebugTrace::stderr(),
        }
    }

    /// Send the debug trace somewhere other than stderr.
    pub fn with_diagnostics(mut self, diagnostics: impl Write + 'p) -> Self {
        self.trace = DebugTrace::new(diagnostics);
        self
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn is_halted(&self) -> bool {
        self.pc >= self.program.len()
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Output written so far. Always complete, since each step flushes.
    pub fn output(&self) -> &W {
        self.output.get_ref()
    }

    pub fn into_output(self) -> io::Result<W> {
        self.output.into_inner().map_err(|e| e.into_error())
    }

    /// Run until halted. In strict mode the first failure ends the run;
    /// otherwise failures are counted and execution carries on.
    pub fn run(&mut self) -> Result<RunReport, RuntimeError> {
        let config = self.program.config();
        if config.debug {
            self.trace.listing(self.program.instructions());
        }

        let mut report = RunReport::default();
        while !self.is_halted() {
            report.steps += 1;
            if let Err(err) = self.step() {
                if config.strict {
                    return Err(err);
                }
                report.recovered += 1;
                crate::log::warn!(pc = err.pc, cause = %err.cause, "skipping failed instruction");
                if config.debug {
                    self.trace.error(&err, &err.cause);
                }
            }
        }
        Ok(report)
    }

    /// Execute one instruction. Does nothing once halted.
    ///
    /// A failed instruction still advances `pc` by one.
    pub fn step(&mut self) -> Result<(), RuntimeError> {
        let program = self.program;
        let Some(inst) = program.instructions().get(self.pc) else {
            return Ok(());
        };

        if program.config().debug {
            self.trace.step(self.pc, inst, &self.stack);
        }
        crate::log::debug!(pc = self.pc, %inst, stack = %self.stack, "step");

        let executed = self.execute(inst.opcode);
        let flushed = self.output.flush().map_err(ExecError::Write);

        let pc = self.pc;
        self.pc = match &executed {
            Ok(Flow::Jump(target)) => *target,
            _ => pc + 1,
        };

        executed
            .and(flushed)
            .map_err(|cause| RuntimeError {
                pc,
                instruction: inst.to_string(),
                cause,
            })
    }

    fn execute(&mut self, opcode: Opcode) -> Result<Flow, ExecError> {
        match opcode {
            Opcode::Nop => {}
            Opcode::Push(v) => self.stack.push(v),
            Opcode::Dup => self.stack.dup()?,
            Opcode::Swap(depth) => self.stack.swap(depth)?,
            Opcode::Sub => self.stack.sub()?,
            Opcode::Greater => self.stack.greater()?,
            Opcode::JumpIfZero(radius) => {
                if self.stack.top()?.is_zero() {
                    return Ok(Flow::Jump(self.program.jump_target(radius)));
                }
            }
            Opcode::GetChar => {
                let c = read_char(&mut self.input).map_err(ExecError::Read)?;
                self.stack.push(c.map_or(Value::ZERO, Value::from_char));
            }
            Opcode::PutChar => {
                let c = self.stack.pop()?.to_char();
                let mut buf = [0; 4];
                self.output
                    .write_all(c.encode_utf8(&mut buf).as_bytes())
                    .map_err(ExecError::Write)?;
            }
        }
        Ok(Flow::Next)
    }

}

/// Decode one UTF-8 scalar. `None` at end of input; a malformed sequence
/// yields U+FFFD after consuming its valid prefix.
fn read_char(input: &mut impl BufRead) -> io::Result<Option<char>> {
    let Some(lead) = peek_byte(input)? else {
        return Ok(None);
    };
    input.consume(1);

    let width = match lead {
        0x00..=0x7f => return Ok(Some(char::from(lead))),
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
    };

    let mut buf = [lead, 0, 0, 0];
    for slot in buf.iter_mut().take(width).skip(1) {
        match peek_byte(input)? {
            Some(b) if b & 0xc0 == 0x80 => {
                *slot = b;
                input.consume(1);
            }
            _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
        }
    }

    let c = std::str::from_utf8(&buf[..width])
        .ok()
        .and_then(|s| s.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    Ok(Some(c))
}

fn peek_byte(input: &mut impl BufRead) -> io::Result<Option<u8>> {
    loop {
        match input.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
