//! Path tracing: turns source text into a sorted instruction list.
//!
//! The salesperson starts at the origin. Moves walk the grid, `$` visits
//! the current point. Each visit away from the origin becomes one
//! instruction, chosen by the area the point lies in. Visiting the origin
//! ends the program.

use std::collections::HashMap;
use std::io::Read;

use miette::SourceSpan;
use pest::Parser;

use crate::errors::{CompileError, SourceContext, TrailingCode};
use crate::geom::{DistanceKey, Move, Point};
use crate::instruction::Instruction;
use crate::program::{Config, Program};
use crate::{Rule, TspParser};

/// A successfully compiled program plus any warnings raised on the way.
#[derive(Debug)]
pub struct Compilation {
    pub program: Program,
    pub warnings: Vec<TrailingCode>,
}

/// Compile source read from `reader`.
pub fn compile(reader: impl Read, config: Config) -> Result<Compilation, CompileError> {
    compile_named("<input>", reader, config)
}

/// Compile source read from `reader`, naming it `name` in diagnostics.
pub fn compile_named(
    name: &str,
    mut reader: impl Read,
    config: Config,
) -> Result<Compilation, CompileError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(CompileError::Read)?;
    Compiler::new(SourceContext::from_bytes(name, &bytes), config).compile()
}

/// Compile an in-memory source.
pub fn compile_str(name: &str, source: &str, config: Config) -> Result<Compilation, CompileError> {
    Compiler::new(SourceContext::new(name, source), config).compile()
}

/// Where a distance key was first claimed.
#[derive(Debug, Clone, Copy)]
struct Visit {
    /// 1-based position among visits that produced an instruction or ended
    /// the program
    index: usize,
    point: Point,
    span: SourceSpan,
}

pub struct Compiler {
    ctx: SourceContext,
    config: Config,
    origin: Point,
}

impl Compiler {
    pub fn new(ctx: SourceContext, config: Config) -> Self {
        Self {
            ctx,
            config,
            origin: Point::ORIGIN,
        }
    }

    pub fn compile(self) -> Result<Compilation, CompileError> {
        let pairs = TspParser::parse(Rule::program, &self.ctx.source).map_err(|e| {
            CompileError::Tokenize {
                message: e.to_string(),
            }
        })?;

        let mut tracer = Tracer::new(self.origin);
        let mut warnings = Vec::new();

        'scan: for program in pairs {
            for token in program.into_inner() {
                let span = token.as_span();
                let span: SourceSpan = (span.start(), span.end() - span.start()).into();
                let step = match token.as_rule() {
                    Rule::left => Move::Left,
                    Rule::down => Move::Down,
                    Rule::right => Move::Right,
                    Rule::up => Move::Up,
                    Rule::visit => {
                        tracer.visit(span, &self.ctx)?;
                        Move::Stay
                    }
                    _ => Move::Stay,
                };
                if step == Move::Stay {
                    continue;
                }
                if tracer.finished {
                    crate::log::warn!(offset = span.offset(), "code remaining after visiting the origin");
                    let rest = self.ctx.source.len() - span.offset();
                    warnings.push(TrailingCode {
                        src: self.ctx.named_source(),
                        span: (span.offset(), rest).into(),
                    });
                    break 'scan;
                }
                tracer.advance(step);
            }
        }

        if !tracer.finished {
            return Err(CompileError::MissingTermination {
                end: tracer.position,
                src: self.ctx.named_source(),
                span: self.ctx.end_span(),
            });
        }

        let program = Program::new(tracer.instructions, self.config);
        crate::log::debug!(count = program.len(), listing = %program.listing(), "compiled");
        Ok(Compilation { program, warnings })
    }
}

/// Walks the path and collects one instruction per visit.
struct Tracer {
    origin: Point,
    position: Point,
    steps: usize,
    finished: bool,
    visited: HashMap<DistanceKey, Visit>,
    instructions: Vec<Instruction>,
}

impl Tracer {
    fn new(origin: Point) -> Self {
        Self {
            origin,
            position: origin,
            steps: 0,
            finished: false,
            visited: HashMap::new(),
            instructions: Vec::new(),
        }
    }

    fn advance(&mut self, step: Move) {
        self.position = self.position.offset(step);
        self.steps += 1;
    }

    fn visit(&mut self, span: SourceSpan, ctx: &SourceContext) -> Result<(), CompileError> {
        let point = self.position;
        let key = point.distance_key(self.origin);
        let index = self.instructions.len() + 1;

        if let Some(first) = self.visited.get(&key) {
            return Err(CompileError::DuplicateDistanceKey {
                first: first.index,
                first_point: first.point,
                second: index,
                second_point: point,
                chebyshev: key.chebyshev,
                manhattan: key.manhattan,
                src: ctx.named_source(),
                first_span: first.span,
                second_span: span,
            });
        }
        self.visited.insert(key, Visit { index, point, span });

        if point == self.origin {
            self.finished = true;
            self.steps = 0;
            return Ok(());
        }

        self.instructions.push(Instruction::at(point, self.steps));
        self.steps = 0;
        Ok(())
    }
}
