//! Compiled instructions and the mapping from visited points to opcodes.

use std::fmt;

use crate::geom::{Area, DistanceKey, Point};
use crate::types::Value;

/// What an instruction does, with its operand attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Nop,
    /// Push the step count.
    Push(Value),
    Dup,
    /// Swap the top with the element this many positions down.
    Swap(usize),
    Sub,
    Greater,
    /// Jump to the first instruction whose Chebyshev radius is at least
    /// this, when the top of stack is zero.
    JumpIfZero(u32),
    GetChar,
    PutChar,
}

impl Opcode {
    /// Opcode for a point in `area` reached after `steps` moves.
    pub fn classify(area: Area, steps: usize) -> Opcode {
        match area {
            Area::OnLine => Opcode::Nop,
            Area::Ene => Opcode::Push(Value::from_count(steps)),
            Area::Nne => Opcode::Dup,
            Area::Nnw => Opcode::Swap(steps),
            Area::Wnw => Opcode::Sub,
            Area::Wsw => Opcode::Greater,
            Area::Ssw => Opcode::JumpIfZero(u32::try_from(steps).unwrap_or(u32::MAX)),
            Area::Sse => Opcode::GetChar,
            Area::Ese => Opcode::PutChar,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::Push(_) => "push",
            Opcode::Dup => "dup",
            Opcode::Swap(_) => "swap",
            Opcode::Sub => "sub",
            Opcode::Greater => "greater",
            Opcode::JumpIfZero(_) => "jump-zero",
            Opcode::GetChar => "getchar",
            Opcode::PutChar => "putchar",
        }
    }

    pub fn operand(self) -> Option<i64> {
        match self {
            Opcode::Push(v) => Some(i64::from(v.0)),
            Opcode::Swap(n) => Some(n as i64),
            Opcode::JumpIfZero(r) => Some(i64::from(r)),
            _ => None,
        }
    }
}

/// One compiled step, remembering where on the path it was visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub opcode: Opcode,
    pub point: Point,
    pub chebyshev_radius: u32,
    pub manhattan_radius: u32,
}

impl Instruction {
    /// The instruction produced by visiting `point` after `steps` moves.
    pub fn at(point: Point, steps: usize) -> Instruction {
        let key = point.distance_key(Point::ORIGIN);
        Instruction {
            opcode: Opcode::classify(point.area(), steps),
            point,
            chebyshev_radius: key.chebyshev,
            manhattan_radius: key.manhattan,
        }
    }

    /// Layout order of compiled programs.
    pub fn sort_key(&self) -> DistanceKey {
        DistanceKey {
            chebyshev: self.chebyshev_radius,
            manhattan: self.manhattan_radius,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode.operand() {
            Some(n) => write!(f, "{} {} {}", self.opcode.name(), n, self.point),
            None => write!(f, "{} {}", self.opcode.name(), self.point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octants_map_to_opcodes() {
        let cases = [
            (Point::new(3, 0), 4, Opcode::Nop),
            (Point::new(2, 2), 4, Opcode::Nop),
            (Point::new(5, 1), 6, Opcode::Push(Value(6))),
            (Point::new(1, 5), 6, Opcode::Dup),
            (Point::new(-1, 5), 3, Opcode::Swap(3)),
            (Point::new(-5, 1), 6, Opcode::Sub),
            (Point::new(-5, -1), 6, Opcode::Greater),
            (Point::new(-1, -5), 8, Opcode::JumpIfZero(8)),
            (Point::new(1, -5), 6, Opcode::GetChar),
            (Point::new(5, -1), 6, Opcode::PutChar),
        ];
        for (point, steps, expected) in cases {
            assert_eq!(Instruction::at(point, steps).opcode, expected, "at {point}");
        }
    }

    #[test]
    fn radii_come_from_the_point() {
        let inst = Instruction::at(Point::new(-2, -7), 9);
        assert_eq!(inst.chebyshev_radius, 7);
        assert_eq!(inst.manhattan_radius, 9);
        assert_eq!(
            inst.sort_key(),
            DistanceKey {
                chebyshev: 7,
                manhattan: 9
            }
        );
    }

    #[test]
    fn display_names_opcode_operand_and_point() {
        assert_eq!(Instruction::at(Point::new(5, 1), 5).to_string(), "push 5 (5, 1)");
        assert_eq!(Instruction::at(Point::new(1, 5), 5).to_string(), "dup (1, 5)");
        assert_eq!(
            Instruction::at(Point::new(-1, -3), 20).to_string(),
            "jump-zero 20 (-1, -3)"
        );
        assert_eq!(Instruction::at(Point::new(0, -4), 4).to_string(), "nop (0, -4)");
    }
}
