//! The machine's data stack.
//!
//! Every fallible operation leaves the stack exactly as it found it when it
//! fails.

use std::fmt;

use crate::errors::StackError;
use crate::types::Value;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    items: Vec<Value>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items from bottom to top.
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Result<Value, StackError> {
        self.items.pop().ok_or(StackError::Underflow)
    }

    /// Peek at the top of stack without removing it.
    pub fn top(&self) -> Result<Value, StackError> {
        self.items.last().copied().ok_or(StackError::Underflow)
    }

    pub fn dup(&mut self) -> Result<(), StackError> {
        let v = self.top()?;
        self.push(v);
        Ok(())
    }

    /// Exchange the top with the element `depth` positions from the top,
    /// counting the top itself as 1. `depth == 1` swaps the top with itself.
    pub fn swap(&mut self, depth: usize) -> Result<(), StackError> {
        let len = self.items.len();
        if depth == 0 || depth > len {
            return Err(StackError::OutOfRange { depth, len });
        }
        self.items.swap(len - 1, len - depth);
        Ok(())
    }

    /// Pop `a`, pop `b`, push `b - a`.
    pub fn sub(&mut self) -> Result<(), StackError> {
        let (b, a) = self.pop_pair()?;
        self.push(b.wrapping_sub(a));
        Ok(())
    }

    /// Pop `a`, pop `b`, push 1 if `b > a` else 0.
    pub fn greater(&mut self) -> Result<(), StackError> {
        let (b, a) = self.pop_pair()?;
        self.push(Value::from(b > a));
        Ok(())
    }

    /// Pops the top two as `(second, top)`. If only one is there it goes
    /// back before the error is returned.
    fn pop_pair(&mut self) -> Result<(Value, Value), StackError> {
        let a = self.pop()?;
        match self.pop() {
            Ok(b) => Ok((b, a)),
            Err(e) => {
                self.push(a);
                Err(e)
            }
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

impl From<Vec<Value>> for Stack {
    fn from(items: Vec<Value>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(values: &[i32]) -> Stack {
        values.iter().copied().map(Value).collect::<Vec<_>>().into()
    }

    fn values(s: &Stack) -> Vec<i32> {
        s.as_slice().iter().map(|v| v.0).collect()
    }

    #[test]
    fn pop_and_top_on_empty() {
        let mut s = Stack::new();
        assert_eq!(s.pop(), Err(StackError::Underflow));
        assert_eq!(s.top(), Err(StackError::Underflow));
        assert_eq!(s.dup(), Err(StackError::Underflow));
        assert!(s.is_empty());
    }

    #[test]
    fn top_leaves_the_stack_alone() {
        let mut s = stack(&[1, 2]);
        assert_eq!(s.top(), Ok(Value(2)));
        assert_eq!(values(&s), [1, 2]);
        assert_eq!(s.pop(), Ok(Value(2)));
        assert_eq!(values(&s), [1]);
    }

    #[test]
    fn dup_copies_the_top() {
        let mut s = stack(&[4, 9]);
        s.dup().unwrap();
        assert_eq!(values(&s), [4, 9, 9]);
    }

    #[test]
    fn swap_with_depth() {
        let mut s = stack(&[1, 2, 3, 4]);
        s.swap(3).unwrap();
        assert_eq!(values(&s), [1, 4, 3, 2]);
        s.swap(1).unwrap();
        assert_eq!(values(&s), [1, 4, 3, 2]);
        s.swap(4).unwrap();
        assert_eq!(values(&s), [2, 4, 3, 1]);
    }

    #[test]
    fn swap_twice_is_identity() {
        let original = stack(&[5, -1, 7, 0, 3]);
        for depth in 1..=original.len() {
            let mut s = original.clone();
            s.swap(depth).unwrap();
            s.swap(depth).unwrap();
            assert_eq!(s, original, "depth {depth}");
        }
    }

    #[test]
    fn swap_out_of_range() {
        let mut s = stack(&[1, 2]);
        assert_eq!(s.swap(0), Err(StackError::OutOfRange { depth: 0, len: 2 }));
        assert_eq!(s.swap(3), Err(StackError::OutOfRange { depth: 3, len: 2 }));
        assert_eq!(values(&s), [1, 2]);

        let mut empty = Stack::new();
        assert_eq!(empty.swap(1), Err(StackError::OutOfRange { depth: 1, len: 0 }));
    }

    #[test]
    fn sub_and_greater() {
        let mut s = stack(&[10, 3]);
        s.sub().unwrap();
        assert_eq!(values(&s), [7]);

        let mut s = stack(&[10, 3]);
        s.greater().unwrap();
        assert_eq!(values(&s), [1]);

        let mut s = stack(&[3, 10]);
        s.greater().unwrap();
        assert_eq!(values(&s), [0]);

        let mut s = stack(&[3, 3]);
        s.greater().unwrap();
        assert_eq!(values(&s), [0]);
    }

    #[test]
    fn binary_ops_restore_a_lone_operand() {
        let mut s = stack(&[42]);
        assert_eq!(s.sub(), Err(StackError::Underflow));
        assert_eq!(values(&s), [42]);
        assert_eq!(s.greater(), Err(StackError::Underflow));
        assert_eq!(values(&s), [42]);

        let mut empty = Stack::new();
        assert_eq!(empty.sub(), Err(StackError::Underflow));
        assert!(empty.is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(Stack::new().to_string(), "[]");
        assert_eq!(stack(&[1, -2, 3]).to_string(), "[1, -2, 3]");
    }
}
