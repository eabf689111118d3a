//! The machine's value type: one signed integer that doubles as a
//! character code point.

use std::fmt;

/// A stack cell.
///
/// Arithmetic wraps instead of panicking. Values that are not a Unicode
/// scalar print as U+FFFD.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Value(pub i32);

impl Value {
    pub const ZERO: Value = Value(0);
    pub const ONE: Value = Value(1);

    /// Value pushed for a step count. Counts beyond `i32::MAX` saturate.
    #[inline]
    pub fn from_count(n: usize) -> Value {
        Value(i32::try_from(n).unwrap_or(i32::MAX))
    }

    #[inline]
    pub fn from_char(c: char) -> Value {
        Value(c as i32)
    }

    /// The character this value encodes, or U+FFFD when it encodes none.
    pub fn to_char(self) -> char {
        u32::try_from(self.0)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    #[inline]
    pub fn wrapping_sub(self, rhs: Value) -> Value {
        Value(self.0.wrapping_sub(rhs.0))
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        if b { Value::ONE } else { Value::ZERO }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_round_trip_through_values() {
        assert_eq!(Value::from_char('H'), Value(72));
        assert_eq!(Value(233).to_char(), 'é');
        assert_eq!(Value::from_char('ö').to_char(), 'ö');
    }

    #[test]
    fn invalid_code_points_print_as_replacement() {
        assert_eq!(Value(-1).to_char(), char::REPLACEMENT_CHARACTER);
        assert_eq!(Value(0xD800).to_char(), char::REPLACEMENT_CHARACTER);
        assert_eq!(Value(0x11_0000).to_char(), char::REPLACEMENT_CHARACTER);
    }

    #[test]
    fn subtraction_wraps() {
        assert_eq!(Value(i32::MIN).wrapping_sub(Value(1)), Value(i32::MAX));
        assert_eq!(Value(3).wrapping_sub(Value(5)), Value(-2));
    }

    #[test]
    fn counts_saturate() {
        assert_eq!(Value::from_count(5), Value(5));
        assert_eq!(Value::from_count(usize::MAX), Value(i32::MAX));
    }
}
