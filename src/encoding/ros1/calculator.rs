// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 size calculator.
//!
//! Mirrors [`Ros1Writer`](super::Ros1Writer) without touching a buffer, so
//! callers can allocate exactly the bytes a message needs.
//!
//! # Example
//!
//! ```no_run
//! # fn main() {
//! use robowire::encoding::ros1::Ros1Calculator;
//!
//! let mut calc = Ros1Calculator::new();
//! calc.bytes(4);          // int32
//! calc.sequence_length();  // string length prefix
//! calc.bytes(5);           // string bytes
//! assert_eq!(calc.size(), 13);
//! # }
//! ```

use super::LENGTH_PREFIX_SIZE;

/// ROS1 size calculator.
#[derive(Debug, Clone, Default)]
pub struct Ros1Calculator {
    /// Running size
    offset: usize,
}

impl Ros1Calculator {
    /// Create a new calculator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current calculated size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.offset
    }

    fn increment_and_return(&mut self, n: usize) -> usize {
        self.offset += n;
        self.offset
    }

    /// Calculate size for a sequence count prefix.
    pub fn sequence_length(&mut self) -> usize {
        self.increment_and_return(LENGTH_PREFIX_SIZE)
    }

    /// Add an already known byte count.
    pub fn bytes(&mut self, n: usize) -> usize {
        self.increment_and_return(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_size() {
        let mut calc = Ros1Calculator::new();
        assert_eq!(calc.size(), 0);
        assert_eq!(calc.bytes(1), 1);
        assert_eq!(calc.sequence_length(), 5);
        assert_eq!(calc.bytes(0), 5);
        assert_eq!(calc.size(), 5);
    }

    #[test]
    fn test_string_has_no_terminator() {
        let mut calc = Ros1Calculator::new();
        calc.sequence_length();
        calc.bytes("abc".len());
        assert_eq!(calc.size(), 7);
    }
}
