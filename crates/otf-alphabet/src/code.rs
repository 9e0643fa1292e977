//! Code - the dense integer a symbol is translated to.
//!
//! Automata algorithms label transitions with [`Code`] values instead of the
//! symbols themselves. A code is only meaningful relative to the alphabet
//! instance that produced it.
//!
//! # Example
//!
//! ```
//! use otf_alphabet::Code;
//!
//! let code = Code::new(7);
//! assert_eq!(code.as_u32(), 7);
//! assert_eq!(code, 7u32);
//! assert_eq!(code.to_string(), "7");
//! ```

use std::fmt;

/// A non-negative integer identifying one symbol within one alphabet.
///
/// `Code` is exactly 4 bytes. Ordering follows the numeric value, which for
/// lazily allocated codes is also the order of first occurrence.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Code(u32);

impl Code {
    /// The largest representable code
    pub const MAX: Code = Code(u32::MAX);

    /// Create a code from its raw value
    #[inline]
    pub const fn new(value: u32) -> Self {
        Code(value)
    }

    /// Get the raw value
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Get the raw value as a `usize`, for indexing dense tables
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The code following this one, or `None` at [`Code::MAX`]
    #[inline]
    pub fn checked_next(self) -> Option<Code> {
        self.0.checked_add(1).map(Code)
    }
}

impl From<u32> for Code {
    #[inline]
    fn from(value: u32) -> Self {
        Code(value)
    }
}

impl From<Code> for u32 {
    #[inline]
    fn from(code: Code) -> Self {
        code.0
    }
}

impl PartialEq<u32> for Code {
    #[inline]
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static_assertions::assert_eq_size!(Code, u32);
static_assertions::assert_impl_all!(Code: Send, Sync, Copy);
