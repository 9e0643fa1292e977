//! Alphabet module - translation of automaton symbols into integer codes.
//!
//! This module provides the [`Alphabet`] trait consumed by automata
//! algorithms, and its two implementations:
//!
//! - [`OnTheFlyAlphabet`]: interns arbitrary symbols, allocating a fresh code
//!   the first time a symbol is seen.
//! - [`IntAlphabet`]: symbols already are integers, translation is the
//!   identity.
//!
//! # Overview
//!
//! Automata operate on dense integer alphabets: transitions are labeled with
//! [`Code`] values, not with the symbols a user wrote. An alphabet owns the
//! mapping between the two and is exclusively owned by the automaton or
//! construction session that created it.
//!
//! # Performance Characteristics
//!
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `translate_symbol()` (hit) | O(1) | Symbol already known |
//! | `translate_symbol()` (miss) | O(1) amortized | One allocation for the owned symbol |
//! | `reverse_translate_symbol()` | O(1) | Code → insertion index → symbol |
//! | `codes()` | O(n log n) | Sorted copy |
//!
//! # Examples
//!
//! ```
//! use otf_alphabet::{Code, OnTheFlyAlphabet};
//!
//! let mut alphabet: OnTheFlyAlphabet<String> = OnTheFlyAlphabet::new();
//! assert_eq!(alphabet.translate_symbol("a").unwrap(), Code::new(0));
//! assert_eq!(alphabet.translate_symbol("b").unwrap(), Code::new(1));
//! assert_eq!(alphabet.translate_symbol("a").unwrap(), Code::new(0));
//!
//! assert_eq!(alphabet.reverse_translate_symbol(Code::new(1)).unwrap(), "b");
//! ```

mod on_the_fly;


pub use on_the_fly::OnTheFlyAlphabet;

use crate::code::Code;
use crate::error::AlphabetResult;

/// The interface automata algorithms use to label transitions.
///
/// `translate` may grow the alphabet; `reverse_translate` never does.
pub trait Alphabet {
    /// The user-facing symbol type
    type Symbol;

    /// Translate a symbol into its code
    fn translate(&mut self, symbol: &Self::Symbol) -> AlphabetResult<Code>;

    /// Translate a code back into the symbol it stands for
    fn reverse_translate(&self, code: Code) -> AlphabetResult<Self::Symbol>;

    /// Whether `translate` may assign codes to symbols it has not seen
    fn is_growable(&self) -> bool;
}

/// Translate every symbol of `word`, in order.
///
/// Stops at the first failure. Symbols translated before the failure keep
/// the codes they were given.
///
/// # Examples
///
/// ```
/// use otf_alphabet::{translate_word, Code, OnTheFlyAlphabet};
///
/// let mut alphabet: OnTheFlyAlphabet<char> = OnTheFlyAlphabet::new();
/// let codes = translate_word(&mut alphabet, &['a', 'b', 'a']).unwrap();
/// assert_eq!(codes, [Code::new(0), Code::new(1), Code::new(0)]);
/// ```
pub fn translate_word<A: Alphabet>(
    alphabet: &mut A,
    word: &[A::Symbol],
) -> AlphabetResult<Vec<Code>> {
    word.iter().map(|symbol| alphabet.translate(symbol)).collect()
}

/// Translate a sequence of codes back into symbols.
pub fn reverse_translate_word<A: Alphabet>(
    alphabet: &A,
    codes: &[Code],
) -> AlphabetResult<Vec<A::Symbol>> {
    codes
        .iter()
        .map(|&code| alphabet.reverse_translate(code))
        .collect()
}

/// Alphabet over integer symbols, where each symbol is its own code.
///
/// Used by automata whose input is already numeric (bytes, code points).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntAlphabet;

impl IntAlphabet {
    pub fn new() -> Self {
        IntAlphabet
    }
}

impl Alphabet for IntAlphabet {
    type Symbol = u32;

    #[inline]
    fn translate(&mut self, symbol: &u32) -> AlphabetResult<Code> {
        Ok(Code::new(*symbol))
    }

    #[inline]
    fn reverse_translate(&self, code: Code) -> AlphabetResult<u32> {
        Ok(code.as_u32())
    }

    fn is_growable(&self) -> bool {
        true
    }
}

/// Statistics about an alphabet for profiling
///
/// # Fields
///
/// * `count` - Number of distinct symbols
/// * `next_code` - Code the next unseen symbol would receive
/// * `hits` - Translations of an already-known symbol
/// * `misses` - Translations that allocated a new code
///
/// # Examples
///
/// ```
/// use otf_alphabet::OnTheFlyAlphabet;
///
/// let mut alphabet: OnTheFlyAlphabet<&str> = OnTheFlyAlphabet::new();
/// for symbol in ["a", "b", "a", "a"] {
///     alphabet.translate_symbol(&symbol).unwrap();
/// }
/// let stats = alphabet.stats();
/// assert_eq!(stats.count, 2);
/// assert_eq!(stats.hit_rate(), 0.5);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlphabetStats {
    /// Number of distinct symbols
    pub count: usize,
    /// Code for the next unseen symbol, `None` once the code space is used up
    pub next_code: Option<Code>,
    /// Number of translations of an already-known symbol
    pub hits: usize,
    /// Number of translations that allocated a new code
    pub misses: usize,
}

impl AlphabetStats {
    /// Calculate the hit rate (hits / (hits + misses))
    ///
    /// Returns 0.0 if no translation has been performed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_operations();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Get total number of successful translations
    pub fn total_operations(&self) -> usize {
        self.hits + self.misses
    }
}
