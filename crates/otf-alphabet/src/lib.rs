//! otf-alphabet - On-the-fly alphabets for automata
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! Automata algorithms label transitions with dense integers. Users write
//! symbols: characters, tokens, byte strings, structured tags. This crate
//! owns the translation between the two.
//!
//! - [`OnTheFlyAlphabet`]: assigns each distinct symbol a stable code the
//!   first time it is translated
//! - [`SharedAlphabet`]: the same interner behind `&self`, for construction
//!   sessions that translate from several threads
//! - [`IntAlphabet`]: integer symbols that are their own codes
//! - [`Alphabet`]: the trait automata code is written against
//!
//! DESIGN PRINCIPLES:
//! ------------------
//! 1. STABLE CODES
//!    A symbol keeps its code for the lifetime of the alphabet. Codes are
//!    never reused or renumbered.
//!
//! 2. PER-INSTANCE STATE
//!    Every alphabet carries its own counter. There is no global table, so
//!    two automata never see each other's codes.
//
// ============================================================================
// ON-THE-FLY ALLOCATION
// ============================================================================
//
// Let Σ be the set of symbols translated so far and k the start code.
// The alphabet maintains an injective map T: Σ → ℕ with
//
// - T(s) ≥ k for every lazily translated s
// - first occurrences receive k, k+1, k+2, ... in order
// - T⁻¹ is kept next to T, so codes can be printed as the symbols they
//   stand for
//
// Seeding with an explicit map keeps the given values and moves the counter
// past the largest one:
//
// ```
// seed {a: 0, b: 1, c: 2}      next = 3
// translate "d"                 → 3, next = 4
// translate "a"                 → 0, next = 4
// ```
//
// FROZEN ALPHABETS:
// -----------------
// A frozen alphabet answers for the symbols it knows and rejects the rest
// with `AlphabetError::UnknownSymbol`. Freezing is always explicit; seeding
// alone never freezes an alphabet.

pub mod alphabet;
pub mod code;
pub mod config;
pub mod error;
pub mod shared;

pub use alphabet::{
    reverse_translate_word, translate_word, Alphabet, AlphabetStats, IntAlphabet,
    OnTheFlyAlphabet,
};
pub use code::Code;
pub use config::{AlphabetConfig, DEFAULT_START_CODE};
pub use error::{AlphabetError, AlphabetResult, ConfigError, ConfigResult};
pub use shared::SharedAlphabet;
