//! On-the-fly alphabet: lazily interned symbols with stable codes.
//!
//! Symbols live in an insertion-ordered map (`IndexMap`) from symbol to code.
//! The reverse direction stores the symbol's insertion index instead of a
//! second copy of the symbol, so the only bound a symbol type needs is
//! `Eq + Hash`.
//!
//! # Invariants
//!
//! - `forward` and `backward` are inverses of each other.
//! - `next_code` is greater than every assigned code. It is `None` once
//!   `Code::MAX` has been assigned.
//! - Codes are never reassigned or removed.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{Alphabet, AlphabetStats};
use crate::code::Code;
use crate::config::AlphabetConfig;
use crate::error::{AlphabetError, AlphabetResult};

type ForwardMap<S> = IndexMap<S, Code, ahash::RandomState>;

/// Symbol interner assigning dense integer codes on first occurrence.
///
/// A symbol is any value with `Eq + Hash`. Equality is structural on the
/// value given: the alphabet never parses or normalizes symbols, so `"a"`,
/// `"'a'"` and `"\"a\""` are three distinct symbols.
///
/// # Examples
///
/// ```
/// use otf_alphabet::{Code, OnTheFlyAlphabet};
///
/// let mut alphabet: OnTheFlyAlphabet<String> = OnTheFlyAlphabet::with_start_code(3);
/// assert_eq!(alphabet.translate_symbol("a").unwrap(), Code::new(3));
/// assert_eq!(alphabet.translate_symbol("b").unwrap(), Code::new(4));
/// assert_eq!(alphabet.translate_symbol("a").unwrap(), Code::new(3));
/// ```
///
/// Seeding from an existing map keeps the given codes:
///
/// ```
/// use otf_alphabet::{Code, OnTheFlyAlphabet};
///
/// let mut alphabet = OnTheFlyAlphabet::from_symbol_map([("a", 0u32), ("b", 1), ("c", 2)]);
/// assert_eq!(alphabet.translate_symbol(&"c").unwrap(), Code::new(2));
/// assert_eq!(alphabet.translate_symbol(&"d").unwrap(), Code::new(3));
/// ```
#[derive(Clone, Debug)]
pub struct OnTheFlyAlphabet<S> {
    /// Symbol to code, in order of first insertion
    forward: ForwardMap<S>,
    /// Code to insertion index in `forward`
    backward: FxHashMap<Code, usize>,
    /// First code handed out by lazy translation
    start: Code,
    /// Code for the next unseen symbol
    next_code: Option<Code>,
    frozen: bool,
    hits: usize,
    misses: usize,
}

impl<S: Eq + Hash> Default for OnTheFlyAlphabet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash> OnTheFlyAlphabet<S> {
    /// Create an empty alphabet whose first code is 0
    pub fn new() -> Self {
        Self::with_config(&AlphabetConfig::default())
    }

    /// Create an empty alphabet whose first unseen symbol receives `start`
    pub fn with_start_code(start: u32) -> Self {
        Self::with_config(&AlphabetConfig::default().with_start_code(start))
    }

    /// Create an empty alphabet from a configuration
    pub fn with_config(config: &AlphabetConfig) -> Self {
        log::debug!(
            "creating alphabet: start_code={}, frozen={}",
            config.start_code,
            config.frozen
        );
        Self {
            forward: IndexMap::with_capacity_and_hasher(
                config.initial_capacity,
                ahash::RandomState::new(),
            ),
            backward: FxHashMap::default(),
            start: config.start(),
            next_code: Some(config.start()),
            frozen: config.frozen,
            hits: 0,
            misses: 0,
        }
    }

    /// Create an alphabet pre-populated with the given associations.
    ///
    /// Codes are taken verbatim; they need not be contiguous or start at 0.
    /// New symbols translated afterwards receive codes above the largest
    /// seeded code.
    ///
    /// The input is not validated. If two distinct symbols share a code, a
    /// warning is logged and reverse translation of that code yields the
    /// symbol given last. Use [`try_from_symbol_map`](Self::try_from_symbol_map)
    /// to reject such input instead.
    pub fn from_symbol_map<I, C>(map: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        C: Into<Code>,
    {
        let mut alphabet = Self::new();
        for (symbol, code) in map {
            alphabet.seed(symbol, code.into());
        }
        log::debug!(
            "seeded alphabet with {} symbols, next code {:?}",
            alphabet.len(),
            alphabet.next_code
        );
        alphabet
    }

    /// Create an alphabet pre-populated with the given associations,
    /// rejecting input where two distinct symbols share a code.
    ///
    /// # Errors
    ///
    /// - [`AlphabetError::DuplicateCode`] if a code is given to two symbols
    /// - [`AlphabetError::SymbolAlreadyMapped`] if a symbol is given two codes
    pub fn try_from_symbol_map<I, C>(map: I) -> AlphabetResult<Self>
    where
        I: IntoIterator<Item = (S, C)>,
        C: Into<Code>,
    {
        let mut alphabet = Self::new();
        for (symbol, code) in map {
            alphabet.add_new_symbol(symbol, code)?;
        }
        Ok(alphabet)
    }

    /// Translate a symbol into its code, assigning the next free code if the
    /// symbol has not been seen before.
    ///
    /// Translating the same symbol again always returns the same code. The
    /// owned symbol is only created when a new code is assigned, so a
    /// `OnTheFlyAlphabet<String>` can be queried with `&str`.
    ///
    /// # Errors
    ///
    /// - [`AlphabetError::UnknownSymbol`] if the symbol is unseen and the
    ///   alphabet is frozen
    /// - [`AlphabetError::CodeSpaceExhausted`] if no code is left
    ///
    /// On error the alphabet is left unchanged.
    pub fn translate_symbol<Q>(&mut self, symbol: &Q) -> AlphabetResult<Code>
    where
        S: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = S>,
    {
        self.try_add_new_symbol(symbol).map(|(code, _)| code)
    }

    /// Like [`translate_symbol`](Self::translate_symbol), additionally
    /// reporting whether the symbol was newly inserted.
    pub fn try_add_new_symbol<Q>(&mut self, symbol: &Q) -> AlphabetResult<(Code, bool)>
    where
        S: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = S>,
    {
        if let Some(&code) = self.forward.get(symbol) {
            self.hits += 1;
            return Ok((code, false));
        }
        let code = self.reserve_code()?;
        self.allocate(symbol.to_owned(), code);
        Ok((code, true))
    }

    /// Insert an explicit symbol/code association.
    ///
    /// Re-adding an association that already exists is a no-op. Lazily
    /// assigned codes continue above `code`.
    ///
    /// # Errors
    ///
    /// - [`AlphabetError::SymbolAlreadyMapped`] if `symbol` has another code
    /// - [`AlphabetError::DuplicateCode`] if `code` belongs to another symbol
    /// - [`AlphabetError::Frozen`] if the alphabet is frozen
    pub fn add_new_symbol<C: Into<Code>>(&mut self, symbol: S, code: C) -> AlphabetResult<()> {
        let code = code.into();
        if let Some(&existing) = self.forward.get(&symbol) {
            if existing == code {
                return Ok(());
            }
            return Err(AlphabetError::SymbolAlreadyMapped {
                existing,
                requested: code,
            });
        }
        if self.frozen {
            return Err(AlphabetError::Frozen);
        }
        if self.backward.contains_key(&code) {
            return Err(AlphabetError::DuplicateCode { code });
        }
        self.seed(symbol, code);
        Ok(())
    }

    /// Translate every symbol of `symbols`, assigning codes to unseen ones
    /// in iteration order.
    ///
    /// Stops at the first error; symbols before it stay translated.
    pub fn add_symbols_from<I>(&mut self, symbols: I) -> AlphabetResult<()>
    where
        I: IntoIterator<Item = S>,
    {
        for symbol in symbols {
            self.translate_owned(symbol)?;
        }
        Ok(())
    }

    /// Look up the code of a known symbol without modifying the alphabet
    pub fn get_code<Q>(&self, symbol: &Q) -> Option<Code>
    where
        S: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.forward.get(symbol).copied()
    }

    /// Whether `symbol` has a code
    pub fn contains<Q>(&self, symbol: &Q) -> bool
    where
        S: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.forward.contains_key(symbol)
    }

    /// Look up the symbol a code stands for
    pub fn get_symbol(&self, code: Code) -> Option<&S> {
        let index = *self.backward.get(&code)?;
        self.forward.get_index(index).map(|(symbol, _)| symbol)
    }

    /// Translate a code back into its symbol
    ///
    /// # Errors
    ///
    /// [`AlphabetError::UnknownCode`] if `code` was never assigned.
    pub fn reverse_translate_symbol(&self, code: Code) -> AlphabetResult<&S> {
        self.get_symbol(code).ok_or(AlphabetError::UnknownCode { code })
    }

    /// Stop assigning codes to unseen symbols
    pub fn freeze(&mut self) {
        log::debug!("freezing alphabet with {} symbols", self.len());
        self.frozen = true;
    }

    /// Allow unseen symbols again
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// The code the next unseen symbol will receive, `None` once every code
    /// has been used
    pub fn next_code(&self) -> Option<Code> {
        self.next_code
    }

    /// The code lazy allocation started from
    pub fn start_code(&self) -> Code {
        self.start
    }

    /// Iterate over `(symbol, code)` pairs in order of first insertion
    pub fn iter(&self) -> impl Iterator<Item = (&S, Code)> + '_ {
        self.forward.iter().map(|(symbol, &code)| (symbol, code))
    }

    /// Iterate over the symbols in order of first insertion
    pub fn symbols(&self) -> impl Iterator<Item = &S> + '_ {
        self.forward.keys()
    }

    /// All assigned codes, ascending
    pub fn codes(&self) -> Vec<Code> {
        let mut codes: Vec<Code> = self.backward.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    /// Assigned codes not contained in `used`, ascending
    ///
    /// ```
    /// use otf_alphabet::{Code, OnTheFlyAlphabet};
    ///
    /// let alphabet = OnTheFlyAlphabet::from_symbol_map([('a', 0u32), ('b', 1), ('c', 2)]);
    /// assert_eq!(alphabet.complement([Code::new(1)]), [Code::new(0), Code::new(2)]);
    /// ```
    pub fn complement<I>(&self, used: I) -> Vec<Code>
    where
        I: IntoIterator<Item = Code>,
    {
        let used: FxHashSet<Code> = used.into_iter().collect();
        self.codes()
            .into_iter()
            .filter(|code| !used.contains(code))
            .collect()
    }

    /// Get statistics about the alphabet for profiling
    pub fn stats(&self) -> AlphabetStats {
        AlphabetStats {
            count: self.len(),
            next_code: self.next_code,
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Overwrite the next code, used when rebuilding from a shared alphabet
    pub(crate) fn set_next_code(&mut self, next_code: Option<Code>) {
        self.next_code = next_code;
    }

    fn translate_owned(&mut self, symbol: S) -> AlphabetResult<Code> {
        if let Some(&code) = self.forward.get(&symbol) {
            self.hits += 1;
            return Ok(code);
        }
        let code = self.reserve_code()?;
        self.allocate(symbol, code);
        Ok(code)
    }

    /// The code an unseen symbol would receive right now
    fn reserve_code(&self) -> AlphabetResult<Code> {
        if self.frozen {
            return Err(AlphabetError::UnknownSymbol);
        }
        self.next_code.ok_or(AlphabetError::CodeSpaceExhausted)
    }

    fn allocate(&mut self, symbol: S, code: Code) {
        let (index, _) = self.forward.insert_full(symbol, code);
        self.backward.insert(code, index);
        self.next_code = code.checked_next();
        self.misses += 1;
        log::trace!("assigned code {} to symbol #{}", code, index);
    }

    /// Insert an association without validation and move `next_code` past it.
    pub(crate) fn seed(&mut self, symbol: S, code: Code) {
        if let Some(&owner) = self.backward.get(&code) {
            let same_symbol = self
                .forward
                .get_index(owner)
                .is_some_and(|(existing, _)| *existing == symbol);
            if !same_symbol {
                log::warn!(
                    "code {} seeded for two distinct symbols; reverse translation keeps the last one",
                    code
                );
            }
        }

        let (index, previous) = self.forward.insert_full(symbol, code);
        if let Some(previous) = previous.filter(|&previous| previous != code) {
            if self.backward.get(&previous) == Some(&index) {
                self.backward.remove(&previous);
            }
        }
        self.backward.insert(code, index);

        if self.next_code.is_some_and(|next| next <= code) {
            self.next_code = code.checked_next();
        }
    }
}

impl<S: Eq + Hash> PartialEq for OnTheFlyAlphabet<S> {
    /// Two alphabets are equal when they hold the same associations and
    /// would assign the same next code. Insertion order, the frozen flag
    /// and statistics are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.next_code == other.next_code
            && self.forward.len() == other.forward.len()
            && self
                .forward
                .iter()
                .all(|(symbol, code)| other.forward.get(symbol) == Some(code))
    }
}

impl<S: Eq + Hash> Eq for OnTheFlyAlphabet<S> {}

impl<S: fmt::Display> fmt::Display for OnTheFlyAlphabet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (symbol, code)) in self.forward.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", symbol, code)?;
        }
        write!(f, "}}")
    }
}

impl<S: Eq + Hash + Clone> Alphabet for OnTheFlyAlphabet<S> {
    type Symbol = S;

    fn translate(&mut self, symbol: &S) -> AlphabetResult<Code> {
        self.translate_symbol(symbol)
    }

    fn reverse_translate(&self, code: Code) -> AlphabetResult<S> {
        self.reverse_translate_symbol(code).cloned()
    }

    fn is_growable(&self) -> bool {
        !self.frozen
    }
}
