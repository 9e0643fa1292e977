//! Thread-safe alphabet for concurrent construction sessions.
//!
//! [`OnTheFlyAlphabet`] needs `&mut self` to translate, so sharing one across
//! threads requires an external lock around every call. [`SharedAlphabet`]
//! moves the locking inside:
//!
//! - Lookups of known symbols go through DashMap's sharded maps and never
//!   touch the allocation lock
//! - Allocation of a new code takes one `parking_lot::Mutex`, held for a
//!   single translation
//! - The symbol is looked up again under the lock, so two threads racing on
//!   the same unseen symbol receive the same code
//!
//! # Thread Safety
//!
//! The reverse entry is published before the forward entry. Any code a
//! thread obtains from [`SharedAlphabet::translate_symbol`] can therefore be
//! resolved with [`SharedAlphabet::get_symbol`] from any other thread.

use std::borrow::Borrow;
use std::hash::{BuildHasherDefault, Hash};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use dashmap::DashMap;
use parking_lot::Mutex;
use rustc_hash::FxHasher;

use crate::alphabet::{AlphabetStats, OnTheFlyAlphabet};
use crate::code::Code;
use crate::config::AlphabetConfig;
use crate::error::{AlphabetError, AlphabetResult};

/// Alphabet that can be translated through `&self` from many threads.
///
/// # Examples
///
/// ```
/// use otf_alphabet::{Code, SharedAlphabet};
/// use std::sync::Arc;
/// use std::thread;
///
/// let alphabet: Arc<SharedAlphabet<String>> = Arc::new(SharedAlphabet::new());
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let alphabet = Arc::clone(&alphabet);
///         thread::spawn(move || alphabet.translate_symbol("a").unwrap())
///     })
///     .collect();
///
/// for handle in handles {
///     assert_eq!(handle.join().unwrap(), Code::new(0));
/// }
/// assert_eq!(alphabet.len(), 1);
/// ```
pub struct SharedAlphabet<S>
where
    S: Eq + Hash,
{
    /// Symbol to code
    forward: DashMap<S, Code, ahash::RandomState>,

    /// Code to symbol
    backward: DashMap<Code, S, BuildHasherDefault<FxHasher>>,

    /// Code for the next unseen symbol
    ///
    /// Holding this lock is what entitles a thread to insert new entries.
    next_code: Mutex<Option<Code>>,

    start: Code,

    /// Only written while `next_code` is locked
    frozen: AtomicBool,

    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<S> Default for SharedAlphabet<S>
where
    S: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SharedAlphabet<S>
where
    S: Eq + Hash + Clone,
{
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
            "creating shared alphabet: start_code={}, frozen={}",
            config.start_code,
            config.frozen
        );
        Self {
            forward: DashMap::with_capacity_and_hasher(
                config.initial_capacity,
                ahash::RandomState::new(),
            ),
            backward: DashMap::with_capacity_and_hasher(
                config.initial_capacity,
                BuildHasherDefault::default(),
            ),
            next_code: Mutex::new(Some(config.start())),
            start: config.start(),
            frozen: AtomicBool::new(config.frozen),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Share an existing alphabet, keeping its codes, next code and frozen flag
    pub fn from_alphabet(alphabet: &OnTheFlyAlphabet<S>) -> Self {
        let shared = Self::with_config(
            &AlphabetConfig::default()
                .with_start_code(alphabet.start_code().as_u32())
                .with_frozen(alphabet.is_frozen()),
        );
        for (symbol, code) in alphabet.iter() {
            shared.forward.insert(symbol.clone(), code);
        }
        for code in alphabet.codes() {
            if let Some(symbol) = alphabet.get_symbol(code) {
                shared.backward.insert(code, symbol.clone());
            }
        }
        *shared.next_code.lock() = alphabet.next_code();
        shared
    }

    /// Translate a symbol into its code, assigning the next free code if the
    /// symbol has not been seen before.
    ///
    /// # Errors
    ///
    /// - [`AlphabetError::UnknownSymbol`] if the symbol is unseen and the
    ///   alphabet is frozen
    /// - [`AlphabetError::CodeSpaceExhausted`] if no code is left
    pub fn translate_symbol<Q>(&self, symbol: &Q) -> AlphabetResult<Code>
    where
        S: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = S>,
    {
        // Fast path: no lock for known symbols
        if let Some(code) = self.lookup(symbol) {
            return Ok(code);
        }

        let mut next_code = self.next_code.lock();

        // Another thread may have inserted the symbol while we waited
        if let Some(code) = self.lookup(symbol) {
            return Ok(code);
        }
        if self.frozen.load(Ordering::Acquire) {
            return Err(AlphabetError::UnknownSymbol);
        }
        let code = next_code.ok_or(AlphabetError::CodeSpaceExhausted)?;

        let owned = symbol.to_owned();
        self.backward.insert(code, owned.clone());
        self.forward.insert(owned, code);
        *next_code = code.checked_next();

        self.misses.fetch_add(1, Ordering::Relaxed);
        log::trace!("assigned shared code {}", code);
        Ok(code)
    }

    /// Look up the code of a known symbol without modifying the alphabet
    pub fn get_code<Q>(&self, symbol: &Q) -> Option<Code>
    where
        S: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.forward.get(symbol).map(|entry| *entry.value())
    }

    /// Look up the symbol a code stands for
    pub fn get_symbol(&self, code: Code) -> Option<S> {
        self.backward.get(&code).map(|entry| entry.value().clone())
    }

    /// Translate a code back into its symbol
    pub fn reverse_translate_symbol(&self, code: Code) -> AlphabetResult<S> {
        self.get_symbol(code).ok_or(AlphabetError::UnknownCode { code })
    }

    /// Stop assigning codes to unseen symbols
    ///
    /// Waits for an allocation in progress to finish.
    pub fn freeze(&self) {
        let _guard = self.next_code.lock();
        self.frozen.store(true, Ordering::Release);
        log::debug!("froze shared alphabet with {} symbols", self.forward.len());
    }

    /// Allow unseen symbols again
    pub fn unfreeze(&self) {
        let _guard = self.next_code.lock();
        self.frozen.store(false, Ordering::Release);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// The code the next unseen symbol will receive
    pub fn next_code(&self) -> Option<Code> {
        *self.next_code.lock()
    }

    /// Get statistics about the alphabet for profiling
    ///
    /// The counters are read without synchronizing with concurrent
    /// translations.
    pub fn stats(&self) -> AlphabetStats {
        AlphabetStats {
            count: self.forward.len(),
            next_code: self.next_code(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Copy the current contents into an [`OnTheFlyAlphabet`].
    ///
    /// Allocation is blocked for the duration of the copy, so the snapshot
    /// is a consistent state. Symbols appear in code order.
    pub fn snapshot(&self) -> OnTheFlyAlphabet<S> {
        let next_code = self.next_code.lock();

        let mut entries: Vec<(Code, S)> = self
            .backward
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        entries.sort_unstable_by_key(|(code, _)| *code);

        let config = AlphabetConfig::default()
            .with_start_code(self.start.as_u32())
            .with_initial_capacity(entries.len());
        let mut alphabet = OnTheFlyAlphabet::with_config(&config);
        for (code, symbol) in entries {
            alphabet.seed(symbol, code);
        }
        alphabet.set_next_code(*next_code);
        if self.frozen.load(Ordering::Acquire) {
            alphabet.freeze();
        }
        alphabet
    }

    fn lookup<Q>(&self, symbol: &Q) -> Option<Code>
    where
        S: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let code = self.get_code(symbol)?;
        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(code)
    }
}

static_assertions::assert_impl_all!(SharedAlphabet<String>: Send, Sync);
static_assertions::assert_impl_all!(OnTheFlyAlphabet<String>: Send);
