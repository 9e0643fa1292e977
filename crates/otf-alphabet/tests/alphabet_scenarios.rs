//! Alphabet Scenario Tests - literal translation sequences
//!
//! These tests pin the exact codes produced for the token sequences automata
//! front ends feed into an on-the-fly alphabet.

mod common;

use common::{assert_inverse_consistent, translate_all};
use otf_alphabet::{AlphabetConfig, AlphabetError, Code, OnTheFlyAlphabet, SharedAlphabet};
use std::collections::HashMap;

// ============================================================================
// FRESH ALPHABETS
// ============================================================================

/// Quoted and unquoted tokens are distinct symbols; the alphabet never
/// strips quotes or parses numbers.
#[test]
fn test_character_symbols_are_not_normalized() {
    let mut alphabet = OnTheFlyAlphabet::new();
    let codes = translate_all(
        &mut alphabet,
        &["'a'", "'b'", "b", "1", "10", "ahoj", "\"a\"", "\"0\""],
    );
    assert_eq!(codes, [0, 1, 2, 3, 4, 5, 6, 7]);
    assert_inverse_consistent(&alphabet);
}

#[test]
fn test_repeated_symbols_keep_their_code() {
    let mut alphabet = OnTheFlyAlphabet::new();
    let codes = translate_all(&mut alphabet, &["a", "a", "b", "a", "c"]);
    assert_eq!(codes, [0, 0, 1, 0, 2]);
    assert_eq!(alphabet.len(), 3);
}

#[test]
fn test_start_offset() {
    let mut alphabet = OnTheFlyAlphabet::with_start_code(3);
    let codes = translate_all(&mut alphabet, &["a", "b", "c", "a"]);
    assert_eq!(codes, [3, 4, 5, 3]);
}

#[test]
fn test_start_offset_from_toml() {
    let config = AlphabetConfig::from_toml_str("start_code = 3").unwrap();
    let mut alphabet = OnTheFlyAlphabet::with_config(&config);
    assert_eq!(translate_all(&mut alphabet, &["x", "y"]), [3, 4]);
}

// ============================================================================
// SEEDED ALPHABETS
// ============================================================================

#[test]
fn test_seeded_symbols_in_any_order() {
    let map: HashMap<String, u32> = HashMap::from([
        ("a".to_string(), 0),
        ("b".to_string(), 1),
        ("c".to_string(), 2),
    ]);

    for order in [["a", "b", "c"], ["c", "a", "b"], ["b", "c", "a"]] {
        let mut alphabet = OnTheFlyAlphabet::from_symbol_map(map.clone());
        let codes = translate_all(&mut alphabet, &order);
        let expected: Vec<u32> = order.iter().map(|symbol| map[*symbol]).collect();
        assert_eq!(codes, expected);
    }
}

#[test]
fn test_seeded_alphabet_grows_past_largest_code() {
    let mut alphabet = OnTheFlyAlphabet::from_symbol_map([
        ("a".to_string(), 0u32),
        ("b".to_string(), 1),
        ("c".to_string(), 2),
    ]);
    assert_eq!(translate_all(&mut alphabet, &["d", "a", "e"]), [3, 0, 4]);
    assert_inverse_consistent(&alphabet);
}

#[test]
fn test_frozen_seeded_alphabet_rejects_unseen() {
    let mut alphabet = OnTheFlyAlphabet::from_symbol_map([
        ("a".to_string(), 0u32),
        ("b".to_string(), 1),
        ("c".to_string(), 2),
    ]);
    alphabet.freeze();
    assert_eq!(alphabet.translate_symbol("c").unwrap(), Code::new(2));
    assert_eq!(alphabet.translate_symbol("d"), Err(AlphabetError::UnknownSymbol));
    assert_eq!(alphabet.next_code(), Some(Code::new(3)));
}

// ============================================================================
// SHARED ALPHABETS
// ============================================================================

#[test]
fn test_shared_matches_exclusive() {
    let tokens = ["'a'", "'b'", "b", "1", "10", "ahoj", "\"a\"", "\"0\"", "b", "'a'"];

    let mut exclusive = OnTheFlyAlphabet::new();
    let expected = translate_all(&mut exclusive, &tokens);

    let shared: SharedAlphabet<String> = SharedAlphabet::new();
    let codes: Vec<u32> = tokens
        .iter()
        .map(|token| shared.translate_symbol(*token).unwrap().as_u32())
        .collect();

    assert_eq!(codes, expected);
    assert_eq!(shared.snapshot(), exclusive);
}
