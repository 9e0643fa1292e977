//! Shared helpers for otf-alphabet integration tests.

#![allow(dead_code)]

use otf_alphabet::{Code, OnTheFlyAlphabet};

/// Translate every token in order and return the raw code values
pub fn translate_all(alphabet: &mut OnTheFlyAlphabet<String>, tokens: &[&str]) -> Vec<u32> {
    tokens
        .iter()
        .map(|token| {
            alphabet
                .translate_symbol(*token)
                .map(Code::as_u32)
                .unwrap_or_else(|err| panic!("translating {:?} failed: {}", token, err))
        })
        .collect()
}

/// Assert that the forward and reverse directions agree on every entry
pub fn assert_inverse_consistent<S>(alphabet: &OnTheFlyAlphabet<S>)
where
    S: Eq + std::hash::Hash + std::fmt::Debug,
{
    for (symbol, code) in alphabet.iter() {
        assert_eq!(
            alphabet.get_symbol(code),
            Some(symbol),
            "code {} does not resolve back to {:?}",
            code,
            symbol
        );
    }
    for code in alphabet.codes() {
        let symbol = alphabet
            .get_symbol(code)
            .unwrap_or_else(|| panic!("code {} has no symbol", code));
        assert_eq!(alphabet.get_code(symbol), Some(code));
    }
}
