//! Core error types for otf-alphabet crate
//!
//! This module defines error types used throughout the crate. Every error is a
//! local precondition violation: a failed call leaves the alphabet unchanged.

use thiserror::Error;

use crate::code::Code;

/// Error type for symbol translation and alphabet construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphabetError {
    /// Two distinct symbols were given the same code
    #[error("Duplicate code: {code} is already assigned to another symbol")]
    DuplicateCode { code: Code },

    /// An unseen symbol was translated on a frozen alphabet
    #[error("Unknown symbol: the alphabet is frozen and cannot add new symbols")]
    UnknownSymbol,

    /// Reverse translation of a code that was never assigned
    #[error("Unknown code: {code} is not assigned to any symbol")]
    UnknownCode { code: Code },

    /// Explicit insertion conflicts with the code the symbol already has
    #[error("Symbol already mapped to code {existing}, cannot remap it to {requested}")]
    SymbolAlreadyMapped { existing: Code, requested: Code },

    /// Explicit insertion into a frozen alphabet
    #[error("Alphabet is frozen")]
    Frozen,

    /// Every code up to `u32::MAX` has been handed out
    #[error("Code space exhausted: no code left after {}", Code::MAX)]
    CodeSpaceExhausted,
}

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid TOML for [`AlphabetConfig`](crate::AlphabetConfig)
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configuration parsed but holds inconsistent values
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for alphabet operations
pub type AlphabetResult<T> = std::result::Result<T, AlphabetError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AlphabetError::DuplicateCode { code: Code::new(4) };
        assert_eq!(
            err.to_string(),
            "Duplicate code: 4 is already assigned to another symbol"
        );

        let err = AlphabetError::SymbolAlreadyMapped {
            existing: Code::new(1),
            requested: Code::new(2),
        };
        assert_eq!(
            err.to_string(),
            "Symbol already mapped to code 1, cannot remap it to 2"
        );

        let err = AlphabetError::CodeSpaceExhausted;
        assert_eq!(err.to_string(), "Code space exhausted: no code left after 4294967295");
    }

    #[test]
    fn test_config_error_from_toml() {
        let parse_err = toml::from_str::<toml::Table>("start_code = ").unwrap_err();
        let err: ConfigError = parse_err.into();
        assert!(err.to_string().starts_with("Failed to parse configuration"));
    }
}
