//! Configuration Module - alphabet construction parameters
//!
//! An [`AlphabetConfig`] can be built in code or loaded from TOML. Every
//! field has a default, so an empty document is a valid configuration.
//!
//! ```toml
//! start_code = 3
//! frozen = false
//! initial_capacity = 64
//! ```

use serde::{Deserialize, Serialize};

use crate::code::Code;
use crate::error::{ConfigError, ConfigResult};

/// Default code assigned to the first unseen symbol
pub const DEFAULT_START_CODE: u32 = 0;

/// Construction parameters shared by [`OnTheFlyAlphabet`](crate::OnTheFlyAlphabet)
/// and [`SharedAlphabet`](crate::SharedAlphabet).
///
/// # Examples
///
/// ```rust
/// use otf_alphabet::AlphabetConfig;
///
/// // Use default configuration
/// let config = AlphabetConfig::default();
/// assert_eq!(config.start_code, 0);
///
/// // Start allocating at 3
/// let config = AlphabetConfig {
///     start_code: 3,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlphabetConfig {
    /// Code assigned to the first unseen symbol
    ///
    /// Default: 0
    pub start_code: u32,

    /// Reject unseen symbols instead of allocating codes for them
    ///
    /// Default: false
    pub frozen: bool,

    /// Number of symbols to reserve space for up front
    ///
    /// Default: 0
    pub initial_capacity: usize,
}

impl Default for AlphabetConfig {
    fn default() -> Self {
        Self {
            start_code: DEFAULT_START_CODE,
            frozen: false,
            initial_capacity: 0,
        }
    }
}

impl AlphabetConfig {
    /// Set the first code assigned to an unseen symbol
    pub fn with_start_code(mut self, start_code: u32) -> Self {
        self.start_code = start_code;
        self
    }

    /// Set whether the alphabet starts frozen
    pub fn with_frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    /// Set the number of symbols to reserve space for
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// The start code as a [`Code`]
    pub fn start(&self) -> Code {
        Code::new(self.start_code)
    }

    /// Load a configuration from TOML text
    ///
    /// Missing keys take their default values; unknown keys are rejected.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: AlphabetConfig = toml::from_str(text)?;
        config.validate()?;
        log::debug!("loaded alphabet configuration: {:?}", config);
        Ok(config)
    }

    /// Serialize this configuration to TOML text
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check that the values are usable
    ///
    /// A frozen alphabet never allocates, so reserving capacity for one is
    /// a configuration mistake.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.frozen && self.initial_capacity > 0 {
            return Err(ConfigError::Invalid(format!(
                "initial_capacity = {} has no effect on a frozen alphabet",
                self.initial_capacity
            )));
        }
        Ok(())
    }
}
