//! Match configuration.
//!
//! Defaults follow the competition variant: 1000 hands, 400-chip stacks,
//! blinds of 1 and 2.
//!
//! ```
//! use holdem_arena::config::MatchConfig;
//!
//! let cfg = MatchConfig::from_toml_str("num_rounds = 5\nseed = 9").unwrap();
//! assert_eq!(cfg.num_rounds, 5);
//! assert_eq!(cfg.starting_stack, 400);
//! assert!(cfg.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_NUM_ROUNDS: u32 = 1000;
pub const DEFAULT_STARTING_STACK: u64 = 400;
pub const DEFAULT_SMALL_BLIND: u64 = 1;
pub const DEFAULT_BIG_BLIND: u64 = 2;

/// Which seat receives the indivisible chip of a split pot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OddChipPolicy {
    #[default]
    Button,
    BigBlind,
}

/// Built-in policies that can occupy seat 1 inside the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpponentKind {
    CheckCall,
    AllIn,
    Random,
    Prob,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Hand-count cap for the match.
    pub num_rounds: u32,
    pub starting_stack: u64,
    pub small_blind: u64,
    pub big_blind: u64,
    /// Seed for the match RNG; `None` picks one from entropy.
    pub seed: Option<u64>,
    pub odd_chip: OddChipPolicy,
    /// Fixes seat 1's policy so callers only drive seat 0.
    pub opp_bot: Option<OpponentKind>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_rounds: DEFAULT_NUM_ROUNDS,
            starting_stack: DEFAULT_STARTING_STACK,
            small_blind: DEFAULT_SMALL_BLIND,
            big_blind: DEFAULT_BIG_BLIND,
            seed: None,
            odd_chip: OddChipPolicy::default(),
            opp_bot: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("num_rounds must be positive")]
    ZeroRounds,
    #[error("starting_stack must be positive")]
    ZeroStack,
    #[error("blinds must be positive")]
    ZeroBlind,
    #[error("small blind {small} exceeds big blind {big}")]
    BlindOrder { small: u64, big: u64 },
    #[error("big blind {big} exceeds starting stack {stack}")]
    BlindAboveStack { big: u64, stack: u64 },
    #[error("small blind {small} would put the button all-in from a starting stack of {stack}")]
    SmallBlindCoversStack { small: u64, stack: u64 },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl MatchConfig {
    pub fn with_rounds(mut self, num_rounds: u32) -> Self {
        self.num_rounds = num_rounds;
        self
    }

    pub fn with_stack(mut self, starting_stack: u64) -> Self {
        self.starting_stack = starting_stack;
        self
    }

    pub fn with_blinds(mut self, small_blind: u64, big_blind: u64) -> Self {
        self.small_blind = small_blind;
        self.big_blind = big_blind;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_opponent(mut self, kind: OpponentKind) -> Self {
        self.opp_bot = Some(kind);
        self
    }

    pub fn with_odd_chip(mut self, policy: OddChipPolicy) -> Self {
        self.odd_chip = policy;
        self
    }

    /// Reject configurations no hand could start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::ZeroStack);
        }
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(ConfigError::ZeroBlind);
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::BlindOrder { small: self.small_blind, big: self.big_blind });
        }
        if self.big_blind > self.starting_stack {
            return Err(ConfigError::BlindAboveStack {
                big: self.big_blind,
                stack: self.starting_stack,
            });
        }
        // The button must keep chips behind so hand 1 waits for a decision.
        if self.small_blind >= self.starting_stack {
            return Err(ConfigError::SmallBlindCoversStack {
                small: self.small_blind,
                stack: self.starting_stack,
            });
        }
        Ok(())
    }

    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_competition_variant() {
        let c = MatchConfig::default();
        assert_eq!(
            (c.num_rounds, c.starting_stack, c.small_blind, c.big_blind),
            (1000, 400, 1, 2)
        );
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validation_rejects_degenerate_values() {
        let base = MatchConfig::default();
        assert!(matches!(base.clone().with_rounds(0).validate(), Err(ConfigError::ZeroRounds)));
        assert!(matches!(base.clone().with_stack(0).validate(), Err(ConfigError::ZeroStack)));
        assert!(matches!(base.clone().with_blinds(0, 2).validate(), Err(ConfigError::ZeroBlind)));
        assert!(matches!(
            base.clone().with_blinds(5, 2).validate(),
            Err(ConfigError::BlindOrder { small: 5, big: 2 })
        ));
        assert!(matches!(
            base.with_stack(10).with_blinds(5, 20).validate(),
            Err(ConfigError::BlindAboveStack { big: 20, stack: 10 })
        ));
    }

    #[test]
    fn button_must_keep_chips_behind_the_small_blind() {
        let cfg = MatchConfig::default().with_stack(2).with_blinds(2, 2);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::SmallBlindCoversStack { small: 2, stack: 2 })
        ));
        assert!(MatchConfig::default().with_stack(2).with_blinds(1, 2).validate().is_ok());
    }

    #[test]
    fn toml_fields_and_enums_parse() {
        let cfg = MatchConfig::from_toml_str(
            r#"
            num_rounds = 3
            starting_stack = 200
            small_blind = 1
            big_blind = 2
            odd_chip = "big-blind"
            opp_bot = "all-in"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.num_rounds, 3);
        assert_eq!(cfg.odd_chip, OddChipPolicy::BigBlind);
        assert_eq!(cfg.opp_bot, Some(OpponentKind::AllIn));
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            MatchConfig::from_toml_str("num_rounds = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
