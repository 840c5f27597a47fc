//! holdem-arena: heads-up No-Limit Hold'em competition engine
//!
//! Goals:
//! - Referee matches between independently written bots over many hands
//! - Step-based environment (`reset` / `step` / observe) for bot play and
//!   reinforcement-learning loops
//! - No panics on bad input; illegal actions come back as `Result` errors
//!   and leave the game untouched
//!
//! ## Quick start: play a match from seat 0
//! ```
//! use holdem_arena::betting::Action;
//! use holdem_arena::config::{MatchConfig, OpponentKind};
//! use holdem_arena::env::PokerEnv;
//!
//! let cfg = MatchConfig::default()
//!     .with_rounds(10)
//!     .with_seed(1)
//!     .with_opponent(OpponentKind::CheckCall);
//! let mut env = PokerEnv::new();
//! let (mut obs, _, _) = env.reset(cfg).unwrap();
//! let mut net = 0;
//! while !env.is_done() {
//!     let action = if obs.legal_actions.check { Action::Check } else { Action::Call };
//!     let step = env.step(action).unwrap();
//!     net += step.rewards[0];
//!     obs = step.observations[0].clone();
//! }
//! assert_eq!(env.stacks()[0] as i64 - 400, net);
//! ```
//!
//! ## Arena
//! Pit two bundled bots against each other with:
//! ```sh
//! cargo run --bin arena -- --bot0 prob --bot1 random --rounds 200 --seed 7
//! ```

pub mod agents;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod observation;
pub mod runner;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
