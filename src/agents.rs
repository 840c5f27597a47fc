//! Agents: pluggable policies that pick an action from an observation.
//!
//! A bot sees exactly what its seat is allowed to see and returns one
//! [`Action`]. Whoever drives the match (the environment's built-in
//! opponent or the [`runner`](crate::runner)) is responsible for what
//! happens when the answer is illegal.

use crate::betting::Action;
use crate::config::OpponentKind;
use crate::game::HandOutcome;
use crate::observation::Observation;

mod bots;

pub use bots::{AllInBot, CheckCallBot, ProbBot, RandomBot, DEFAULT_PROB_SAMPLES};

/// A seat controller.
pub trait Bot: Send {
    fn name(&self) -> &str;

    /// Called whenever the bot's seat is to act.
    fn act(&mut self, obs: &Observation) -> Action;

    /// Called once per concluded hand with the view of the bot's seat.
    fn on_hand_end(&mut self, _outcome: &HandOutcome, _obs: &Observation) {}
}

impl std::fmt::Debug for dyn Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bot({})", self.name())
    }
}

/// Build one of the bundled bots. `seed` makes randomized bots reproducible.
pub fn make_bot(kind: OpponentKind, seed: Option<u64>) -> Box<dyn Bot> {
    match kind {
        OpponentKind::CheckCall => Box::new(CheckCallBot),
        OpponentKind::AllIn => Box::new(AllInBot),
        OpponentKind::Random => Box::new(RandomBot::new(seed)),
        OpponentKind::Prob => Box::new(ProbBot::new(seed)),
    }
}

/// Replacement for an illegal choice: check if allowed, otherwise fold.
pub fn fallback_action(obs: &Observation) -> Action {
    if obs.legal_actions.check {
        Action::Check
    } else {
        Action::Fold
    }
}
