//! Match controller exposed as a step-based environment.
//!
//! `reset` starts a match and deals hand 1, `step` applies one action for
//! the seat to act. Hands are chained automatically: when a step ends a hand
//! the payoff is banked, the button moves and the next hand is dealt, so the
//! caller only ever sees decision points.
//!
//! ```
//! use holdem_arena::betting::Action;
//! use holdem_arena::config::MatchConfig;
//! use holdem_arena::env::PokerEnv;
//!
//! let mut env = PokerEnv::new();
//! let (obs0, _obs1, _info) = env.reset(MatchConfig::default().with_rounds(1).with_seed(7)).unwrap();
//! assert!(obs0.is_my_turn);
//! let step = env.step(Action::Fold).unwrap();
//! assert!(step.done);
//! assert_eq!(step.rewards, [-1, 1]);
//! ```

use crate::agents::{fallback_action, make_bot, Bot};
use crate::betting::Action;
use crate::config::MatchConfig;
use crate::deck::Deck;
use crate::error::{EngineError, EngineResult, IllegalAction};
use crate::game::{HandOutcome, HandParams, HandSnapshot, HandState};
use crate::observation::{ConcludedHand, Observation, StepInfo, StepResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

/// Seat driven internally when the config names an opponent bot.
pub const BOT_SEAT: usize = 1;

#[derive(Debug)]
pub struct PokerEnv {
    config: MatchConfig,
    rng: ChaCha8Rng,
    stacks: [u64; 2],
    hands_played: u32,
    hand: Option<HandState>,
    done: bool,
    last_outcome: Option<HandOutcome>,
    /// Hands concluded by the step in progress.
    concluded: Vec<ConcludedHand>,
    opponent: Option<Box<dyn Bot>>,
}

impl Default for PokerEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl PokerEnv {
    /// An idle environment; call [`PokerEnv::reset`] before stepping.
    pub fn new() -> Self {
        Self {
            config: MatchConfig::default(),
            rng: ChaCha8Rng::seed_from_u64(0),
            stacks: [0; 2],
            hands_played: 0,
            hand: None,
            done: true,
            last_outcome: None,
            concluded: Vec::new(),
            opponent: None,
        }
    }

    /// Start a fresh match. An invalid config is rejected before any hand
    /// is dealt and leaves the environment as it was.
    ///
    /// A valid config always leaves seat 0, the first button, facing a
    /// decision, so no hand can conclude here.
    pub fn reset(
        &mut self,
        config: MatchConfig,
    ) -> EngineResult<(Observation, Observation, StepInfo)> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.stacks = [config.starting_stack; 2];
        self.hands_played = 0;
        self.done = false;
        self.last_outcome = None;
        self.concluded.clear();
        self.opponent = config.opp_bot.map(|kind| make_bot(kind, Some(seed.wrapping_add(1))));
        info!(
            seed,
            rounds = config.num_rounds,
            stack = config.starting_stack,
            opponent = ?config.opp_bot,
            "match reset"
        );
        self.config = config;

        self.hand = Some(self.deal_hand(0)?);
        if self.to_act() != Some(0) {
            return Err(self.fail(EngineError::InvariantViolation(
                "hand 1 opened without a decision for the button".to_string(),
            )));
        }
        Ok((self.observe(0)?, self.observe(1)?, self.info()))
    }

    /// Apply `action` for the seat to act.
    pub fn step(&mut self, action: Action) -> EngineResult<StepResult> {
        if self.done {
            return Err(IllegalAction::MatchOver.into());
        }
        let hand = self.hand.as_mut().ok_or(EngineError::NotReset)?;
        let seat = hand.to_act().ok_or(IllegalAction::HandOver)?;
        if let Err(e) = hand.act(seat, action).map(|_| ()) {
            return Err(self.fail(e));
        }

        self.concluded.clear();
        let mut rewards = [0; 2];
        self.settle(&mut rewards)?;
        self.drive_opponent(&mut rewards)?;

        let mut observations = [self.observe(0)?, self.observe(1)?];
        // Cards shown down by the last hand this step concluded.
        let shown = self.concluded.last().and_then(|c| c.outcome.showdown.as_ref());
        if let Some(showdown) = shown {
            for (seat, obs) in observations.iter_mut().enumerate() {
                obs.opp_hole_cards = Some(showdown.holes[1 - seat]);
            }
        }
        Ok(StepResult {
            observations,
            rewards,
            done: self.done,
            truncated: false,
            info: self.info(),
        })
    }

    /// The current view of `seat`. Cards from an earlier showdown are never
    /// part of it; they only travel in the step that concluded that hand.
    pub fn observe(&self, seat: usize) -> EngineResult<Observation> {
        let hand = self.hand.as_ref().ok_or(EngineError::NotReset)?;
        Ok(Observation::from_hand(hand, seat, self.config.starting_stack))
    }

    pub fn snapshot(&self) -> Option<HandSnapshot> {
        self.hand.as_ref().map(HandState::snapshot)
    }

    /// Stacks as of the last concluded hand.
    pub fn stacks(&self) -> [u64; 2] {
        self.stacks
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn last_outcome(&self) -> Option<&HandOutcome> {
        self.last_outcome.as_ref()
    }

    /// Seat whose action `step` expects, if the match is live.
    pub fn to_act(&self) -> Option<usize> {
        if self.done {
            return None;
        }
        self.hand.as_ref().and_then(HandState::to_act)
    }

    pub fn info(&self) -> StepInfo {
        StepInfo {
            hands_played: self.hands_played,
            button: self.hand.as_ref().map_or(0, HandState::button),
            last_outcome: self.last_outcome.clone(),
            concluded: self.concluded.clone(),
        }
    }

    fn deal_hand(&mut self, button: usize) -> EngineResult<HandState> {
        let deck = Deck::shuffled_with(&mut self.rng);
        let params = HandParams::from(&self.config);
        HandState::start(params, self.hands_played + 1, button, self.stacks, deck)
    }

    /// Bank concluded hands and deal the next until one needs a decision or
    /// the match ends.
    fn settle(&mut self, rewards: &mut [i64; 2]) -> EngineResult<()> {
        loop {
            let Some(hand) = self.hand.as_ref() else {
                return Err(EngineError::NotReset);
            };
            let Some(outcome) = hand.outcome().cloned() else {
                return Ok(());
            };
            let stacks = [hand.player(0).stack(), hand.player(1).stack()];
            let button = hand.button();
            let total: u64 = self.stacks.iter().sum();
            if stacks.iter().sum::<u64>() != total {
                return Err(self.fail(EngineError::InvariantViolation(format!(
                    "hand {} changed the chip total: {:?} -> {stacks:?}",
                    outcome.hand_number, self.stacks
                ))));
            }
            self.stacks = stacks;
            self.hands_played += 1;
            rewards[0] += outcome.payoffs[0];
            rewards[1] += outcome.payoffs[1];
            let final_views = [
                Observation::from_hand(hand, 0, self.config.starting_stack),
                Observation::from_hand(hand, 1, self.config.starting_stack),
            ];
            if let Some(bot) = self.opponent.as_mut() {
                bot.on_hand_end(&outcome, &final_views[BOT_SEAT]);
            }
            self.last_outcome = Some(outcome.clone());
            self.concluded.push(ConcludedHand { outcome, final_views });

            if self.hands_played >= self.config.num_rounds || stacks.contains(&0) {
                self.done = true;
                info!(hands = self.hands_played, stacks = ?self.stacks, "match over");
                return Ok(());
            }
            match self.deal_hand(1 - button) {
                Ok(next) => self.hand = Some(next),
                Err(e) => return Err(self.fail(e)),
            }
        }
    }

    /// Let the built-in opponent act until seat 0 is to act or the match ends.
    fn drive_opponent(&mut self, rewards: &mut [i64; 2]) -> EngineResult<()> {
        if self.opponent.is_none() {
            return Ok(());
        }
        while self.to_act() == Some(BOT_SEAT) {
            let obs = self.observe(BOT_SEAT)?;
            let Some(bot) = self.opponent.as_mut() else {
                return Ok(());
            };
            let mut action = bot.act(&obs);
            if !obs.legal_actions.allows(action) {
                let replacement = fallback_action(&obs);
                warn!(bot = bot.name(), %action, %replacement, "illegal bot action coerced");
                action = replacement;
            }
            let hand = self.hand.as_mut().ok_or(EngineError::NotReset)?;
            if let Err(e) = hand.act(BOT_SEAT, action).map(|_| ()) {
                return Err(self.fail(e));
            }
            self.settle(rewards)?;
        }
        Ok(())
    }

    /// Fatal errors end the match; illegal actions pass through untouched.
    fn fail(&mut self, e: EngineError) -> EngineError {
        if !e.is_recoverable() {
            self.done = true;
        }
        e
    }
}
