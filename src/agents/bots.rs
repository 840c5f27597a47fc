use crate::betting::{Action, LegalActions};
use crate::cards::Card;
use crate::deck::Deck;
use crate::evaluator::evaluate_cards;
use crate::observation::Observation;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use tracing::trace;

use super::Bot;

pub const DEFAULT_PROB_SAMPLES: usize = 200;

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

/// Checks when it can, calls otherwise. Never folds, never raises.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckCallBot;

impl Bot for CheckCallBot {
    fn name(&self) -> &str {
        "check-call-bot"
    }

    fn act(&mut self, obs: &Observation) -> Action {
        if obs.legal_actions.check {
            Action::Check
        } else {
            Action::Call
        }
    }
}

/// Shoves at every opportunity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllInBot;

impl Bot for AllInBot {
    fn name(&self) -> &str {
        "all-in-bot"
    }

    fn act(&mut self, obs: &Observation) -> Action {
        let la = &obs.legal_actions;
        if la.raise {
            Action::Raise(la.max_raise_to)
        } else if la.call {
            Action::Call
        } else {
            Action::Check
        }
    }
}

/// Picks uniformly among legal action kinds; raise sizes are uniform
/// within the bounds.
#[derive(Debug)]
pub struct RandomBot {
    state: BotState,
}

impl RandomBot {
    pub fn new(seed: Option<u64>) -> Self {
        Self { state: BotState::new(seed) }
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        "random-bot"
    }

    fn act(&mut self, obs: &Observation) -> Action {
        let la = &obs.legal_actions;
        let mut kinds = Vec::with_capacity(4);
        if la.fold {
            kinds.push(Action::Fold);
        }
        if la.check {
            kinds.push(Action::Check);
        }
        if la.call {
            kinds.push(Action::Call);
        }
        if la.raise {
            kinds.push(Action::Raise(la.min_raise_to));
        }
        if kinds.is_empty() {
            return Action::Check;
        }
        match kinds[self.state.rng.random_range(0..kinds.len())] {
            Action::Raise(_) => {
                Action::Raise(self.state.rng.random_range(la.min_raise_to..=la.max_raise_to))
            }
            other => other,
        }
    }
}

/// Estimates its showdown equity by sampling and bets on it.
///
/// Equity above 0.7 raises to one and a half minimum raises, equity below
/// 0.4 folds to a real bet, anything else checks or calls. Facing more than
/// a single chip the estimate is discounted by a fifth.
#[derive(Debug)]
pub struct ProbBot {
    state: BotState,
    samples: usize,
}

impl ProbBot {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_samples(seed, DEFAULT_PROB_SAMPLES)
    }

    pub fn with_samples(seed: Option<u64>, samples: usize) -> Self {
        Self { state: BotState::new(seed), samples: samples.max(1) }
    }

    /// Share of sampled runouts won, ties counting half.
    pub fn estimate_equity(&mut self, hole: [Card; 2], board: &[Card]) -> f64 {
        let mut unseen: Vec<Card> = Deck::ordered()
            .remaining()
            .iter()
            .copied()
            .filter(|c| !hole.contains(c) && !board.contains(c))
            .collect();
        let missing = 5usize.saturating_sub(board.len());
        let mut mine = Vec::with_capacity(7);
        let mut theirs = Vec::with_capacity(7);
        let mut score = 0.0;
        for _ in 0..self.samples {
            let (drawn, _) = unseen.partial_shuffle(&mut self.state.rng, 2 + missing);
            mine.clear();
            theirs.clear();
            mine.extend_from_slice(&hole);
            theirs.extend_from_slice(&drawn[..2]);
            for cards in [&mut mine, &mut theirs] {
                cards.extend_from_slice(board);
                cards.extend_from_slice(&drawn[2..]);
            }
            let (a, b) = (evaluate_cards(&mine), evaluate_cards(&theirs));
            score += match a.cmp(&b) {
                std::cmp::Ordering::Greater => 1.0,
                std::cmp::Ordering::Equal => 0.5,
                std::cmp::Ordering::Less => 0.0,
            };
        }
        score / self.samples as f64
    }

    fn decide(prob: f64, la: &LegalActions) -> Action {
        let prob = if la.to_call > 1 { prob * 0.8 } else { prob };
        if prob > 0.7 && la.raise {
            let target = (la.min_raise_to as f64 * 1.5) as u64;
            Action::Raise(target.clamp(la.min_raise_to, la.max_raise_to))
        } else if prob < 0.4 && la.to_call > 1 && la.fold {
            Action::Fold
        } else if la.check {
            Action::Check
        } else {
            Action::Call
        }
    }
}

impl Bot for ProbBot {
    fn name(&self) -> &str {
        "prob-bot"
    }

    fn act(&mut self, obs: &Observation) -> Action {
        let Some(hole) = obs.hole_cards else {
            return Action::Check;
        };
        let prob = self.estimate_equity(hole.cards(), obs.board.as_slice());
        let action = Self::decide(prob, &obs.legal_actions);
        trace!(seat = obs.seat, prob, %action, "prob-bot decision");
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn legal(to_call: u64, raise: Option<(u64, u64)>) -> LegalActions {
        LegalActions {
            fold: true,
            check: to_call == 0,
            call: to_call > 0,
            raise: raise.is_some(),
            to_call,
            min_raise_to: raise.map_or(0, |r| r.0),
            max_raise_to: raise.map_or(0, |r| r.1),
        }
    }

    #[test]
    fn prob_bot_thresholds() {
        let la = legal(0, Some((2, 100)));
        assert_eq!(ProbBot::decide(0.9, &la), Action::Raise(3));
        assert_eq!(ProbBot::decide(0.5, &la), Action::Check);
        assert_eq!(ProbBot::decide(0.1, &la), Action::Check, "never folds for free");

        let facing = legal(10, Some((20, 100)));
        assert_eq!(ProbBot::decide(0.9, &facing), Action::Raise(30));
        // 0.85 discounted to 0.68 is not enough to raise.
        assert_eq!(ProbBot::decide(0.85, &facing), Action::Call);
        assert_eq!(ProbBot::decide(0.45, &facing), Action::Fold);

        let capped = legal(10, Some((20, 25)));
        assert_eq!(ProbBot::decide(0.95, &capped), Action::Raise(25));
    }

    #[test]
    fn equity_reflects_hand_strength() {
        let mut bot = ProbBot::with_samples(Some(11), 400);
        let aa = parse_cards("As Ah").unwrap();
        let seven_deuce = parse_cards("7c 2d").unwrap();
        let aces = bot.estimate_equity([aa[0], aa[1]], &[]);
        let trash = bot.estimate_equity([seven_deuce[0], seven_deuce[1]], &[]);
        assert!(aces > 0.7, "aces {aces}");
        assert!(trash < 0.45, "72o {trash}");
    }

    #[test]
    fn made_nuts_on_river_always_wins() {
        let mut bot = ProbBot::with_samples(Some(3), 50);
        let hole = parse_cards("As Ks").unwrap();
        let board = parse_cards("Qs Js Ts 2d 3c").unwrap();
        assert_eq!(bot.estimate_equity([hole[0], hole[1]], &board), 1.0);
    }

    #[test]
    fn random_bot_is_seeded_and_legal() {
        let la = legal(4, Some((8, 60)));
        let mut a = RandomBot::new(Some(9));
        let mut b = RandomBot::new(Some(9));
        let obs = crate::observation::tests_support::observation_with(la);
        for _ in 0..50 {
            let x = a.act(&obs);
            assert_eq!(x, b.act(&obs));
            assert!(la.allows(x), "{x:?}");
        }
    }

    #[test]
    fn all_in_bot_shoves_or_calls() {
        let obs = crate::observation::tests_support::observation_with(legal(4, Some((8, 60))));
        assert_eq!(AllInBot.act(&obs), Action::Raise(60));
        let obs = crate::observation::tests_support::observation_with(legal(4, None));
        assert_eq!(AllInBot.act(&obs), Action::Call);
        assert_eq!(CheckCallBot.act(&obs), Action::Call);
    }
}
