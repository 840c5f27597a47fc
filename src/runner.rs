//! Bot-vs-bot match driver.
//!
//! Both seats are controlled by [`Bot`]s. An illegal answer is replaced by
//! check, or fold when checking is not possible, and counted against the
//! bot that produced it.

use crate::agents::{fallback_action, Bot};
use crate::config::MatchConfig;
use crate::env::PokerEnv;
use crate::error::EngineResult;
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub bots: [String; 2],
    pub hands_played: u32,
    pub showdowns: u32,
    pub final_stacks: [u64; 2],
    /// Net chips won per seat over the match.
    pub totals: [i64; 2],
    pub illegal_actions: [u32; 2],
}

impl MatchSummary {
    pub fn winner(&self) -> Option<usize> {
        match self.totals[0].cmp(&self.totals[1]) {
            std::cmp::Ordering::Greater => Some(0),
            std::cmp::Ordering::Less => Some(1),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[derive(Debug)]
pub struct MatchRunner {
    bots: [Box<dyn Bot>; 2],
    env: PokerEnv,
}

impl MatchRunner {
    pub fn new(bot0: Box<dyn Bot>, bot1: Box<dyn Bot>) -> Self {
        Self { bots: [bot0, bot1], env: PokerEnv::new() }
    }

    pub fn env(&self) -> &PokerEnv {
        &self.env
    }

    /// Play a full match. Any `opp_bot` in `config` is ignored since both
    /// seats are driven here.
    pub fn run(&mut self, mut config: MatchConfig) -> EngineResult<MatchSummary> {
        if config.opp_bot.take().is_some() {
            debug!("runner drives both seats; ignoring opp_bot");
        }
        let names = [self.bots[0].name().to_string(), self.bots[1].name().to_string()];
        info!(bot0 = %names[0], bot1 = %names[1], "match starting");
        self.env.reset(config)?;

        let mut totals = [0i64; 2];
        let mut illegal = [0u32; 2];
        let mut showdowns = 0;
        while let Some(seat) = self.env.to_act() {
            let obs = self.env.observe(seat)?;
            let bot = &mut self.bots[seat];
            let mut action = bot.act(&obs);
            if let Err(reason) = obs.legal_actions.check_action(action) {
                let replacement = fallback_action(&obs);
                warn!(
                    seat,
                    bot = bot.name(),
                    %action,
                    %replacement,
                    %reason,
                    "illegal bot action coerced"
                );
                illegal[seat] += 1;
                action = replacement;
            }

            let step = self.env.step(action)?;
            totals[0] += step.rewards[0];
            totals[1] += step.rewards[1];
            for hand in &step.info.concluded {
                if !hand.outcome.folded() {
                    showdowns += 1;
                }
                for (bot, obs) in self.bots.iter_mut().zip(&hand.final_views) {
                    bot.on_hand_end(&hand.outcome, obs);
                }
            }
        }

        let summary = MatchSummary {
            bots: names,
            hands_played: self.env.hands_played(),
            showdowns,
            final_stacks: self.env.stacks(),
            totals,
            illegal_actions: illegal,
        };
        info!(
            hands = summary.hands_played,
            total0 = summary.totals[0],
            total1 = summary.totals[1],
            "match finished"
        );
        Ok(summary)
    }
}
