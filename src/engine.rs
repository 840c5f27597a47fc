// Stepping interface as a trait boundary. Training loops and match drivers
// program against `Environment` so they do not depend on how hands are
// chained internally. It is implemented for `PokerEnv`.

use crate::betting::Action;
use crate::config::MatchConfig;
use crate::env::PokerEnv;
use crate::error::EngineResult;
use crate::game::HandSnapshot;
use crate::observation::{Observation, StepInfo, StepResult};

pub trait Environment {
    // Match lifecycle
    fn reset(&mut self, config: MatchConfig) -> EngineResult<(Observation, Observation, StepInfo)>;
    fn step(&mut self, action: Action) -> EngineResult<StepResult>;

    // Queries
    fn observe(&self, seat: usize) -> EngineResult<Observation>;
    fn to_act(&self) -> Option<usize>;
    fn is_done(&self) -> bool;
    fn stacks(&self) -> [u64; 2];
    fn snapshot(&self) -> Option<HandSnapshot>;
}

impl Environment for PokerEnv {
    fn reset(&mut self, config: MatchConfig) -> EngineResult<(Observation, Observation, StepInfo)> {
        self.reset(config)
    }
    fn step(&mut self, action: Action) -> EngineResult<StepResult> {
        self.step(action)
    }

    fn observe(&self, seat: usize) -> EngineResult<Observation> {
        self.observe(seat)
    }
    fn to_act(&self) -> Option<usize> {
        self.to_act()
    }
    fn is_done(&self) -> bool {
        self.is_done()
    }
    fn stacks(&self) -> [u64; 2] {
        self.stacks()
    }
    fn snapshot(&self) -> Option<HandSnapshot> {
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_out(env: &mut dyn Environment) -> u32 {
        let mut steps = 0;
        env.reset(MatchConfig::default().with_rounds(3).with_seed(5)).unwrap();
        while let Some(seat) = env.to_act() {
            let obs = env.observe(seat).unwrap();
            let action = if obs.legal_actions.check { Action::Check } else { Action::Call };
            env.step(action).unwrap();
            steps += 1;
        }
        steps
    }

    #[test]
    fn drives_through_trait_object() {
        let mut env = PokerEnv::new();
        assert!(play_out(&mut env) >= 3 * 8);
        assert!(Environment::is_done(&env));
        assert_eq!(Environment::stacks(&env).iter().sum::<u64>(), 800);
    }
}
