use holdem_arena::agents::{make_bot, Bot, RandomBot};
use holdem_arena::config::{MatchConfig, OddChipPolicy, OpponentKind};
use holdem_arena::env::PokerEnv;
use holdem_arena::runner::MatchRunner;
use proptest::prelude::*;

fn any_kind() -> impl Strategy<Value = OpponentKind> {
    prop_oneof![
        Just(OpponentKind::CheckCall),
        Just(OpponentKind::AllIn),
        Just(OpponentKind::Random),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_hand_is_zero_sum_and_pot_matches_contributions(
        seed in any::<u64>(),
        stack in 10u64..300,
        big_blind in 1u64..8,
        big_blind_odd in any::<bool>(),
    ) {
        let small_blind = (big_blind / 2).max(1);
        let policy = if big_blind_odd { OddChipPolicy::BigBlind } else { OddChipPolicy::Button };
        let cfg = MatchConfig::default()
            .with_rounds(40)
            .with_stack(stack.max(big_blind))
            .with_blinds(small_blind, big_blind)
            .with_seed(seed)
            .with_odd_chip(policy);
        let total = 2 * cfg.starting_stack;

        let mut env = PokerEnv::new();
        env.reset(cfg).unwrap();
        let mut bots = [RandomBot::new(Some(seed ^ 1)), RandomBot::new(Some(seed ^ 2))];
        let mut net = [0i64; 2];
        while let Some(seat) = env.to_act() {
            let snap = env.snapshot().unwrap();
            let contributed: u64 = snap.players.iter().map(|p| p.contributed()).sum();
            prop_assert_eq!(snap.pot, contributed);
            let on_table: u64 = snap.players.iter().map(|p| p.stack()).sum::<u64>() + snap.pot;
            prop_assert_eq!(on_table, total);

            let obs = env.observe(seat).unwrap();
            let action = bots[seat].act(&obs);
            prop_assert!(obs.legal_actions.allows(action));
            let step = env.step(action).unwrap();
            if let Some(outcome) = step.info.last_outcome.as_ref() {
                prop_assert_eq!(outcome.payoffs[0] + outcome.payoffs[1], 0);
            }
            net[0] += step.rewards[0];
            net[1] += step.rewards[1];
        }
        prop_assert_eq!(env.stacks().iter().sum::<u64>(), total);
        prop_assert_eq!(net[0] + net[1], 0);
    }

    #[test]
    fn runner_conserves_chips(seed in any::<u64>(), a in any_kind(), b in any_kind()) {
        let mut runner = MatchRunner::new(make_bot(a, Some(seed)), make_bot(b, Some(seed ^ 7)));
        let summary = runner.run(MatchConfig::default().with_rounds(30).with_stack(100).with_seed(seed)).unwrap();
        prop_assert_eq!(summary.final_stacks.iter().sum::<u64>(), 200);
        prop_assert_eq!(summary.totals[0] + summary.totals[1], 0);
        prop_assert_eq!(summary.illegal_actions, [0, 0]);
        prop_assert!(summary.hands_played <= 30);
    }
}
