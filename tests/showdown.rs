use holdem_arena::betting::Action;
use holdem_arena::cards::parse_cards;
use holdem_arena::config::OddChipPolicy;
use holdem_arena::deck::Deck;
use holdem_arena::evaluator::{Category, ShowdownResult};
use holdem_arena::game::{split_pot, HandParams, HandState};

fn params(odd_chip: OddChipPolicy) -> HandParams {
    HandParams { small_blind: 1, big_blind: 2, odd_chip }
}

/// Seat 0 hole, seat 1 hole, flop, turn, river.
fn hand(cards: &str, stacks: [u64; 2]) -> HandState {
    let deck = Deck::stacked(&parse_cards(cards).unwrap());
    HandState::start(params(OddChipPolicy::Button), 1, 0, stacks, deck).unwrap()
}

#[test]
fn better_hand_takes_the_pot() {
    let mut h = hand("Kc Kd 9c 8d Ks 7h 2c 3d 4h", [100, 100]);
    h.act(0, Action::Raise(10)).unwrap();
    h.act(1, Action::Call).unwrap();
    for _ in 0..3 {
        h.act(1, Action::Check).unwrap();
        h.act(0, Action::Check).unwrap();
    }
    let o = h.outcome().unwrap();
    assert_eq!(o.result, ShowdownResult::Seat0);
    assert_eq!(o.payoffs, [10, -10]);
    let shown = o.showdown.as_ref().unwrap();
    assert_eq!(shown.ranks[0].category(), Category::ThreeOfAKind);
    assert_eq!(shown.ranks[1].category(), Category::HighCard);
}

#[test]
fn covering_stack_risks_only_what_the_opponent_has() {
    let mut h = hand("7c 2d Ac Ad 9s Th 3c 4d Qh", [300, 80]);
    let max = h.legal_actions(0).max_raise_to;
    assert_eq!(max, 80, "raise is capped at what the opponent can call");
    h.act(0, Action::Raise(max)).unwrap();
    let o = h.act(1, Action::Call).unwrap().cloned().unwrap();
    assert_eq!(o.payoffs, [-80, 80]);
    assert_eq!(h.player(0).stack(), 220);
    assert_eq!(h.player(1).stack(), 160);
}

#[test]
fn short_all_in_raise_is_called_exactly() {
    // Seat 1 answers a flop bet of 40 by shoving its last 58.
    let mut h = hand("Ah Kh Qc Qd 2s 7d 9c 3h 4s", [200, 60]);
    h.act(0, Action::Call).unwrap();
    h.act(1, Action::Check).unwrap();
    h.act(1, Action::Check).unwrap();
    h.act(0, Action::Raise(40)).unwrap();
    let la = h.legal_actions(1);
    assert_eq!((la.min_raise_to, la.max_raise_to), (58, 58));
    h.act(1, Action::Raise(58)).unwrap();
    let o = h.act(0, Action::Call).unwrap().cloned().unwrap();
    assert_eq!(o.refund, None);
    assert_eq!(o.payoffs, [-60, 60]);
}

#[test]
fn tie_splits_evenly() {
    for policy in [OddChipPolicy::Button, OddChipPolicy::BigBlind] {
        let deck = Deck::stacked(&parse_cards("2c 3d 2h 3s Ac Kd Qh Js Tc").unwrap());
        let mut h = HandState::start(params(policy), 1, 1, [100, 100], deck).unwrap();
        h.act(1, Action::Raise(6)).unwrap();
        h.act(0, Action::Call).unwrap();
        for _ in 0..3 {
            h.act(0, Action::Check).unwrap();
            h.act(1, Action::Check).unwrap();
        }
        let o = h.outcome().unwrap();
        assert_eq!(o.result, ShowdownResult::Split);
        assert_eq!(o.payoffs, [0, 0]);
        assert_eq!([h.player(0).stack(), h.player(1).stack()], [100, 100]);
    }
}

#[test]
fn odd_chip_follows_policy_seat() {
    assert_eq!(split_pot(11, 0), [6, 5]);
    assert_eq!(split_pot(11, 1), [5, 6]);
    assert_eq!(split_pot(10, 1), [5, 5]);
}
