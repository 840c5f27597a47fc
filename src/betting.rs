//! Single-street betting state machine for two seats.
//!
//! Amounts on [`Action::Raise`] are "raise to": the actor's total
//! contribution on the current street once the raise is in.

use crate::error::IllegalAction;
use crate::game::Player;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    /// Board cards dealt on entering the street that follows `self`.
    pub fn cards_on_advance(self) -> usize {
        match self {
            Street::Preflop => 3,
            Street::Flop | Street::Turn => 1,
            Street::River | Street::Showdown => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Fold,
    Check,
    Call,
    /// Total street contribution after the raise.
    Raise(u64),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => f.write_str("fold"),
            Action::Check => f.write_str("check"),
            Action::Call => f.write_str("call"),
            Action::Raise(to) => write!(f, "raise to {to}"),
        }
    }
}

/// What the seat to act may do right now.
///
/// `min_raise_to`/`max_raise_to` are meaningful only when `raise` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    pub fold: bool,
    pub check: bool,
    pub call: bool,
    pub raise: bool,
    pub to_call: u64,
    pub min_raise_to: u64,
    pub max_raise_to: u64,
}

impl LegalActions {
    /// The empty set, reported to a seat that is not on turn.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        !(self.fold || self.check || self.call || self.raise)
    }

    pub fn allows(&self, action: Action) -> bool {
        self.check_action(action).is_ok()
    }

    /// Name the first constraint `action` would break.
    pub fn check_action(&self, action: Action) -> Result<(), IllegalAction> {
        match action {
            Action::Fold if self.fold => Ok(()),
            Action::Fold => Err(IllegalAction::HandOver),
            Action::Check if self.check => Ok(()),
            Action::Check => Err(IllegalAction::CheckFacingBet { to_call: self.to_call }),
            Action::Call if self.call => Ok(()),
            Action::Call => Err(IllegalAction::NothingToCall),
            Action::Raise(_) if !self.raise => {
                Err(IllegalAction::RaiseNotAllowed { reason: "no raise is available" })
            }
            Action::Raise(to) if to < self.min_raise_to => {
                Err(IllegalAction::RaiseBelowMinimum { min: self.min_raise_to, got: to })
            }
            Action::Raise(to) if to > self.max_raise_to => {
                Err(IllegalAction::RaiseAboveMaximum { max: self.max_raise_to, got: to })
            }
            Action::Raise(_) => Ok(()),
        }
    }

    /// Every concrete action, with raises limited to the two bounds.
    pub fn enumerate(&self) -> Vec<Action> {
        let mut out = Vec::with_capacity(5);
        if self.fold {
            out.push(Action::Fold);
        }
        if self.check {
            out.push(Action::Check);
        }
        if self.call {
            out.push(Action::Call);
        }
        if self.raise {
            out.push(Action::Raise(self.min_raise_to));
            if self.max_raise_to != self.min_raise_to {
                out.push(Action::Raise(self.max_raise_to));
            }
        }
        out
    }
}

/// Effect of an accepted action on the street.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The other seat is to act.
    Continue,
    /// Both contributions are settled; deal the next street or run out.
    StreetClosed,
    /// The actor folded; `winner` takes the pot.
    Folded { winner: usize },
}

/// Chips actually moved by an accepted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub seat: usize,
    pub action: Action,
    /// Chips moved from stack to pot.
    pub paid: u64,
    /// Whether a raise was large enough to re-open action.
    pub full_raise: bool,
    pub progress: Progress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BettingRound {
    street: Street,
    actor: usize,
    min_increment: u64,
    high: u64,
    /// Per seat: acted since the last full raise.
    acted: [bool; 2],
}

impl BettingRound {
    /// A fresh street with nothing wagered yet.
    pub fn open(street: Street, first_actor: usize, min_increment: u64) -> Self {
        Self { street, actor: first_actor, min_increment, high: 0, acted: [false; 2] }
    }

    /// Preflop after blinds are in. Posting a blind is not an action.
    pub fn after_blinds(first_actor: usize, high: u64, big_blind: u64) -> Self {
        Self {
            street: Street::Preflop,
            actor: first_actor,
            min_increment: big_blind,
            high,
            acted: [false; 2],
        }
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn actor(&self) -> usize {
        self.actor
    }

    pub fn min_increment(&self) -> u64 {
        self.min_increment
    }

    /// Highest street contribution of either seat.
    pub fn high(&self) -> u64 {
        self.high
    }

    pub fn to_call(&self, players: &[Player; 2], seat: usize) -> u64 {
        self.high.saturating_sub(players[seat].street_bet)
    }

    pub fn legal_actions(&self, players: &[Player; 2]) -> LegalActions {
        let me = &players[self.actor];
        let opp = &players[1 - self.actor];
        if me.status != PlayerStatus::Active {
            return LegalActions::none();
        }
        let to_call = self.to_call(players, self.actor);
        let raise = me.stack > to_call && opp.stack > 0 && !self.acted[self.actor];
        let (min_raise_to, max_raise_to) = if raise {
            let max_to = me.street_bet + me.stack.min(opp.stack + to_call);
            (max_to.min(self.high + self.min_increment), max_to)
        } else {
            (0, 0)
        };
        LegalActions {
            fold: true,
            check: to_call == 0,
            call: to_call > 0,
            raise,
            to_call,
            min_raise_to,
            max_raise_to,
        }
    }

    /// Why a raise is unavailable, for error reporting.
    fn raise_block_reason(&self, players: &[Player; 2]) -> &'static str {
        let me = &players[self.actor];
        if self.acted[self.actor] {
            "action was not re-opened"
        } else if players[1 - self.actor].stack == 0 {
            "opponent is all-in"
        } else if me.stack <= self.to_call(players, self.actor) {
            "stack does not cover more than the call"
        } else {
            "no raise is available"
        }
    }

    /// Validate and apply `action` for `seat`. On error nothing changes.
    pub fn apply(
        &mut self,
        players: &mut [Player; 2],
        seat: usize,
        action: Action,
    ) -> Result<Applied, IllegalAction> {
        if seat != self.actor {
            return Err(IllegalAction::WrongActor { expected: self.actor, got: seat });
        }
        let legal = self.legal_actions(players);
        if legal.is_empty() {
            return Err(IllegalAction::HandOver);
        }
        match legal.check_action(action) {
            Err(IllegalAction::RaiseNotAllowed { .. }) => {
                return Err(IllegalAction::RaiseNotAllowed {
                    reason: self.raise_block_reason(players),
                });
            }
            other => other?,
        }

        let opp = 1 - seat;
        let mut paid = 0;
        let mut full_raise = false;
        match action {
            Action::Fold => {
                players[seat].status = PlayerStatus::Folded;
                self.acted[seat] = true;
                return Ok(Applied {
                    seat,
                    action,
                    paid,
                    full_raise,
                    progress: Progress::Folded { winner: opp },
                });
            }
            Action::Check => {}
            Action::Call => {
                paid = players[seat].commit(legal.to_call);
            }
            Action::Raise(to) => {
                let need = to - players[seat].street_bet;
                paid = players[seat].commit(need);
                let size = to - self.high;
                if size >= self.min_increment {
                    self.min_increment = size;
                    self.acted[opp] = false;
                    full_raise = true;
                }
                self.high = to;
            }
        }
        self.acted[seat] = true;

        let progress = if self.is_closed(players) {
            Progress::StreetClosed
        } else {
            self.actor = opp;
            Progress::Continue
        };
        Ok(Applied { seat, action, paid, full_raise, progress })
    }

    /// Every seat still able to act has acted and matched the high; a lone
    /// active seat only needs to match.
    pub fn is_closed(&self, players: &[Player; 2]) -> bool {
        let active: Vec<usize> =
            (0..2).filter(|&s| players[s].status == PlayerStatus::Active).collect();
        let matched = |s: usize| players[s].street_bet >= self.high;
        if active.len() <= 1 {
            return active.iter().all(|&s| matched(s));
        }
        active.iter().all(|&s| self.acted[s] && matched(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(stacks: [u64; 2], bets: [u64; 2]) -> [Player; 2] {
        let mut ps = [Player::seated(0, stacks[0]), Player::seated(1, stacks[1])];
        for (p, b) in ps.iter_mut().zip(bets) {
            p.commit(b);
        }
        ps
    }

    #[test]
    fn preflop_button_faces_the_big_blind() {
        let ps = seats([200, 200], [1, 2]);
        let round = BettingRound::after_blinds(0, 2, 2);
        let la = round.legal_actions(&ps);
        assert!(la.fold && la.call && la.raise && !la.check);
        assert_eq!(la.to_call, 1);
        assert_eq!((la.min_raise_to, la.max_raise_to), (4, 200));
        assert_eq!(la, round.legal_actions(&ps));
    }

    #[test]
    fn check_facing_bet_is_rejected_without_change() {
        let mut ps = seats([200, 200], [1, 2]);
        let mut round = BettingRound::after_blinds(0, 2, 2);
        let before = (round.clone(), ps.clone());
        let err = round.apply(&mut ps, 0, Action::Check).unwrap_err();
        assert_eq!(err, IllegalAction::CheckFacingBet { to_call: 1 });
        assert_eq!((round, ps), before);
    }

    #[test]
    fn short_raise_and_wrong_actor_are_rejected() {
        let mut ps = seats([200, 200], [1, 2]);
        let mut round = BettingRound::after_blinds(0, 2, 2);
        assert_eq!(
            round.apply(&mut ps, 0, Action::Raise(3)),
            Err(IllegalAction::RaiseBelowMinimum { min: 4, got: 3 })
        );
        assert_eq!(
            round.apply(&mut ps, 0, Action::Raise(201)),
            Err(IllegalAction::RaiseAboveMaximum { max: 200, got: 201 })
        );
        assert_eq!(
            round.apply(&mut ps, 1, Action::Call),
            Err(IllegalAction::WrongActor { expected: 0, got: 1 })
        );
    }

    #[test]
    fn limp_then_check_closes_preflop() {
        let mut ps = seats([200, 200], [1, 2]);
        let mut round = BettingRound::after_blinds(0, 2, 2);
        let a = round.apply(&mut ps, 0, Action::Call).unwrap();
        assert_eq!((a.paid, a.progress), (1, Progress::Continue));
        let la = round.legal_actions(&ps);
        assert!(la.check && la.raise, "big blind keeps the option");
        let b = round.apply(&mut ps, 1, Action::Check).unwrap();
        assert_eq!(b.progress, Progress::StreetClosed);
    }

    #[test]
    fn full_raise_reopens_and_sets_increment() {
        let mut ps = seats([200, 200], [0, 0]);
        let mut round = BettingRound::open(Street::Flop, 1, 2);
        round.apply(&mut ps, 1, Action::Check).unwrap();
        let a = round.apply(&mut ps, 0, Action::Raise(10)).unwrap();
        assert!(a.full_raise);
        assert_eq!(round.min_increment(), 10);
        let la = round.legal_actions(&ps);
        assert_eq!((la.to_call, la.min_raise_to), (10, 20));
        round.apply(&mut ps, 1, Action::Raise(30)).unwrap();
        assert!(round.legal_actions(&ps).raise, "re-raise re-opens for seat 0");
        assert_eq!(round.apply(&mut ps, 0, Action::Call).unwrap().progress, Progress::StreetClosed);
    }

    #[test]
    fn short_all_in_raise_does_not_reopen() {
        // Seat 1 has only 15 behind after a bet of 10 from seat 0.
        let mut ps = seats([200, 15], [0, 0]);
        let mut round = BettingRound::open(Street::Flop, 0, 2);
        round.apply(&mut ps, 0, Action::Raise(10)).unwrap();
        let la = round.legal_actions(&ps);
        assert_eq!((la.min_raise_to, la.max_raise_to), (15, 15));
        let a = round.apply(&mut ps, 1, Action::Raise(15)).unwrap();
        assert!(!a.full_raise);
        assert_eq!(ps[1].status, PlayerStatus::AllIn);
        let la = round.legal_actions(&ps);
        assert!(!la.raise && la.call && la.to_call == 5);
        assert_eq!(
            round.apply(&mut ps, 0, Action::Raise(40)),
            Err(IllegalAction::RaiseNotAllowed { reason: "action was not re-opened" })
        );
        assert_eq!(round.apply(&mut ps, 0, Action::Call).unwrap().progress, Progress::StreetClosed);
    }

    #[test]
    fn short_call_goes_all_in() {
        let mut ps = seats([200, 50], [0, 0]);
        let mut round = BettingRound::open(Street::Turn, 0, 2);
        // Raise bound caps at what the opponent can match.
        assert_eq!(round.legal_actions(&ps).max_raise_to, 50);
        round.apply(&mut ps, 0, Action::Raise(50)).unwrap();
        let a = round.apply(&mut ps, 1, Action::Call).unwrap();
        assert_eq!(a.paid, 50);
        assert_eq!(ps[1].status, PlayerStatus::AllIn);
        assert_eq!(a.progress, Progress::StreetClosed);
    }

    #[test]
    fn lone_active_seat_closes_once_matched() {
        let ps = {
            let mut ps = seats([1, 200], [1, 2]);
            ps[0].status = PlayerStatus::AllIn;
            ps
        };
        let round = BettingRound::after_blinds(0, 2, 2);
        assert!(round.is_closed(&ps));
    }

    #[test]
    fn fold_hands_the_pot_over() {
        let mut ps = seats([200, 200], [1, 2]);
        let mut round = BettingRound::after_blinds(0, 2, 2);
        let a = round.apply(&mut ps, 0, Action::Fold).unwrap();
        assert_eq!(a.progress, Progress::Folded { winner: 1 });
        assert_eq!(ps[0].status, PlayerStatus::Folded);
    }
}
