//! What a seat is allowed to see, and what a step reports back.

use crate::betting::Street;
use crate::game::{HandOutcome, HandState};
use crate::hand::{Board, HoleCards};
use serde::Serialize;

pub use crate::betting::LegalActions;

/// One seat's view of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub seat: usize,
    pub is_my_turn: bool,
    pub street: Street,
    pub hole_cards: Option<HoleCards>,
    pub board: Board,
    pub my_stack: u64,
    pub opp_stack: u64,
    /// Street contribution, own and opponent's.
    pub my_pip: u64,
    pub opp_pip: u64,
    pub pot: u64,
    pub to_call: u64,
    pub legal_actions: LegalActions,
    /// Chips won or lost over the match before this hand began.
    pub bankroll: i64,
    /// 1-based number of the hand this view belongs to.
    pub hand_number: u32,
    /// Set only when the hand just concluded at a showdown.
    pub opp_hole_cards: Option<HoleCards>,
}

impl Observation {
    /// Build the view of `seat` from a hand. Opponent cards appear only
    /// once the hand has been shown down.
    pub fn from_hand(hand: &HandState, seat: usize, starting_stack: u64) -> Self {
        let opp = 1 - seat;
        let me = hand.player(seat);
        let them = hand.player(opp);
        let opp_hole_cards =
            hand.outcome().and_then(|o| o.showdown.as_ref()).map(|s| s.holes[opp]);
        Self {
            seat,
            is_my_turn: hand.to_act() == Some(seat),
            street: hand.street(),
            hole_cards: me.hole(),
            board: hand.board().clone(),
            my_stack: me.stack(),
            opp_stack: them.stack(),
            my_pip: me.street_bet(),
            opp_pip: them.street_bet(),
            pot: hand.pot(),
            to_call: hand.to_call(seat),
            legal_actions: hand.legal_actions(seat),
            bankroll: hand.start_stacks()[seat] as i64 - starting_stack as i64,
            hand_number: hand.hand_number(),
            opp_hole_cards,
        }
    }
}

/// A hand that ended during a step, with each seat's last view of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcludedHand {
    pub outcome: HandOutcome,
    pub final_views: [Observation; 2],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepInfo {
    pub hands_played: u32,
    pub button: usize,
    pub last_outcome: Option<HandOutcome>,
    /// Every hand concluded by the step, oldest first. Several hands can end
    /// in one step when the blinds alone put a seat all-in.
    pub concluded: Vec<ConcludedHand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub observations: [Observation; 2],
    /// Chips won or lost by each seat in hands concluded during the step.
    pub rewards: [i64; 2],
    pub done: bool,
    /// Never set: the engine has no external time limit.
    pub truncated: bool,
    pub info: StepInfo,
}
