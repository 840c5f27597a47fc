//! Hand controller: one heads-up hand from blinds to payoff.
//!
//! The button posts the small blind and acts first preflop; the big blind
//! acts first on every later street. Hole cards are dealt to seat 0, then
//! seat 1, then the board follows street by street from the same deck.

use crate::betting::{Action, BettingRound, LegalActions, PlayerStatus, Progress, Street};
use crate::config::{MatchConfig, OddChipPolicy};
use crate::deck::Deck;
use crate::error::{EngineError, EngineResult, IllegalAction};
use crate::evaluator::{compare, evaluate, HandRank, ShowdownResult};
use crate::hand::{Board, HoleCards};
use serde::Serialize;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum HistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    RaiseTo,
    Refund,
    Win,
    Split,
}

impl HistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HistoryVerb::SmallBlind => "SB",
            HistoryVerb::BigBlind => "BB",
            HistoryVerb::Fold => "Fold",
            HistoryVerb::Check => "Check",
            HistoryVerb::Call => "Call",
            HistoryVerb::RaiseTo => "Raise to",
            HistoryVerb::Refund => "Uncalled",
            HistoryVerb::Win => "Win",
            HistoryVerb::Split => "Split",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub seat: usize,
    pub verb: HistoryVerb,
    pub amount: Option<u64>,
    pub street: Street,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub(crate) seat: usize,
    pub(crate) stack: u64,
    pub(crate) street_bet: u64,
    pub(crate) contributed: u64,
    pub(crate) status: PlayerStatus,
    pub(crate) hole: Option<HoleCards>,
}

impl Player {
    pub(crate) fn seated(seat: usize, stack: u64) -> Self {
        Self {
            seat,
            stack,
            street_bet: 0,
            contributed: 0,
            status: PlayerStatus::Active,
            hole: None,
        }
    }

    /// Move up to `amount` from stack to the pot. Returns what was paid.
    pub(crate) fn commit(&mut self, amount: u64) -> u64 {
        let pay = self.stack.min(amount);
        self.stack -= pay;
        self.street_bet += pay;
        self.contributed += pay;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        pay
    }

    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn stack(&self) -> u64 {
        self.stack
    }

    /// Contribution on the current street.
    pub fn street_bet(&self) -> u64 {
        self.street_bet
    }

    /// Contribution over the whole hand.
    pub fn contributed(&self) -> u64 {
        self.contributed
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }
}

/// Per-hand constants taken from the match configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandParams {
    pub small_blind: u64,
    pub big_blind: u64,
    pub odd_chip: OddChipPolicy,
}

impl From<&MatchConfig> for HandParams {
    fn from(cfg: &MatchConfig) -> Self {
        Self { small_blind: cfg.small_blind, big_blind: cfg.big_blind, odd_chip: cfg.odd_chip }
    }
}

/// Both hands as revealed at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowdownInfo {
    pub holes: [HoleCards; 2],
    pub ranks: [HandRank; 2],
    pub board: Board,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandOutcome {
    pub hand_number: u32,
    /// Net chip change per seat; always sums to zero.
    pub payoffs: [i64; 2],
    pub result: ShowdownResult,
    /// `None` when the hand ended on a fold.
    pub showdown: Option<ShowdownInfo>,
    /// Uncalled chips handed back before the pot was awarded.
    pub refund: Option<(usize, u64)>,
}

impl HandOutcome {
    pub fn folded(&self) -> bool {
        self.showdown.is_none()
    }
}

/// Read-only view of a hand for rendering or logging.
#[derive(Debug, Clone, Serialize)]
pub struct HandSnapshot {
    pub hand_number: u32,
    pub button: usize,
    pub street: Street,
    pub board: Board,
    pub pot: u64,
    pub players: [Player; 2],
    pub to_act: Option<usize>,
    pub history: Vec<HistoryEntry>,
    pub outcome: Option<HandOutcome>,
}

/// Divide a tied pot. The odd chip, if any, goes to `odd_seat`.
///
/// ```
/// use holdem_arena::game::split_pot;
///
/// assert_eq!(split_pot(9, 1), [4, 5]);
/// assert_eq!(split_pot(8, 0), [4, 4]);
/// ```
pub fn split_pot(amount: u64, odd_seat: usize) -> [u64; 2] {
    let half = amount / 2;
    let mut shares = [half, half];
    shares[odd_seat] += amount % 2;
    shares
}

#[derive(Debug, Clone)]
pub struct HandState {
    params: HandParams,
    hand_number: u32,
    button: usize,
    deck: Deck,
    board: Board,
    players: [Player; 2],
    pot: u64,
    round: BettingRound,
    street: Street,
    history: Vec<HistoryEntry>,
    start_stacks: [u64; 2],
    outcome: Option<HandOutcome>,
}

impl HandState {
    /// Deal a new hand from `deck`, post blinds, and run out the board at
    /// once if the blinds leave fewer than two seats able to act.
    pub fn start(
        params: HandParams,
        hand_number: u32,
        button: usize,
        stacks: [u64; 2],
        mut deck: Deck,
    ) -> EngineResult<Self> {
        if stacks.iter().any(|&s| s == 0) {
            return Err(EngineError::InvariantViolation(format!(
                "hand {hand_number} cannot start with an empty stack: {stacks:?}"
            )));
        }
        let mut players = [Player::seated(0, stacks[0]), Player::seated(1, stacks[1])];
        for p in &mut players {
            let cards = deck.deal(2)?;
            let hole = HoleCards::from_slice(&cards).map_err(|e| {
                EngineError::InvariantViolation(format!("dealt bad hole cards: {e}"))
            })?;
            p.hole = Some(hole);
        }

        let bb_seat = 1 - button;
        let sb_paid = players[button].commit(params.small_blind);
        let bb_paid = players[bb_seat].commit(params.big_blind);
        let round = BettingRound::after_blinds(button, sb_paid.max(bb_paid), params.big_blind);
        let mut hand = Self {
            params,
            hand_number,
            button,
            deck,
            board: Board::empty(),
            players,
            pot: sb_paid + bb_paid,
            round,
            street: Street::Preflop,
            history: Vec::with_capacity(16),
            start_stacks: stacks,
            outcome: None,
        };
        hand.record(button, HistoryVerb::SmallBlind, Some(sb_paid));
        hand.record(bb_seat, HistoryVerb::BigBlind, Some(bb_paid));
        debug!(hand = hand_number, button, sb = sb_paid, bb = bb_paid, "blinds posted");

        if hand.round.is_closed(&hand.players) {
            hand.advance()?;
        }
        Ok(hand)
    }

    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    pub fn button(&self) -> usize {
        self.button
    }

    pub fn big_blind_seat(&self) -> usize {
        1 - self.button
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> &Player {
        &self.players[seat]
    }

    pub fn start_stacks(&self) -> [u64; 2] {
        self.start_stacks
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_recent(&self, n: usize) -> &[HistoryEntry] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    pub fn outcome(&self) -> Option<&HandOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Seat whose action is awaited, or `None` once the hand is over.
    pub fn to_act(&self) -> Option<usize> {
        if self.is_over() {
            None
        } else {
            Some(self.round.actor())
        }
    }

    pub fn to_call(&self, seat: usize) -> u64 {
        if self.is_over() {
            return 0;
        }
        self.round.to_call(&self.players, seat)
    }

    /// Legal actions of `seat`; empty unless it is that seat's turn.
    pub fn legal_actions(&self, seat: usize) -> LegalActions {
        match self.to_act() {
            Some(actor) if actor == seat => self.round.legal_actions(&self.players),
            _ => LegalActions::none(),
        }
    }

    /// Apply `action` for `seat`. Returns the outcome when the action ends
    /// the hand. An illegal action leaves the hand untouched.
    pub fn act(&mut self, seat: usize, action: Action) -> EngineResult<Option<&HandOutcome>> {
        if self.is_over() {
            return Err(IllegalAction::HandOver.into());
        }
        let applied = self.round.apply(&mut self.players, seat, action)?;
        self.pot += applied.paid;
        let (verb, amount) = match action {
            Action::Fold => (HistoryVerb::Fold, None),
            Action::Check => (HistoryVerb::Check, None),
            Action::Call => (HistoryVerb::Call, Some(applied.paid)),
            Action::Raise(to) => (HistoryVerb::RaiseTo, Some(to)),
        };
        self.record(seat, verb, amount);
        debug!(
            hand = self.hand_number,
            seat,
            street = %self.street,
            action = %action,
            paid = applied.paid,
            pot = self.pot,
            "action"
        );
        self.verify_in_play()?;

        match applied.progress {
            Progress::Continue => {}
            Progress::Folded { winner } => self.conclude(winner_result(winner), None)?,
            Progress::StreetClosed => self.advance()?,
        }
        Ok(self.outcome.as_ref())
    }

    /// Deal streets until someone has to act or the hand reaches showdown.
    fn advance(&mut self) -> EngineResult<()> {
        loop {
            if self.street >= Street::River {
                return self.showdown();
            }
            let cards = self.deck.deal(self.street.cards_on_advance())?;
            self.board.extend(cards);
            self.street = self.street.next();
            for p in &mut self.players {
                p.street_bet = 0;
            }
            debug!(hand = self.hand_number, street = %self.street, board = %self.board, "street dealt");

            let can_act =
                self.players.iter().filter(|p| p.status == PlayerStatus::Active).count();
            if can_act >= 2 {
                self.round =
                    BettingRound::open(self.street, self.big_blind_seat(), self.params.big_blind);
                return Ok(());
            }
        }
    }

    fn showdown(&mut self) -> EngineResult<()> {
        self.street = Street::Showdown;
        let holes = [self.hole_of(0)?, self.hole_of(1)?];
        let ranks = [evaluate(&holes[0], &self.board)?, evaluate(&holes[1], &self.board)?];
        let result = compare(&holes[0], &holes[1], &self.board)?;
        let info = ShowdownInfo { holes, ranks, board: self.board.clone() };
        self.conclude(result, Some(info))
    }

    fn hole_of(&self, seat: usize) -> EngineResult<HoleCards> {
        self.players[seat].hole.ok_or_else(|| {
            EngineError::InvariantViolation(format!("seat {seat} reached showdown without cards"))
        })
    }

    /// Refund the uncalled part, award the contested pot, compute payoffs.
    fn conclude(
        &mut self,
        result: ShowdownResult,
        showdown: Option<ShowdownInfo>,
    ) -> EngineResult<()> {
        let c = [self.players[0].contributed, self.players[1].contributed];
        let matched = c[0].min(c[1]);
        let mut refund = None;
        for seat in 0..2 {
            let extra = c[seat] - matched;
            if extra > 0 {
                self.players[seat].stack += extra;
                self.pot -= extra;
                self.record(seat, HistoryVerb::Refund, Some(extra));
                refund = Some((seat, extra));
            }
        }

        let contested = self.pot;
        match result.winner() {
            Some(w) => {
                self.players[w].stack += contested;
                self.record(w, HistoryVerb::Win, Some(contested));
            }
            None => {
                let odd_seat = match self.params.odd_chip {
                    OddChipPolicy::Button => self.button,
                    OddChipPolicy::BigBlind => self.big_blind_seat(),
                };
                let shares = split_pot(contested, odd_seat);
                for (seat, share) in shares.into_iter().enumerate() {
                    self.players[seat].stack += share;
                    self.record(seat, HistoryVerb::Split, Some(share));
                }
            }
        }
        self.pot = 0;

        let payoffs = [
            self.players[0].stack as i64 - self.start_stacks[0] as i64,
            self.players[1].stack as i64 - self.start_stacks[1] as i64,
        ];
        if payoffs[0] + payoffs[1] != 0 {
            return Err(self.breach(format!("payoffs do not sum to zero: {payoffs:?}")));
        }
        info!(
            hand = self.hand_number,
            result = ?result,
            showdown = showdown.is_some(),
            payoff0 = payoffs[0],
            payoff1 = payoffs[1],
            "hand concluded"
        );
        self.outcome = Some(HandOutcome {
            hand_number: self.hand_number,
            payoffs,
            result,
            showdown,
            refund,
        });
        Ok(())
    }

    /// Pot equals contributions and no chips were created or lost.
    fn verify_in_play(&self) -> EngineResult<()> {
        let contributed: u64 = self.players.iter().map(|p| p.contributed).sum();
        if self.pot != contributed {
            return Err(self.breach(format!("pot {} != contributions {contributed}", self.pot)));
        }
        let on_table: u64 = self.players.iter().map(|p| p.stack).sum::<u64>() + self.pot;
        let total: u64 = self.start_stacks.iter().sum();
        if on_table != total {
            return Err(self.breach(format!("chips on table {on_table} != {total}")));
        }
        Ok(())
    }

    fn breach(&self, msg: String) -> EngineError {
        error!(hand = self.hand_number, %msg, "invariant violated");
        EngineError::InvariantViolation(msg)
    }

    fn record(&mut self, seat: usize, verb: HistoryVerb, amount: Option<u64>) {
        self.history.push(HistoryEntry { seat, verb, amount, street: self.street });
    }

    pub fn snapshot(&self) -> HandSnapshot {
        HandSnapshot {
            hand_number: self.hand_number,
            button: self.button,
            street: self.street,
            board: self.board.clone(),
            pot: self.pot,
            players: self.players.clone(),
            to_act: self.to_act(),
            history: self.history.clone(),
            outcome: self.outcome.clone(),
        }
    }
}

fn winner_result(seat: usize) -> ShowdownResult {
    if seat == 0 {
        ShowdownResult::Seat0
    } else {
        ShowdownResult::Seat1
    }
}
