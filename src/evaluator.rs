//! Hand strength evaluation.
//!
//! [`evaluate`] picks the best five-card hand out of two hole cards plus any
//! number of board cards (0..=5). With fewer than five cards in total only
//! rank-group categories can form; straights and flushes need five cards.

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::Pair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Totally ordered hand strength. Higher is better; equal values split.
///
/// Packed as `[category (8) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6)]`
/// from the most significant end, `r0` being the primary tiebreaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandRank(u64);

impl HandRank {
    const CAT_SHIFT: u32 = 48;
    const RANK_STRIDE: u32 = 6;

    fn from_parts(category: Category, tiebreak: &[Rank]) -> Self {
        let mut v = (category as u64) << Self::CAT_SHIFT;
        for (i, r) in tiebreak.iter().take(5).enumerate() {
            let offset = Self::CAT_SHIFT - Self::RANK_STRIDE * (i as u32 + 1);
            v |= (r.value() as u64) << offset;
        }
        HandRank(v)
    }

    pub fn category(self) -> Category {
        match self.0 >> Self::CAT_SHIFT {
            0 => Category::HighCard,
            1 => Category::Pair,
            2 => Category::TwoPair,
            3 => Category::ThreeOfAKind,
            4 => Category::Straight,
            5 => Category::Flush,
            6 => Category::FullHouse,
            7 => Category::FourOfAKind,
            _ => Category::StraightFlush,
        }
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category())
    }
}

/// Who takes the pot when two hands are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShowdownResult {
    Seat0,
    Seat1,
    Split,
}

impl ShowdownResult {
    pub fn winner(self) -> Option<usize> {
        match self {
            ShowdownResult::Seat0 => Some(0),
            ShowdownResult::Seat1 => Some(1),
            ShowdownResult::Split => None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
}

/// Evaluate two hole cards against a board of 0..=5 cards.
///
/// ```
/// use holdem_arena::evaluator::{evaluate, Category};
///
/// let hole = "As Ah".parse().unwrap();
/// let board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// assert_eq!(evaluate(&hole, &board).unwrap().category(), Category::Pair);
/// ```
pub fn evaluate(hole: &HoleCards, board: &Board) -> Result<HandRank, EvalError> {
    validate_holdem(hole, board)?;
    let mut cards = Vec::with_capacity(7);
    cards.extend_from_slice(&hole.cards());
    cards.extend_from_slice(board.as_slice());
    Ok(evaluate_cards(&cards))
}

/// Compare two players' hands on a shared board.
pub fn compare(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<ShowdownResult, EvalError> {
    let ra = evaluate(a, board)?;
    let rb = evaluate(b, board)?;
    Ok(match ra.cmp(&rb) {
        std::cmp::Ordering::Greater => ShowdownResult::Seat0,
        std::cmp::Ordering::Less => ShowdownResult::Seat1,
        std::cmp::Ordering::Equal => ShowdownResult::Split,
    })
}

/// Best hand out of any number of cards. Five or fewer cards are ranked as
/// they are; more are reduced by trying every five-card subset.
pub fn evaluate_cards(cards: &[Card]) -> HandRank {
    if cards.len() <= 5 {
        return Analysis::new(cards).rank();
    }
    let n = cards.len();
    let mut best: Option<HandRank> = None;
    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let rank = Analysis::new(&five).rank();
                        if best.map_or(true, |cur| rank > cur) {
                            best = Some(rank);
                        }
                    }
                }
            }
        }
    }
    best.unwrap_or_else(|| Analysis::new(&cards[..5]).rank())
}

pub fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    Analysis::new(cards).rank()
}

/// Rank-group and suit facts about at most five cards.
struct Analysis {
    /// (rank, count) sorted by count desc, then rank desc.
    groups: Vec<(Rank, u8)>,
    flush: bool,
    straight_top: Option<Rank>,
}

impl Analysis {
    fn new(cards: &[Card]) -> Self {
        debug_assert!(cards.len() <= 5);
        let mut counts = [0u8; 15];
        for c in cards {
            counts[c.rank().value() as usize] += 1;
        }
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .rev()
            .filter(|r| counts[r.value() as usize] > 0)
            .map(|&r| (r, counts[r.value() as usize]))
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        let five = cards.len() == 5;
        let flush = five && cards.iter().all(|c| c.suit() == cards[0].suit());
        let straight_top = if five && groups.len() == 5 { straight_top(&groups) } else { None };
        Self { groups, flush, straight_top }
    }

    fn rank(&self) -> HandRank {
        if let Some(top) = self.straight_top {
            let cat = if self.flush { Category::StraightFlush } else { Category::Straight };
            return HandRank::from_parts(cat, &[top]);
        }
        let first = self.groups.first().map_or(0, |g| g.1);
        let second = self.groups.get(1).map_or(0, |g| g.1);
        let category = match (first, second) {
            (4, _) => Category::FourOfAKind,
            (3, 2) => Category::FullHouse,
            _ if self.flush => Category::Flush,
            (3, _) => Category::ThreeOfAKind,
            (2, 2) => Category::TwoPair,
            (2, _) => Category::Pair,
            _ => Category::HighCard,
        };
        // Group order already encodes tiebreak significance for every
        // non-straight category.
        let tiebreak: Vec<Rank> = self.groups.iter().map(|g| g.0).collect();
        HandRank::from_parts(category, &tiebreak)
    }
}

/// Top rank of five distinct ranks forming a straight. The wheel tops at Five.
fn straight_top(groups: &[(Rank, u8)]) -> Option<Rank> {
    let mut vals: Vec<u8> = groups.iter().map(|g| g.0.value()).collect();
    vals.sort_unstable();
    if vals == [2, 3, 4, 5, 14] {
        return Some(Rank::Five);
    }
    if vals.windows(2).all(|w| w[1] == w[0] + 1) {
        return Rank::from_value(vals[4]);
    }
    None
}
