use crate::cards::{Card, Rank, Suit};
use crate::error::EngineError;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A standard 52-card deck. Cards leave from the top and never come back.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The 52 cards in suit-major, rank-ascending order (unshuffled).
    ///
    /// ```
    /// use holdem_arena::deck::Deck;
    ///
    /// assert_eq!(Deck::ordered().len(), 52);
    /// ```
    pub fn ordered() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
            .collect();
        Self { cards }
    }

    /// A uniformly shuffled deck. With `Some(seed)` the permutation is
    /// reproducible; with `None` the seed comes from the thread RNG.
    pub fn new_shuffled(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::shuffled_with(&mut rng)
    }

    /// A shuffled deck drawn from a caller-owned generator.
    pub fn shuffled_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::ordered();
        deck.cards.shuffle(rng);
        deck
    }

    /// A deck that deals `top_first` in order before anything else.
    ///
    /// The remaining cards follow in [`Deck::ordered`] order. Duplicates in
    /// `top_first` are ignored after their first occurrence.
    pub fn stacked(top_first: &[Card]) -> Self {
        let mut rest: Vec<Card> =
            Self::ordered().cards.into_iter().filter(|c| !top_first.contains(c)).collect();
        let mut seen = Vec::with_capacity(top_first.len());
        for &c in top_first {
            if !seen.contains(&c) {
                seen.push(c);
            }
        }
        // `deal` pops from the end, so the first card to deal sits last.
        rest.reverse();
        let mut cards = rest;
        cards.extend(seen.into_iter().rev());
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove and return the top `n` cards.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if n > self.cards.len() {
            return Err(EngineError::DeckExhausted { requested: n, remaining: self.cards.len() });
        }
        Ok((0..n).filter_map(|_| self.cards.pop()).collect())
    }

    /// Look at the remaining cards without dealing them (top card last).
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }
}
