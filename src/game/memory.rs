// Level 1: memory match.
// Cards are dealt face down from a Fisher–Yates shuffle of every pair
// duplicated. At most two cards are face up at once; a third reveal is
// ignored until `settle()` resolves the pending pair.

use crate::rng::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryPair {
    pub id: u8,
    pub emoji: &'static str,
}

pub static PAIRS: [MemoryPair; 4] = [
    MemoryPair { id: 1, emoji: "🥰" },
    MemoryPair { id: 2, emoji: "🎂" },
    MemoryPair { id: 3, emoji: "💕" },
    MemoryPair { id: 4, emoji: "✨" },
];

pub const POINTS_PER_PAIR: u32 = 25;
/// Delay before a matching pair is marked as matched.
pub const MATCH_SETTLE_MS: u32 = 500;
/// Delay before a mismatched pair is turned back over.
pub const FLIP_BACK_MS: u32 = 1000;

/// Each pair twice, uniformly permuted.
pub fn deal(pairs: &[MemoryPair], rng: &mut impl Rng) -> Vec<MemoryPair> {
    let mut deck: Vec<MemoryPair> = pairs.iter().chain(pairs.iter()).copied().collect();
    rng.shuffle(&mut deck);
    deck
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Down,
    Up,
    Matched,
}

#[derive(Clone, Copy, Debug)]
pub struct Card {
    pub pair: MemoryPair,
    pub face: Face,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Reveal {
    /// Card was not playable or two cards are already up.
    Ignored,
    First,
    Match(usize, usize),
    Mismatch(usize, usize),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Settle {
    Nothing,
    Matched { a: usize, b: usize, complete: bool },
    FlippedBack { a: usize, b: usize },
}

pub struct MemoryRound {
    cards: Vec<Card>,
    up: Vec<usize>,
    total_pairs: usize,
    matched_pairs: usize,
}

impl MemoryRound {
    pub fn new(pairs: &[MemoryPair], rng: &mut impl Rng) -> Self {
        let cards = deal(pairs, rng)
            .into_iter()
            .map(|pair| Card {
                pair,
                face: Face::Down,
            })
            .collect();
        Self {
            cards,
            up: Vec::with_capacity(2),
            total_pairs: pairs.len(),
            matched_pairs: 0,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn total_pairs(&self) -> usize {
        self.total_pairs
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs
    }

    /// True while two cards are up and waiting for `settle()`.
    pub fn is_pending(&self) -> bool {
        self.up.len() >= 2
    }

    pub fn reveal(&mut self, index: usize) -> Reveal {
        if self.is_pending() {
            return Reveal::Ignored;
        }
        let Some(card) = self.cards.get_mut(index) else {
            return Reveal::Ignored;
        };
        if card.face != Face::Down {
            return Reveal::Ignored;
        }
        card.face = Face::Up;
        self.up.push(index);
        match self.up[..] {
            [a, b] if self.cards[a].pair.id == self.cards[b].pair.id => Reveal::Match(a, b),
            [a, b] => Reveal::Mismatch(a, b),
            _ => Reveal::First,
        }
    }

    pub fn settle(&mut self) -> Settle {
        let [a, b] = self.up[..] else {
            return Settle::Nothing;
        };
        self.up.clear();
        if self.cards[a].pair.id == self.cards[b].pair.id {
            self.cards[a].face = Face::Matched;
            self.cards[b].face = Face::Matched;
            self.matched_pairs += 1;
            Settle::Matched {
                a,
                b,
                complete: self.is_complete(),
            }
        } else {
            self.cards[a].face = Face::Down;
            self.cards[b].face = Face::Down;
            Settle::FlippedBack { a, b }
        }
    }

    /// Index of the other card sharing `index`'s pair.
    pub fn partner_of(&self, index: usize) -> Option<usize> {
        let id = self.cards.get(index)?.pair.id;
        self.cards
            .iter()
            .enumerate()
            .find(|(i, c)| *i != index && c.pair.id == id)
            .map(|(i, _)| i)
    }
}
