//! Standard 52-card deck.

use std::fmt;

/// Card suit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    fn symbol(self) -> &'static str {
        match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
        }
    }
}

/// A playing card. Rank 1 is the ace, 11-13 are jack, queen, king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    rank: u8,
    suit: Suit,
}

impl Card {
    /// # Panics
    ///
    /// If `rank` is outside `1..=13`. Use [`Card::try_new`] for unchecked input.
    pub fn new(rank: u8, suit: Suit) -> Self {
        match Self::try_new(rank, suit) {
            Some(card) => card,
            None => panic!("rank must be 1..=13, got {rank}"),
        }
    }

    /// Build a card, or `None` if `rank` is outside `1..=13`.
    pub fn try_new(rank: u8, suit: Suit) -> Option<Self> {
        (1..=13).contains(&rank).then_some(Self { rank, suit })
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Face label: A, 2-10, J, Q, K
    pub fn face(&self) -> String {
        match self.rank {
            1 => "A".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            r => r.to_string(),
        }
    }

    /// All 52 cards, suit by suit.
    pub fn full_deck() -> Vec<Card> {
        Suit::ALL
            .iter()
            .flat_map(|&suit| (1..=13).map(move |rank| Card::new(rank, suit)))
            .collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face(), self.suit.symbol())
    }
}

/// Render a run of cards as `[A♠, 10♥]`.
pub fn format_cards(cards: &[Card]) -> String {
    let parts: Vec<String> = cards.iter().map(Card::to_string).collect();
    format!("[{}]", parts.join(", "))
}
