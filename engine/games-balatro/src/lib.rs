//! Mini-Balatro: a single-player poker scoring game
//!
//! The player holds eight cards and has five plays and three discards. A play
//! scores the poker hand formed by one to five cards; a discard throws away
//! up to three cards without scoring. Both refill the hand from the deck. The
//! game ends when the plays run out and the accumulated score is the result.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, Outcome};
//! use games_balatro::Balatro;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = Balatro::new();
//! let mut rng = ChaCha20Rng::seed_from_u64(3);
//! let mut state = game.start(&mut rng);
//! while !game.is_terminal(&state) {
//!     let first = game.legal_actions_to_move(&state).remove(0);
//!     state = game.apply(&state, &first, &mut rng).unwrap();
//! }
//! assert!(matches!(game.outcome(&state), Outcome::Score(s) if s > 0));
//! ```

pub mod card;
pub mod scoring;

use std::fmt;

use engine_core::game_utils::{draw_many, index_combinations, shuffle};
use engine_core::{Game, GameError, GameMetadata, Outcome, Player, RewardConvention};
use rand_chacha::ChaCha20Rng;

pub use card::{format_cards, Card, Suit};
pub use scoring::{score_hand, HandRank, HandScore};

/// Cards dealt at the start
pub const HAND_SIZE: usize = 8;
/// Most cards in one play
pub const MAX_PLAY: usize = 5;
/// Most cards in one discard
pub const MAX_DISCARD: usize = 3;
pub const STARTING_PLAYS: u8 = 5;
pub const STARTING_DISCARDS: u8 = 3;

const SOLO: Player = Player(0);

/// Mini-Balatro game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    hand: Vec<Card>,
    /// Cards played so far, in play order
    table: Vec<Card>,
    deck: Vec<Card>,
    remaining_plays: u8,
    remaining_discards: u8,
    score: i64,
}

impl State {
    /// Build a position directly (score starts at zero).
    pub fn with_hand(hand: Vec<Card>, deck: Vec<Card>, plays: u8, discards: u8) -> Self {
        Self {
            hand,
            table: Vec::new(),
            deck,
            remaining_plays: plays,
            remaining_discards: discards,
            score: 0,
        }
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn table(&self) -> &[Card] {
        &self.table
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn remaining_plays(&self) -> u8 {
        self.remaining_plays
    }

    pub fn remaining_discards(&self) -> u8 {
        self.remaining_discards
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn is_done(&self) -> bool {
        self.remaining_plays == 0 || self.hand.is_empty()
    }

    /// Remove `cards` from the hand, keeping the order of the rest.
    fn take_from_hand(&mut self, cards: &[Card]) {
        self.hand.retain(|c| !cards.contains(c));
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cards in hand: {}", format_cards(&self.hand))?;
        writeln!(f, "Remaining plays: {}", self.remaining_plays)?;
        writeln!(f, "Remaining discards: {}", self.remaining_discards)?;
        write!(f, "Accumulated score: {}", self.score)
    }
}

/// Mini-Balatro action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Score these cards as a poker hand
    Play(Vec<Card>),
    /// Throw these cards away and redraw
    Discard(Vec<Card>),
}

impl Action {
    pub fn cards(&self) -> &[Card] {
        match self {
            Action::Play(cards) | Action::Discard(cards) => cards,
        }
    }

    pub fn is_play(&self) -> bool {
        matches!(self, Action::Play(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Play(cards) => write!(f, "PLAY {}", format_cards(cards)),
            Action::Discard(cards) => write!(f, "DISCARD {}", format_cards(cards)),
        }
    }
}

/// Mini-Balatro game implementation
#[derive(Debug, Default)]
pub struct Balatro;

impl Balatro {
    pub fn new() -> Self {
        Self
    }

    fn validate(state: &State, action: &Action) -> Result<(), GameError> {
        if state.is_done() {
            return Err(GameError::illegal(action, "no plays remaining"));
        }

        let (limit, left, what) = match action {
            Action::Play(_) => (MAX_PLAY, state.remaining_plays, "plays"),
            Action::Discard(_) => (MAX_DISCARD, state.remaining_discards, "discards"),
        };
        let cards = action.cards();

        if left == 0 {
            return Err(GameError::illegal(action, format!("no {what} remaining")));
        }
        if cards.is_empty() || cards.len() > limit {
            return Err(GameError::illegal(
                action,
                format!("must use 1 to {limit} cards"),
            ));
        }
        for (i, card) in cards.iter().enumerate() {
            if !state.hand.contains(card) {
                return Err(GameError::illegal(action, format!("{card} is not in hand")));
            }
            if cards[..i].contains(card) {
                return Err(GameError::illegal(action, format!("{card} used twice")));
            }
        }
        Ok(())
    }

    /// Every subset of the hand with 1..=`max` cards, in hand order.
    fn subsets(hand: &[Card], max: usize) -> impl Iterator<Item = Vec<Card>> + '_ {
        index_combinations(hand.len(), 1, max)
            .into_iter()
            .map(move |idx| idx.into_iter().map(|i| hand[i]).collect())
    }
}

impl Game for Balatro {
    type State = State;
    type Action = Action;

    fn metadata(&self) -> GameMetadata {
        GameMetadata::new("balatro", "Mini Balatro")
            .with_players(1, vec!["Player".to_string()], vec!['P'])
            .with_convention(RewardConvention::CumulativeScore)
            .with_description("Play poker hands from an eight-card hand to score as many points as possible")
    }

    fn reward_convention(&self) -> RewardConvention {
        RewardConvention::CumulativeScore
    }

    fn opener(&self) -> Player {
        SOLO
    }

    fn start(&self, rng: &mut ChaCha20Rng) -> State {
        let mut deck = Card::full_deck();
        shuffle(&mut deck, rng);
        let hand = draw_many(&mut deck, HAND_SIZE, rng);
        State::with_hand(hand, deck, STARTING_PLAYS, STARTING_DISCARDS)
    }

    fn to_move(&self, _state: &State) -> Player {
        SOLO
    }

    fn legal_actions(&self, state: &State, player: Player) -> Vec<Action> {
        if player != SOLO || state.is_done() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        if state.remaining_plays > 0 {
            actions.extend(Self::subsets(&state.hand, MAX_PLAY).map(Action::Play));
        }
        if state.remaining_discards > 0 {
            actions.extend(Self::subsets(&state.hand, MAX_DISCARD).map(Action::Discard));
        }
        actions
    }

    fn apply(
        &self,
        state: &State,
        action: &Action,
        rng: &mut ChaCha20Rng,
    ) -> Result<State, GameError> {
        Self::validate(state, action)?;

        let mut next = state.clone();
        let cards = action.cards();
        next.take_from_hand(cards);

        match action {
            Action::Play(_) => {
                next.table.extend_from_slice(cards);
                next.remaining_plays -= 1;
                next.score += i64::from(score_hand(cards).points);
            }
            Action::Discard(_) => {
                next.remaining_discards -= 1;
            }
        }

        let refill = draw_many(&mut next.deck, cards.len(), rng);
        next.hand.extend(refill);
        Ok(next)
    }

    fn is_terminal(&self, state: &State) -> bool {
        state.is_done()
    }

    fn outcome(&self, state: &State) -> Outcome {
        Outcome::Score(state.score)
    }
}

#[cfg(test)]
mod tests;
