//! Blackjack against a fixed-rule dealer
//!
//! A single decision-maker game with chance: the player (`Player(0)`) hits or
//! stands; once they stand, the dealer (`Player(1)`) draws to 17 and the
//! hands are compared. The deck is an unordered multiset of ranks and every
//! draw picks a uniformly random remaining card from the caller's rng, so a
//! search cannot peek at upcoming cards.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Game;
//! use games_blackjack::{Action, Blackjack};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = Blackjack::new();
//! let mut rng = ChaCha20Rng::seed_from_u64(1);
//! let state = game.start(&mut rng);
//! let after = game.apply(&state, &Action::Stand, &mut rng).unwrap();
//! assert!(game.is_terminal(&after));
//! ```

use std::fmt;

use engine_core::game_utils::{draw_random, outcome_from_winner, shuffle};
use engine_core::{Game, GameError, GameMetadata, Outcome, Player, RewardConvention};
use rand_chacha::ChaCha20Rng;

/// Seat that makes decisions
pub const PLAYER: Player = Player(0);
/// Seat that follows the house rule
pub const DEALER: Player = Player(1);

/// Dealer keeps drawing below this total
pub const DEALER_STANDS_ON: u8 = 17;

const BLACKJACK: u8 = 21;

/// Best total for a hand: face cards count ten, an ace counts eleven when
/// that does not bust the hand.
pub fn hand_value(hand: &[u8]) -> u8 {
    let mut total: u32 = 0;
    let mut aces = 0;
    for &card in hand {
        total += u32::from(card.min(10));
        if card == 1 {
            aces += 1;
        }
    }
    while aces > 0 && total + 10 <= u32::from(BLACKJACK) {
        total += 10;
        aces -= 1;
    }
    total.min(u32::from(u8::MAX)) as u8
}

/// Blackjack game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    player_hand: Vec<u8>,
    dealer_hand: Vec<u8>,
    /// Remaining ranks (1..=13), order carries no meaning
    deck: Vec<u8>,
    turn: Player,
}

impl State {
    /// Build a position directly, with the player to act.
    pub fn with_hands(player_hand: Vec<u8>, dealer_hand: Vec<u8>, deck: Vec<u8>) -> Self {
        Self {
            player_hand,
            dealer_hand,
            deck,
            turn: PLAYER,
        }
    }

    pub fn player_hand(&self) -> &[u8] {
        &self.player_hand
    }

    pub fn dealer_hand(&self) -> &[u8] {
        &self.dealer_hand
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn player_total(&self) -> u8 {
        hand_value(&self.player_hand)
    }

    pub fn dealer_total(&self) -> u8 {
        hand_value(&self.dealer_hand)
    }

    /// Whose decision it is
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn is_done(&self) -> bool {
        self.player_total() > BLACKJACK || self.dealer_total() > BLACKJACK || self.turn == DEALER
    }

    /// Winner of a finished hand, `None` on a push or while still in play.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_done() {
            return None;
        }
        let player = self.player_total();
        let dealer = self.dealer_total();

        if player > BLACKJACK {
            return Some(DEALER);
        }
        if dealer > BLACKJACK {
            return Some(PLAYER);
        }
        match player.cmp(&dealer) {
            std::cmp::Ordering::Greater => Some(PLAYER),
            std::cmp::Ordering::Less => Some(DEALER),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player Hand: {} (Total: {}), Dealer Hand: {} (Total: {})",
            format_hand(&self.player_hand),
            self.player_total(),
            format_hand(&self.dealer_hand),
            self.dealer_total()
        )
    }
}

fn format_hand(hand: &[u8]) -> String {
    let cards: Vec<&str> = hand
        .iter()
        .map(|&c| match c {
            1 => "A",
            2 => "2",
            3 => "3",
            4 => "4",
            5 => "5",
            6 => "6",
            7 => "7",
            8 => "8",
            9 => "9",
            10 => "10",
            11 => "J",
            12 => "Q",
            13 => "K",
            _ => "?",
        })
        .collect();
    format!("[{}]", cards.join(", "))
}

/// Blackjack action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Hit,
    Stand,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Hit => write!(f, "HIT"),
            Action::Stand => write!(f, "STAND"),
        }
    }
}

/// Blackjack game implementation
#[derive(Debug, Default)]
pub struct Blackjack;

impl Blackjack {
    pub fn new() -> Self {
        Self
    }

    /// Four of each rank, ace through king.
    pub fn full_deck() -> Vec<u8> {
        (1..=13u8).flat_map(|rank| [rank; 4]).collect()
    }
}

impl Game for Blackjack {
    type State = State;
    type Action = Action;

    fn metadata(&self) -> GameMetadata {
        GameMetadata::new("blackjack", "Blackjack")
            .with_players(
                2,
                vec!["Player".to_string(), "Dealer".to_string()],
                vec!['P', 'D'],
            )
            .with_convention(RewardConvention::WinLossDraw)
            .with_description("Get closer to 21 than the dealer without going over")
    }

    fn reward_convention(&self) -> RewardConvention {
        RewardConvention::WinLossDraw
    }

    fn opener(&self) -> Player {
        PLAYER
    }

    fn start(&self, rng: &mut ChaCha20Rng) -> State {
        let mut deck = Self::full_deck();
        shuffle(&mut deck, rng);

        let mut player_hand = Vec::with_capacity(4);
        let mut dealer_hand = Vec::with_capacity(4);
        for seat in [PLAYER, PLAYER, DEALER, DEALER] {
            let hand = if seat == PLAYER {
                &mut player_hand
            } else {
                &mut dealer_hand
            };
            if let Some(card) = draw_random(&mut deck, rng) {
                hand.push(card);
            }
        }

        State::with_hands(player_hand, dealer_hand, deck)
    }

    fn to_move(&self, state: &State) -> Player {
        state.turn
    }

    fn legal_actions(&self, state: &State, player: Player) -> Vec<Action> {
        if player != PLAYER || state.is_done() {
            return Vec::new();
        }
        let mut actions = Vec::with_capacity(2);
        if state.player_total() < BLACKJACK {
            actions.push(Action::Hit);
        }
        actions.push(Action::Stand);
        actions
    }

    fn apply(
        &self,
        state: &State,
        action: &Action,
        rng: &mut ChaCha20Rng,
    ) -> Result<State, GameError> {
        if state.is_done() {
            return Err(GameError::illegal(action, "hand is over"));
        }

        let mut next = state.clone();
        match action {
            Action::Hit => {
                if state.player_total() >= BLACKJACK {
                    return Err(GameError::illegal(action, "player already has 21"));
                }
                if let Some(card) = draw_random(&mut next.deck, rng) {
                    next.player_hand.push(card);
                }
            }
            Action::Stand => {
                next.turn = DEALER;
                while next.dealer_total() < DEALER_STANDS_ON {
                    match draw_random(&mut next.deck, rng) {
                        Some(card) => next.dealer_hand.push(card),
                        None => break,
                    }
                }
            }
        }
        Ok(next)
    }

    fn is_terminal(&self, state: &State) -> bool {
        state.is_done()
    }

    fn outcome(&self, state: &State) -> Outcome {
        outcome_from_winner(state.winner())
    }
}
