use super::*;
use crate::card::Suit::{Clubs, Diamonds, Hearts, Spades};
use rand::SeedableRng;

fn c(rank: u8, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn sample_state() -> State {
    State::with_hand(
        vec![
            c(7, Clubs),
            c(7, Hearts),
            c(2, Spades),
            c(9, Diamonds),
            c(11, Clubs),
            c(3, Hearts),
            c(13, Spades),
            c(5, Diamonds),
        ],
        vec![c(1, Spades), c(4, Clubs), c(6, Hearts), c(8, Diamonds), c(10, Hearts)],
        STARTING_PLAYS,
        STARTING_DISCARDS,
    )
}

#[test]
fn test_start_state() {
    let game = Balatro::new();
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let state = game.start(&mut rng);

    assert_eq!(state.hand().len(), HAND_SIZE);
    assert_eq!(state.deck_len(), 52 - HAND_SIZE);
    assert_eq!(state.remaining_plays(), STARTING_PLAYS);
    assert_eq!(state.remaining_discards(), STARTING_DISCARDS);
    assert_eq!(state.score(), 0);
    assert!(state.table().is_empty());
    assert!(!game.is_terminal(&state));
}

#[test]
fn test_legal_action_counts() {
    let game = Balatro::new();
    let state = sample_state();

    let actions = game.legal_actions(&state, Player(0));
    let plays = actions.iter().filter(|a| a.is_play()).count();
    let discards = actions.len() - plays;

    // C(8,1..=5) plays and C(8,1..=3) discards
    assert_eq!(plays, 218);
    assert_eq!(discards, 92);

    // Only seat 0 exists
    assert!(game.legal_actions(&state, Player(1)).is_empty());
}

#[test]
fn test_no_discards_left() {
    let game = Balatro::new();
    let mut state = sample_state();
    state.remaining_discards = 0;

    let actions = game.legal_actions_to_move(&state);
    assert!(actions.iter().all(Action::is_play));
    assert_eq!(actions.len(), 218);
}

#[test]
fn test_play_scores_and_refills() {
    let game = Balatro::new();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let state = sample_state();

    let pair = Action::Play(vec![c(7, Clubs), c(7, Hearts)]);
    let next = game.apply(&state, &pair, &mut rng).unwrap();

    assert_eq!(next.score(), 5);
    assert_eq!(next.remaining_plays(), STARTING_PLAYS - 1);
    assert_eq!(next.remaining_discards(), STARTING_DISCARDS);
    assert_eq!(next.hand().len(), HAND_SIZE);
    assert_eq!(next.deck_len(), 3);
    assert_eq!(next.table(), &[c(7, Clubs), c(7, Hearts)]);
    assert!(!next.hand().contains(&c(7, Clubs)));
    // Remaining hand keeps its order ahead of the new cards
    assert_eq!(&next.hand()[..6], &state.hand()[2..]);
}

#[test]
fn test_discard_does_not_score() {
    let game = Balatro::new();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let state = sample_state();

    let discard = Action::Discard(vec![c(2, Spades), c(3, Hearts)]);
    let next = game.apply(&state, &discard, &mut rng).unwrap();

    assert_eq!(next.score(), 0);
    assert_eq!(next.remaining_plays(), STARTING_PLAYS);
    assert_eq!(next.remaining_discards(), STARTING_DISCARDS - 1);
    assert_eq!(next.hand().len(), HAND_SIZE);
    assert!(next.table().is_empty());
}

#[test]
fn test_illegal_actions() {
    let game = Balatro::new();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let state = sample_state();

    let not_held = Action::Play(vec![c(1, Hearts)]);
    assert!(matches!(
        game.apply(&state, &not_held, &mut rng),
        Err(GameError::IllegalTransition { .. })
    ));

    let twice = Action::Play(vec![c(7, Clubs), c(7, Clubs)]);
    assert!(game.apply(&state, &twice, &mut rng).is_err());

    let empty = Action::Discard(vec![]);
    assert!(game.apply(&state, &empty, &mut rng).is_err());

    let too_many = Action::Discard(state.hand()[..4].to_vec());
    assert!(game.apply(&state, &too_many, &mut rng).is_err());

    let mut no_discards = sample_state();
    no_discards.remaining_discards = 0;
    let err = game
        .apply(&no_discards, &Action::Discard(vec![c(2, Spades)]), &mut rng)
        .unwrap_err();
    assert!(err.to_string().contains("no discards remaining"));
}

#[test]
fn test_game_ends_after_last_play() {
    let game = Balatro::new();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let state = State::with_hand(vec![c(7, Clubs), c(7, Hearts), c(2, Spades)], vec![], 1, 3);

    let next = game
        .apply(&state, &Action::Play(vec![c(2, Spades)]), &mut rng)
        .unwrap();
    assert!(game.is_terminal(&next));
    assert_eq!(game.outcome(&next), Outcome::Score(1));
    assert!(game.legal_actions_to_move(&next).is_empty());
    assert!(game
        .apply(&next, &Action::Play(vec![c(7, Clubs)]), &mut rng)
        .is_err());
}

#[test]
fn test_empty_hand_is_terminal() {
    let game = Balatro::new();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let state = State::with_hand(vec![c(4, Diamonds)], vec![], 3, 0);

    let next = game
        .apply(&state, &Action::Play(vec![c(4, Diamonds)]), &mut rng)
        .unwrap();
    assert!(next.hand().is_empty());
    assert!(game.is_terminal(&next));
}

#[test]
fn test_random_games_score_monotonic() {
    use rand::Rng;

    let game = Balatro::new();
    for seed in 0..10 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut state = game.start(&mut rng);

        while !game.is_terminal(&state) {
            let legal = game.legal_actions_to_move(&state);
            let action = legal[rng.gen_range(0..legal.len())].clone();
            let next = game.apply(&state, &action, &mut rng).unwrap();

            if action.is_play() {
                assert!(next.score() > state.score(), "play must score (seed={})", seed);
            } else {
                assert_eq!(next.score(), state.score(), "discard must not score (seed={})", seed);
            }
            let cards = next.hand().len() + next.table().len() + next.deck_len();
            assert!(cards <= 52);
            state = next;
        }

        assert_eq!(state.remaining_plays(), 0);
    }
}

#[test]
fn test_display() {
    let state = State::with_hand(vec![c(1, Spades), c(10, Hearts)], vec![], 2, 1);
    assert_eq!(
        state.to_string(),
        "Cards in hand: [A♠, 10♥]\nRemaining plays: 2\nRemaining discards: 1\nAccumulated score: 0"
    );
    assert_eq!(
        Action::Discard(vec![c(12, Clubs)]).to_string(),
        "DISCARD [Q♣]"
    );
}
