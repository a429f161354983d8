//! TicTacToe game implementation for the playout engine
//!
//! The reference two-player game: X (`Player(0)`) opens, O (`Player(1)`)
//! replies, three in a row wins and a full board without a line is a draw.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, Outcome, Player};
//! use games_tictactoe::{Action, TicTacToe};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = TicTacToe::new();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let mut state = game.start(&mut rng);
//! for pos in [0, 3, 1, 4, 2] {
//!     state = game.apply(&state, &Action::Place(pos), &mut rng).unwrap();
//! }
//! assert_eq!(game.outcome(&state), Outcome::Winner(Player(0)));
//! ```

use std::fmt;

use engine_core::game_utils::outcome_from_winner;
use engine_core::{Game, GameError, GameMetadata, Outcome, Player, RewardConvention};
use rand_chacha::ChaCha20Rng;

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// current player, and winner information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Current player: 1=X, 2=O
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: 1, // X goes first
            winner: 0,
        }
    }

    /// Build a position from a 9-character diagram (`X`, `O`, `.`), row by row.
    ///
    /// The side to move is inferred from piece counts.
    pub fn from_diagram(diagram: &str) -> Result<Self, GameError> {
        let cells: Vec<char> = diagram.chars().filter(|c| !c.is_whitespace()).collect();
        if cells.len() != 9 {
            return Err(GameError::InvalidState(format!(
                "expected 9 cells, got {}",
                cells.len()
            )));
        }

        let mut board = [0u8; 9];
        for (slot, c) in board.iter_mut().zip(cells) {
            *slot = match c {
                'X' | 'x' => 1,
                'O' | 'o' => 2,
                '.' | '_' | '-' => 0,
                other => {
                    return Err(GameError::InvalidState(format!("unknown cell '{other}'")))
                }
            };
        }

        let xs = board.iter().filter(|&&c| c == 1).count();
        let os = board.iter().filter(|&&c| c == 2).count();
        if xs != os && xs != os + 1 {
            return Err(GameError::InvalidState(format!(
                "unreachable piece counts: {xs} X, {os} O"
            )));
        }

        Ok(Self {
            board,
            current_player: if xs == os { 1 } else { 2 },
            winner: Self::check_winner(&board),
        })
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Board cells: 0=empty, 1=X, 2=O
    pub fn board(&self) -> &[u8; 9] {
        &self.board
    }

    /// The player to move
    pub fn current_player(&self) -> Player {
        Player(self.current_player - 1)
    }

    /// The winning player, if any
    pub fn winner(&self) -> Option<Player> {
        match self.winner {
            1 | 2 => Some(Player(self.winner - 1)),
            _ => None,
        }
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Make a move and return the new state
    pub fn make_move(&self, position: u8) -> Result<State, GameError> {
        let action = Action::Place(position);
        if self.is_done() {
            return Err(GameError::illegal(action, "game is over"));
        }
        if position >= 9 {
            return Err(GameError::illegal(action, "position out of range"));
        }
        if self.board[position as usize] != 0 {
            return Err(GameError::illegal(action, "cell is occupied"));
        }

        let mut new_state = *self;
        new_state.board[position as usize] = self.current_player;

        // Check for winner
        new_state.winner = Self::check_winner(&new_state.board);

        // Switch player if game not over
        if new_state.winner == 0 {
            new_state.current_player = if self.current_player == 1 { 2 } else { 1 };
        }

        Ok(new_state)
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; 9]) -> u8 {
        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return board[a]; // Return the winning player
            }
        }

        // Check for draw (board full but no winner)
        if board.iter().all(|&cell| cell != 0) {
            return 3; // Draw
        }

        0 // Game ongoing
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let cells: Vec<&str> = self.board[row * 3..row * 3 + 3]
                .iter()
                .map(|&c| match c {
                    1 => "X",
                    2 => "O",
                    _ => ".",
                })
                .collect();
            writeln!(f, " {}", cells.join(" | "))?;
        }
        Ok(())
    }
}

/// TicTacToe action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Place a piece at the given position (0-8)
    Place(u8),
}

impl Action {
    /// Get the position for this action
    pub fn position(&self) -> u8 {
        match self {
            Action::Place(pos) => *pos,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self.position();
        write!(f, "cell {} (row {}, col {})", pos, pos / 3, pos % 3)
    }
}

/// TicTacToe game implementation
#[derive(Debug, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Create a new TicTacToe game
    pub fn new() -> Self {
        Self
    }
}

impl Game for TicTacToe {
    type State = State;
    type Action = Action;

    fn metadata(&self) -> GameMetadata {
        GameMetadata::new("tictactoe", "Tic-Tac-Toe")
            .with_players(
                2,
                vec!["X".to_string(), "O".to_string()],
                vec!['X', 'O'],
            )
            .with_convention(RewardConvention::WinLossDraw)
            .with_description("Get three in a row to win!")
    }

    fn reward_convention(&self) -> RewardConvention {
        RewardConvention::WinLossDraw
    }

    fn opener(&self) -> Player {
        Player(0)
    }

    fn start(&self, _rng: &mut ChaCha20Rng) -> State {
        State::new()
    }

    fn to_move(&self, state: &State) -> Player {
        state.current_player()
    }

    fn legal_actions(&self, state: &State, player: Player) -> Vec<Action> {
        if player != state.current_player() {
            return Vec::new();
        }
        state.legal_moves().into_iter().map(Action::Place).collect()
    }

    fn apply(
        &self,
        state: &State,
        action: &Action,
        _rng: &mut ChaCha20Rng,
    ) -> Result<State, GameError> {
        state.make_move(action.position())
    }

    fn is_terminal(&self, state: &State) -> bool {
        state.is_done()
    }

    fn outcome(&self, state: &State) -> Outcome {
        outcome_from_winner(state.winner())
    }
}
