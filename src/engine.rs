//! Match engine: round and match lifecycle, move legality, and scoring.

use crate::board::{Board, PlaceError, Player};
use crate::config::{MatchConfig, SettingsUpdate};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Round-win tallies for both players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Scores {
    /// Rounds won by X.
    pub x: u32,
    /// Rounds won by O.
    pub o: u32,
}

impl Scores {
    /// Returns the tally for `player`.
    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    fn bump(&mut self, player: Player) {
        match player {
            Player::X => self.x += 1,
            Player::O => self.o += 1,
        }
    }
}

/// Why a move was rejected. No state changes on any rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The round already ended in a win or a draw.
    #[display("round is already over")]
    RoundOver,
    /// The match already has a winner.
    #[display("match is already over")]
    MatchOver,
    /// Index is outside the 0-8 range.
    #[display("index out of range (must be 0-8)")]
    OutOfRange,
    /// Target square is occupied.
    #[display("square is already occupied")]
    SquareOccupied,
}

impl From<PlaceError> for MoveError {
    fn from(err: PlaceError) -> Self {
        match err {
            PlaceError::OutOfBounds => MoveError::OutOfRange,
            PlaceError::Occupied => MoveError::SquareOccupied,
        }
    }
}

/// What a successful move did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Round continues with the other player.
    Continued,
    /// The move completed a line and won the round.
    RoundWon(Player),
    /// The round win also reached the match target.
    MatchWon(Player),
    /// The move filled the board with no winner.
    Drawn,
}

/// Tic-tac-toe match engine.
///
/// Owns the round state (board, turn, outcome) and the match state
/// (scores, match winner) for one active game. Round state machine:
/// in progress until a win or draw, terminal until [`MatchEngine::reset_board`]
/// or [`MatchEngine::reset_match`]. Match state machine: open until a
/// score reaches the target, closed until [`MatchEngine::reset_match`].
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: MatchConfig,
    board: Board,
    current_player: Player,
    round_winner: Option<Player>,
    is_draw: bool,
    winning_line: Option<[usize; 3]>,
    last_move: Option<usize>,
    scores: Scores,
    match_winner: Option<Player>,
}

impl MatchEngine {
    /// Creates a fresh engine with the given configuration.
    #[instrument]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            board: Board::new(),
            current_player: config.starting_player,
            round_winner: None,
            is_draw: false,
            winning_line: None,
            last_move: None,
            scores: Scores::default(),
            match_winner: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the round winner, if the round is won.
    pub fn round_winner(&self) -> Option<Player> {
        self.round_winner
    }

    /// Checks whether the round ended in a draw.
    pub fn is_draw(&self) -> bool {
        self.is_draw
    }

    /// Returns the completed line of the round winner, if any.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.winning_line
    }

    /// Returns the index of the last successful move this round, if any.
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Returns the round-win tallies.
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// Returns the match winner, if the match is closed.
    pub fn match_winner(&self) -> Option<Player> {
        self.match_winner
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Round wins required to take the match under the current settings.
    pub fn match_target(&self) -> u32 {
        self.config.match_target()
    }

    /// Checks whether the round is terminal (won or drawn).
    pub fn round_over(&self) -> bool {
        self.round_winner.is_some() || self.is_draw
    }

    /// Checks whether the match is closed.
    pub fn match_over(&self) -> bool {
        self.match_winner.is_some()
    }

    /// Returns the empty positions in ascending index order.
    pub fn available_moves(&self) -> Vec<usize> {
        self.board.available_moves()
    }

    /// Clears the round state for a new round. The starting player
    /// comes from the configuration. Scores and the match winner are
    /// untouched.
    #[instrument(skip(self))]
    pub fn reset_board(&mut self) {
        self.board = Board::new();
        self.current_player = self.config.starting_player;
        self.round_winner = None;
        self.is_draw = false;
        self.winning_line = None;
        self.last_move = None;
    }

    /// Starts an entirely new match: fresh round, zeroed scores, no
    /// match winner.
    #[instrument(skip(self))]
    pub fn reset_match(&mut self) {
        self.reset_board();
        self.scores = Scores::default();
        self.match_winner = None;
    }

    /// Applies the provided settings fields; unset fields keep their
    /// previous values. Does not reset any state; callers that change
    /// settings are expected to also reset the match.
    #[instrument(skip(self))]
    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.config.update(update);
    }

    /// Attempts a move for the current player at `index`.
    ///
    /// On success the mark is placed and the round advances: the first
    /// line in canonical order completed by the mover wins the round
    /// (the mover keeps the turn), a full board draws it, otherwise the
    /// turn passes. A round win bumps the mover's score and closes the
    /// match when the score reaches the target.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] without mutating anything when the round
    /// or match is already over, the index is out of range, or the
    /// square is occupied.
    #[instrument(skip(self))]
    pub fn try_move(&mut self, index: usize) -> Result<MoveOutcome, MoveError> {
        if self.round_over() {
            return Err(MoveError::RoundOver);
        }
        if self.match_over() {
            return Err(MoveError::MatchOver);
        }
        if index >= 9 {
            return Err(MoveError::OutOfRange);
        }

        let player = self.current_player;
        self.board.place(index, player)?;
        self.last_move = Some(index);

        if let Some(line) = self.board.winning_line(player) {
            self.round_winner = Some(player);
            self.winning_line = Some(line);
            self.scores.bump(player);
            if self.scores.of(player) >= self.config.match_target() {
                self.match_winner = Some(player);
                return Ok(MoveOutcome::MatchWon(player));
            }
            return Ok(MoveOutcome::RoundWon(player));
        }

        if self.board.is_full() {
            self.is_draw = true;
            return Ok(MoveOutcome::Drawn);
        }

        self.current_player = player.opponent();
        Ok(MoveOutcome::Continued)
    }

    /// Attempts a move for the current player at `index`, reporting
    /// only success. See [`MatchEngine::try_move`] for the rules.
    pub fn make_move(&mut self, index: usize) -> bool {
        self.try_move(index).is_ok()
    }

    /// Replaces the score tallies and re-derives the match winner from
    /// them and the current target. A player already at or above the
    /// target is immediately the match winner, X checked first.
    ///
    /// Used by the settings loader when restoring a persisted match.
    #[instrument(skip(self))]
    pub fn restore_scores(&mut self, scores: Scores) {
        self.scores = scores;
        let target = self.config.match_target();
        self.match_winner = if self.scores.x >= target {
            Some(Player::X)
        } else if self.scores.o >= target {
            Some(Player::O)
        } else {
            None
        };
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}
