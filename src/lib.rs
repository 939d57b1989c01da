//! Tic-tac-toe match engine with scored rounds and computer opponents.
//!
//! # Architecture
//!
//! - **Engine**: round and match lifecycle: move legality, win/draw
//!   detection, score aggregation against a configurable target
//! - **Policy**: move selection for a computer-controlled side
//!   (random, heuristic rule chain, or perfect-play search)
//! - **Snapshot**: flat settings/score record moved through a
//!   controller-owned persistence port
//!
//! The crate is a pure library: rendering, input wiring, and storage
//! backends live in the surrounding controller, which reads engine
//! state after every mutation and forwards moves in; computer moves
//! enter through the same path as human ones.
//!
//! # Example
//!
//! ```
//! use tictactoe_match::{MatchConfig, MatchEngine, MatchType, Player};
//!
//! let mut engine = MatchEngine::new(MatchConfig {
//!     starting_player: Player::X,
//!     match_type: MatchType::BestOf,
//!     match_length: 3,
//! });
//! assert_eq!(engine.match_target(), 2);
//! assert!(engine.make_move(4));
//! assert_eq!(engine.current_player(), Player::O);
//! assert!(!engine.make_move(4)); // occupied
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod config;
mod engine;
mod policy;
mod snapshot;

pub use board::{Board, CENTER, CORNERS, EDGES, PlaceError, Player, Square, WINNING_LINES};
pub use config::{
    MAX_MATCH_LENGTH, MIN_MATCH_LENGTH, MatchConfig, MatchType, SettingsUpdate,
    clamp_match_length,
};
pub use engine::{MatchEngine, MoveError, MoveOutcome, Scores};
pub use policy::{Strategy, select_move};
pub use snapshot::{
    MemoryStore, OpponentMode, SETTINGS_KEY, SettingsStore, Snapshot, SnapshotError, StoreError,
    load_settings, save_settings,
};
