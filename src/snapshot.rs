//! Flat settings/score snapshot and the persistence port.
//!
//! The engine itself never touches durable storage. The controller owns
//! a [`SettingsStore`] (browser storage, a file, [`MemoryStore`] in
//! tests) and moves a [`Snapshot`] through it under [`SETTINGS_KEY`].
//! A payload that fails to parse is discarded wholesale: engine state
//! is only touched after a successful parse.

use crate::board::Player;
use crate::config::{MatchConfig, MatchType, SettingsUpdate, clamp_match_length};
use crate::engine::{MatchEngine, Scores};
use crate::policy::Strategy;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{instrument, warn};

/// Storage key for the settings snapshot.
pub const SETTINGS_KEY: &str = "tictactoe.settings";

/// Who controls the O side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpponentMode {
    /// Both sides are played by people.
    #[default]
    Human,
    /// O is played by the computer.
    Computer,
}

/// Flat settings/score record persisted between sessions.
///
/// Unknown fields in a stored payload are ignored; missing fields fall
/// back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    /// Who controls the O side.
    pub mode: OpponentMode,
    /// Strategy used when O is computer-controlled.
    pub difficulty: Strategy,
    /// Who takes the first move in each round.
    pub starting_player: Player,
    /// How the match-win target is derived.
    pub match_type: MatchType,
    /// Match length the target is derived from.
    pub match_length: u32,
    /// Persisted round-win tallies.
    pub winning_score: Scores,
}

impl Default for Snapshot {
    fn default() -> Self {
        let config = MatchConfig::default();
        Self {
            mode: OpponentMode::default(),
            difficulty: Strategy::default(),
            starting_player: config.starting_player,
            match_type: config.match_type,
            match_length: config.match_length,
            winning_score: Scores::default(),
        }
    }
}

impl Snapshot {
    /// Applies the snapshot to an engine: clamps the match length to
    /// the accepted range, applies the settings, starts a fresh match,
    /// then restores the persisted scores. A restored score already at
    /// or above the match target closes the match immediately.
    #[instrument(skip(engine))]
    pub fn apply(&self, engine: &mut MatchEngine) {
        engine.update_settings(SettingsUpdate {
            starting_player: Some(self.starting_player),
            match_type: Some(self.match_type),
            match_length: Some(clamp_match_length(self.match_length)),
        });
        engine.reset_match();
        engine.restore_scores(self.winning_score);
    }

    /// Captures the engine's settings and scores alongside the
    /// controller-owned `mode` and `difficulty`.
    pub fn capture(engine: &MatchEngine, mode: OpponentMode, difficulty: Strategy) -> Self {
        let config = engine.config();
        Self {
            mode,
            difficulty,
            starting_player: config.starting_player,
            match_type: config.match_type,
            match_length: config.match_length,
            winning_score: *engine.scores(),
        }
    }
}

/// Error from a settings store write.
#[derive(Debug, Display, Error)]
#[display("settings store rejected the write: {message}")]
pub struct StoreError {
    /// Store-specific failure description.
    pub message: String,
}

/// Errors from moving a snapshot through a store.
#[derive(Debug, Display, Error, From)]
pub enum SnapshotError {
    /// Payload did not parse as a snapshot.
    #[display("malformed settings payload: {_0}")]
    Parse(serde_json::Error),
    /// The store rejected the write.
    #[display("{_0}")]
    Store(StoreError),
}

/// Durable key-value storage, owned by the controller.
pub trait SettingsStore {
    /// Returns the raw value stored under `key`, if present.
    fn load(&self, key: &str) -> Option<String>;

    /// Persists `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backing storage refuses the
    /// write.
    fn save(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// In-memory [`SettingsStore`] for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Loads the snapshot stored under [`SETTINGS_KEY`].
///
/// An absent key or a malformed payload falls back entirely to
/// [`Snapshot::default`]; a malformed payload is logged and ignored.
#[instrument(skip(store))]
pub fn load_settings(store: &dyn SettingsStore) -> Snapshot {
    let Some(raw) = store.load(SETTINGS_KEY) else {
        return Snapshot::default();
    };
    match serde_json::from_str(&raw) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(%err, "ignoring malformed settings payload");
            Snapshot::default()
        }
    }
}

/// Serializes `snapshot` and writes it under [`SETTINGS_KEY`].
///
/// # Errors
///
/// Returns a [`SnapshotError`] when serialization fails or the store
/// rejects the write.
#[instrument(skip(store, snapshot))]
pub fn save_settings(
    store: &mut dyn SettingsStore,
    snapshot: &Snapshot,
) -> Result<(), SnapshotError> {
    let raw = serde_json::to_string(snapshot)?;
    store.save(SETTINGS_KEY, raw)?;
    Ok(())
}
