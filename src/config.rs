//! Match configuration: win condition, length, and starting player.

use crate::board::Player;
use serde::{Deserialize, Serialize};

/// Smallest accepted match length.
pub const MIN_MATCH_LENGTH: u32 = 1;

/// Largest accepted match length.
pub const MAX_MATCH_LENGTH: u32 = 15;

/// Clamps a match length to the accepted `[1, 15]` range.
///
/// Applied by the settings layer before a length reaches
/// [`MatchConfig`]; the engine itself trusts its config.
pub fn clamp_match_length(length: u32) -> u32 {
    length.clamp(MIN_MATCH_LENGTH, MAX_MATCH_LENGTH)
}

/// How the match-win target is derived from the match length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchType {
    /// First player to `match_length` round wins takes the match.
    #[default]
    FirstTo,
    /// Majority of `match_length` rounds takes the match.
    BestOf,
}

impl MatchType {
    /// Returns the display label for this option.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstTo => "First to",
            Self::BestOf => "Best of",
        }
    }
}

/// User-configurable match settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfig {
    /// Who takes the first move in each round.
    pub starting_player: Player,
    /// How the win target is derived.
    pub match_type: MatchType,
    /// Match length the target is derived from.
    pub match_length: u32,
}

impl MatchConfig {
    /// Round wins required to take the match.
    ///
    /// `match_length` for [`MatchType::FirstTo`]; `ceil(match_length / 2)`
    /// for [`MatchType::BestOf`].
    pub fn match_target(&self) -> u32 {
        match self.match_type {
            MatchType::FirstTo => self.match_length,
            MatchType::BestOf => self.match_length.div_ceil(2),
        }
    }

    /// Applies the provided fields; unset fields keep their values.
    pub fn update(&mut self, update: SettingsUpdate) {
        if let Some(starting_player) = update.starting_player {
            self.starting_player = starting_player;
        }
        if let Some(match_type) = update.match_type {
            self.match_type = match_type;
        }
        if let Some(match_length) = update.match_length {
            self.match_length = match_length;
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_player: Player::X,
            match_type: MatchType::FirstTo,
            match_length: 5,
        }
    }
}

/// Partial settings update; `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    /// New starting player, if changing.
    pub starting_player: Option<Player>,
    /// New match type, if changing.
    pub match_type: Option<MatchType>,
    /// New match length, if changing.
    pub match_length: Option<u32>,
}
