//! Session configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```json
//! {
//!   "difficulty": "grand_master",
//!   "human_color": "white",
//!   "bot_delay_ms": 500,
//!   "undo_policy": "two_plies",
//!   "start_fen": null,
//!   "rng_seed": 42
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    error::GameError,
    types::{Difficulty, Side},
};

pub const DEFAULT_BOT_DELAY_MS: u64 = 500;

/// How far an undo rolls the game back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoPolicy {
    /// Always take back two plies, whether or not the bot has replied yet.
    /// Right after a human move this also discards the bot's previous
    /// reply.
    #[default]
    TwoPlies,
    /// Take back plies until it is the human's turn again: one ply while
    /// a bot reply is still pending, two once it has been played.
    ToHumanTurn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub human_color: Side,
    /// Pause between an accepted human move and the bot's reply.
    pub bot_delay_ms: u64,
    pub undo_policy: UndoPolicy,
    /// Position to start (and reset) from; the standard setup if absent.
    pub start_fen: Option<String>,
    /// Seed for the bot's random choices. Entropy from the OS if absent.
    pub rng_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            human_color: Side::default(),
            bot_delay_ms: DEFAULT_BOT_DELAY_MS,
            undo_policy: UndoPolicy::default(),
            start_fen: None,
            rng_seed: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }
}
