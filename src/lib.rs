//! Play chess against a simple heuristic bot.
//!
//! This crate is the interaction layer of a click-to-move chess board.
//! Everything about the rules of chess (legal moves, check, mate, draws,
//! FEN) is delegated to `shakmaty`; what lives here is the selection state
//! machine, the one-ply bot, the hint advisor, the material estimate and
//! the move history.
//!
//! The principal type is [`GameSession`]. Feed it square clicks and poll it
//! with the current time to let the deferred bot reply land. The pure
//! pieces ([`choose_bot_move`], [`suggest_move`], [`score_material`]) can be
//! used on their own with any [`GamePosition`].
//!
//! The library re-exports `shakmaty` for squares, colors and roles.

mod board;
mod config;
mod error;
mod heuristics;
mod history;
mod material;
mod position;
mod session;
mod status;
mod types;

/// Interaction controller and its click results.
pub use session::{ClickOutcome, GameSession, ScheduledReply};

/// Immutable position handle over the rules engine.
pub use position::GamePosition;

/// Error type produced by library operations.
pub use error::GameError;

pub use board::{BoardSnapshot, index_of_square, square_from_index};
pub use config::{DEFAULT_BOT_DELAY_MS, SessionConfig, UndoPolicy};
pub use heuristics::{choose_bot_move, move_score, suggest_move};
pub use history::{HistoryRow, MoveHistory};
pub use material::{MaterialScore, piece_value, score_material};
pub use status::{DrawReason, GameStatus};
pub use types::{Difficulty, DisplayMode, MoveFlags, MoveInfo, Side};

/// Re-export of `shakmaty` for convenience when naming squares and pieces.
pub use shakmaty;
