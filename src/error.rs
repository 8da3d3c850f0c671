//! Error types for the chess companion library.
//!
//! Every failure a session can run into is collected in [`GameError`].
//! Move rejections and bad selections are transient: the session keeps
//! the last one around as a user-visible indicator and carries on.
//! The remaining variants wrap parse failures from `shakmaty` and
//! `serde_json` that can only occur while setting a session up.

use shakmaty::Square;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// The rules engine refused to move from `from` to `to`.
    #[error("Invalid move")]
    InvalidMove { from: Square, to: Square },

    /// A square was clicked that does not hold a piece of the side to move.
    #[error("Select a valid piece")]
    NoValidSelection(Square),

    /// The provided FEN string could not be parsed.
    #[error("Invalid FEN: {0}")]
    InvalidFen(#[from] shakmaty::fen::ParseFenError),

    /// A parsed position is invalid from the perspective of `shakmaty`.
    #[error("Invalid Chess Position: {0}")]
    InvalidPosition(#[from] shakmaty::PositionError<shakmaty::Chess>),

    /// The session configuration could not be decoded.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// A difficulty label that names none of the four levels.
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
}
