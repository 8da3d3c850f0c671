use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use shakmaty::{Color, Move, Role, Square};

use crate::error::GameError;

/// Strength setting of the bot opponent.
///
/// Only the user changes it; the bot reads it when choosing a reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    GrandMaster,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::GrandMaster,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::GrandMaster => "Grand Master",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    /// Accepts the label in any case, with or without separators
    /// ("grand master", "grand_master", "GrandMaster").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.label().replace(' ', "").to_ascii_lowercase() == key)
            .ok_or_else(|| GameError::UnknownDifficulty(s.to_string()))
    }
}

/// Side a human sits on, as written in configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Color {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// Cosmetic board theme. Has no effect on play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }
}

/// Kind markers attached to every legal move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MoveFlags {
    pub capture: bool,
    pub en_passant: bool,
    /// The move leaves the opponent in check (or mated).
    pub check: bool,
    pub promotion: bool,
    pub kingside_castle: bool,
    pub queenside_castle: bool,
    /// Pawn advancing two squares from its starting rank.
    pub big_pawn: bool,
}

/// A legal move as reported by the rules engine.
///
/// For castling `to` is the king's destination (g1, c8, ...) so that a
/// click on that square plays the castle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveInfo {
    pub from: Square,
    pub to: Square,
    pub role: Role,
    pub promotion: Option<Role>,
    pub flags: MoveFlags,
    /// Standard algebraic notation with `+`/`#` suffix
    pub san: String,
    pub(crate) raw: Move,
}

impl MoveInfo {
    pub fn is_capture(&self) -> bool {
        self.flags.capture || self.flags.en_passant
    }
}

impl fmt::Display for MoveInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.san)
    }
}
