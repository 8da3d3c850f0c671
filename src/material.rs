//! Material count and the display-only win estimate derived from it.

use serde::Serialize;
use shakmaty::{Color, Role};

use crate::board::BoardSnapshot;

pub fn piece_value(role: Role) -> u32 {
    match role {
        Role::Pawn => 1,
        Role::Knight | Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 0,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaterialScore {
    pub white: u32,
    pub black: u32,
}

impl MaterialScore {
    /// White's share of the material as a rounded percentage.
    ///
    /// With no material on the board (kings only) the split is 50/50.
    pub fn white_probability(&self) -> u32 {
        let total = self.white + self.black;
        if total == 0 {
            return 50;
        }
        (100.0 * f64::from(self.white) / f64::from(total)).round() as u32
    }

    pub fn black_probability(&self) -> u32 {
        100 - self.white_probability()
    }

    pub fn point_difference(&self) -> i32 {
        self.white as i32 - self.black as i32
    }
}

pub fn score_material(snapshot: &BoardSnapshot) -> MaterialScore {
    snapshot
        .pieces()
        .fold(MaterialScore::default(), |mut score, (_, piece)| {
            let value = piece_value(piece.role);
            match piece.color {
                Color::White => score.white += value,
                Color::Black => score.black += value,
            }
            score
        })
}
