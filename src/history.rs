//! Move list shown next to the board, one row per full move.

use std::fmt;

use serde::Serialize;
use shakmaty::Color;

/// Placeholder for the white half of a row that starts with a black move.
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub turn: u32,
    pub white: String,
    pub black: Option<String>,
}

impl fmt::Display for HistoryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.turn, self.white)?;
        if let Some(black) = &self.black {
            write!(f, " {black}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoveHistory {
    rows: Vec<HistoryRow>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a ply played by `color` during full move `turn`.
    pub fn push(&mut self, color: Color, turn: u32, san: impl Into<String>) {
        let san = san.into();
        match color {
            Color::White => self.rows.push(HistoryRow {
                turn,
                white: san,
                black: None,
            }),
            Color::Black => match self.rows.last_mut() {
                Some(row) if row.turn == turn && row.black.is_none() => row.black = Some(san),
                _ => self.rows.push(HistoryRow {
                    turn,
                    white: ELLIPSIS.to_string(),
                    black: Some(san),
                }),
            },
        }
    }

    /// Drop the most recent ply. Returns `false` if the history was empty.
    pub fn pop_ply(&mut self) -> bool {
        let Some(row) = self.rows.last_mut() else {
            return false;
        };
        if row.black.take().is_none() || row.white == ELLIPSIS {
            self.rows.pop();
        }
        true
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn last(&self) -> Option<&HistoryRow> {
        self.rows.last()
    }

    pub fn plies(&self) -> usize {
        self.rows
            .iter()
            .map(|row| usize::from(row.white != ELLIPSIS) + usize::from(row.black.is_some()))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_white_and_black() {
        let mut history = MoveHistory::new();
        history.push(Color::White, 1, "e4");
        assert_eq!(history.last().unwrap().to_string(), "1. e4");
        history.push(Color::Black, 1, "e5");
        history.push(Color::White, 2, "Nf3");
        let rendered: Vec<String> = history.rows().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["1. e4 e5", "2. Nf3"]);
        assert_eq!(history.plies(), 3);
    }

    #[test]
    fn black_first_row_gets_placeholder() {
        let mut history = MoveHistory::new();
        history.push(Color::Black, 12, "Kd7");
        assert_eq!(history.last().unwrap().to_string(), "12. ... Kd7");
        assert_eq!(history.plies(), 1);
        assert!(history.pop_ply());
        assert!(history.is_empty());
    }

    #[test]
    fn pop_removes_half_rows_first() {
        let mut history = MoveHistory::new();
        history.push(Color::White, 1, "d4");
        history.push(Color::Black, 1, "d5");
        assert!(history.pop_ply());
        assert_eq!(history.last().unwrap().to_string(), "1. d4");
        assert!(history.pop_ply());
        assert!(history.is_empty());
        assert!(!history.pop_ply());
    }
}
