use std::fmt;

use shakmaty::Color;

use crate::position::GamePosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
    FiftyMoveRule,
}

/// Game state as reported by the rules engine after the latest move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress { turn: Color, in_check: bool },
    Checkmate { winner: Color },
    Draw(DrawReason),
}

impl GameStatus {
    /// Checkmate wins over every draw; among draws the more specific
    /// reasons are reported first.
    pub fn of(position: &GamePosition) -> Self {
        if position.is_checkmate() {
            return GameStatus::Checkmate {
                winner: position.turn().other(),
            };
        }
        if position.is_draw() {
            let reason = if position.is_stalemate() {
                DrawReason::Stalemate
            } else if position.is_threefold_repetition() {
                DrawReason::ThreefoldRepetition
            } else if position.is_insufficient_material() {
                DrawReason::InsufficientMaterial
            } else {
                DrawReason::FiftyMoveRule
            };
            return GameStatus::Draw(reason);
        }
        GameStatus::InProgress {
            turn: position.turn(),
            in_check: position.is_check(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Checkmate { winner } => write!(f, "Checkmate! {} wins", color_name(*winner)),
            GameStatus::Draw(DrawReason::Stalemate) => f.write_str("Draw by stalemate"),
            GameStatus::Draw(DrawReason::ThreefoldRepetition) => {
                f.write_str("Draw by threefold repetition")
            }
            GameStatus::Draw(DrawReason::InsufficientMaterial) => {
                f.write_str("Draw by insufficient material")
            }
            GameStatus::Draw(DrawReason::FiftyMoveRule) => f.write_str("Draw by the fifty-move rule"),
            GameStatus::InProgress { turn, in_check: true } => {
                write!(f, "{} to move, in check", color_name(*turn))
            }
            GameStatus::InProgress { turn, in_check: false } => {
                write!(f, "{} to move", color_name(*turn))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(fen: &str) -> GameStatus {
        GameStatus::of(&GamePosition::from_fen(fen).unwrap())
    }

    #[test]
    fn start_is_in_progress() {
        let s = GameStatus::of(&GamePosition::new());
        assert_eq!(s, GameStatus::InProgress { turn: Color::White, in_check: false });
        assert!(!s.is_terminal());
        assert_eq!(s.message(), "White to move");
    }

    #[test]
    fn checkmate_names_the_winner() {
        // after 1. f3 e5 2. g4 Qh4#
        let s = status("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(s, GameStatus::Checkmate { winner: Color::Black });
        assert_eq!(s.message(), "Checkmate! Black wins");
    }

    #[test]
    fn draw_reasons() {
        assert_eq!(
            status("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"),
            GameStatus::Draw(DrawReason::Stalemate)
        );
        let kings = status("8/8/8/4k3/8/8/8/4K3 w - - 0 1");
        assert_eq!(kings, GameStatus::Draw(DrawReason::InsufficientMaterial));
        assert_eq!(kings.message(), "Draw by insufficient material");
        assert_eq!(
            status("4k3/8/8/8/8/8/8/4K2R w K - 100 80"),
            GameStatus::Draw(DrawReason::FiftyMoveRule)
        );
    }

    #[test]
    fn overlapping_draws_report_the_first_reason() {
        // knight and king against a bare king: stalemate with insufficient material
        let pos = GamePosition::from_fen("7k/5K2/5N2/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(pos.is_stalemate());
        assert!(pos.is_insufficient_material());
        assert_eq!(GameStatus::of(&pos), GameStatus::Draw(DrawReason::Stalemate));

        // bare kings past the fifty-move limit
        let pos = GamePosition::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 100 90").unwrap();
        assert!(pos.is_fifty_move_draw());
        assert_eq!(
            GameStatus::of(&pos),
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        );
    }

    #[test]
    fn check_is_reported() {
        let s = status("4k2R/8/8/8/8/8/8/4K3 b - - 1 1");
        assert_eq!(s, GameStatus::InProgress { turn: Color::Black, in_check: true });
        assert_eq!(s.message(), "Black to move, in check");
    }
}
