//! Immutable position handle over the `shakmaty` rules engine.
//!
//! A [`GamePosition`] is never changed after construction. Applying a move
//! returns a fresh handle, so a callback holding an older handle can never
//! observe a half-updated board. All legality decisions are delegated to
//! `shakmaty`; this module only translates its moves into [`MoveInfo`]
//! values and tracks the repetition keys it does not keep itself.
//!
//! The described move list is built once per handle, on first use, and
//! shared by the hint, the bot and click lookups.

use std::cell::OnceCell;

use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, File, Move, Piece, Position, Role, Square,
    fen::Fen,
    san::{SanPlus, Suffix},
};

use crate::{
    board::BoardSnapshot,
    error::GameError,
    types::{MoveFlags, MoveInfo},
};

#[derive(Debug, Clone)]
pub struct GamePosition {
    chess: Chess,
    /// Repetition key of every position reached so far, current one last.
    repetitions: Vec<String>,
    moves: OnceCell<Vec<MoveInfo>>,
}

impl GamePosition {
    /// Standard starting position.
    pub fn new() -> Self {
        Self::from_chess(Chess::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let setup = fen.parse::<Fen>()?.into_setup();
        let chess: Chess = setup.position(CastlingMode::Standard)?;
        Ok(Self::from_chess(chess))
    }

    fn from_chess(chess: Chess) -> Self {
        let repetitions = vec![repetition_key(&chess)];
        Self {
            chess,
            repetitions,
            moves: OnceCell::new(),
        }
    }

    pub fn fen(&self) -> String {
        fen_of(&self.chess)
    }

    pub fn turn(&self) -> Color {
        self.chess.turn()
    }

    /// Number of the current full move, starting at 1.
    pub fn fullmove_number(&self) -> u32 {
        self.chess.fullmoves().get()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.chess.board().piece_at(square)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_board(self.chess.board())
    }

    /// All legal moves for the side to move, in engine order.
    pub fn legal_moves(&self) -> &[MoveInfo] {
        self.moves.get_or_init(|| {
            self.chess
                .legal_moves()
                .iter()
                .map(|m| self.describe(m))
                .collect()
        })
    }

    pub fn legal_moves_from(&self, from: Square) -> impl Iterator<Item = &MoveInfo> + '_ {
        self.legal_moves().iter().filter(move |m| m.from == from)
    }

    /// Look up the legal move between two squares.
    ///
    /// A pawn reaching the last rank promotes to `promotion`, or to a queen
    /// when no choice is given.
    pub fn find_move(&self, from: Square, to: Square, promotion: Option<Role>) -> Option<MoveInfo> {
        let promote_to = promotion.unwrap_or(Role::Queen);
        self.legal_moves_from(from)
            .filter(|m| m.to == to)
            .find(|m| m.promotion.is_none() || m.promotion == Some(promote_to))
            .cloned()
    }

    /// Play `mv` and return the resulting position.
    pub fn apply(&self, mv: &MoveInfo) -> Result<GamePosition, GameError> {
        let chess = self
            .chess
            .clone()
            .play(mv.raw.clone())
            .map_err(|_| GameError::InvalidMove {
                from: mv.from,
                to: mv.to,
            })?;
        let mut repetitions = self.repetitions.clone();
        repetitions.push(repetition_key(&chess));
        Ok(Self {
            chess,
            repetitions,
            moves: OnceCell::new(),
        })
    }

    /// Find and play the move between two squares in one step.
    pub fn play_squares(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<(MoveInfo, GamePosition), GameError> {
        let mv = self
            .find_move(from, to, promotion)
            .ok_or(GameError::InvalidMove { from, to })?;
        let next = self.apply(&mv)?;
        Ok((mv, next))
    }

    pub fn is_check(&self) -> bool {
        self.chess.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.chess.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.chess.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.chess.is_insufficient_material()
    }

    /// The current position has occurred at least three times.
    pub fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.repetitions.last() else {
            return false;
        };
        self.repetitions.iter().filter(|key| *key == current).count() >= 3
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.chess.halfmoves() >= 100
    }

    pub fn is_draw(&self) -> bool {
        self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
            || self.is_fifty_move_draw()
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    fn describe(&self, m: &Move) -> MoveInfo {
        let to = destination(m);
        // Standard chess never produces drops, so every move has an origin.
        let from = m.from().unwrap_or(to);
        // `m` comes from the engine's own legal move list.
        let mut after = self.chess.clone();
        let san = SanPlus::from_move_and_play_unchecked(&mut after, m.clone());
        let gives_check = matches!(san.suffix, Some(Suffix::Check | Suffix::Checkmate));

        let (kingside_castle, queenside_castle) = match m {
            Move::Castle { rook, .. } => (rook.file() == File::H, rook.file() == File::A),
            _ => (false, false),
        };

        MoveInfo {
            from,
            to,
            role: m.role(),
            promotion: m.promotion(),
            flags: MoveFlags {
                capture: m.is_capture() && !m.is_en_passant(),
                en_passant: m.is_en_passant(),
                check: gives_check,
                promotion: m.is_promotion(),
                kingside_castle,
                queenside_castle,
                big_pawn: m.role() == Role::Pawn
                    && (from.rank() as i32 - to.rank() as i32).abs() == 2,
            },
            san: san.to_string(),
            raw: m.clone(),
        }
    }
}

impl Default for GamePosition {
    fn default() -> Self {
        Self::new()
    }
}

/// Square the moving piece lands on; for castling that is the king's
/// destination rather than the rook square `shakmaty` reports.
fn destination(m: &Move) -> Square {
    match m {
        Move::Castle { king, rook } => {
            let file = if rook.file() == File::H { File::G } else { File::C };
            Square::from_coords(file, king.rank())
        }
        _ => m.to(),
    }
}

fn fen_of(chess: &Chess) -> String {
    Fen::from_position(chess, EnPassantMode::Legal).to_string()
}

/// FEN without the move counters: placement, turn, castling, en passant.
fn repetition_key(chess: &Chess) -> String {
    fen_of(chess)
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn play(pos: &GamePosition, from: Square, to: Square) -> GamePosition {
        pos.play_squares(from, to, None).unwrap().1
    }

    #[test]
    fn start_position_round_trips_fen() {
        let pos = GamePosition::new();
        assert_eq!(pos.fen(), START_FEN);
        assert_eq!(GamePosition::from_fen(START_FEN).unwrap().fen(), START_FEN);
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.turn(), Color::White);
    }

    #[test]
    fn rejects_garbage_fen() {
        assert!(matches!(
            GamePosition::from_fen("not a fen"),
            Err(GameError::InvalidFen(_))
        ));
        // no kings
        assert!(matches!(
            GamePosition::from_fen("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(GameError::InvalidPosition(_))
        ));
    }

    #[test]
    fn apply_returns_a_new_handle() {
        let start = GamePosition::new();
        let (mv, next) = start.play_squares(Square::E2, Square::E4, None).unwrap();
        assert_eq!(mv.san, "e4");
        assert!(mv.flags.big_pawn);
        assert_eq!(start.fen(), START_FEN);
        assert_eq!(next.turn(), Color::Black);
        assert_eq!(next.piece_at(Square::E4).map(|p| p.role), Some(Role::Pawn));
    }

    #[test]
    fn illegal_squares_are_rejected() {
        let start = GamePosition::new();
        assert!(start.find_move(Square::E2, Square::E5, None).is_none());
        assert!(matches!(
            start.play_squares(Square::E2, Square::E5, None),
            Err(GameError::InvalidMove { from: Square::E2, to: Square::E5 })
        ));
    }

    #[test]
    fn moves_from_single_square() {
        let start = GamePosition::new();
        let knight: Vec<_> = start.legal_moves_from(Square::G1).collect();
        assert_eq!(knight.len(), 2);
        assert!(knight.iter().all(|m| m.from == Square::G1 && m.role == Role::Knight));
        assert_eq!(start.legal_moves_from(Square::E4).count(), 0);
    }

    #[test]
    fn move_list_is_built_once_per_handle() {
        let start = GamePosition::new();
        let first = start.legal_moves().as_ptr();
        assert!(start.find_move(Square::E2, Square::E4, None).is_some());
        assert_eq!(start.legal_moves().as_ptr(), first);
        // a new handle starts without a list of its own
        let (_, next) = start.play_squares(Square::E2, Square::E4, None).unwrap();
        assert_eq!(next.legal_moves().len(), 20);
        assert!(next.legal_moves().iter().all(|m| m.from.rank() as u32 >= 5));
    }

    #[test]
    fn castling_uses_king_destination() {
        let pos = GamePosition::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let castle = pos.find_move(Square::E1, Square::G1, None).unwrap();
        assert_eq!(castle.san, "O-O");
        assert!(castle.flags.kingside_castle);
        assert!(!castle.flags.queenside_castle);
        let next = pos.apply(&castle).unwrap();
        assert_eq!(next.piece_at(Square::G1).map(|p| p.role), Some(Role::King));
        assert_eq!(next.piece_at(Square::F1).map(|p| p.role), Some(Role::Rook));
    }

    #[test]
    fn check_and_mate_suffixes() {
        let pos = GamePosition::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let check = pos.find_move(Square::H1, Square::H8, None).unwrap();
        assert_eq!(check.san, "Rh8+");
        assert!(check.flags.check);

        let fools = GamePosition::from_fen(
            "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2",
        )
        .unwrap();
        let mate = fools.find_move(Square::D8, Square::H4, None).unwrap();
        assert_eq!(mate.san, "Qh4#");
        let after = fools.apply(&mate).unwrap();
        assert!(after.is_checkmate());
        assert!(after.is_game_over());
        assert!(after.legal_moves().is_empty());
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let pos = GamePosition::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let queen = pos.find_move(Square::A7, Square::A8, None).unwrap();
        assert_eq!(queen.promotion, Some(Role::Queen));
        assert!(queen.flags.promotion);
        let knight = pos.find_move(Square::A7, Square::A8, Some(Role::Knight)).unwrap();
        assert_eq!(knight.promotion, Some(Role::Knight));
    }

    #[test]
    fn en_passant_is_flagged_separately() {
        let pos = GamePosition::from_fen(
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        )
        .unwrap();
        let ep = pos.find_move(Square::E5, Square::F6, None).unwrap();
        assert!(ep.flags.en_passant);
        assert!(!ep.flags.capture);
        assert!(ep.is_capture());
    }

    #[test]
    fn terminal_predicates() {
        let stalemate = GamePosition::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(stalemate.is_stalemate());
        assert!(stalemate.is_draw());
        assert!(!stalemate.is_checkmate());

        let kings = GamePosition::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(kings.is_insufficient_material());
        assert!(kings.is_draw());

        let fifty = GamePosition::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 100 80").unwrap();
        assert!(fifty.is_fifty_move_draw());
        assert!(!fifty.is_insufficient_material());
    }

    #[test]
    fn knight_shuffle_repeats_three_times() {
        let mut pos = GamePosition::new();
        for round in 0..2 {
            assert!(!pos.is_threefold_repetition(), "round {round}");
            pos = play(&pos, Square::G1, Square::F3);
            pos = play(&pos, Square::G8, Square::F6);
            pos = play(&pos, Square::F3, Square::G1);
            pos = play(&pos, Square::F6, Square::G8);
        }
        assert!(pos.is_threefold_repetition());
        assert!(pos.is_draw());
    }
}
