//! Square indexing and full-board snapshots.
//!
//! The board grid is laid out the way it is drawn: index 0 is a8, index 7
//! is h8 and index 63 is h1. Row 0 of a [`BoardSnapshot`] is rank 8.

use shakmaty::{Board, File, Piece, Rank, Square};

/// Map a linear grid index (0..64, row-major from rank 8) to its square.
pub fn square_from_index(index: usize) -> Option<Square> {
    if index >= 64 {
        return None;
    }
    let file = File::new((index % 8) as u32);
    let rank = Rank::new(7 - (index / 8) as u32);
    Some(Square::from_coords(file, rank))
}

/// Inverse of [`square_from_index`].
pub fn index_of_square(square: Square) -> usize {
    (7 - square.rank() as usize) * 8 + square.file() as usize
}

/// Immutable 8×8 copy of the piece placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    cells: [[Option<Piece>; 8]; 8],
}

impl BoardSnapshot {
    pub(crate) fn from_board(board: &Board) -> Self {
        let mut cells = [[None; 8]; 8];
        for (index, cell) in cells.iter_mut().flatten().enumerate() {
            if let Some(square) = square_from_index(index) {
                *cell = board.piece_at(square);
            }
        }
        Self { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }

    /// Occupied squares in grid order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells
            .iter()
            .flatten()
            .enumerate()
            .filter_map(|(index, cell)| Some((square_from_index(index)?, (*cell)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{Chess, Color, Position, Role};

    #[test]
    fn index_corners() {
        assert_eq!(square_from_index(0), Some(Square::A8));
        assert_eq!(square_from_index(7), Some(Square::H8));
        assert_eq!(square_from_index(56), Some(Square::A1));
        assert_eq!(square_from_index(63), Some(Square::H1));
        assert_eq!(square_from_index(64), None);
    }

    #[test]
    fn index_is_inverse() {
        for index in 0..64 {
            let square = square_from_index(index).unwrap();
            assert_eq!(index_of_square(square), index);
        }
    }

    #[test]
    fn snapshot_of_start_position() {
        let snapshot = BoardSnapshot::from_board(Chess::default().board());
        let black_rook = snapshot.get(0, 0).unwrap();
        assert_eq!(black_rook.color, Color::Black);
        assert_eq!(black_rook.role, Role::Rook);
        let white_king = snapshot.get(7, 4).unwrap();
        assert_eq!(white_king.color, Color::White);
        assert_eq!(white_king.role, Role::King);
        assert_eq!(snapshot.get(4, 4), None);
        assert_eq!(snapshot.pieces().count(), 32);
    }
}
