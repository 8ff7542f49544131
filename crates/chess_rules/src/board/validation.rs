use super::Board;
use crate::types::*;

impl Board {
    /// First king of `color` in row-major (x, then y) order.
    pub fn find_king(&self, color: PieceColor) -> Option<Square> {
        self.occupied()
            .find(|(_, piece)| piece.is(PieceType::King, color))
            .map(|(square, _)| square)
    }

    /// Whether any opposing candidate move lands on `color`'s king.
    ///
    /// A color with no king on the board is reported as in check.
    pub fn is_king_in_check(&self, color: PieceColor) -> bool {
        let king_square = match self.find_king(color) {
            Some(square) => square,
            None => return true,
        };

        self.pieces_of(color.opposite())
            .any(|(square, _)| self.candidate_moves_from(square).contains(&king_square))
    }

    /// Decide whether moving `(from_x, from_y)` to `(to_x, to_y)` leaves
    /// `mover`'s king safe. Works on a throwaway clone; `self` is never
    /// touched.
    pub fn is_move_valid(&self, from_x: i32, from_y: i32, to_x: i32, to_y: i32, mover: PieceColor) -> bool {
        let mut probe = self.clone();

        let (from, to) = match (Square::checked(from_x, from_y), Square::checked(to_x, to_y)) {
            (Some(from), Some(to)) => (from, to),
            _ => return false,
        };

        let moving_piece = match probe.get_piece(from) {
            Some(piece) if piece.color == mover => *piece,
            _ => return false,
        };

        // Double advance: the pawn must also survive on the skipped square.
        if moving_piece.kind == PieceType::Pawn && (to_y - from_y).abs() == 2 {
            let intermediate = match from.offset(0, mover.pawn_direction()) {
                Some(square) => square,
                None => return false,
            };
            if !probe.is_empty(intermediate) {
                return false;
            }
            probe.set_piece(from, None);
            probe.put_piece(intermediate, moving_piece);
            if probe.is_king_in_check(mover) {
                return false;
            }
            probe = self.clone();
        }

        // Only the mover itself is displaced; rook relocation and en-passant
        // removal are not simulated.
        probe.set_piece(from, None);
        probe.put_piece(to, moving_piece);
        !probe.is_king_in_check(mover)
    }

    pub fn is_move_valid_between(&self, from: Square, to: Square, mover: PieceColor) -> bool {
        self.is_move_valid(from.x as i32, from.y as i32, to.x as i32, to.y as i32, mover)
    }

    /// Candidates from `square` that pass `is_move_valid` for the piece's own color.
    pub fn legal_moves_from(&self, square: Square) -> Vec<Square> {
        let color = match self.get_piece(square) {
            Some(piece) => piece.color,
            None => return Vec::new(),
        };

        self.candidate_moves_from(square)
            .into_iter()
            .filter(|&to| self.is_move_valid_between(square, to, color))
            .collect()
    }

    pub fn legal_moves(&self, x: i32, y: i32) -> Vec<Square> {
        match Square::checked(x, y) {
            Some(square) => self.legal_moves_from(square),
            None => Vec::new(),
        }
    }

    /// Every legal `(from, to)` pair for `color`.
    pub fn all_legal_moves(&self, color: PieceColor) -> Vec<(Square, Square)> {
        let mut all_moves = Vec::new();
        for (from, _) in self.pieces_of(color) {
            for to in self.legal_moves_from(from) {
                all_moves.push((from, to));
            }
        }
        all_moves
    }

    pub fn has_legal_moves(&self, color: PieceColor) -> bool {
        self.pieces_of(color).any(|(from, _)| {
            self.candidate_moves_from(from)
                .into_iter()
                .any(|to| self.is_move_valid_between(from, to, color))
        })
    }

    pub fn is_checkmate(&self, color: PieceColor) -> bool {
        !self.has_legal_moves(color) && self.is_king_in_check(color)
    }

    pub fn is_stalemate(&self, color: PieceColor) -> bool {
        !self.has_legal_moves(color) && !self.is_king_in_check(color)
    }

    /// Status as seen by `to_move` at the start of its turn.
    pub fn status_for(&self, to_move: PieceColor) -> GameStatus {
        let in_check = self.is_king_in_check(to_move);
        match (self.has_legal_moves(to_move), in_check) {
            (false, true) => GameStatus::Checkmate {
                winner: to_move.opposite(),
            },
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check(to_move),
            (true, false) => GameStatus::InProgress,
        }
    }
}
