use super::Board;
use crate::directions::{BISHOP_RAYS, KING_STEPS, KNIGHT_JUMPS, ROOK_RAYS};
use crate::types::*;

impl Board {
    /// Pseudo-legal destinations for the piece at `(x, y)`.
    ///
    /// Empty when the coordinates are off the board or the square is empty.
    /// Moves that leave the mover's own king attacked are still included;
    /// filtering those is `is_move_valid`'s job.
    pub fn candidate_moves(&self, x: i32, y: i32) -> Vec<Square> {
        match Square::checked(x, y) {
            Some(square) => self.candidate_moves_from(square),
            None => Vec::new(),
        }
    }

    pub fn candidate_moves_from(&self, square: Square) -> Vec<Square> {
        let piece = match self.get_piece(square) {
            Some(piece) => *piece,
            None => return Vec::new(),
        };

        match piece.kind {
            PieceType::Pawn => self.get_pawn_moves(square, piece.color),
            PieceType::Knight => self.get_step_moves(square, piece.color, &KNIGHT_JUMPS),
            PieceType::Bishop => self.get_sliding_moves(square, piece.color, &BISHOP_RAYS),
            PieceType::Rook => self.get_sliding_moves(square, piece.color, &ROOK_RAYS),
            PieceType::Queen => {
                let mut moves = self.get_sliding_moves(square, piece.color, &ROOK_RAYS);
                moves.extend(self.get_sliding_moves(square, piece.color, &BISHOP_RAYS));
                moves
            }
            PieceType::King => self.get_king_moves(square, piece),
            PieceType::None => Vec::new(),
        }
    }

    fn is_enemy(&self, square: Square, color: PieceColor) -> bool {
        matches!(self.get_piece(square), Some(p) if p.color != color)
    }

    fn get_pawn_moves(&self, square: Square, color: PieceColor) -> Vec<Square> {
        let mut moves = Vec::new();
        let direction = color.pawn_direction();

        // Forward moves
        if let Some(one) = square.offset(0, direction) {
            if self.is_empty(one) {
                moves.push(one);

                if square.y == color.pawn_start_rank() {
                    if let Some(two) = square.offset(0, 2 * direction) {
                        if self.is_empty(two) {
                            moves.push(two);
                        }
                    }
                }
            }
        }

        // Diagonal captures
        for dx in [-1, 1] {
            if let Some(target) = square.offset(dx, direction) {
                if self.is_enemy(target, color) {
                    moves.push(target);
                }
            }
        }

        // En passant lands on the skipped square whatever occupies it; the
        // passed pawn is removed by whoever commits the move.
        if let Some(target) = self.active_en_passant() {
            for dx in [-1, 1] {
                if square.offset(dx, direction) == Some(target) {
                    moves.push(target);
                }
            }
        }

        moves
    }

    /// Single-step pieces: destinations that are empty or hold an enemy.
    fn get_step_moves(&self, square: Square, color: PieceColor, offsets: &[(i32, i32)]) -> Vec<Square> {
        offsets
            .iter()
            .filter_map(|&(dx, dy)| square.offset(dx, dy))
            .filter(|&target| self.is_empty(target) || self.is_enemy(target, color))
            .collect()
    }

    fn get_sliding_moves(&self, square: Square, color: PieceColor, rays: &[(i32, i32)]) -> Vec<Square> {
        let mut moves = Vec::new();

        for &(dx, dy) in rays {
            let mut current = square.offset(dx, dy);
            while let Some(target) = current {
                match self.get_piece(target) {
                    None => moves.push(target),
                    Some(other) => {
                        if other.color != color {
                            moves.push(target);
                        }
                        break;
                    }
                }
                current = target.offset(dx, dy);
            }
        }

        moves
    }

    fn get_king_moves(&self, square: Square, king: Piece) -> Vec<Square> {
        let mut moves = self.get_step_moves(square, king.color, &KING_STEPS);

        // Castling offer: only occupancy and has_moved flags are consulted,
        // attacked transit squares are not.
        if !king.has_moved && square.x == 4 {
            let y = square.y;
            if self.castling_path_clear(y, &[5, 6]) && self.unmoved_rook_at(Square::new(7, y)) {
                moves.push(Square::new(6, y));
            }
            if self.castling_path_clear(y, &[1, 2, 3]) && self.unmoved_rook_at(Square::new(0, y)) {
                moves.push(Square::new(2, y));
            }
        }

        moves
    }

    fn castling_path_clear(&self, y: u8, files: &[u8]) -> bool {
        files.iter().all(|&x| self.is_empty(Square::new(x, y)))
    }

    // Colour is not checked, matching the offer rule.
    fn unmoved_rook_at(&self, square: Square) -> bool {
        matches!(self.get_piece(square), Some(p) if p.kind == PieceType::Rook && !p.has_moved)
    }
}
