use crate::types::*;

// Declare submodules
pub mod debug;
pub mod moves;
pub mod validation;

/// One game snapshot: 64 independent slots indexed `[x][y]` plus the
/// en-passant markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    pub en_passant_target: Option<Square>,
    pub en_passant_available: bool,
}

impl Board {
    /// Standard initial layout.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_starting_position();
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            en_passant_target: None,
            en_passant_available: false,
        }
    }

    fn setup_starting_position(&mut self) {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for color in [PieceColor::White, PieceColor::Black] {
            let back = color.back_rank();
            let pawns = color.pawn_start_rank();
            for (x, kind) in BACK_RANK.iter().enumerate() {
                self.squares[x][back as usize] = Some(Piece::new(*kind, color));
                self.squares[x][pawns as usize] = Some(Piece::new(PieceType::Pawn, color));
            }
        }
        self.clear_en_passant();
    }

    pub fn position_on_board(x: i32, y: i32) -> bool {
        (0..8).contains(&x) && (0..8).contains(&y)
    }

    // Basic board operations. Off-board squares read as empty and ignore writes.
    fn slot(&self, square: Square) -> Option<&Option<Piece>> {
        self.squares.get(square.x as usize)?.get(square.y as usize)
    }

    fn slot_mut(&mut self, square: Square) -> Option<&mut Option<Piece>> {
        self.squares.get_mut(square.x as usize)?.get_mut(square.y as usize)
    }

    pub fn get_piece(&self, square: Square) -> Option<&Piece> {
        self.slot(square)?.as_ref()
    }

    pub fn get_piece_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.slot_mut(square)?.as_mut()
    }

    /// Bounds-checked read for untrusted coordinates.
    pub fn piece_at(&self, x: i32, y: i32) -> Option<&Piece> {
        Square::checked(x, y).and_then(|sq| self.get_piece(sq))
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get_piece(square).is_none()
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(slot) = self.slot_mut(square) {
            *slot = piece;
        }
    }

    pub fn take_piece(&mut self, square: Square) -> Option<Piece> {
        self.slot_mut(square)?.take()
    }

    pub fn put_piece(&mut self, square: Square, piece: Piece) {
        self.set_piece(square, Some(piece));
    }

    /// Both markers are always written together.
    pub fn set_en_passant(&mut self, target: Square) {
        self.en_passant_target = Some(target);
        self.en_passant_available = true;
    }

    pub fn clear_en_passant(&mut self) {
        self.en_passant_target = None;
        self.en_passant_available = false;
    }

    /// Armed en-passant target, if any.
    pub fn active_en_passant(&self) -> Option<Square> {
        if self.en_passant_available {
            self.en_passant_target
        } else {
            None
        }
    }

    /// Occupied squares in row-major order (x outer, y inner).
    pub fn occupied(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        (0..8u8).flat_map(move |x| {
            (0..8u8).filter_map(move |y| {
                let square = Square::new(x, y);
                self.get_piece(square).map(|piece| (square, piece))
            })
        })
    }

    pub fn pieces_of(&self, color: PieceColor) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
