use super::Board;
use crate::types::*;
use std::fmt;

impl Board {
    /// Debug board state information
    pub fn debug_game_state(&self) -> Vec<String> {
        let mut debug_info = Vec::new();

        match self.en_passant_target {
            Some(target) => debug_info.push(format!(
                "En passant target: {} (available: {})",
                target, self.en_passant_available
            )),
            None => debug_info.push("En passant target: None".to_string()),
        }

        for color in [PieceColor::White, PieceColor::Black] {
            let king = self
                .find_king(color)
                .map(|sq| sq.to_string())
                .unwrap_or_else(|| "missing".to_string());
            debug_info.push(format!(
                "{} king: {} | in check: {} | pieces: {}",
                color,
                king,
                self.is_king_in_check(color),
                self.pieces_of(color).count()
            ));
        }

        debug_info
    }

    /// Candidate moves from one square with the validator's verdict for each.
    pub fn debug_square_moves(&self, square: Square) -> Vec<String> {
        let mut debug_info = Vec::new();

        let piece = match self.get_piece(square) {
            Some(piece) => *piece,
            None => {
                debug_info.push(format!("{}: empty", square));
                return debug_info;
            }
        };

        debug_info.push(format!(
            "{}: {} {} (moved: {})",
            square, piece.color, piece.kind, piece.has_moved
        ));

        for target in self.candidate_moves_from(square) {
            let verdict = if self.is_move_valid_between(square, target, piece.color) {
                "legal"
            } else {
                "leaves king in check"
            };
            debug_info.push(format!("  -> {} ({})", target, verdict));
        }

        debug_info
    }
}

/// Rank 8 at the top, White in uppercase.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..8u8).rev() {
            write!(f, "{} ", y + 1)?;
            for x in 0..8u8 {
                let c = self.get_piece(Square::new(x, y)).map(|p| p.symbol()).unwrap_or('.');
                write!(f, "{}", c)?;
                if x < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_starting_board() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8 r n b q k b n r");
        assert_eq!(lines[1], "7 p p p p p p p p");
        assert_eq!(lines[4], "4 . . . . . . . .");
        assert_eq!(lines[7], "1 R N B Q K B N R");
        assert_eq!(lines[8], "  a b c d e f g h");
    }

    #[test]
    fn debug_square_moves_reports_each_candidate() {
        let board = Board::new();
        let info = board.debug_square_moves(Square::new(6, 0));
        assert_eq!(info.len(), 3);
        assert!(info[0].contains("white knight"));
        assert!(info.iter().skip(1).all(|line| line.contains("legal")));

        let empty = board.debug_square_moves(Square::new(4, 4));
        assert_eq!(empty, vec!["e5: empty".to_string()]);
    }

    #[test]
    fn debug_game_state_mentions_kings() {
        let info = Board::new().debug_game_state();
        assert_eq!(info[0], "En passant target: None");
        assert!(info[1].starts_with("white king: e1"));
        assert!(info[2].starts_with("black king: e8"));
    }
}
