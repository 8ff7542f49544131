//! Turn controller driving one live `Board`.
//!
//! The rules core only certifies moves and reports check. `Game` is the
//! caller that owns sequencing: it commits validated moves, relocates the
//! castling rook, removes a pawn taken en passant, arms and expires the
//! en-passant markers, holds the turn while a promotion choice is pending,
//! and evaluates check / checkmate / stalemate after each completed turn.

use std::path::PathBuf;

use crate::config::GameConfig;
use crate::errors::GameError;
use crate::logger::GameLogger;
use crate::types::*;
use crate::Board;

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: PieceColor,
    move_counter: u32,
    last_en_passant_move: Option<u32>,
    pending_promotion: Option<Square>,
    status: GameStatus,
    history: Vec<GameMove>,
    logger: GameLogger,
    config: GameConfig,
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn from_env() -> Self {
        Self::with_config(GameConfig::from_env())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::from_board_with_config(Board::new(), PieceColor::White, config)
    }

    /// Start from an arbitrary position with `to_move` on turn.
    pub fn from_board(board: Board, to_move: PieceColor) -> Self {
        Self::from_board_with_config(board, to_move, GameConfig::default())
    }

    pub fn from_board_with_config(board: Board, to_move: PieceColor, config: GameConfig) -> Self {
        let mut logger = if config.logging_enabled {
            GameLogger::new()
        } else {
            GameLogger::disabled()
        };
        if config.advanced_logging {
            logger.enable_advanced_logging();
        }

        let status = board.status_for(to_move);
        let mut game = Self {
            board,
            current_player: to_move,
            move_counter: 1,
            last_en_passant_move: None,
            pending_promotion: None,
            status,
            history: Vec::new(),
            logger,
            config,
        };
        game.logger.log(&format!("{} to move", to_move));
        game.logger.log_board(&game.board);
        game.logger.log_status(status);
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct access for callers that edit the position themselves.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current_player(&self) -> PieceColor {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn move_counter(&self) -> u32 {
        self.move_counter
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    pub fn history(&self) -> &[GameMove] {
        &self.history
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    pub(crate) fn silence_logging(&mut self) {
        self.logger = GameLogger::disabled();
    }

    pub fn candidate_moves(&self, x: i32, y: i32) -> Vec<Square> {
        self.board.candidate_moves(x, y)
    }

    pub fn legal_moves(&self, x: i32, y: i32) -> Vec<Square> {
        self.board.legal_moves(x, y)
    }

    /// All legal moves for the side on turn; empty while a promotion is pending.
    pub fn legal_moves_for_current_player(&self) -> Vec<(Square, Square)> {
        if self.pending_promotion.is_some() || self.is_over() {
            return Vec::new();
        }
        self.board.all_legal_moves(self.current_player)
    }

    pub fn is_king_in_check(&self, color: PieceColor) -> bool {
        self.board.is_king_in_check(color)
    }

    /// `commit_move` for untrusted coordinates.
    pub fn commit(&mut self, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> Result<GameMove, GameError> {
        let from = Square::checked(from_x, from_y).ok_or(GameError::OffBoard(from_x, from_y))?;
        let to = Square::checked(to_x, to_y).ok_or(GameError::OffBoard(to_x, to_y))?;
        self.commit_move(from, to)
    }

    /// Validate and apply one move for the side on turn.
    ///
    /// A pawn landing on its last rank stays a pawn and the turn is held
    /// until `promote` is called.
    pub fn commit_move(&mut self, from: Square, to: Square) -> Result<GameMove, GameError> {
        let piece = match self.check_commit(from, to) {
            Ok(piece) => piece,
            Err(error) => {
                self.logger.log_rejected(&error);
                return Err(error);
            }
        };
        let color = piece.color;
        let dx = to.x as i32 - from.x as i32;
        let dy = to.y as i32 - from.y as i32;

        let is_en_passant = piece.kind == PieceType::Pawn
            && dx.abs() == 1
            && self.board.active_en_passant() == Some(to)
            && self.board.is_empty(to);
        let is_castling = piece.kind == PieceType::King && dx.abs() == 2;

        let mut game_move = GameMove::new(from, to, piece);
        game_move.is_en_passant = is_en_passant;
        game_move.is_castling = is_castling;

        // Execute the move
        game_move.captured = self.board.take_piece(to);
        self.board.set_piece(from, None);
        self.board.put_piece(to, Piece { has_moved: true, ..piece });

        if is_en_passant {
            let passed = Square::new(to.x, (to.y as i32 - color.pawn_direction()) as u8);
            game_move.captured = self.board.take_piece(passed);
        }

        if is_castling {
            let (rook_from, rook_to) = if dx > 0 {
                (Square::new(7, from.y), Square::new(5, from.y))
            } else {
                (Square::new(0, from.y), Square::new(3, from.y))
            };
            if let Some(rook) = self.board.take_piece(rook_from) {
                self.board.put_piece(rook_to, Piece { has_moved: true, ..rook });
            }
        }

        if piece.kind == PieceType::Pawn && dy.abs() == 2 {
            let skipped = Square::new(from.x, (from.y as i32 + color.pawn_direction()) as u8);
            self.board.set_en_passant(skipped);
            self.last_en_passant_move = Some(self.move_counter);
        }

        self.history.push(game_move.clone());
        self.logger.log_move(color, &game_move);

        if piece.kind == PieceType::Pawn && to.y == color.promotion_rank() {
            self.pending_promotion = Some(to);
            self.logger.log_promotion_pending(to);
            return Ok(game_move);
        }

        self.finish_turn();
        Ok(game_move)
    }

    /// Replace the pending pawn with `kind` and complete the turn.
    pub fn promote(&mut self, kind: PieceType) -> Result<GameMove, GameError> {
        let square = self.pending_promotion.ok_or(GameError::NoPromotionPending)?;
        if !kind.is_promotion_choice() {
            return Err(GameError::InvalidPromotion(kind));
        }

        if let Some(pawn) = self.board.get_piece_mut(square) {
            pawn.kind = kind;
            pawn.has_moved = true;
        }
        self.pending_promotion = None;
        self.logger.log_promotion(square, kind);

        let record = match self.history.last_mut() {
            Some(last) => {
                last.promotion = Some(kind);
                last.clone()
            }
            None => GameMove::new(square, square, Piece::new(kind, self.current_player)),
        };

        self.finish_turn();
        Ok(record)
    }

    /// Write the game log into the configured directory.
    pub fn save_log(&mut self, reason: &str) -> Result<PathBuf, GameError> {
        let dir = self.config.log_dir.clone();
        self.logger.save_to_file(&dir, reason)
    }

    fn check_commit(&self, from: Square, to: Square) -> Result<Piece, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if let Some(square) = self.pending_promotion {
            return Err(GameError::PromotionPending(square));
        }
        for square in [from, to] {
            if !square.is_on_board() {
                return Err(GameError::OffBoard(square.x as i32, square.y as i32));
            }
        }

        let piece = *self.board.get_piece(from).ok_or(GameError::EmptySquare(from))?;
        if piece.color != self.current_player {
            return Err(GameError::NotYourTurn(from));
        }
        if !self.board.candidate_moves_from(from).contains(&to) {
            return Err(GameError::NotACandidate { from, to });
        }
        if !self.board.is_move_valid_between(from, to, piece.color) {
            return Err(GameError::LeavesKingInCheck { from, to });
        }
        Ok(piece)
    }

    fn finish_turn(&mut self) {
        self.current_player = self.current_player.opposite();
        self.move_counter += 1;

        // The right lives for exactly one opposing reply.
        let expired = match self.last_en_passant_move {
            Some(armed) => self.move_counter > armed + 1,
            None => true,
        };
        if expired {
            self.board.clear_en_passant();
        }

        self.status = self.board.status_for(self.current_player);
        self.logger.log_board(&self.board);
        self.logger.log_status(self.status);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y)
    }

    fn place(board: &mut Board, x: u8, y: u8, kind: PieceType, color: PieceColor) {
        board.put_piece(sq(x, y), Piece::new(kind, color));
    }

    fn play(game: &mut Game, moves: &[((u8, u8), (u8, u8))]) {
        for &((fx, fy), (tx, ty)) in moves {
            game.commit_move(sq(fx, fy), sq(tx, ty)).unwrap();
        }
    }

    #[test]
    fn new_game_white_to_move() {
        let game = Game::new();
        assert_eq!(game.current_player(), PieceColor::White);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.move_counter(), 1);
        assert_eq!(game.legal_moves_for_current_player().len(), 20);
    }

    #[test]
    fn commit_moves_piece_and_flips_turn() {
        let mut game = Game::new();
        let mv = game.commit_move(sq(6, 0), sq(5, 2)).unwrap();
        assert_eq!(mv.piece.kind, PieceType::Knight);
        assert!(game.board().is_empty(sq(6, 0)));
        let knight = game.board().get_piece(sq(5, 2)).unwrap();
        assert!(knight.has_moved);
        assert_eq!(game.current_player(), PieceColor::Black);
        assert_eq!(game.move_counter(), 2);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn rejected_commits_leave_board_untouched() {
        let mut game = Game::new();
        let before = game.board().clone();

        assert!(matches!(game.commit_move(sq(4, 6), sq(4, 4)), Err(GameError::NotYourTurn(_))));
        assert!(matches!(game.commit_move(sq(4, 4), sq(4, 5)), Err(GameError::EmptySquare(_))));
        assert!(matches!(
            game.commit_move(sq(4, 1), sq(4, 4)),
            Err(GameError::NotACandidate { .. })
        ));
        assert!(matches!(game.commit(4, 1, 4, 8), Err(GameError::OffBoard(4, 8))));

        assert_eq!(game.board(), &before);
        assert_eq!(game.current_player(), PieceColor::White);
        assert!(game.logger().log_buffer.contains("Rejected:"));
    }

    #[test]
    fn off_board_squares_are_rejected_not_indexed() {
        let mut game = Game::new();
        let before = game.board().clone();
        assert!(matches!(
            game.commit_move(Square { x: 8, y: 0 }, sq(4, 3)),
            Err(GameError::OffBoard(8, 0))
        ));
        assert!(matches!(
            game.commit_move(sq(4, 1), Square { x: 4, y: 12 }),
            Err(GameError::OffBoard(4, 12))
        ));
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_player(), PieceColor::White);
    }

    #[test]
    fn self_check_is_rejected() {
        let mut board = Board::empty();
        place(&mut board, 4, 0, PieceType::King, PieceColor::White);
        place(&mut board, 4, 2, PieceType::Bishop, PieceColor::White);
        place(&mut board, 4, 7, PieceType::Rook, PieceColor::Black);
        place(&mut board, 0, 7, PieceType::King, PieceColor::Black);
        let mut game = Game::from_board(board, PieceColor::White);

        assert!(matches!(
            game.commit_move(sq(4, 2), sq(5, 3)),
            Err(GameError::LeavesKingInCheck { .. })
        ));
    }

    #[test]
    fn double_advance_arms_en_passant_for_one_reply() {
        let mut game = Game::new();
        play(&mut game, &[((4, 1), (4, 3))]);
        assert_eq!(game.board().en_passant_target, Some(sq(4, 2)));
        assert!(game.board().en_passant_available);

        play(&mut game, &[((1, 7), (2, 5))]);
        assert_eq!(game.board().en_passant_target, None);
        assert!(!game.board().en_passant_available);
    }

    #[test]
    fn en_passant_capture_removes_passed_pawn() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                ((4, 1), (4, 3)), // e4
                ((0, 6), (0, 5)), // a6
                ((4, 3), (4, 4)), // e5
                ((3, 6), (3, 4)), // d5
            ],
        );
        assert!(game.candidate_moves(4, 4).contains(&sq(3, 5)));

        let mv = game.commit_move(sq(4, 4), sq(3, 5)).unwrap();
        assert!(mv.is_en_passant);
        assert_eq!(mv.captured.map(|p| p.kind), Some(PieceType::Pawn));
        assert!(game.board().is_empty(sq(3, 4)));
        assert!(game.board().get_piece(sq(3, 5)).unwrap().is(PieceType::Pawn, PieceColor::White));
    }

    #[test]
    fn en_passant_right_expires_unused() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                ((4, 1), (4, 3)),
                ((0, 6), (0, 5)),
                ((4, 3), (4, 4)),
                ((3, 6), (3, 4)),
                ((7, 1), (7, 2)), // white declines
                ((0, 5), (0, 4)),
            ],
        );
        assert!(!game.candidate_moves(4, 4).contains(&sq(3, 5)));
        assert!(matches!(
            game.commit_move(sq(4, 4), sq(3, 5)),
            Err(GameError::NotACandidate { .. })
        ));
    }

    #[test]
    fn kingside_castle_relocates_rook() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                ((4, 1), (4, 3)),
                ((4, 6), (4, 4)),
                ((6, 0), (5, 2)),
                ((1, 7), (2, 5)),
                ((5, 0), (2, 3)),
                ((6, 7), (5, 5)),
            ],
        );
        let mv = game.commit_move(sq(4, 0), sq(6, 0)).unwrap();
        assert!(mv.is_castling);
        let board = game.board();
        assert!(board.get_piece(sq(6, 0)).unwrap().is(PieceType::King, PieceColor::White));
        let rook = board.get_piece(sq(5, 0)).unwrap();
        assert!(rook.is(PieceType::Rook, PieceColor::White));
        assert!(rook.has_moved);
        assert!(board.is_empty(sq(7, 0)));
        assert!(board.is_empty(sq(4, 0)));
    }

    #[test]
    fn queenside_castle_relocates_rook() {
        let mut board = Board::empty();
        place(&mut board, 4, 7, PieceType::King, PieceColor::Black);
        place(&mut board, 0, 7, PieceType::Rook, PieceColor::Black);
        place(&mut board, 4, 0, PieceType::King, PieceColor::White);
        let mut game = Game::from_board(board, PieceColor::Black);

        game.commit_move(sq(4, 7), sq(2, 7)).unwrap();
        assert!(game.board().get_piece(sq(3, 7)).unwrap().is(PieceType::Rook, PieceColor::Black));
        assert!(game.board().is_empty(sq(0, 7)));
    }

    #[test]
    fn promotion_holds_turn_until_choice() {
        let mut board = Board::empty();
        place(&mut board, 0, 6, PieceType::Pawn, PieceColor::White);
        place(&mut board, 4, 0, PieceType::King, PieceColor::White);
        place(&mut board, 7, 4, PieceType::King, PieceColor::Black);
        let mut game = Game::from_board(board, PieceColor::White);

        game.commit_move(sq(0, 6), sq(0, 7)).unwrap();
        assert_eq!(game.pending_promotion(), Some(sq(0, 7)));
        assert_eq!(game.current_player(), PieceColor::White);
        assert!(matches!(
            game.commit_move(sq(4, 0), sq(4, 1)),
            Err(GameError::PromotionPending(_))
        ));
        assert!(matches!(
            game.promote(PieceType::King),
            Err(GameError::InvalidPromotion(PieceType::King))
        ));

        let record = game.promote(PieceType::Queen).unwrap();
        assert_eq!(record.promotion, Some(PieceType::Queen));
        let queen = game.board().get_piece(sq(0, 7)).unwrap();
        assert!(queen.is(PieceType::Queen, PieceColor::White));
        assert!(queen.has_moved);
        assert_eq!(game.current_player(), PieceColor::Black);
        assert_eq!(game.pending_promotion(), None);
        assert!(matches!(game.promote(PieceType::Rook), Err(GameError::NoPromotionPending)));
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                ((5, 1), (5, 2)), // f3
                ((4, 6), (4, 4)), // e5
                ((6, 1), (6, 3)), // g4
                ((3, 7), (7, 3)), // Qh4#
            ],
        );
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: PieceColor::Black
            }
        );
        assert!(game.is_over());
        assert!(game.legal_moves_for_current_player().is_empty());
        assert!(matches!(game.commit_move(sq(0, 1), sq(0, 2)), Err(GameError::GameOver)));
        assert!(game.logger().log_buffer.contains("Checkmate - black wins"));
    }

    #[test]
    fn check_status_reported() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                ((4, 1), (4, 3)), // e4
                ((5, 6), (5, 4)), // f5
                ((3, 0), (7, 4)), // Qh5+
            ],
        );
        assert_eq!(game.status(), GameStatus::Check(PieceColor::Black));
        assert!(game.is_king_in_check(PieceColor::Black));
    }

    #[test]
    fn disabled_logging_records_nothing() {
        let config = GameConfig {
            logging_enabled: false,
            ..GameConfig::default()
        };
        let mut game = Game::with_config(config);
        game.commit_move(sq(4, 1), sq(4, 3)).unwrap();
        assert!(game.logger().log_buffer.is_empty());
    }

    #[test]
    fn save_log_writes_into_configured_dir() {
        let dir = std::env::temp_dir().join(format!("chess_rules_game_log_{}", std::process::id()));
        let config = GameConfig {
            log_dir: dir.clone(),
            ..GameConfig::default()
        };
        let mut game = Game::with_config(config);
        game.commit_move(sq(4, 1), sq(4, 3)).unwrap();
        game.logger_mut().log("note from caller");

        let path = game.save_log("manual save").unwrap();
        assert!(path.starts_with(&dir));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("1. white pawn e2-e4"));
        assert!(written.contains("note from caller"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_log_reports_write_failure() {
        let blocker = std::env::temp_dir().join(format!("chess_rules_not_a_dir_{}", std::process::id()));
        std::fs::write(&blocker, "file").unwrap();
        let config = GameConfig {
            log_dir: blocker.join("logs"),
            ..GameConfig::default()
        };
        let mut game = Game::with_config(config);

        assert!(matches!(game.save_log("blocked"), Err(GameError::LogWrite(_))));

        let _ = std::fs::remove_file(&blocker);
    }

    #[test]
    fn board_mut_edits_are_seen_by_the_rules() {
        let mut game = Game::new();
        game.board_mut().set_piece(sq(4, 1), None);
        game.board_mut()
            .put_piece(sq(4, 5), Piece::new(PieceType::Knight, PieceColor::Black));

        // e6 knight: c5, g5, d4, f4
        assert_eq!(game.candidate_moves(4, 5).len(), 4);
        assert!(game.legal_moves(3, 0).contains(&sq(4, 1)));
    }

    #[test]
    fn from_env_starts_a_fresh_game() {
        let game = Game::from_env();
        assert_eq!(game.current_player(), PieceColor::White);
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.status(), GameStatus::InProgress);
    }
}
