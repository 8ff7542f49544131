//! Errors returned by the turn controller.
//!
//! The rules core itself answers with booleans and (possibly empty) move
//! lists; only `Game`, which mutates the live board, needs a richer failure
//! type so callers can tell a wrong-turn click from a self-check.

use crate::types::{PieceType, Square};

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,

    #[error("a promotion choice is pending on {0}")]
    PromotionPending(Square),

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceType),

    #[error("coordinates ({0}, {1}) are off the board")]
    OffBoard(i32, i32),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("piece on {0} does not belong to the side to move")]
    NotYourTurn(Square),

    #[error("{from} -> {to} is not a candidate move")]
    NotACandidate { from: Square, to: Square },

    #[error("{from} -> {to} would leave the king in check")]
    LeavesKingInCheck { from: Square, to: Square },

    #[error("failed to write game log: {0}")]
    LogWrite(#[from] std::io::Error),
}
