use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::errors::GameError;
use crate::types::{GameMove, GameStatus, PieceColor, PieceType, Square};
use crate::Board;

/// Line-oriented game log kept in memory until `save_to_file`.
#[derive(Debug, Clone)]
pub struct GameLogger {
    pub log_buffer: String,
    pub enabled: bool,
    pub advanced_logging: bool,
    game_start_time: Instant,
    move_count: u32,
    indent_level: usize,
}

impl GameLogger {
    pub fn new() -> Self {
        let mut logger = Self {
            log_buffer: String::with_capacity(16 * 1024),
            enabled: true,
            advanced_logging: false,
            game_start_time: Instant::now(),
            move_count: 0,
            indent_level: 0,
        };

        logger.log("=== Chess Game Log Started ===");
        logger.log(&format!("Date: {}", chrono::Local::now().format("%m/%d/%Y %H:%M:%S")));
        logger
    }

    /// A logger that drops every line.
    pub fn disabled() -> Self {
        let mut logger = Self::new();
        logger.log_buffer.clear();
        logger.enabled = false;
        logger
    }

    pub fn should_log_advanced(&self) -> bool {
        self.enabled && self.advanced_logging
    }

    pub fn enable_advanced_logging(&mut self) {
        self.advanced_logging = true;
        self.log("Advanced logging enabled - board dumped after each move");
    }

    pub fn disable_advanced_logging(&mut self) {
        self.advanced_logging = false;
        self.log("Advanced logging disabled");
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn log(&mut self, message: &str) {
        if self.enabled {
            self.log_buffer.push_str(message);
            self.log_buffer.push('\n');
        }
    }

    pub fn log_with_indent(&mut self, message: &str) {
        let indent = "  ".repeat(self.indent_level);
        self.log(&format!("{}{}", indent, message));
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn log_move(&mut self, color: PieceColor, mv: &GameMove) {
        self.move_count += 1;
        let elapsed = self.game_start_time.elapsed().as_millis();

        let mut line = format!("{}. {} {} {} ({}ms)", self.move_count, color, mv.piece.kind, mv, elapsed);
        if mv.is_castling {
            let side = if mv.to.x > mv.from.x { "kingside" } else { "queenside" };
            line.push_str(&format!(" [castle {}]", side));
        }
        if mv.is_en_passant {
            line.push_str(" [en passant]");
        }
        if let Some(captured) = mv.captured {
            line.push_str(&format!(" [takes {}]", captured.kind));
        }
        self.log(&line);
    }

    pub fn log_promotion(&mut self, square: Square, kind: PieceType) {
        self.log_with_indent(&format!("Pawn on {} promoted to {}", square, kind));
    }

    pub fn log_promotion_pending(&mut self, square: Square) {
        self.log_with_indent(&format!("Awaiting promotion choice on {}", square));
    }

    pub fn log_rejected(&mut self, error: &GameError) {
        self.log_with_indent(&format!("Rejected: {}", error));
    }

    pub fn log_status(&mut self, status: GameStatus) {
        match status {
            GameStatus::InProgress => {}
            GameStatus::Check(color) => self.log_with_indent(&format!("{} king in check", color)),
            GameStatus::Checkmate { winner } => {
                self.log(&format!("Checkmate - {} wins", winner));
            }
            GameStatus::Stalemate => self.log("Stalemate - draw"),
        }
    }

    pub fn log_board(&mut self, board: &Board) {
        if self.should_log_advanced() {
            self.increase_indent();
            for line in board.to_string().lines() {
                self.log_with_indent(line);
            }
            for line in board.debug_game_state() {
                self.log_with_indent(&line);
            }
            self.decrease_indent();
        }
    }

    /// Write the buffer to `<dir>/<timestamp>.txt`, creating `dir` if needed.
    ///
    /// An existing file is never overwritten; a numeric suffix is added instead.
    pub fn save_to_file(&mut self, dir: &Path, reason: &str) -> Result<PathBuf, GameError> {
        fs::create_dir_all(dir)?;

        let stamp = chrono::Local::now().format("%m_%d_%Y_%H_%M_%S_%3f").to_string();
        self.log(&format!("Game log saved: {}", reason));

        let mut attempt = 0u32;
        loop {
            let name = if attempt == 0 {
                format!("{}.txt", stamp)
            } else {
                format!("{}_{}.txt", stamp, attempt)
            };
            let path = dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(self.log_buffer.as_bytes())?;
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}
