pub mod board;
pub mod config;
pub mod directions;
pub mod errors;
pub mod game;
pub mod logger;
pub mod perft;
pub mod types;

pub use board::Board;
pub use config::GameConfig;
pub use errors::GameError;
pub use game::Game;
pub use logger::GameLogger;
pub use perft::{perft, perft_detailed, perft_divide, PerftResult};
pub use types::*;
