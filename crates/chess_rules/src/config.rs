use std::path::PathBuf;

/// Game-layer configuration parsed from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Record commits and results in the in-memory game log.
    pub logging_enabled: bool,
    /// Also dump the board after every commit.
    pub advanced_logging: bool,
    /// Directory `GameLogger::save_to_file` writes into.
    pub log_dir: PathBuf,
}

impl GameConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        GameConfig {
            logging_enabled: env_flag("CHESS_LOG").unwrap_or(defaults.logging_enabled),
            advanced_logging: env_flag("CHESS_LOG_ADVANCED").unwrap_or(defaults.advanced_logging),
            log_dir: std::env::var("CHESS_LOG_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            logging_enabled: true,
            advanced_logging: false,
            log_dir: PathBuf::from("logs"),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
