//! Game error types

use arena_engine::config::ConfigError;

/// Errors that can stop the game from starting
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A tuning value makes the simulation impossible to run
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for game setup
pub type GameResult<T> = Result<T, GameError>;
