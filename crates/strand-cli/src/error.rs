use strandorder::core::io::dot_bracket::ParseError;
use strandorder::engine::config::ConfigError;
use strandorder::engine::error::OrderingError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to parse complex: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
