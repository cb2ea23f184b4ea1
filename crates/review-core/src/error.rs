use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Failed to schedule timer: {0}")]
    Timer(String),
}

pub type Result<T> = std::result::Result<T, ReviewError>;
