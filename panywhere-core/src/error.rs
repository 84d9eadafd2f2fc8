use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanywhereError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid remote path: {0}")]
    InvalidPath(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, PanywhereError>;
