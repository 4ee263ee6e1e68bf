use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ToolupError>;
