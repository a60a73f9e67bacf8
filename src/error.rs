use thiserror::Error;

/// Failures when reading locations, moves or board layouts from text.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    #[error("invalid location '{0}', expected a file a-i followed by a rank 0-9")]
    InvalidLocation(String),

    #[error("invalid move '{0}', expected two locations such as a9a8")]
    InvalidMove(String),

    #[error("invalid board layout: {0}")]
    InvalidFen(String),
}

pub type Result<T> = std::result::Result<T, Error>;
