use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaserError {
    #[error("Serial port unavailable: {0}")]
    PortUnavailable(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type FaserResult<T> = std::result::Result<T, FaserError>;
