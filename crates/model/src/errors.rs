use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),
    #[error("Invalid decimal value: {0}")]
    InvalidDecimal(String),
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),
}
