use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid ticker prefix: {0}")]
    InvalidTicker(String),
}
