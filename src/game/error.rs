use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid size must be positive, got {0}")]
    InvalidSize(usize),
}
