use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    #[error("Limit must be a whole number, got {0:?}")]
    NotAnInteger(String),

    #[error("Limit {value} is out of range, expected a value between {min} and {max}")]
    OutOfRange { value: i64, min: u32, max: u32 },
}
