use thiserror::Error;

pub type RlResult<T> = Result<T, RlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Index out of range: {what} (index={index}, valid={min}..={max})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        min: usize,
        max: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
