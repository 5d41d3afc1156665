//! kk-results: recorded history persistence.
//!
//! A history file is JSON lines: one header record naming every quantity,
//! then one array of values per recorded sample, in the header's order.

pub mod store;
pub mod types;

pub use store::{read_history, write_history};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("History file has no header record")]
    MissingHeader,

    #[error("Sample on line {line} has {actual} values, header names {expected}")]
    WidthMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },
}
