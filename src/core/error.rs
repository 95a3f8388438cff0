//! Crate-wide error type.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EstateError>;

#[derive(Debug, Error)]
pub enum EstateError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),

    /// A persisted history entry failed validation on import.
    #[error("invalid market history for month {month}: {reason}")]
    InvalidHistory { month: u32, reason: String },

    #[error("no listing at index {0}")]
    NoSuchListing(usize),

    #[error("insufficient capital: need ${needed:.2}, have ${available:.2}")]
    InsufficientCapital { needed: f64, available: f64 },

    #[error("could not determine home directory")]
    NoHomeDirectory,
}
