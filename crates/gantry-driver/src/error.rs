//! Driver error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Configuration error: {0}")]
    Config(&'static str),

    #[error("Planning error: {0}")]
    Grid(#[from] gantry_core::GridError),

    #[error("Serial connection error: {0}")]
    Connection(String),

    #[error("Controller reported failure: {0}")]
    Controller(String),

    #[error("No acknowledgement for `{0}` within the deadline")]
    AckTimeout(String),

    #[error("Game service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
