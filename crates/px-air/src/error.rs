//! Moist-air property errors.

use px_solver::SolverError;
use thiserror::Error;

/// Result type for property operations.
pub type AirResult<T> = Result<T, AirError>;

/// Errors that can occur during property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AirError {
    /// Input outside a correlation's validated range.
    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    /// Non-physical values (negative humidity ratio, saturated-over pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The underlying root search failed.
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}
