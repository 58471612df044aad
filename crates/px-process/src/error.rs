//! Error types for process calculations.

use px_air::AirError;
use px_solver::SolverError;
use thiserror::Error;

/// Errors that can occur during a heating or cooling calculation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    /// The requested target contradicts the process's physical direction.
    #[error("Physically infeasible process: {what}")]
    Infeasible { what: &'static str },

    /// Invalid argument detected before any computation.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Property evaluation failed.
    #[error("Property error: {0}")]
    Air(#[from] AirError),

    /// Root search failed.
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

pub type ProcessResultOf<T> = Result<T, ProcessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProcessError::Infeasible {
            what: "cooling cannot raise temperature",
        };
        assert!(err.to_string().contains("infeasible"));
    }
}
