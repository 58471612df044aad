//! Error types for solver operations.

use thiserror::Error;

/// Errors that can occur during a bracketed solve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The supplied bracket does not contain a sign change of the target
    /// function. Detected before any iteration is attempted.
    #[error("Bracket [{a}, {b}] does not contain a sign change")]
    InvalidBracket { a: f64, b: f64 },

    /// The iteration budget was exhausted without meeting tolerance.
    #[error("Convergence failed after {iterations} iterations (residual = {residual:e})")]
    NotConverged { iterations: usize, residual: f64 },

    /// The target function itself failed at a trial abscissa.
    #[error("Function evaluation failed: {what}")]
    Eval { what: String },

    /// The target function returned a non-finite value.
    #[error("Numeric error: {what}")]
    Numeric { what: &'static str },
}

impl SolverError {
    /// Wrap a failed function evaluation.
    pub fn eval(err: impl std::fmt::Display) -> Self {
        SolverError::Eval {
            what: err.to_string(),
        }
    }
}

pub type SolverResult<T> = Result<T, SolverError>;
