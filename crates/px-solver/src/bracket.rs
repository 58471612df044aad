//! Bracket type and heuristic bracket search.

use crate::error::{SolverError, SolverResult};

/// Two abscissae known (or believed) to bracket a sign change of the target
/// function. Consumed once by a solve and discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub a: f64,
    pub b: f64,
}

impl Bracket {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    pub fn width(&self) -> f64 {
        (self.b - self.a).abs()
    }
}

/// Multiplier-based widening strategy for finding a sign-change bracket
/// around a point estimate.
#[derive(Debug, Clone, Copy)]
pub struct BracketSearch {
    /// Span growth factor applied on each failed attempt
    pub multiplier: f64,
    /// Maximum widening attempts before giving up
    pub max_attempts: usize,
    /// Lower clamp for trial abscissae (e.g., a correlation's domain edge)
    pub min: Option<f64>,
    /// Upper clamp for trial abscissae
    pub max: Option<f64>,
}

impl Default for BracketSearch {
    fn default() -> Self {
        Self {
            multiplier: 2.0,
            max_attempts: 32,
            min: None,
            max: None,
        }
    }
}

impl BracketSearch {
    pub fn clamped(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }
}

/// Expand a bracket around `x0` until the function changes sign.
///
/// The initial span is proportional to `|x0|` away from zero and additive
/// near zero, then grows by `search.multiplier` per attempt, clamped to the
/// configured limits. Returns [`SolverError::InvalidBracket`] when the span
/// is exhausted without a sign change.
pub fn expand_bracket<F>(f: &mut F, x0: f64, search: &BracketSearch) -> SolverResult<Bracket>
where
    F: FnMut(f64) -> SolverResult<f64>,
{
    let mut span = if x0.abs() > 1.0 { x0.abs() * 0.05 } else { 0.5 };

    let clamp = |x: f64| {
        let x = match search.min {
            Some(lo) => x.max(lo),
            None => x,
        };
        match search.max {
            Some(hi) => x.min(hi),
            None => x,
        }
    };

    let mut lo = x0;
    let mut hi = x0;
    for _ in 0..search.max_attempts {
        lo = clamp(x0 - span);
        hi = clamp(x0 + span);

        let flo = f(lo)?;
        let fhi = f(hi)?;
        if flo == 0.0 {
            return Ok(Bracket::new(lo, lo));
        }
        if fhi == 0.0 {
            return Ok(Bracket::new(hi, hi));
        }
        if flo * fhi < 0.0 {
            return Ok(Bracket::new(lo, hi));
        }

        // Stop growing once both ends sit on the clamp limits.
        if Some(lo) == search.min && Some(hi) == search.max {
            break;
        }
        span *= search.multiplier;
    }

    Err(SolverError::InvalidBracket { a: lo, b: hi })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_to_enclose_root() {
        // Root at x = 10, seeded far away at x = 2.
        let mut f = |x: f64| Ok(x - 10.0);
        let bracket = expand_bracket(&mut f, 2.0, &BracketSearch::default()).unwrap();
        assert!(bracket.a <= 10.0 && 10.0 <= bracket.b);
    }

    #[test]
    fn respects_clamp_limits() {
        let mut f = |x: f64| Ok(x - 10.0);
        let search = BracketSearch::clamped(0.0, 5.0);
        // Root lies outside the clamp range; the search must fail, not wander.
        let err = expand_bracket(&mut f, 2.0, &search).unwrap_err();
        assert!(matches!(err, SolverError::InvalidBracket { .. }));
    }

    #[test]
    fn near_zero_seed_uses_additive_span() {
        let mut f = |x: f64| Ok(x * x - 0.25);
        let bracket = expand_bracket(&mut f, 0.1, &BracketSearch::default()).unwrap();
        assert!(bracket.a < 0.5 && 0.5 < bracket.b);
    }
}
