//! Brent-method bracketed root finder.
//!
//! Combines bisection (guaranteed progress), secant interpolation, and
//! inverse quadratic interpolation (fast convergence when well-behaved),
//! falling back to bisection whenever the interpolated step would leave the
//! current bracket or fails to shrink it fast enough.

use crate::bracket::Bracket;
use crate::error::{SolverError, SolverResult};
use tracing::trace;

/// Solver configuration.
#[derive(Debug, Clone, Copy)]
pub struct BrentConfig {
    /// Convergence tolerance on |f(x)| and on the bracket half-width
    pub tolerance: f64,
    /// Maximum iterations before reporting non-convergence
    pub max_iterations: usize,
}

impl Default for BrentConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 100,
        }
    }
}

/// Solve result.
#[derive(Debug, Clone, Copy)]
pub struct RootResult {
    /// Converged abscissa
    pub root: f64,
    /// Iterations taken
    pub iterations: usize,
    /// Final |f(root)|
    pub residual: f64,
    /// Total function evaluations
    pub evaluations: usize,
}

/// Brent solver with per-call mutable iteration state.
///
/// One instance serves exactly one invocation of [`Brent::find_root`]; the
/// current bracket and evaluation count are clobbered by the next call.
/// Construct fresh (or [`Brent::reset`]) per independent solve.
#[derive(Debug, Clone)]
pub struct Brent {
    config: BrentConfig,
    evaluations: usize,
    current: Option<Bracket>,
}

impl Brent {
    pub fn new(config: BrentConfig) -> Self {
        Self {
            config,
            evaluations: 0,
            current: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(BrentConfig::default())
    }

    pub fn config(&self) -> &BrentConfig {
        &self.config
    }

    /// Function evaluations spent by the last solve.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Bracket the last solve narrowed down to, if any.
    pub fn current_bracket(&self) -> Option<Bracket> {
        self.current
    }

    /// Clear iteration state so the instance can be reused for a new,
    /// unrelated solve.
    pub fn reset(&mut self) {
        self.evaluations = 0;
        self.current = None;
    }

    fn eval<F>(&mut self, f: &mut F, x: f64) -> SolverResult<f64>
    where
        F: FnMut(f64) -> SolverResult<f64>,
    {
        self.evaluations += 1;
        let fx = f(x)?;
        if !fx.is_finite() {
            return Err(SolverError::Numeric {
                what: "target function returned a non-finite value",
            });
        }
        Ok(fx)
    }

    /// Find `x*` in `bracket` with `|f(x*)| <= tolerance` or bracket
    /// half-width below tolerance.
    ///
    /// # Errors
    /// - [`SolverError::InvalidBracket`] when `f` has the same sign at both
    ///   ends (checked before iterating).
    /// - [`SolverError::NotConverged`] when the iteration budget runs out.
    pub fn find_root<F>(&mut self, mut f: F, bracket: Bracket) -> SolverResult<RootResult>
    where
        F: FnMut(f64) -> SolverResult<f64>,
    {
        self.reset();
        self.current = Some(bracket);

        let tol = self.config.tolerance;
        let mut a = bracket.a;
        let mut b = bracket.b;
        let mut fa = self.eval(&mut f, a)?;
        let mut fb = self.eval(&mut f, b)?;

        if fa == 0.0 {
            return Ok(self.done(a, 0, 0.0));
        }
        if fb == 0.0 {
            return Ok(self.done(b, 0, 0.0));
        }
        if fa.signum() == fb.signum() {
            return Err(SolverError::InvalidBracket { a, b });
        }

        // c is the previous best estimate; (d, e) track the last two steps so
        // interpolation can be rejected when it stops making progress.
        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;

        for iter in 1..=self.config.max_iterations {
            if fb.signum() == fc.signum() {
                // Re-anchor so [b, c] brackets the root.
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * tol;
            let xm = 0.5 * (c - b);
            self.current = Some(Bracket::new(b, c));

            if xm.abs() <= tol1 || fb == 0.0 || fb.abs() <= tol {
                return Ok(self.done(b, iter, fb.abs()));
            }

            if e.abs() >= tol1 && fa.abs() > fb.abs() {
                // Secant (two points) or inverse quadratic (three points).
                let s = fb / fa;
                let (mut p, mut q);
                if a == c {
                    p = 2.0 * xm * s;
                    q = 1.0 - s;
                } else {
                    let r0 = fa / fc;
                    let r1 = fb / fc;
                    p = s * (2.0 * xm * r0 * (r0 - r1) - (b - a) * (r1 - 1.0));
                    q = (r0 - 1.0) * (r1 - 1.0) * (s - 1.0);
                }
                if p > 0.0 {
                    q = -q;
                }
                p = p.abs();

                let min1 = 3.0 * xm * q - (tol1 * q).abs();
                let min2 = (e * q).abs();
                if 2.0 * p < min1.min(min2) {
                    // Interpolated step stays inside the bracket: accept.
                    e = d;
                    d = p / q;
                } else {
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }

            a = b;
            fa = fb;
            if d.abs() > tol1 {
                b += d;
            } else {
                b += tol1.copysign(xm);
            }
            fb = self.eval(&mut f, b)?;
            trace!(iter, x = b, residual = fb, "brent step");
        }

        Err(SolverError::NotConverged {
            iterations: self.config.max_iterations,
            residual: fb.abs(),
        })
    }

    fn done(&self, root: f64, iterations: usize, residual: f64) -> RootResult {
        RootResult {
            root,
            iterations,
            residual,
            evaluations: self.evaluations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sqrt_two() {
        let mut solver = Brent::with_defaults();
        let result = solver
            .find_root(|x| Ok(x * x - 2.0), Bracket::new(1.0, 2.0))
            .unwrap();
        assert_relative_eq!(result.root, 2.0_f64.sqrt(), epsilon = 1e-10);
        assert!(result.iterations <= solver.config().max_iterations);
    }

    #[test]
    fn rejects_bracket_without_sign_change() {
        let mut solver = Brent::with_defaults();
        let err = solver
            .find_root(|x| Ok(x * x + 1.0), Bracket::new(-3.0, 3.0))
            .unwrap_err();
        assert!(matches!(err, SolverError::InvalidBracket { .. }));
        // Must fail before spending iterations beyond the endpoint checks.
        assert_eq!(solver.evaluations(), 2);
    }

    #[test]
    fn endpoint_root_returns_immediately() {
        let mut solver = Brent::with_defaults();
        let result = solver
            .find_root(|x| Ok(x - 1.0), Bracket::new(1.0, 2.0))
            .unwrap();
        assert_eq!(result.root, 1.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn transcendental_root() {
        // cos(x) = x, root near 0.739085
        let mut solver = Brent::with_defaults();
        let result = solver
            .find_root(|x| Ok(x.cos() - x), Bracket::new(0.0, 1.0))
            .unwrap();
        assert_relative_eq!(result.root, 0.739_085_133_215_160_6, epsilon = 1e-9);
    }

    #[test]
    fn exhausted_budget_reports_not_converged() {
        let config = BrentConfig {
            tolerance: 1e-15,
            max_iterations: 3,
        };
        let mut solver = Brent::new(config);
        let err = solver
            .find_root(|x| Ok((x - 0.123_456_789).tanh()), Bracket::new(-10.0, 10.0))
            .unwrap_err();
        assert!(matches!(err, SolverError::NotConverged { .. }));
    }

    #[test]
    fn propagates_evaluation_failure() {
        let mut solver = Brent::with_defaults();
        let err = solver
            .find_root(
                |_| {
                    Err(SolverError::Eval {
                        what: "backend unavailable".into(),
                    })
                },
                Bracket::new(0.0, 1.0),
            )
            .unwrap_err();
        assert!(matches!(err, SolverError::Eval { .. }));
    }

    #[test]
    fn reset_clears_state() {
        let mut solver = Brent::with_defaults();
        solver
            .find_root(|x| Ok(x * x - 2.0), Bracket::new(1.0, 2.0))
            .unwrap();
        assert!(solver.evaluations() > 0);
        assert!(solver.current_bracket().is_some());
        solver.reset();
        assert_eq!(solver.evaluations(), 0);
        assert!(solver.current_bracket().is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn finds_root_of_shifted_cubic(shift in -50.0_f64..50.0) {
            // x^3 - shift has a single real root at cbrt(shift).
            let mut solver = Brent::with_defaults();
            let result = solver
                .find_root(|x| Ok(x * x * x - shift), Bracket::new(-4.0, 4.0));
            if let Ok(res) = result {
                prop_assert!((res.root - shift.cbrt()).abs() < 1e-6);
            }
        }
    }
}
