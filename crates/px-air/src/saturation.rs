//! Water vapour saturation pressure over ice and liquid water.
//!
//! The exact correlation is Hyland–Wexler (ASHRAE Fundamentals), a
//! transcendental relation in `ln(p)` with separate coefficient sets below
//! and above 0 degC. It has no closed-form inverse pattern usable here, so
//! the value is produced estimate-then-refine: a cheap Arden-Buck evaluation
//! seeds a tight bracket, and a Brent solve against the exact relation
//! polishes it.

use crate::common::{validate_temperature, MIN_TEMPERATURE_C};
use crate::error::AirResult;
use px_core::units::constants::CELSIUS_OFFSET;
use px_solver::{expand_bracket, Brent, BracketSearch, SolverError, SolverResult};

// Hyland-Wexler coefficients over ice, T in K, p in Pa, valid -100..0 degC.
const ICE_C1: f64 = -5.674_535_9e3;
const ICE_C2: f64 = 6.392_524_7;
const ICE_C3: f64 = -9.677_843e-3;
const ICE_C4: f64 = 6.221_570_1e-7;
const ICE_C5: f64 = 2.074_782_5e-9;
const ICE_C6: f64 = -9.484_024e-13;
const ICE_C7: f64 = 4.163_501_9;

// Hyland-Wexler coefficients over liquid water, valid 0..200 degC.
const WATER_C8: f64 = -5.800_220_6e3;
const WATER_C9: f64 = 1.391_499_3;
const WATER_C10: f64 = -4.864_023_9e-2;
const WATER_C11: f64 = 4.176_476_8e-5;
const WATER_C12: f64 = -1.445_209_3e-8;
const WATER_C13: f64 = 6.545_967_3;

/// Exact Hyland-Wexler `ln(p_ws)` at a dry-bulb temperature [degC].
fn ln_saturation_pressure(t_c: f64) -> f64 {
    let t = t_c + CELSIUS_OFFSET;
    if t_c < 0.0 {
        ICE_C1 / t
            + ICE_C2
            + ICE_C3 * t
            + ICE_C4 * t * t
            + ICE_C5 * t * t * t
            + ICE_C6 * t * t * t * t
            + ICE_C7 * t.ln()
    } else {
        WATER_C8 / t
            + WATER_C9
            + WATER_C10 * t
            + WATER_C11 * t * t
            + WATER_C12 * t * t * t
            + WATER_C13 * t.ln()
    }
}

/// Arden-Buck estimate of saturation pressure [Pa], used only as a solver
/// seed. Separate fits over ice and water.
pub(crate) fn saturation_pressure_estimate(t_c: f64) -> f64 {
    if t_c < 0.0 {
        611.15 * ((23.036 - t_c / 333.7) * (t_c / (279.82 + t_c))).exp()
    } else {
        611.21 * ((18.678 - t_c / 234.5) * (t_c / (257.14 + t_c))).exp()
    }
}

/// Saturation pressure of water vapour [Pa] at a dry-bulb temperature [degC].
///
/// Domain: [-100, 200] degC, else a domain error. Monotonically increasing
/// in temperature.
pub fn saturation_pressure(t_c: f64) -> AirResult<f64> {
    validate_temperature(t_c)?;

    let target = ln_saturation_pressure(t_c);
    let mut residual = |p: f64| -> SolverResult<f64> {
        if p <= 0.0 {
            return Err(SolverError::Numeric {
                what: "trial saturation pressure must be positive",
            });
        }
        Ok(p.ln() - target)
    };

    let estimate = saturation_pressure_estimate(t_c);
    let search = BracketSearch {
        min: Some(estimate * 1e-3),
        ..BracketSearch::default()
    };
    let bracket = expand_bracket(&mut residual, estimate, &search)?;

    let mut solver = Brent::with_defaults();
    let result = solver.find_root(residual, bracket)?;
    Ok(result.root)
}

/// Inverse of the Arden-Buck fit: the temperature [degC] at which the given
/// vapour pressure [Pa] saturates. Estimate only; callers polish with the
/// exact correlation.
pub(crate) fn saturation_temperature_estimate(p_ws: f64) -> f64 {
    // Water-fit inverse first; the Buck exponent is quadratic in t, so the
    // physical root is the smaller one.
    let inverse = |es0: f64, a: f64, c: f64, d: f64| {
        let gamma = (p_ws / es0).ln();
        let k = a - gamma;
        let disc = (k * k - 4.0 * gamma * c / d).max(0.0);
        0.5 * d * (k - disc.sqrt())
    };

    let t = inverse(611.21, 18.678, 257.14, 234.5);
    if t < 0.0 {
        inverse(611.15, 23.036, 279.82, 333.7)
    } else {
        t
    }
}

/// Temperature [degC] at which `p_ws` [Pa] is the saturation pressure,
/// refined against the exact correlation.
pub(crate) fn saturation_temperature(p_ws: f64) -> AirResult<f64> {
    let mut residual =
        |t: f64| -> SolverResult<f64> { Ok(ln_saturation_pressure(t) - p_ws.ln()) };

    let estimate = saturation_temperature_estimate(p_ws).max(MIN_TEMPERATURE_C);
    let search = BracketSearch::clamped(MIN_TEMPERATURE_C, 200.0);
    let bracket = expand_bracket(&mut residual, estimate, &search)?;

    let mut solver = Brent::with_defaults();
    let result = solver.find_root(residual, bracket)?;
    Ok(result.root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ASHRAE Fundamentals table values [Pa].
    #[test]
    fn matches_reference_points() {
        assert_relative_eq!(saturation_pressure(0.0).unwrap(), 611.2, max_relative = 2e-3);
        assert_relative_eq!(
            saturation_pressure(20.0).unwrap(),
            2339.0,
            max_relative = 2e-3
        );
        assert_relative_eq!(
            saturation_pressure(50.0).unwrap(),
            12351.0,
            max_relative = 2e-3
        );
        assert_relative_eq!(
            saturation_pressure(-20.0).unwrap(),
            103.24,
            max_relative = 3e-3
        );
    }

    #[test]
    fn rejects_out_of_domain() {
        assert!(saturation_pressure(-120.0).is_err());
        assert!(saturation_pressure(220.0).is_err());
    }

    #[test]
    fn inverse_recovers_temperature() {
        for &t in &[-40.0, -5.0, 0.5, 25.0, 80.0, 150.0] {
            let p_ws = saturation_pressure(t).unwrap();
            let back = saturation_temperature(p_ws).unwrap();
            assert_relative_eq!(back, t, epsilon = 1e-6);
        }
    }
}
