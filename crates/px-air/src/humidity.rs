//! Humidity ratio, relative humidity, dew point, and wet bulb.
//!
//! Dew point and wet bulb have no closed-form expression against the exact
//! saturation correlation; both follow the estimate-then-refine pattern
//! (explicit Arden-Buck inverse / Stull polynomial as the seed, Brent against
//! the defining relation as the refinement).

use crate::common::{
    validate_humidity_ratio, validate_pressure, validate_relative_humidity,
    validate_temperature, MIN_TEMPERATURE_C,
};
use crate::error::{AirError, AirResult};
use crate::saturation::{
    saturation_pressure, saturation_temperature, saturation_temperature_estimate,
};
use crate::thermal::specific_enthalpy;
use crate::water;
use px_core::units::constants::MW_RATIO;
use px_solver::{expand_bracket, Brent, BrentConfig, BracketSearch, SolverError, SolverResult};

/// Sentinel returned by [`dew_point`] for perfectly dry air: there is no
/// temperature at which it saturates.
pub const NO_DEW_POINT: f64 = f64::NEG_INFINITY;

/// Partial pressure of water vapour [Pa] for a humidity ratio at total
/// pressure `p_pa`.
pub fn vapour_pressure(x: f64, p_pa: f64) -> AirResult<f64> {
    validate_humidity_ratio(x)?;
    validate_pressure(p_pa)?;
    Ok(x * p_pa / (MW_RATIO + x))
}

/// Humidity ratio [kg/kg] from relative humidity [%], saturation pressure
/// [Pa], and absolute pressure [Pa].
pub fn humidity_ratio(rh: f64, p_ws: f64, p_pa: f64) -> AirResult<f64> {
    validate_relative_humidity(rh)?;
    validate_pressure(p_pa)?;
    let p_v = rh / 100.0 * p_ws;
    if p_v >= p_pa {
        return Err(AirError::NonPhysical {
            what: "vapour pressure must stay below absolute pressure",
        });
    }
    Ok(MW_RATIO * p_v / (p_pa - p_v))
}

/// Humidity ratio at saturation [kg/kg] for a saturation pressure [Pa] and
/// absolute pressure [Pa].
pub fn max_humidity_ratio(p_ws: f64, p_pa: f64) -> AirResult<f64> {
    humidity_ratio(100.0, p_ws, p_pa)
}

/// Relative humidity [%] from dry-bulb temperature [degC], humidity ratio
/// [kg/kg], and absolute pressure [Pa].
pub fn relative_humidity(t_c: f64, x: f64, p_pa: f64) -> AirResult<f64> {
    let p_v = vapour_pressure(x, p_pa)?;
    let p_ws = saturation_pressure(t_c)?;
    Ok(100.0 * p_v / p_ws)
}

/// Dew point temperature [degC].
///
/// - `rh >= 100` returns the dry-bulb temperature unchanged.
/// - `rh == 0` returns [`NO_DEW_POINT`].
/// - `rh >= 25` inverts the Arden-Buck fit explicitly and polishes against
///   the exact saturation correlation.
/// - `rh < 25` is ill-conditioned for the explicit inverse; it instead
///   solves for the temperature whose saturation humidity ratio equals the
///   actual humidity ratio, with tolerance tightening as `rh -> 0`.
pub fn dew_point(t_c: f64, rh: f64, p_pa: f64) -> AirResult<f64> {
    validate_temperature(t_c)?;
    validate_relative_humidity(rh)?;
    validate_pressure(p_pa)?;

    if rh >= 100.0 {
        return Ok(t_c);
    }
    if rh == 0.0 {
        return Ok(NO_DEW_POINT);
    }

    let p_ws = saturation_pressure(t_c)?;
    let p_v = rh / 100.0 * p_ws;

    if rh >= 25.0 {
        // Explicit Buck inverse seed, polished against pws(tdp) = pv.
        return saturation_temperature(p_v);
    }

    // Low-RH branch: match saturation humidity ratio to the actual one.
    let x_target = humidity_ratio(rh, p_ws, p_pa)?;
    let mut residual = |tdp: f64| -> SolverResult<f64> {
        let p = saturation_pressure(tdp).map_err(SolverError::eval)?;
        let x_sat = max_humidity_ratio(p, p_pa).map_err(SolverError::eval)?;
        Ok(x_sat - x_target)
    };
    let estimate = saturation_temperature_estimate(p_v).clamp(MIN_TEMPERATURE_C, t_c);
    let search = BracketSearch::clamped(MIN_TEMPERATURE_C, t_c);
    let bracket = expand_bracket(&mut residual, estimate, &search)?;
    let config = BrentConfig {
        tolerance: (x_target * 1e-6).max(1e-15),
        ..BrentConfig::default()
    };
    let mut solver = Brent::new(config);
    let result = solver.find_root(residual, bracket)?;
    Ok(result.root)
}

/// Stull (2011) empirical wet-bulb fit [degC], used as the solver seed.
fn wet_bulb_estimate(t_c: f64, rh: f64) -> f64 {
    t_c * (0.151_977 * (rh + 8.313_659).sqrt()).atan() + (t_c + rh).atan()
        - (rh - 1.676_331).atan()
        + 0.003_918_38 * rh.powf(1.5) * (0.023_101 * rh).atan()
        - 4.686_035
}

/// Wet-bulb temperature [degC], always solved iteratively against the
/// adiabatic-saturation energy balance
///
/// ```text
/// h(t, x) + (x_sat(twb) - x) * h_water(twb) = h_sat(twb, x_sat(twb))
/// ```
///
/// seeded by the Stull polynomial. `rh >= 100` returns the dry-bulb
/// temperature unchanged.
pub fn wet_bulb(t_c: f64, rh: f64, p_pa: f64) -> AirResult<f64> {
    validate_temperature(t_c)?;
    validate_relative_humidity(rh)?;
    validate_pressure(p_pa)?;

    if rh >= 100.0 {
        return Ok(t_c);
    }

    let p_ws = saturation_pressure(t_c)?;
    let x = humidity_ratio(rh, p_ws, p_pa)?;
    let h_inlet = specific_enthalpy(t_c, x, p_pa)?;

    let mut residual = |twb: f64| -> SolverResult<f64> {
        let p_ws_wb = saturation_pressure(twb).map_err(SolverError::eval)?;
        let x_sat = max_humidity_ratio(p_ws_wb, p_pa).map_err(SolverError::eval)?;
        let h_sat = specific_enthalpy(twb, x_sat, p_pa).map_err(SolverError::eval)?;
        Ok(h_inlet + (x_sat - x) * water::specific_enthalpy_unchecked(twb) - h_sat)
    };

    let estimate = wet_bulb_estimate(t_c, rh).clamp(MIN_TEMPERATURE_C, t_c);
    let search = BracketSearch::clamped(MIN_TEMPERATURE_C, t_c);
    let bracket = expand_bracket(&mut residual, estimate, &search)?;
    let mut solver = Brent::with_defaults();
    let result = solver.find_root(residual, bracket)?;
    Ok(result.root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const P_ATM: f64 = 101_325.0;

    #[test]
    fn humidity_ratio_reference_point() {
        // 25 degC, 50 % RH, 1 atm: x close to 0.00987 kg/kg.
        let p_ws = saturation_pressure(25.0).unwrap();
        let x = humidity_ratio(50.0, p_ws, P_ATM).unwrap();
        assert_relative_eq!(x, 0.009_87, max_relative = 5e-3);
    }

    #[test]
    fn zero_rh_has_zero_humidity_and_no_dew_point() {
        let p_ws = saturation_pressure(20.0).unwrap();
        assert_eq!(humidity_ratio(0.0, p_ws, P_ATM).unwrap(), 0.0);
        assert_eq!(dew_point(20.0, 0.0, P_ATM).unwrap(), NO_DEW_POINT);
    }

    #[test]
    fn saturated_air_dew_point_is_dry_bulb() {
        assert_eq!(dew_point(20.0, 100.0, P_ATM).unwrap(), 20.0);
        assert_eq!(wet_bulb(20.0, 100.0, P_ATM).unwrap(), 20.0);
    }

    #[test]
    fn dew_point_reference_point() {
        // 25 degC, 50 % RH: dew point near 13.9 degC.
        let tdp = dew_point(25.0, 50.0, P_ATM).unwrap();
        assert_abs_diff_eq!(tdp, 13.86, epsilon = 0.1);
    }

    #[test]
    fn dew_point_satisfies_defining_relation() {
        for &(t, rh) in &[(30.0, 70.0), (10.0, 40.0), (25.0, 10.0), (40.0, 3.0)] {
            let tdp = dew_point(t, rh, P_ATM).unwrap();
            let p_v = rh / 100.0 * saturation_pressure(t).unwrap();
            let p_ws_dp = saturation_pressure(tdp).unwrap();
            assert_relative_eq!(p_ws_dp, p_v, max_relative = 1e-4);
        }
    }

    #[test]
    fn wet_bulb_between_dew_point_and_dry_bulb() {
        let t = 30.0;
        let rh = 40.0;
        let twb = wet_bulb(t, rh, P_ATM).unwrap();
        let tdp = dew_point(t, rh, P_ATM).unwrap();
        assert!(tdp < twb && twb < t, "tdp={tdp} twb={twb} t={t}");
    }

    #[test]
    fn wet_bulb_reference_point() {
        // 25 degC, 50 % RH, 1 atm: psychrometric chart gives about 17.9 degC.
        let twb = wet_bulb(25.0, 50.0, P_ATM).unwrap();
        assert_abs_diff_eq!(twb, 17.9, epsilon = 0.4);
    }

    #[test]
    fn rejects_vapour_pressure_above_total_pressure() {
        // RH*pws above total pressure is non-physical.
        let err = humidity_ratio(100.0, 120_000.0, 101_325.0).unwrap_err();
        assert!(matches!(err, AirError::NonPhysical { .. }));
    }
}
