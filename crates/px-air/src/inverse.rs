//! Dry-bulb temperature recovered from derived quantities.
//!
//! Each recovery is a 1-D root search matching the forward property function
//! to the target value; all share the same bracket-and-refine shape (cheap
//! seed, clamped bracket expansion, Brent).

use crate::common::{
    validate_humidity_ratio, validate_pressure, validate_relative_humidity,
    MAX_TEMPERATURE_C, MIN_TEMPERATURE_C,
};
use crate::error::{AirError, AirResult};
use crate::humidity::{dew_point, humidity_ratio, vapour_pressure, wet_bulb};
use crate::saturation::{saturation_pressure, saturation_temperature_estimate};
use crate::thermal::{specific_enthalpy, CP_DRY_AIR, CP_WATER_VAPOUR};
use px_core::units::constants::LATENT_HEAT_0C;
use px_solver::{expand_bracket, Brent, BracketSearch, SolverError, SolverResult};

fn solve_for_temperature<F>(mut residual: F, seed: f64, lo: f64, hi: f64) -> AirResult<f64>
where
    F: FnMut(f64) -> SolverResult<f64>,
{
    let seed = seed.clamp(lo, hi);
    let search = BracketSearch::clamped(lo, hi);
    let bracket = expand_bracket(&mut residual, seed, &search)?;
    let mut solver = Brent::with_defaults();
    let result = solver.find_root(residual, bracket)?;
    Ok(result.root)
}

/// Dry-bulb temperature [degC] from specific enthalpy [kJ/kg dry air],
/// humidity ratio [kg/kg], and absolute pressure [Pa].
pub fn dry_bulb_from_enthalpy(h: f64, x: f64, p_pa: f64) -> AirResult<f64> {
    validate_humidity_ratio(x)?;
    validate_pressure(p_pa)?;

    // Unsaturated-regime linearization as the seed.
    let seed = (h - x * LATENT_HEAT_0C) / (CP_DRY_AIR + x * CP_WATER_VAPOUR);
    solve_for_temperature(
        |t| Ok(specific_enthalpy(t, x, p_pa).map_err(SolverError::eval)? - h),
        seed,
        MIN_TEMPERATURE_C,
        MAX_TEMPERATURE_C,
    )
}

/// Dry-bulb temperature [degC] at which the given relative humidity [%]
/// yields the given humidity ratio [kg/kg].
pub fn dry_bulb_from_rh(x: f64, rh: f64, p_pa: f64) -> AirResult<f64> {
    validate_humidity_ratio(x)?;
    validate_relative_humidity(rh)?;
    validate_pressure(p_pa)?;
    if x == 0.0 || rh == 0.0 {
        return Err(AirError::InvalidArg {
            what: "dry-bulb from humidity requires x > 0 and rh > 0",
        });
    }

    // Seed from the vapour pressure the pair implies.
    let p_v = vapour_pressure(x, p_pa)?;
    let seed = saturation_temperature_estimate(p_v / (rh / 100.0));
    solve_for_temperature(
        |t| {
            let p_ws = saturation_pressure(t).map_err(SolverError::eval)?;
            Ok(humidity_ratio(rh, p_ws, p_pa).map_err(SolverError::eval)? - x)
        },
        seed,
        MIN_TEMPERATURE_C,
        MAX_TEMPERATURE_C,
    )
}

/// Dry-bulb temperature [degC] whose dew point at the given relative
/// humidity [%] equals `tdp_c`.
pub fn dry_bulb_from_dew_point(tdp_c: f64, rh: f64, p_pa: f64) -> AirResult<f64> {
    validate_relative_humidity(rh)?;
    validate_pressure(p_pa)?;
    if rh == 0.0 {
        return Err(AirError::InvalidArg {
            what: "dew point is undefined at zero relative humidity",
        });
    }

    // Dew point never exceeds dry bulb, so the root lies at or above tdp.
    solve_for_temperature(
        |t| Ok(dew_point(t, rh, p_pa).map_err(SolverError::eval)? - tdp_c),
        tdp_c,
        tdp_c,
        MAX_TEMPERATURE_C,
    )
}

/// Dry-bulb temperature [degC] whose wet bulb at the given relative
/// humidity [%] equals `twb_c`.
pub fn dry_bulb_from_wet_bulb(twb_c: f64, rh: f64, p_pa: f64) -> AirResult<f64> {
    validate_relative_humidity(rh)?;
    validate_pressure(p_pa)?;

    solve_for_temperature(
        |t| Ok(wet_bulb(t, rh, p_pa).map_err(SolverError::eval)? - twb_c),
        twb_c,
        twb_c,
        MAX_TEMPERATURE_C,
    )
}
