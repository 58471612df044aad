//! Shared input validation helpers for property functions.

use crate::error::{AirError, AirResult};
use px_core::ensure_finite;

/// Lowest absolute pressure the correlations are evaluated at [Pa].
pub const MIN_PRESSURE_PA: f64 = 10_000.0;

/// Validated dry-bulb temperature range [degC].
pub const MIN_TEMPERATURE_C: f64 = -100.0;
pub const MAX_TEMPERATURE_C: f64 = 200.0;

pub fn check_finite(v: f64, what: &'static str) -> AirResult<f64> {
    ensure_finite(v, what).map_err(|_| AirError::NonPhysical { what })
}

/// Dry-bulb temperature must lie inside the correlation domain.
pub fn validate_temperature(t_c: f64) -> AirResult<f64> {
    check_finite(t_c, "temperature")?;
    if !(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&t_c) {
        return Err(AirError::OutOfRange {
            what: "dry-bulb temperature [degC]",
            value: t_c,
        });
    }
    Ok(t_c)
}

/// Absolute pressure must sit above the configured floor.
pub fn validate_pressure(p_pa: f64) -> AirResult<f64> {
    check_finite(p_pa, "pressure")?;
    if p_pa <= MIN_PRESSURE_PA {
        return Err(AirError::OutOfRange {
            what: "absolute pressure [Pa]",
            value: p_pa,
        });
    }
    Ok(p_pa)
}

/// Relative humidity in percent, [0, 100].
pub fn validate_relative_humidity(rh: f64) -> AirResult<f64> {
    check_finite(rh, "relative humidity")?;
    if !(0.0..=100.0).contains(&rh) {
        return Err(AirError::OutOfRange {
            what: "relative humidity [%]",
            value: rh,
        });
    }
    Ok(rh)
}

/// Humidity ratio must be non-negative.
pub fn validate_humidity_ratio(x: f64) -> AirResult<f64> {
    check_finite(x, "humidity ratio")?;
    if x < 0.0 {
        return Err(AirError::NonPhysical {
            what: "humidity ratio must be non-negative",
        });
    }
    Ok(x)
}
