//! Liquid water properties, used for condensate accounting and the wet-bulb
//! energy balance.

use crate::common::check_finite;
use crate::error::{AirError, AirResult};
use px_core::units::constants::CELSIUS_OFFSET;

/// Validated temperature range for liquid water [degC].
pub const MIN_WATER_TEMPERATURE_C: f64 = 0.0;
pub const MAX_WATER_TEMPERATURE_C: f64 = 150.0;

/// Mean specific heat of liquid water [kJ/(kg·K)], 0 degC reference.
pub const CP_WATER_MEAN: f64 = 4.186;

fn validate(t_c: f64) -> AirResult<f64> {
    check_finite(t_c, "water temperature")?;
    if !(MIN_WATER_TEMPERATURE_C..=MAX_WATER_TEMPERATURE_C).contains(&t_c) {
        return Err(AirError::OutOfRange {
            what: "liquid water temperature [degC]",
            value: t_c,
        });
    }
    Ok(t_c)
}

/// Density of liquid water [kg/m3], Kell (1975) fit at atmospheric pressure.
pub fn density(t_c: f64) -> AirResult<f64> {
    validate(t_c)?;
    let t = t_c;
    let num = 999.839_52 + 16.945_176 * t - 7.987_040_1e-3 * t * t
        - 46.170_461e-6 * t * t * t
        + 105.563_02e-9 * t * t * t * t
        - 280.542_53e-12 * t * t * t * t * t;
    Ok(num / (1.0 + 16.879_850e-3 * t))
}

/// Specific heat of liquid water [kJ/(kg·K)], polynomial fit 0..150 degC.
pub fn specific_heat(t_c: f64) -> AirResult<f64> {
    validate(t_c)?;
    let t = t_c;
    Ok(4.217_435_6 - 5.618_162_5e-3 * t + 1.299_252_8e-3 * t.powf(1.5)
        - 1.153_535_3e-4 * t * t
        + 4.149_64e-6 * t.powf(2.5))
}

/// Specific enthalpy of liquid water [kJ/kg], zero reference at 0 degC.
pub fn specific_enthalpy(t_c: f64) -> AirResult<f64> {
    validate(t_c)?;
    Ok(specific_enthalpy_unchecked(t_c))
}

/// Enthalpy without the liquid-range check. The wet-bulb energy balance
/// evaluates trial temperatures below 0 degC (supercooled water), which the
/// public function rejects.
pub(crate) fn specific_enthalpy_unchecked(t_c: f64) -> f64 {
    CP_WATER_MEAN * t_c
}

/// Dynamic viscosity of liquid water [Pa·s], Vogel equation.
pub fn dynamic_viscosity(t_c: f64) -> AirResult<f64> {
    validate(t_c)?;
    let t_k = t_c + CELSIUS_OFFSET;
    Ok(1e-3 * (-3.7188 + 578.919 / (t_k - 137.546)).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn density_reference_points() {
        assert_abs_diff_eq!(density(4.0).unwrap(), 1000.0, epsilon = 0.1);
        assert_abs_diff_eq!(density(25.0).unwrap(), 997.0, epsilon = 0.3);
        assert_abs_diff_eq!(density(80.0).unwrap(), 971.8, epsilon = 0.5);
    }

    #[test]
    fn specific_heat_reference_points() {
        assert_abs_diff_eq!(specific_heat(15.0).unwrap(), 4.186, epsilon = 0.01);
        assert_abs_diff_eq!(specific_heat(100.0).unwrap(), 4.216, epsilon = 0.02);
    }

    #[test]
    fn viscosity_reference_point() {
        // 25 degC: 0.89 mPa·s
        assert_abs_diff_eq!(dynamic_viscosity(25.0).unwrap(), 0.89e-3, epsilon = 0.01e-3);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(density(-5.0).is_err());
        assert!(specific_heat(200.0).is_err());
    }
}
