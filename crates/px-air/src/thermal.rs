//! Direct (non-iterative) thermophysical properties of moist air.
//!
//! All correlations run on plain `f64` in engineering units: temperature in
//! degC, pressure in Pa, humidity ratio in kg water vapour per kg dry air.
//! Enthalpy and specific heat are per kilogram of dry air [kJ/kg, kJ/(kg·K)].

use crate::common::{validate_humidity_ratio, validate_pressure, validate_temperature};
use crate::error::AirResult;
use crate::humidity::{max_humidity_ratio, vapour_pressure};
use crate::saturation::saturation_pressure;
use px_core::units::constants::{
    CELSIUS_OFFSET, ICE_FUSION_HEAT, LATENT_HEAT_0C, MW_RATIO, R_DRY_AIR,
};

/// Specific heat of dry air [kJ/(kg·K)]
pub const CP_DRY_AIR: f64 = 1.006;
/// Specific heat of water vapour [kJ/(kg·K)]
pub const CP_WATER_VAPOUR: f64 = 1.86;
/// Specific heat of liquid water used in the fog regime [kJ/(kg·K)]
pub const CP_LIQUID_WATER: f64 = 4.186;
/// Specific heat of ice used in the fog regime [kJ/(kg·K)]
pub const CP_ICE: f64 = 2.09;

/// Density of moist air [kg/m3], per unit volume of the mixture.
///
/// Ideal-gas mixture: dry-air partial density at `p - p_v` scaled by the
/// total mass carried per kilogram of dry air.
pub fn density(t_c: f64, x: f64, p_pa: f64) -> AirResult<f64> {
    validate_temperature(t_c)?;
    let p_v = vapour_pressure(x, p_pa)?;
    let t_k = t_c + CELSIUS_OFFSET;
    let rho_da = (p_pa - p_v) / (R_DRY_AIR * t_k);
    Ok(rho_da * (1.0 + x))
}

/// Sutherland-form dynamic viscosity of dry air [Pa·s].
fn dynamic_viscosity_dry_air(t_k: f64) -> f64 {
    1.458e-6 * t_k.powf(1.5) / (t_k + 110.4)
}

/// Sutherland-form dynamic viscosity of water vapour [Pa·s].
fn dynamic_viscosity_water_vapour(t_k: f64) -> f64 {
    1.12e-5 * (t_k / 350.0).powf(1.5) * (350.0 + 1064.0) / (t_k + 1064.0)
}

/// Dynamic viscosity of moist air [Pa·s], Wilke two-component mixture of the
/// dry-air and water-vapour Sutherland fits.
pub fn dynamic_viscosity(t_c: f64, x: f64) -> AirResult<f64> {
    validate_temperature(t_c)?;
    validate_humidity_ratio(x)?;

    let t_k = t_c + CELSIUS_OFFSET;
    let mu_a = dynamic_viscosity_dry_air(t_k);
    if x == 0.0 {
        return Ok(mu_a);
    }
    let mu_v = dynamic_viscosity_water_vapour(t_k);

    // Mole fractions from the humidity ratio.
    let y_v = x / (x + MW_RATIO);
    let y_a = 1.0 - y_v;

    // Wilke interaction factors; molar-mass ratio folded into MW_RATIO.
    let phi = |mu_i: f64, mu_j: f64, m_ij: f64| {
        let num = (1.0 + (mu_i / mu_j).sqrt() * m_ij.powf(0.25)).powi(2);
        num / (8.0 * (1.0 + 1.0 / m_ij)).sqrt()
    };
    let phi_av = phi(mu_a, mu_v, MW_RATIO);
    let phi_va = phi(mu_v, mu_a, 1.0 / MW_RATIO);

    Ok(y_a * mu_a / (y_a + y_v * phi_av) + y_v * mu_v / (y_v + y_a * phi_va))
}

/// Kinematic viscosity of moist air [m2/s].
pub fn kinematic_viscosity(t_c: f64, x: f64, p_pa: f64) -> AirResult<f64> {
    let mu = dynamic_viscosity(t_c, x)?;
    let rho = density(t_c, x, p_pa)?;
    Ok(mu / rho)
}

/// Thermal conductivity of moist air [W/(m·K)], mole-fraction blend of the
/// component linear fits.
pub fn thermal_conductivity(t_c: f64, x: f64) -> AirResult<f64> {
    validate_temperature(t_c)?;
    validate_humidity_ratio(x)?;

    let k_a = 0.024_1 + 7.6e-5 * t_c;
    if x == 0.0 {
        return Ok(k_a);
    }
    let k_v = 0.017_1 + 6.1e-5 * t_c;
    let y_v = x / (x + MW_RATIO);
    Ok((1.0 - y_v) * k_a + y_v * k_v)
}

/// Specific heat of moist air per kilogram of dry air [kJ/(kg·K)].
pub fn specific_heat(t_c: f64, x: f64) -> AirResult<f64> {
    validate_temperature(t_c)?;
    validate_humidity_ratio(x)?;
    Ok(CP_DRY_AIR + x * CP_WATER_VAPOUR)
}

/// Specific enthalpy of moist air per kilogram of dry air [kJ/kg], zero
/// reference at 0 degC dry air.
///
/// Branches on three physical regimes:
/// - unsaturated (`x <= x_max` at the given temperature and pressure),
/// - water fog (`x > x_max`, `t > 0`): excess moisture carried as liquid,
/// - ice fog (`x > x_max`, `t <= 0`): excess moisture carried as ice, with
///   the fusion heat subtracted.
pub fn specific_enthalpy(t_c: f64, x: f64, p_pa: f64) -> AirResult<f64> {
    validate_temperature(t_c)?;
    validate_humidity_ratio(x)?;
    validate_pressure(p_pa)?;

    let h_da = CP_DRY_AIR * t_c;
    if x == 0.0 {
        return Ok(h_da);
    }

    let p_ws = saturation_pressure(t_c)?;
    let x_max = if p_ws < p_pa {
        max_humidity_ratio(p_ws, p_pa)?
    } else {
        // Above the boiling point any humidity ratio stays vapour.
        f64::INFINITY
    };

    let h_vapour = |xv: f64| xv * (LATENT_HEAT_0C + CP_WATER_VAPOUR * t_c);

    if x <= x_max {
        return Ok(h_da + h_vapour(x));
    }
    let excess = x - x_max;
    if t_c > 0.0 {
        Ok(h_da + h_vapour(x_max) + excess * CP_LIQUID_WATER * t_c)
    } else {
        Ok(h_da + h_vapour(x_max) + excess * (-ICE_FUSION_HEAT + CP_ICE * t_c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const P_ATM: f64 = 101_325.0;

    #[test]
    fn dry_air_density_reference() {
        // Dry air at 20 degC, 1 atm: 1.2041 kg/m3.
        let rho = density(20.0, 0.0, P_ATM).unwrap();
        assert_abs_diff_eq!(rho, 1.204, epsilon = 0.004);
    }

    #[test]
    fn moist_air_is_lighter_than_dry_air() {
        let dry = density(25.0, 0.0, P_ATM).unwrap();
        let moist = density(25.0, 0.015, P_ATM).unwrap();
        assert!(moist < dry);
    }

    #[test]
    fn dry_air_viscosity_reference() {
        // Dry air at 25 degC: about 1.84e-5 Pa·s.
        let mu = dynamic_viscosity(25.0, 0.0).unwrap();
        assert_abs_diff_eq!(mu, 1.84e-5, epsilon = 2e-7);
    }

    #[test]
    fn humid_air_viscosity_below_dry() {
        let dry = dynamic_viscosity(30.0, 0.0).unwrap();
        let humid = dynamic_viscosity(30.0, 0.020).unwrap();
        assert!(humid < dry);
    }

    #[test]
    fn conductivity_reference() {
        let k = thermal_conductivity(25.0, 0.0).unwrap();
        assert_abs_diff_eq!(k, 0.026, epsilon = 0.001);
    }

    #[test]
    fn enthalpy_reference_point() {
        // 25 degC, x = 0.010: h = 1.006*25 + 0.010*(2501 + 1.86*25) = 50.625
        let h = specific_enthalpy(25.0, 0.010, P_ATM).unwrap();
        assert_relative_eq!(h, 50.625, max_relative = 1e-6);
    }

    #[test]
    fn fog_regimes_add_latent_terms() {
        let t = 20.0;
        let p_ws = saturation_pressure(t).unwrap();
        let x_max = max_humidity_ratio(p_ws, P_ATM).unwrap();

        let h_sat = specific_enthalpy(t, x_max, P_ATM).unwrap();
        let h_fog = specific_enthalpy(t, x_max + 0.005, P_ATM).unwrap();
        // Water fog: excess liquid adds sensible heat only.
        assert_relative_eq!(
            h_fog - h_sat,
            0.005 * CP_LIQUID_WATER * t,
            max_relative = 1e-9
        );

        // Ice fog at -10 degC: excess carries negative fusion heat.
        let t = -10.0;
        let p_ws = saturation_pressure(t).unwrap();
        let x_max = max_humidity_ratio(p_ws, P_ATM).unwrap();
        let h_sat = specific_enthalpy(t, x_max, P_ATM).unwrap();
        let h_fog = specific_enthalpy(t, x_max + 0.002, P_ATM).unwrap();
        assert!(h_fog < h_sat);
    }

    #[test]
    fn rejects_negative_humidity_ratio() {
        assert!(specific_enthalpy(20.0, -0.001, P_ATM).is_err());
        assert!(density(20.0, -0.001, P_ATM).is_err());
    }
}
