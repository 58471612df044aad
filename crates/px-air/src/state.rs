//! Immutable fluid state snapshots.
//!
//! A state is constructed from its independent properties, derives everything
//! else once, and is never mutated afterwards. Recomputation means building a
//! new state.

use crate::common::check_finite;
use crate::error::{AirError, AirResult};
use crate::{humidity, saturation, thermal, water};
use px_core::units::{celsius, kg_m3, pa, to_celsius, Density, Pressure, Temperature};
use px_core::{nearly_equal, Tolerances};

/// Moist air at a fixed pressure, dry-bulb temperature, and humidity.
///
/// All derived properties are computed at construction. The humidity
/// descriptor may be given either as relative humidity or as humidity ratio;
/// the other is derived and the two stay mutually consistent within solver
/// tolerance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoistAirState {
    pressure: Pressure,
    temperature: Temperature,
    humidity_ratio: f64,
    relative_humidity: f64,
    saturation_pressure: Pressure,
    dew_point_c: f64,
    wet_bulb_c: f64,
    density: Density,
    specific_enthalpy: f64,
    specific_heat: f64,
    dynamic_viscosity: f64,
    kinematic_viscosity: f64,
    thermal_conductivity: f64,
}

impl MoistAirState {
    /// Build a state from relative humidity [%].
    pub fn from_relative_humidity(
        pressure: Pressure,
        temperature: Temperature,
        relative_humidity: f64,
    ) -> AirResult<Self> {
        let t_c = to_celsius(temperature);
        let p_pa = pressure.value;
        let p_ws = saturation_pressure_below(p_pa, t_c)?;
        let x = humidity::humidity_ratio(relative_humidity, p_ws, p_pa)?;
        Self::build(p_pa, t_c, x, relative_humidity, p_ws)
    }

    /// Build a state from humidity ratio [kg/kg].
    pub fn from_humidity_ratio(
        pressure: Pressure,
        temperature: Temperature,
        humidity_ratio: f64,
    ) -> AirResult<Self> {
        let t_c = to_celsius(temperature);
        let p_pa = pressure.value;
        let p_ws = saturation_pressure_below(p_pa, t_c)?;
        let rh = humidity::relative_humidity(t_c, humidity_ratio, p_pa)?;
        // Round-trip invariant for unsaturated states; fog (rh > 100) has no
        // inverse through the saturation-bounded relation.
        if rh <= 100.0 {
            let x_back = humidity::humidity_ratio(rh, p_ws, p_pa)?;
            if !nearly_equal(x_back, humidity_ratio, Tolerances::default()) {
                return Err(AirError::NonPhysical {
                    what: "humidity descriptors are mutually inconsistent",
                });
            }
        }
        Self::build(p_pa, t_c, humidity_ratio, rh, p_ws)
    }

    fn build(p_pa: f64, t_c: f64, x: f64, rh: f64, p_ws: f64) -> AirResult<Self> {
        // Fog states carry rh > 100; saturation-bounded lookups use the cap.
        let rh_capped = rh.min(100.0);
        Ok(Self {
            pressure: pa(p_pa),
            temperature: celsius(t_c),
            humidity_ratio: x,
            relative_humidity: rh,
            saturation_pressure: pa(p_ws),
            dew_point_c: humidity::dew_point(t_c, rh_capped, p_pa)?,
            wet_bulb_c: humidity::wet_bulb(t_c, rh_capped, p_pa)?,
            density: kg_m3(thermal::density(t_c, x, p_pa)?),
            specific_enthalpy: thermal::specific_enthalpy(t_c, x, p_pa)?,
            specific_heat: thermal::specific_heat(t_c, x)?,
            dynamic_viscosity: thermal::dynamic_viscosity(t_c, x)?,
            kinematic_viscosity: thermal::kinematic_viscosity(t_c, x, p_pa)?,
            thermal_conductivity: thermal::thermal_conductivity(t_c, x)?,
        })
    }

    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Dry-bulb temperature [degC].
    pub fn temperature_c(&self) -> f64 {
        to_celsius(self.temperature)
    }

    /// Humidity ratio [kg water vapour / kg dry air].
    pub fn humidity_ratio(&self) -> f64 {
        self.humidity_ratio
    }

    /// Relative humidity [%]. Exceeds 100 for fog states.
    pub fn relative_humidity(&self) -> f64 {
        self.relative_humidity
    }

    pub fn saturation_pressure(&self) -> Pressure {
        self.saturation_pressure
    }

    /// Dew point [degC]; negative infinity for perfectly dry air.
    pub fn dew_point_c(&self) -> f64 {
        self.dew_point_c
    }

    /// Wet-bulb temperature [degC].
    pub fn wet_bulb_c(&self) -> f64 {
        self.wet_bulb_c
    }

    pub fn density(&self) -> Density {
        self.density
    }

    /// Specific enthalpy [kJ/kg dry air].
    pub fn specific_enthalpy(&self) -> f64 {
        self.specific_enthalpy
    }

    /// Specific heat [kJ/(kg dry air · K)].
    pub fn specific_heat(&self) -> f64 {
        self.specific_heat
    }

    /// Dynamic viscosity [Pa·s].
    pub fn dynamic_viscosity(&self) -> f64 {
        self.dynamic_viscosity
    }

    /// Kinematic viscosity [m2/s].
    pub fn kinematic_viscosity(&self) -> f64 {
        self.kinematic_viscosity
    }

    /// Thermal conductivity [W/(m·K)].
    pub fn thermal_conductivity(&self) -> f64 {
        self.thermal_conductivity
    }
}

/// Saturation pressure with the state invariant applied: it must stay below
/// the absolute pressure, otherwise the given (T, P) pair is not moist air.
fn saturation_pressure_below(p_pa: f64, t_c: f64) -> AirResult<f64> {
    let p_ws = saturation::saturation_pressure(t_c)?;
    if p_ws >= p_pa {
        return Err(AirError::NonPhysical {
            what: "saturation pressure exceeds absolute pressure",
        });
    }
    Ok(p_ws)
}

/// Liquid water at a fixed temperature; derived properties computed once.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiquidWaterState {
    temperature: Temperature,
    density: Density,
    specific_heat: f64,
    specific_enthalpy: f64,
    dynamic_viscosity: f64,
}

impl LiquidWaterState {
    pub fn new(temperature: Temperature) -> AirResult<Self> {
        let t_c = to_celsius(temperature);
        check_finite(t_c, "water temperature")?;
        Ok(Self {
            temperature,
            density: kg_m3(water::density(t_c)?),
            specific_heat: water::specific_heat(t_c)?,
            specific_enthalpy: water::specific_enthalpy(t_c)?,
            dynamic_viscosity: water::dynamic_viscosity(t_c)?,
        })
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn temperature_c(&self) -> f64 {
        to_celsius(self.temperature)
    }

    pub fn density(&self) -> Density {
        self.density
    }

    /// Specific heat [kJ/(kg·K)].
    pub fn specific_heat(&self) -> f64 {
        self.specific_heat
    }

    /// Specific enthalpy [kJ/kg], zero at 0 degC.
    pub fn specific_enthalpy(&self) -> f64 {
        self.specific_enthalpy
    }

    /// Dynamic viscosity [Pa·s].
    pub fn dynamic_viscosity(&self) -> f64 {
        self.dynamic_viscosity
    }
}
