//! Tagged fluid variant over the shared capability set
//! {density, specific heat, enthalpy}.

use crate::error::AirResult;
use crate::state::{LiquidWaterState, MoistAirState};
use crate::thermal::{CP_DRY_AIR, CP_ICE, CP_WATER_VAPOUR};
use px_core::units::constants::{
    CELSIUS_OFFSET, ICE_FUSION_HEAT, LATENT_HEAT_0C, R_DRY_AIR, R_WATER_VAPOUR,
};
use px_core::units::{kg_m3, to_celsius, Density, Pressure, Temperature};

/// Density of ice near 0 degC [kg/m3]
const ICE_DENSITY: f64 = 916.7;

/// A working fluid in one of its phases.
///
/// Moist air and liquid water carry full precomputed states; the remaining
/// variants are thin ideal-gas / constant-property phases used where only
/// the shared capability set is needed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fluid {
    DryAir {
        pressure: Pressure,
        temperature: Temperature,
    },
    MoistAir(MoistAirState),
    LiquidWater(LiquidWaterState),
    WaterVapour {
        pressure: Pressure,
        temperature: Temperature,
    },
    Ice {
        temperature: Temperature,
    },
}

impl Fluid {
    /// Density [kg/m3].
    pub fn density(&self) -> AirResult<Density> {
        match self {
            Fluid::DryAir {
                pressure,
                temperature,
            } => Ok(kg_m3(pressure.value / (R_DRY_AIR * temperature.value))),
            Fluid::MoistAir(state) => Ok(state.density()),
            Fluid::LiquidWater(state) => Ok(state.density()),
            Fluid::WaterVapour {
                pressure,
                temperature,
            } => Ok(kg_m3(pressure.value / (R_WATER_VAPOUR * temperature.value))),
            Fluid::Ice { .. } => Ok(kg_m3(ICE_DENSITY)),
        }
    }

    /// Specific heat [kJ/(kg·K)].
    pub fn specific_heat(&self) -> AirResult<f64> {
        match self {
            Fluid::DryAir { .. } => Ok(CP_DRY_AIR),
            Fluid::MoistAir(state) => Ok(state.specific_heat()),
            Fluid::LiquidWater(state) => Ok(state.specific_heat()),
            Fluid::WaterVapour { .. } => Ok(CP_WATER_VAPOUR),
            Fluid::Ice { .. } => Ok(CP_ICE),
        }
    }

    /// Specific enthalpy [kJ/kg], zero reference at 0 degC.
    pub fn specific_enthalpy(&self) -> AirResult<f64> {
        match self {
            Fluid::DryAir { temperature, .. } => Ok(CP_DRY_AIR * to_celsius(*temperature)),
            Fluid::MoistAir(state) => Ok(state.specific_enthalpy()),
            Fluid::LiquidWater(state) => Ok(state.specific_enthalpy()),
            Fluid::WaterVapour { temperature, .. } => {
                Ok(LATENT_HEAT_0C + CP_WATER_VAPOUR * to_celsius(*temperature))
            }
            Fluid::Ice { temperature } => {
                Ok(-ICE_FUSION_HEAT + CP_ICE * to_celsius(*temperature))
            }
        }
    }

    fn kelvin(&self) -> f64 {
        match self {
            Fluid::DryAir { temperature, .. }
            | Fluid::WaterVapour { temperature, .. }
            | Fluid::Ice { temperature } => temperature.value,
            Fluid::MoistAir(state) => state.temperature().value,
            Fluid::LiquidWater(state) => state.temperature().value,
        }
    }

    /// Temperature [degC].
    pub fn temperature_c(&self) -> f64 {
        self.kelvin() - CELSIUS_OFFSET
    }
}
