//! Thermophysical properties of moist air and liquid water.
//!
//! The "hard" quantities (saturation pressure, dew point at low humidity,
//! wet bulb, dry-bulb recoveries) are transcendental and solve through
//! px-solver using an estimate-then-refine pattern: a cheap closed-form
//! correlation seeds a tight bracket, Brent polishes against the exact
//! relation. Everything else is a direct correlation with domain validation
//! up front.
//!
//! Temperatures are degC, pressures Pa, humidity ratio kg water vapour per
//! kg dry air, enthalpy kJ per kg dry air.

pub mod common;
pub mod error;
pub mod flow;
pub mod fluid;
pub mod humidity;
pub mod inverse;
pub mod saturation;
pub mod state;
pub mod thermal;
pub mod water;

pub use error::{AirError, AirResult};
pub use flow::{FlowState, WaterFlowState};
pub use fluid::Fluid;
pub use humidity::{
    dew_point, humidity_ratio, max_humidity_ratio, relative_humidity, vapour_pressure, wet_bulb,
    NO_DEW_POINT,
};
pub use inverse::{
    dry_bulb_from_dew_point, dry_bulb_from_enthalpy, dry_bulb_from_rh, dry_bulb_from_wet_bulb,
};
pub use saturation::saturation_pressure;
pub use state::{LiquidWaterState, MoistAirState};
pub use thermal::{
    density, dynamic_viscosity, kinematic_viscosity, specific_enthalpy, specific_heat,
    thermal_conductivity,
};
