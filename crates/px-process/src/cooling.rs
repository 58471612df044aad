//! Cooling process entry points.
//!
//! Thin orchestration over the coil model: feasibility is validated here in
//! terms of the process direction, then the matching coil mode runs. The
//! "to temperature" mode is closed form; the other two solve for the outlet
//! temperature.

use crate::coil::{self, Coolant};
use crate::error::ProcessResultOf;
use crate::result::ProcessResult;
use px_air::FlowState;
use px_core::units::{Power, Temperature};

/// Cool to a target outlet temperature.
pub fn to_temperature(
    inlet: &FlowState,
    coolant: &Coolant,
    target: Temperature,
) -> ProcessResultOf<ProcessResult> {
    coil::cool_to_temperature(inlet, coolant, target)
}

/// Cool until the outlet relative humidity reaches a target [%].
pub fn to_relative_humidity(
    inlet: &FlowState,
    coolant: &Coolant,
    target_rh: f64,
) -> ProcessResultOf<ProcessResult> {
    coil::cool_to_relative_humidity(inlet, coolant, target_rh)
}

/// Cool by a target heat load [W, negative].
pub fn from_heat_load(
    inlet: &FlowState,
    coolant: &Coolant,
    load: Power,
) -> ProcessResultOf<ProcessResult> {
    coil::cool_to_heat_load(inlet, coolant, load)
}
