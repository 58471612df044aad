//! Process calculation results.

use px_air::{FlowState, WaterFlowState};
use px_core::units::{Power, Temperature};

/// Outcome of a single heating or cooling calculation.
///
/// Constructed once as the return value and never mutated; recomputation
/// means running the process again with new inputs.
///
/// ## Sign Conventions
///
/// - `heat` is POSITIVE for heating and NEGATIVE for cooling.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// Outlet air flow
    pub outlet: FlowState,
    /// Heat of process, signed
    pub heat: Power,
    /// Condensate discharged at the coil wall temperature (cooling only)
    pub condensate: Option<WaterFlowState>,
    /// Coil bypass factor (cooling only)
    pub bypass_factor: Option<f64>,
    /// Average coil wall temperature (cooling only)
    pub wall_temperature: Option<Temperature>,
}

impl ProcessResult {
    /// A sensible-only result with no coil-side quantities.
    pub fn sensible(outlet: FlowState, heat: Power) -> Self {
        Self {
            outlet,
            heat,
            condensate: None,
            bypass_factor: None,
            wall_temperature: None,
        }
    }
}
