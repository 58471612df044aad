//! Sensible heating processes.
//!
//! Heating conserves the humidity ratio; only the dry-bulb temperature and
//! the quantities derived from it change. All three modes reduce to the same
//! energy balance `q = m_da * (h_out - h_in)`.

use crate::error::{ProcessError, ProcessResultOf};
use crate::result::ProcessResult;
use px_air::{dry_bulb_from_enthalpy, dry_bulb_from_rh, FlowState, MoistAirState};
use px_core::units::{celsius, to_celsius, watts, Power, Temperature};

fn validate_flow(inlet: &FlowState) -> ProcessResultOf<()> {
    if inlet.dry_air_flow().value <= 0.0 {
        return Err(ProcessError::InvalidArg {
            what: "air mass flow must be positive",
        });
    }
    Ok(())
}

fn outlet_at(inlet: &FlowState, t_out_c: f64) -> ProcessResultOf<ProcessResult> {
    let state = inlet.state();
    let outlet_state = MoistAirState::from_humidity_ratio(
        state.pressure(),
        celsius(t_out_c),
        state.humidity_ratio(),
    )?;
    let heat_kw =
        inlet.dry_air_flow().value * (outlet_state.specific_enthalpy() - state.specific_enthalpy());
    let outlet = FlowState::from_dry_air_flow(outlet_state, inlet.dry_air_flow())?;
    Ok(ProcessResult::sensible(outlet, watts(heat_kw * 1e3)))
}

/// Heat with a given power [W, non-negative].
pub fn from_power(inlet: &FlowState, power: Power) -> ProcessResultOf<ProcessResult> {
    validate_flow(inlet)?;
    if power.value < 0.0 {
        return Err(ProcessError::Infeasible {
            what: "heating power must be non-negative",
        });
    }
    if power.value == 0.0 {
        return outlet_at(inlet, inlet.state().temperature_c());
    }

    let state = inlet.state();
    let h_out =
        state.specific_enthalpy() + power.value / 1e3 / inlet.dry_air_flow().value;
    let t_out = dry_bulb_from_enthalpy(h_out, state.humidity_ratio(), state.pressure().value)?;
    outlet_at(inlet, t_out)
}

/// Heat to a target outlet temperature.
pub fn to_temperature(inlet: &FlowState, target: Temperature) -> ProcessResultOf<ProcessResult> {
    validate_flow(inlet)?;
    let t_out = to_celsius(target);
    if t_out < inlet.state().temperature_c() {
        return Err(ProcessError::Infeasible {
            what: "heating cannot lower the outlet temperature",
        });
    }
    outlet_at(inlet, t_out)
}

/// Heat until the relative humidity drops to a target [%].
pub fn to_relative_humidity(inlet: &FlowState, target_rh: f64) -> ProcessResultOf<ProcessResult> {
    validate_flow(inlet)?;
    if !(0.0..=100.0).contains(&target_rh) || target_rh == 0.0 {
        return Err(ProcessError::InvalidArg {
            what: "target relative humidity must lie in (0, 100] %",
        });
    }
    let state = inlet.state();
    let rh_in = state.relative_humidity();
    if target_rh > rh_in {
        return Err(ProcessError::Infeasible {
            what: "heating cannot raise relative humidity",
        });
    }
    if target_rh == rh_in {
        return outlet_at(inlet, state.temperature_c());
    }

    let t_out = dry_bulb_from_rh(state.humidity_ratio(), target_rh, state.pressure().value)?;
    outlet_at(inlet, t_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use px_core::units::{kgps, pa};

    fn inlet() -> FlowState {
        let state =
            MoistAirState::from_relative_humidity(pa(101_325.0), celsius(15.0), 60.0).unwrap();
        FlowState::from_dry_air_flow(state, kgps(1.5)).unwrap()
    }

    #[test]
    fn humidity_ratio_is_conserved_in_all_modes() {
        let x_in = inlet().state().humidity_ratio();

        let by_temp = to_temperature(&inlet(), celsius(35.0)).unwrap();
        assert_relative_eq!(by_temp.outlet.state().humidity_ratio(), x_in, epsilon = 1e-15);

        let by_power = from_power(&inlet(), watts(20_000.0)).unwrap();
        assert_relative_eq!(by_power.outlet.state().humidity_ratio(), x_in, epsilon = 1e-15);

        let by_rh = to_relative_humidity(&inlet(), 30.0).unwrap();
        assert_relative_eq!(by_rh.outlet.state().humidity_ratio(), x_in, epsilon = 1e-15);
    }

    #[test]
    fn power_and_temperature_modes_agree() {
        let by_temp = to_temperature(&inlet(), celsius(40.0)).unwrap();
        let by_power = from_power(&inlet(), by_temp.heat).unwrap();
        assert_abs_diff_eq!(
            by_power.outlet.state().temperature_c(),
            40.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn rh_mode_lands_on_target() {
        let result = to_relative_humidity(&inlet(), 25.0).unwrap();
        assert_abs_diff_eq!(result.outlet.state().relative_humidity(), 25.0, epsilon = 1e-6);
        assert!(result.outlet.state().temperature_c() > 15.0);
        assert!(result.heat.value > 0.0);
    }

    #[test]
    fn heating_cannot_raise_rh() {
        let err = to_relative_humidity(&inlet(), 80.0).unwrap_err();
        assert!(matches!(err, ProcessError::Infeasible { .. }));
    }

    #[test]
    fn heating_cannot_lower_temperature() {
        let err = to_temperature(&inlet(), celsius(5.0)).unwrap_err();
        assert!(matches!(err, ProcessError::Infeasible { .. }));
    }

    #[test]
    fn negative_power_is_infeasible() {
        let err = from_power(&inlet(), watts(-100.0)).unwrap_err();
        assert!(matches!(err, ProcessError::Infeasible { .. }));
    }

    #[test]
    fn zero_power_is_a_no_op() {
        let result = from_power(&inlet(), watts(0.0)).unwrap();
        assert_abs_diff_eq!(result.outlet.state().temperature_c(), 15.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.heat.value, 0.0, epsilon = 1e-9);
    }
}
