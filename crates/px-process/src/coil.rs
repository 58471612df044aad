//! Real (non-ideal) cooling-coil model, bypass-factor formulation.
//!
//! ## Model
//!
//! The coil is treated as a weighted mixture of air that contacts the coil
//! surface at an average wall temperature (arithmetic mean of the coolant
//! supply and return temperatures) and air that bypasses the coil untouched:
//!
//! ```text
//! BF      = (t_out - t_wall) / (t_in - t_wall)
//! direct  = (1 - BF) * dry_air_flow
//! bypass  = BF * dry_air_flow
//! ```
//!
//! Contact air leaves at the wall temperature; if the wall sits below the
//! inlet dew point it also saturates there, and the moisture difference is
//! discharged as condensate at the wall temperature. The outlet humidity
//! ratio is the flow-weighted blend of the two streams.
//!
//! ## Sign Conventions
//!
//! - Heat of process is NEGATIVE (heat removed from the air stream).

use crate::error::{ProcessError, ProcessResultOf};
use crate::result::ProcessResult;
use px_air::{
    max_humidity_ratio, relative_humidity, saturation_pressure, specific_enthalpy, water,
    FlowState, LiquidWaterState, MoistAirState, WaterFlowState,
};
use px_core::units::{celsius, kgps, to_celsius, watts, Power, Temperature};
use px_solver::{Bracket, Brent, BrentConfig, SolverError, SolverResult};
use tracing::debug;

/// Outlet relative humidity above which the solve mode is replaced by the
/// wall-temperature limiting case: reaching it exactly would require
/// unbounded coil area.
const RH_SOLVE_LIMIT: f64 = 99.0;

/// Coolant supply/return temperature pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coolant {
    supply: Temperature,
    ret: Temperature,
}

impl Coolant {
    /// # Errors
    /// Returns an error when the return temperature is below the supply
    /// temperature (a cooling coil warms its coolant).
    pub fn new(supply: Temperature, ret: Temperature) -> ProcessResultOf<Self> {
        if to_celsius(ret) < to_celsius(supply) {
            return Err(ProcessError::InvalidArg {
                what: "coolant return temperature must not be below supply",
            });
        }
        Ok(Self { supply, ret })
    }

    pub fn supply(&self) -> Temperature {
        self.supply
    }

    pub fn return_temperature(&self) -> Temperature {
        self.ret
    }

    /// Average coil wall temperature [degC].
    pub fn wall_temperature_c(&self) -> f64 {
        0.5 * (to_celsius(self.supply) + to_celsius(self.ret))
    }
}

/// One fully evaluated coil balance at a fixed outlet temperature.
struct CoilBalance {
    outlet_humidity_ratio: f64,
    heat_kw: f64,
    condensate_kgps: f64,
    bypass_factor: f64,
}

fn balance(inlet: &FlowState, t_wall_c: f64, t_out_c: f64) -> ProcessResultOf<CoilBalance> {
    let state = inlet.state();
    let t_in = state.temperature_c();
    let p_pa = state.pressure().value;
    let x_in = state.humidity_ratio();
    let m_da = inlet.dry_air_flow().value;

    let bf = if t_in == t_wall_c {
        1.0
    } else {
        (t_out_c - t_wall_c) / (t_in - t_wall_c)
    };
    let direct = (1.0 - bf) * m_da;
    let bypass = bf * m_da;

    // Dry wall keeps the contact-air moisture; a wall below the inlet dew
    // point saturates the contact air and sheds the difference.
    let (x_wall, condensate_kgps) = if t_wall_c >= state.dew_point_c() {
        (x_in, 0.0)
    } else {
        let p_ws_wall = saturation_pressure(t_wall_c)?;
        let x_wall = max_humidity_ratio(p_ws_wall, p_pa)?;
        (x_wall, direct * (x_in - x_wall))
    };

    let outlet_humidity_ratio = (direct * x_wall + bypass * x_in) / m_da;

    let h_in = state.specific_enthalpy();
    let h_wall = specific_enthalpy(t_wall_c, x_wall, p_pa)?;
    let mut heat_kw = direct * (h_wall - h_in);
    if condensate_kgps > 0.0 {
        heat_kw += condensate_kgps * water::specific_enthalpy(t_wall_c)?;
    }

    Ok(CoilBalance {
        outlet_humidity_ratio,
        heat_kw,
        condensate_kgps,
        bypass_factor: bf,
    })
}

fn assemble(
    inlet: &FlowState,
    t_wall_c: f64,
    t_out_c: f64,
    bal: CoilBalance,
) -> ProcessResultOf<ProcessResult> {
    let state = inlet.state();
    let outlet_state = MoistAirState::from_humidity_ratio(
        state.pressure(),
        celsius(t_out_c),
        bal.outlet_humidity_ratio,
    )?;
    let outlet = FlowState::from_dry_air_flow(outlet_state, inlet.dry_air_flow())?;

    let condensate = if bal.condensate_kgps > 0.0 {
        Some(WaterFlowState::new(
            LiquidWaterState::new(celsius(t_wall_c))?,
            kgps(bal.condensate_kgps),
        )?)
    } else {
        None
    };

    Ok(ProcessResult {
        outlet,
        heat: watts(bal.heat_kw * 1e3),
        condensate,
        bypass_factor: Some(bal.bypass_factor),
        wall_temperature: Some(celsius(t_wall_c)),
    })
}

fn validate_inlet(inlet: &FlowState, t_wall_c: f64) -> ProcessResultOf<f64> {
    if inlet.dry_air_flow().value <= 0.0 {
        return Err(ProcessError::InvalidArg {
            what: "air mass flow must be positive",
        });
    }
    let t_in = inlet.state().temperature_c();
    if t_wall_c >= t_in {
        return Err(ProcessError::Infeasible {
            what: "coil wall temperature must lie below the inlet temperature",
        });
    }
    Ok(t_in)
}

/// Mode 1: cool to a target outlet temperature. Closed form, no solver.
pub fn cool_to_temperature(
    inlet: &FlowState,
    coolant: &Coolant,
    target: Temperature,
) -> ProcessResultOf<ProcessResult> {
    let t_wall = coolant.wall_temperature_c();
    let t_in = validate_inlet(inlet, t_wall)?;
    let t_out = to_celsius(target);

    if t_out > t_in {
        return Err(ProcessError::Infeasible {
            what: "cooling cannot raise the outlet temperature",
        });
    }
    if t_out < t_wall {
        return Err(ProcessError::Infeasible {
            what: "outlet temperature cannot fall below the coil wall temperature",
        });
    }

    let bal = balance(inlet, t_wall, t_out)?;
    assemble(inlet, t_wall, t_out, bal)
}

/// Mode 2: cool until the outlet relative humidity reaches a target [%].
///
/// The outlet temperature is unknown; each trial recomputes the full coil
/// balance. Targets above [`RH_SOLVE_LIMIT`] use the wall temperature as the
/// outlet temperature directly.
pub fn cool_to_relative_humidity(
    inlet: &FlowState,
    coolant: &Coolant,
    target_rh: f64,
) -> ProcessResultOf<ProcessResult> {
    let t_wall = coolant.wall_temperature_c();
    let t_in = validate_inlet(inlet, t_wall)?;

    if !(0.0..=100.0).contains(&target_rh) {
        return Err(ProcessError::InvalidArg {
            what: "target relative humidity must lie in [0, 100] %",
        });
    }
    let rh_in = inlet.state().relative_humidity();
    if target_rh < rh_in {
        return Err(ProcessError::Infeasible {
            what: "cooling cannot reduce relative humidity",
        });
    }
    if target_rh == rh_in {
        let bal = balance(inlet, t_wall, t_in)?;
        return assemble(inlet, t_wall, t_in, bal);
    }

    if target_rh > RH_SOLVE_LIMIT {
        // Limiting-case policy: the solve mode degenerates to the coldest
        // reachable outlet state.
        debug!(
            target_rh,
            t_wall, "target RH above solve limit, pinning outlet to wall temperature"
        );
        let bal = balance(inlet, t_wall, t_wall)?;
        return assemble(inlet, t_wall, t_wall, bal);
    }

    // Capacity limit: the coldest reachable outlet state bounds the outlet
    // RH. A dry wall conserves moisture, so the cap sits well below 100 %.
    let p_pa = inlet.state().pressure().value;
    let coldest = balance(inlet, t_wall, t_wall)?;
    let rh_limit = relative_humidity(t_wall, coldest.outlet_humidity_ratio, p_pa)?;
    if target_rh > rh_limit {
        return Err(ProcessError::Infeasible {
            what: "target relative humidity exceeds the reachable outlet humidity at the wall temperature",
        });
    }

    let residual = |t_out: f64| -> SolverResult<f64> {
        let bal = balance(inlet, t_wall, t_out).map_err(SolverError::eval)?;
        let rh = relative_humidity(t_out, bal.outlet_humidity_ratio, p_pa)
            .map_err(SolverError::eval)?;
        Ok(rh - target_rh)
    };

    let config = BrentConfig {
        tolerance: 1e-9,
        ..BrentConfig::default()
    };
    let mut solver = Brent::new(config);
    let root = solver
        .find_root(residual, Bracket::new(t_wall, t_in))?
        .root;

    let bal = balance(inlet, t_wall, root)?;
    assemble(inlet, t_wall, root, bal)
}

/// Mode 3: cool by a target heat load (negative, watts).
pub fn cool_to_heat_load(
    inlet: &FlowState,
    coolant: &Coolant,
    load: Power,
) -> ProcessResultOf<ProcessResult> {
    let t_wall = coolant.wall_temperature_c();
    let t_in = validate_inlet(inlet, t_wall)?;
    let target_kw = load.value / 1e3;

    if target_kw > 0.0 {
        return Err(ProcessError::Infeasible {
            what: "a cooling heat load must not be positive",
        });
    }
    if target_kw == 0.0 {
        let bal = balance(inlet, t_wall, t_in)?;
        return assemble(inlet, t_wall, t_in, bal);
    }

    // Capacity limit at the wall temperature.
    let max_cooling_kw = balance(inlet, t_wall, t_wall)?.heat_kw;
    if target_kw < max_cooling_kw {
        return Err(ProcessError::Infeasible {
            what: "requested cooling load exceeds coil capacity at the wall temperature",
        });
    }

    let residual = |t_out: f64| -> SolverResult<f64> {
        let bal = balance(inlet, t_wall, t_out).map_err(SolverError::eval)?;
        Ok(bal.heat_kw - target_kw)
    };

    let config = BrentConfig {
        tolerance: 1e-9,
        ..BrentConfig::default()
    };
    let mut solver = Brent::new(config);
    let root = solver
        .find_root(residual, Bracket::new(t_wall, t_in))?
        .root;

    let bal = balance(inlet, t_wall, root)?;
    assemble(inlet, t_wall, root, bal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use px_core::units::pa;

    fn inlet() -> FlowState {
        let state =
            MoistAirState::from_relative_humidity(pa(100_000.0), celsius(34.0), 40.0).unwrap();
        FlowState::from_moist_air_flow(state, kgps(1.0)).unwrap()
    }

    fn coolant() -> Coolant {
        Coolant::new(celsius(9.0), celsius(14.0)).unwrap()
    }

    #[test]
    fn wall_temperature_is_coolant_mean() {
        assert_abs_diff_eq!(coolant().wall_temperature_c(), 11.5, epsilon = 1e-12);
    }

    #[test]
    fn bypass_factor_matches_definition() {
        let result = cool_to_temperature(&inlet(), &coolant(), celsius(17.0)).unwrap();
        let bf = result.bypass_factor.unwrap();
        assert_relative_eq!(bf, (17.0 - 11.5) / (34.0 - 11.5), epsilon = 1e-12);
    }

    #[test]
    fn dry_wall_produces_no_condensate() {
        // Wall above the inlet dew point (about 18.6 degC here is the dew
        // point, so use warm coolant).
        let warm = Coolant::new(celsius(20.0), celsius(24.0)).unwrap();
        let result = cool_to_temperature(&inlet(), &warm, celsius(28.0)).unwrap();
        assert!(result.condensate.is_none());
        assert_relative_eq!(
            result.outlet.state().humidity_ratio(),
            inlet().state().humidity_ratio(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn wet_wall_condenses_and_dehumidifies() {
        let result = cool_to_temperature(&inlet(), &coolant(), celsius(17.0)).unwrap();
        let condensate = result.condensate.as_ref().unwrap();
        assert!(condensate.mass_flow().value > 0.0);
        assert_abs_diff_eq!(condensate.state().temperature_c(), 11.5, epsilon = 1e-9);
        assert!(result.outlet.state().humidity_ratio() < inlet().state().humidity_ratio());
        assert!(result.heat.value < 0.0);
    }

    #[test]
    fn rejects_temperature_rise() {
        let err = cool_to_temperature(&inlet(), &coolant(), celsius(40.0)).unwrap_err();
        assert!(matches!(err, ProcessError::Infeasible { .. }));
    }

    #[test]
    fn rejects_target_below_wall() {
        let err = cool_to_temperature(&inlet(), &coolant(), celsius(10.0)).unwrap_err();
        assert!(matches!(err, ProcessError::Infeasible { .. }));
    }

    #[test]
    fn rh_target_below_inlet_is_infeasible() {
        let err = cool_to_relative_humidity(&inlet(), &coolant(), 30.0).unwrap_err();
        assert!(matches!(err, ProcessError::Infeasible { .. }));
    }

    #[test]
    fn rh_mode_hits_target() {
        let result = cool_to_relative_humidity(&inlet(), &coolant(), 70.0).unwrap();
        assert_abs_diff_eq!(result.outlet.state().relative_humidity(), 70.0, epsilon = 1e-6);
        let t_out = result.outlet.state().temperature_c();
        assert!(11.5 < t_out && t_out < 34.0);
    }

    #[test]
    fn dry_wall_caps_the_reachable_rh_target() {
        // 34 degC / 10 % RH against a 20 degC wall: the wall stays dry, so
        // the outlet RH tops out where the conserved moisture lands at the
        // wall temperature (about 23 % here).
        let state =
            MoistAirState::from_relative_humidity(pa(100_000.0), celsius(34.0), 10.0).unwrap();
        let dry = FlowState::from_moist_air_flow(state, kgps(1.0)).unwrap();
        let warm = Coolant::new(celsius(18.0), celsius(22.0)).unwrap();

        let err = cool_to_relative_humidity(&dry, &warm, 60.0).unwrap_err();
        assert!(matches!(err, ProcessError::Infeasible { .. }));

        // A target inside the cap still solves.
        let result = cool_to_relative_humidity(&dry, &warm, 18.0).unwrap();
        assert_abs_diff_eq!(
            result.outlet.state().relative_humidity(),
            18.0,
            epsilon = 1e-6
        );
        assert!(result.condensate.is_none());
    }

    #[test]
    fn rh_above_limit_pins_outlet_to_wall() {
        let result = cool_to_relative_humidity(&inlet(), &coolant(), 99.5).unwrap();
        assert_abs_diff_eq!(
            result.outlet.state().temperature_c(),
            11.5,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(result.bypass_factor.unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn heat_load_mode_matches_temperature_mode() {
        let by_temp = cool_to_temperature(&inlet(), &coolant(), celsius(20.0)).unwrap();
        let by_load = cool_to_heat_load(&inlet(), &coolant(), by_temp.heat).unwrap();
        assert_abs_diff_eq!(
            by_load.outlet.state().temperature_c(),
            20.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn positive_heat_load_is_infeasible() {
        let err = cool_to_heat_load(&inlet(), &coolant(), watts(1_000.0)).unwrap_err();
        assert!(matches!(err, ProcessError::Infeasible { .. }));
    }

    #[test]
    fn excessive_load_is_infeasible() {
        let err = cool_to_heat_load(&inlet(), &coolant(), watts(-10.0e6)).unwrap_err();
        assert!(matches!(err, ProcessError::Infeasible { .. }));
    }
}
