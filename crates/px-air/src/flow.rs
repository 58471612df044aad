//! Fluid states paired with mass flow.

use crate::error::{AirError, AirResult};
use crate::state::{LiquidWaterState, MoistAirState};
use px_core::units::{kgps, m3ps, MassRate, VolumeRate};

/// Moist air with a dry-air mass-flow rate.
///
/// The canonical flow figure is the dry-air mass flow; moist-air and
/// volumetric flows are algebraic conversions via the humidity ratio and
/// density. Created once per calculation and never mutated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowState {
    state: MoistAirState,
    dry_air_flow: MassRate,
}

impl FlowState {
    /// Pair a state with a dry-air mass flow [kg/s].
    pub fn from_dry_air_flow(state: MoistAirState, dry_air_flow: MassRate) -> AirResult<Self> {
        validate_flow(dry_air_flow.value)?;
        Ok(Self {
            state,
            dry_air_flow,
        })
    }

    /// Pair a state with a total moist-air mass flow [kg/s].
    pub fn from_moist_air_flow(state: MoistAirState, moist_air_flow: MassRate) -> AirResult<Self> {
        validate_flow(moist_air_flow.value)?;
        let dry = moist_air_flow.value / (1.0 + state.humidity_ratio());
        Ok(Self {
            state,
            dry_air_flow: kgps(dry),
        })
    }

    /// Pair a state with a volumetric flow [m3/s] of the mixture.
    pub fn from_volumetric_flow(state: MoistAirState, volumetric_flow: VolumeRate) -> AirResult<Self> {
        validate_flow(volumetric_flow.value)?;
        let moist = volumetric_flow.value * state.density().value;
        let dry = moist / (1.0 + state.humidity_ratio());
        Ok(Self {
            state,
            dry_air_flow: kgps(dry),
        })
    }

    pub fn state(&self) -> &MoistAirState {
        &self.state
    }

    pub fn dry_air_flow(&self) -> MassRate {
        self.dry_air_flow
    }

    pub fn moist_air_flow(&self) -> MassRate {
        kgps(self.dry_air_flow.value * (1.0 + self.state.humidity_ratio()))
    }

    pub fn volumetric_flow(&self) -> VolumeRate {
        m3ps(self.moist_air_flow().value / self.state.density().value)
    }

    /// Water vapour carried by the stream [kg/s].
    pub fn vapour_flow(&self) -> MassRate {
        kgps(self.dry_air_flow.value * self.state.humidity_ratio())
    }
}

/// Liquid water with a mass-flow rate (condensate, coolant).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaterFlowState {
    state: LiquidWaterState,
    mass_flow: MassRate,
}

impl WaterFlowState {
    pub fn new(state: LiquidWaterState, mass_flow: MassRate) -> AirResult<Self> {
        validate_flow(mass_flow.value)?;
        Ok(Self { state, mass_flow })
    }

    pub fn state(&self) -> &LiquidWaterState {
        &self.state
    }

    pub fn mass_flow(&self) -> MassRate {
        self.mass_flow
    }

    pub fn volumetric_flow(&self) -> VolumeRate {
        m3ps(self.mass_flow.value / self.state.density().value)
    }
}

fn validate_flow(v: f64) -> AirResult<()> {
    if !v.is_finite() {
        return Err(AirError::NonPhysical { what: "mass flow" });
    }
    if v < 0.0 {
        return Err(AirError::NonPhysical {
            what: "mass flow must be non-negative",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use px_core::units::{celsius, pa};

    fn state() -> MoistAirState {
        MoistAirState::from_relative_humidity(pa(101_325.0), celsius(25.0), 50.0).unwrap()
    }

    #[test]
    fn moist_and_dry_flows_are_consistent() {
        let flow = FlowState::from_moist_air_flow(state(), kgps(1.0)).unwrap();
        let x = flow.state().humidity_ratio();
        assert_relative_eq!(flow.moist_air_flow().value, 1.0, epsilon = 1e-12);
        assert_relative_eq!(flow.dry_air_flow().value, 1.0 / (1.0 + x), epsilon = 1e-12);
        assert_relative_eq!(
            flow.vapour_flow().value,
            flow.moist_air_flow().value - flow.dry_air_flow().value,
            epsilon = 1e-12
        );
    }

    #[test]
    fn volumetric_round_trip() {
        let flow = FlowState::from_dry_air_flow(state(), kgps(2.0)).unwrap();
        let via_volume = FlowState::from_volumetric_flow(state(), flow.volumetric_flow()).unwrap();
        assert_relative_eq!(via_volume.dry_air_flow().value, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn negative_flow_is_rejected() {
        let err = FlowState::from_dry_air_flow(state(), kgps(-1.0)).unwrap_err();
        assert!(matches!(err, AirError::NonPhysical { .. }));

        let water = LiquidWaterState::new(celsius(12.0)).unwrap();
        assert!(WaterFlowState::new(water, kgps(-0.1)).is_err());
    }
}
