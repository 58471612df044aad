// px-core/src/units.rs

use uom::si::f64::{
    MassDensity as UomMassDensity, MassRate as UomMassRate, Power as UomPower,
    Pressure as UomPressure, Ratio as UomRatio,
    ThermodynamicTemperature as UomThermodynamicTemperature,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn kg_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Get a temperature back in degrees Celsius.
#[inline]
pub fn to_celsius(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

pub mod constants {
    /// Celsius zero point [K]
    pub const CELSIUS_OFFSET: f64 = 273.15;

    /// Specific gas constant of dry air [J/(kg·K)]
    pub const R_DRY_AIR: f64 = 287.055;

    /// Specific gas constant of water vapour [J/(kg·K)]
    pub const R_WATER_VAPOUR: f64 = 461.52;

    /// Molar-mass ratio water vapour / dry air
    pub const MW_RATIO: f64 = 0.621_945;

    /// Latent heat of vaporization of water at 0 degC [kJ/kg]
    pub const LATENT_HEAT_0C: f64 = 2501.0;

    /// Heat of fusion of ice at 0 degC [kJ/kg]
    pub const ICE_FUSION_HEAT: f64 = 333.55;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _mdot = kgps(1.2);
        let _q = watts(1_000.0);
        let _rho = kg_m3(1.2);
        let _v = m3ps(0.8);
        let _r = unitless(0.5);
    }

    #[test]
    fn celsius_roundtrip() {
        let t = celsius(20.0);
        assert!((t.value - 293.15).abs() < 1e-9);
        assert!((to_celsius(t) - 20.0).abs() < 1e-9);
    }
}
