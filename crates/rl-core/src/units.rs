// rl-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, DynamicViscosity as UomDynamicViscosity, Length as UomLength,
    MassDensity as UomMassDensity, Power as UomPower, Velocity as UomVelocity,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Power = UomPower;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pas(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

pub mod constants {
    use super::*;

    /// Gravitational acceleration used by all hydraulic head formulas.
    pub const G_MPS2: f64 = 9.81;

    /// Kilowatts per mechanical horsepower, as used for pump nameplates.
    pub const KW_PER_HP: f64 = 0.7457;

    /// Litres per cubic metre.
    pub const L_PER_M3: f64 = 1000.0;

    #[inline]
    pub fn g() -> Accel {
        use uom::si::acceleration::meter_per_second_squared;
        Accel::new::<meter_per_second_squared>(G_MPS2)
    }
}

pub mod convert {
    use super::constants::{KW_PER_HP, L_PER_M3};

    #[inline]
    pub fn kw_to_hp(kw: f64) -> f64 {
        kw / KW_PER_HP
    }

    #[inline]
    pub fn hp_to_kw(hp: f64) -> f64 {
        hp * KW_PER_HP
    }

    #[inline]
    pub fn w_to_kw(w: f64) -> f64 {
        w / 1000.0
    }

    #[inline]
    pub fn m3ps_to_lps(q: f64) -> f64 {
        q * L_PER_M3
    }

    #[inline]
    pub fn lps_to_m3ps(q: f64) -> f64 {
        q / L_PER_M3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = m(2.0);
        let _v = mps(1.3);
        let _q = m3ps(0.025);
        let _rho = kgpm3(998.0);
        let _mu = pas(1e-3);
        let _p = kw(25.0);
        let _g = constants::g();
    }

    #[test]
    fn constructors_store_si_values() {
        assert_eq!(m3ps(0.025).value, 0.025);
        assert_eq!(kw(25.0).value, 25_000.0);
        assert_eq!(pas(1e-3).value, 1e-3);
    }

    #[test]
    fn power_conversion_round_trip() {
        let hp = convert::kw_to_hp(25.05);
        assert!((hp - 33.59).abs() < 0.01);
        assert!((convert::hp_to_kw(hp) - 25.05).abs() < 1e-12);
    }

    #[test]
    fn flow_conversion() {
        assert!((convert::m3ps_to_lps(0.025) - 25.0).abs() < 1e-12);
        assert!((convert::lps_to_m3ps(25.0) - 0.025).abs() < 1e-15);
    }
}
