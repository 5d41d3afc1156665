// kk-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Volume = UomVolume;

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
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

pub mod constants {
    /// Universal gas constant [J/(mol·K)].
    pub const R_UNIVERSAL: f64 = 8.314_462_618;

    /// Standard atmosphere [Pa].
    pub const STD_ATM_PA: f64 = 101_325.0;

    /// Reference temperature for entropy [K].
    pub const STD_ATM_K: f64 = 288.15;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        assert_eq!(pa(101_325.0).value, 101_325.0);
        assert_eq!(k(300.0).value, 300.0);
        assert_eq!(m2(0.5).value, 0.5);
        assert_eq!(m3(10.0).value, 10.0);
    }
}
