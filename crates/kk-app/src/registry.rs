//! Quantity registry: every addressable scalar under one flat name.
//!
//! Names look like `Tank.press [Pa]`. The two pseudo-quantities
//! `sim.time [s]` and `sim.steady_steps [-]` come first, then each object's
//! attributes in declaration order. Values are not stored here; the
//! registry maps a name to the field that holds it.

use std::collections::HashMap;

use kk_components::{FlowNetwork, Orifice, Restriction, StaticVolume, VoidVolume, Volume};

use crate::error::{AppError, AppResult};

/// Running counters owned by the handle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Clock {
    /// Simulated time [s].
    pub time: f64,
    /// Steady iterations performed so far.
    pub steady_steps: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaticAttr {
    Press,
    Temp,
    Volume,
    Mass,
    Density,
    SpEnthalpy,
    Mdot,
    Udot,
}

impl StaticAttr {
    pub const ALL: [StaticAttr; 8] = [
        StaticAttr::Press,
        StaticAttr::Temp,
        StaticAttr::Volume,
        StaticAttr::Mass,
        StaticAttr::Density,
        StaticAttr::SpEnthalpy,
        StaticAttr::Mdot,
        StaticAttr::Udot,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StaticAttr::Press => "press",
            StaticAttr::Temp => "temp",
            StaticAttr::Volume => "volume",
            StaticAttr::Mass => "mass",
            StaticAttr::Density => "density",
            StaticAttr::SpEnthalpy => "sp_enthalpy",
            StaticAttr::Mdot => "mdot",
            StaticAttr::Udot => "udot",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            StaticAttr::Press => "Pa",
            StaticAttr::Temp => "K",
            StaticAttr::Volume => "m^3",
            StaticAttr::Mass => "kg",
            StaticAttr::Density => "kg/m^3",
            StaticAttr::SpEnthalpy => "J/kg",
            StaticAttr::Mdot => "kg/s",
            StaticAttr::Udot => "J/s",
        }
    }

    fn field(self, v: &mut StaticVolume) -> &mut f64 {
        match self {
            StaticAttr::Press => &mut v.press,
            StaticAttr::Temp => &mut v.temp,
            StaticAttr::Volume => &mut v.volume,
            StaticAttr::Mass => &mut v.mass,
            StaticAttr::Density => &mut v.density,
            StaticAttr::SpEnthalpy => &mut v.sp_enthalpy,
            StaticAttr::Mdot => &mut v.mdot,
            StaticAttr::Udot => &mut v.udot,
        }
    }

    fn read(self, v: &StaticVolume) -> f64 {
        match self {
            StaticAttr::Press => v.press,
            StaticAttr::Temp => v.temp,
            StaticAttr::Volume => v.volume,
            StaticAttr::Mass => v.mass,
            StaticAttr::Density => v.density,
            StaticAttr::SpEnthalpy => v.sp_enthalpy,
            StaticAttr::Mdot => v.mdot,
            StaticAttr::Udot => v.udot,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoidAttr {
    Press,
    Temp,
    Density,
    SpEnthalpy,
}

impl VoidAttr {
    pub const ALL: [VoidAttr; 4] = [
        VoidAttr::Press,
        VoidAttr::Temp,
        VoidAttr::Density,
        VoidAttr::SpEnthalpy,
    ];

    pub fn key(self) -> &'static str {
        match self {
            VoidAttr::Press => "press",
            VoidAttr::Temp => "temp",
            VoidAttr::Density => "density",
            VoidAttr::SpEnthalpy => "sp_enthalpy",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            VoidAttr::Press => "Pa",
            VoidAttr::Temp => "K",
            VoidAttr::Density => "kg/m^3",
            VoidAttr::SpEnthalpy => "J/kg",
        }
    }

    fn field(self, v: &mut VoidVolume) -> &mut f64 {
        match self {
            VoidAttr::Press => &mut v.press,
            VoidAttr::Temp => &mut v.temp,
            VoidAttr::Density => &mut v.density,
            VoidAttr::SpEnthalpy => &mut v.sp_enthalpy,
        }
    }

    fn read(self, v: &VoidVolume) -> f64 {
        match self {
            VoidAttr::Press => v.press,
            VoidAttr::Temp => v.temp,
            VoidAttr::Density => v.density,
            VoidAttr::SpEnthalpy => v.sp_enthalpy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrificeAttr {
    Cda,
    Mdot,
    IsChoked,
}

impl OrificeAttr {
    pub const ALL: [OrificeAttr; 3] = [OrificeAttr::Cda, OrificeAttr::Mdot, OrificeAttr::IsChoked];

    pub fn key(self) -> &'static str {
        match self {
            OrificeAttr::Cda => "cda",
            OrificeAttr::Mdot => "mdot",
            OrificeAttr::IsChoked => "is_choked",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            OrificeAttr::Cda => "m^2",
            OrificeAttr::Mdot => "kg/s",
            OrificeAttr::IsChoked => "-",
        }
    }

    fn read(self, o: &Orifice) -> f64 {
        match self {
            OrificeAttr::Cda => o.cda,
            OrificeAttr::Mdot => o.mdot,
            OrificeAttr::IsChoked => {
                if o.is_choked {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    fn write(self, o: &mut Orifice, value: f64) {
        match self {
            OrificeAttr::Cda => o.cda = value,
            OrificeAttr::Mdot => o.mdot = value,
            OrificeAttr::IsChoked => o.is_choked = value != 0.0,
        }
    }
}

/// Where one registry entry lives. Indices are positions in the network's
/// volume or restriction vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityRef {
    SimTime,
    SteadySteps,
    Static(usize, StaticAttr),
    Void(usize, VoidAttr),
    Orifice(usize, OrificeAttr),
}

/// A declared object and its position in the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub name: String,
    pub slot: ObjectSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectSlot {
    Static(usize),
    Void(usize),
    Orifice(usize),
}

/// Ordered name table with a symbol lookup built once at load.
#[derive(Debug, Clone)]
pub struct Registry {
    names: Vec<String>,
    refs: Vec<QuantityRef>,
    units: Vec<&'static str>,
    lookup: HashMap<(String, String), usize>,
}

pub const SIM_TIME: &str = "sim.time [s]";
pub const SIM_STEADY_STEPS: &str = "sim.steady_steps [-]";

impl Registry {
    pub fn build(objects: &[ObjectEntry]) -> Self {
        let mut registry = Self {
            names: Vec::new(),
            refs: Vec::new(),
            units: Vec::new(),
            lookup: HashMap::new(),
        };
        registry.push("sim", "time", "s", QuantityRef::SimTime);
        registry.push("sim", "steady_steps", "-", QuantityRef::SteadySteps);

        for object in objects {
            match object.slot {
                ObjectSlot::Static(i) => {
                    for attr in StaticAttr::ALL {
                        registry.push(
                            &object.name,
                            attr.key(),
                            attr.unit(),
                            QuantityRef::Static(i, attr),
                        );
                    }
                }
                ObjectSlot::Void(i) => {
                    for attr in VoidAttr::ALL {
                        registry.push(
                            &object.name,
                            attr.key(),
                            attr.unit(),
                            QuantityRef::Void(i, attr),
                        );
                    }
                }
                ObjectSlot::Orifice(i) => {
                    for attr in OrificeAttr::ALL {
                        registry.push(
                            &object.name,
                            attr.key(),
                            attr.unit(),
                            QuantityRef::Orifice(i, attr),
                        );
                    }
                }
            }
        }
        registry
    }

    fn push(&mut self, object: &str, key: &str, unit: &'static str, quantity: QuantityRef) {
        self.lookup
            .insert((object.to_string(), key.to_string()), self.names.len());
        self.names.push(format!("{object}.{key} [{unit}]"));
        self.refs.push(quantity);
        self.units.push(unit);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn quantity(&self, index: usize) -> Option<QuantityRef> {
        self.refs.get(index).copied()
    }

    /// Index of a flattened name. The unit label must match exactly.
    pub fn resolve(&self, name: &str) -> AppResult<usize> {
        let not_found = || AppError::NotFound {
            name: name.to_string(),
        };
        let (path, unit) = split_unit(name).ok_or_else(not_found)?;
        let (object, key) = path.rsplit_once('.').ok_or_else(not_found)?;
        let index = *self
            .lookup
            .get(&(object.to_string(), key.to_string()))
            .ok_or_else(not_found)?;
        if self.units[index] != unit {
            return Err(not_found());
        }
        Ok(index)
    }

    pub fn get(&self, index: usize, network: &FlowNetwork, clock: &Clock) -> AppResult<f64> {
        let quantity = self.checked(index)?;
        read(quantity, network, clock).ok_or_else(|| self.stale(index))
    }

    /// Write a value in place. Derived quantities are overwritten by the
    /// next advance.
    pub fn set(
        &self,
        index: usize,
        value: f64,
        network: &mut FlowNetwork,
        clock: &mut Clock,
    ) -> AppResult<()> {
        let quantity = self.checked(index)?;
        let written = match quantity {
            QuantityRef::SimTime => {
                clock.time = value;
                true
            }
            QuantityRef::SteadySteps => {
                // Saturating cast: negative and NaN become 0.
                clock.steady_steps = value.round() as usize;
                true
            }
            QuantityRef::Static(i, attr) => match network.volumes_mut().get_mut(i) {
                Some(Volume::Static(v)) => {
                    *attr.field(v) = value;
                    true
                }
                _ => false,
            },
            QuantityRef::Void(i, attr) => match network.volumes_mut().get_mut(i) {
                Some(Volume::Void(v)) => {
                    *attr.field(v) = value;
                    true
                }
                _ => false,
            },
            QuantityRef::Orifice(i, attr) => match network.restrictions_mut().get_mut(i) {
                Some(Restriction::Orifice(o)) => {
                    attr.write(o, value);
                    true
                }
                None => false,
            },
        };
        if written {
            Ok(())
        } else {
            Err(self.stale(index))
        }
    }

    /// Every value, in `names()` order.
    pub fn values(&self, network: &FlowNetwork, clock: &Clock) -> Vec<f64> {
        self.refs
            .iter()
            .map(|&q| read(q, network, clock).unwrap_or(f64::NAN))
            .collect()
    }

    fn checked(&self, index: usize) -> AppResult<QuantityRef> {
        self.quantity(index).ok_or_else(|| AppError::NotFound {
            name: format!("#{index}"),
        })
    }

    fn stale(&self, index: usize) -> AppError {
        AppError::Simulation(format!(
            "registry entry '{}' does not match the network",
            self.names[index]
        ))
    }
}

fn read(quantity: QuantityRef, network: &FlowNetwork, clock: &Clock) -> Option<f64> {
    match quantity {
        QuantityRef::SimTime => Some(clock.time),
        QuantityRef::SteadySteps => Some(clock.steady_steps as f64),
        QuantityRef::Static(i, attr) => match network.volumes().get(i)? {
            Volume::Static(v) => Some(attr.read(v)),
            Volume::Void(_) => None,
        },
        QuantityRef::Void(i, attr) => match network.volumes().get(i)? {
            Volume::Void(v) => Some(attr.read(v)),
            Volume::Static(_) => None,
        },
        QuantityRef::Orifice(i, attr) => match network.restrictions().get(i)? {
            Restriction::Orifice(o) => Some(attr.read(o)),
        },
    }
}

/// Split `"Obj.attr [unit]"` into `("Obj.attr", "unit")`.
fn split_unit(name: &str) -> Option<(&str, &str)> {
    let body = name.strip_suffix(']')?;
    let (path, unit) = body.rsplit_once(" [")?;
    Some((path, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<ObjectEntry> {
        vec![
            ObjectEntry {
                name: "Tank".to_string(),
                slot: ObjectSlot::Static(0),
            },
            ObjectEntry {
                name: "Orifice".to_string(),
                slot: ObjectSlot::Orifice(0),
            },
            ObjectEntry {
                name: "Atm".to_string(),
                slot: ObjectSlot::Void(1),
            },
        ]
    }

    #[test]
    fn names_in_declaration_order() {
        let reg = Registry::build(&entries());
        assert_eq!(reg.len(), 2 + 8 + 3 + 4);
        assert_eq!(reg.names()[0], SIM_TIME);
        assert_eq!(reg.names()[1], SIM_STEADY_STEPS);
        assert_eq!(reg.names()[2], "Tank.press [Pa]");
        assert_eq!(reg.names()[9], "Tank.udot [J/s]");
        assert_eq!(reg.names()[10], "Orifice.cda [m^2]");
        assert_eq!(reg.names()[12], "Orifice.is_choked [-]");
        assert_eq!(reg.names()[13], "Atm.press [Pa]");
    }

    #[test]
    fn resolve_every_name() {
        let reg = Registry::build(&entries());
        for (i, name) in reg.names().iter().enumerate() {
            assert_eq!(reg.resolve(name).unwrap(), i);
        }
        assert_eq!(
            reg.quantity(reg.resolve("Atm.temp [K]").unwrap()),
            Some(QuantityRef::Void(1, VoidAttr::Temp))
        );
    }

    #[test]
    fn resolve_is_exact() {
        let reg = Registry::build(&entries());
        for bad in [
            "Tank.press",
            "Tank.press [psi]",
            "tank.press [Pa]",
            "Tank.Press [Pa]",
            "Tank.press  [Pa]",
            "Missing.press [Pa]",
            "press [Pa]",
            "",
        ] {
            assert_eq!(
                reg.resolve(bad),
                Err(AppError::NotFound {
                    name: bad.to_string()
                }),
                "{bad}"
            );
        }
    }

    #[test]
    fn dotted_object_names_split_on_last_dot() {
        let reg = Registry::build(&[ObjectEntry {
            name: "stage.1".to_string(),
            slot: ObjectSlot::Orifice(0),
        }]);
        let idx = reg.resolve("stage.1.cda [m^2]").unwrap();
        assert_eq!(reg.quantity(idx), Some(QuantityRef::Orifice(0, OrificeAttr::Cda)));
    }
}
