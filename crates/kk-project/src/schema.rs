//! Model schema definitions.

use serde::{Deserialize, Serialize};

/// A complete model description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDef {
    #[serde(rename = "SimOptions")]
    pub sim_options: SimOptionsDef,
    #[serde(
        rename = "RecorderOptions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub recorder_options: Option<RecorderOptionsDef>,
    #[serde(rename = "SimObjects", default)]
    pub sim_objects: Vec<SimObjectDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SteadyModeDef {
    #[default]
    Pressure,
    PressureTemperature,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimOptionsDef {
    /// Fixed step for `step()` and the initial adaptive step [s].
    pub dt: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_dt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_dt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowable_error: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steady_iterations: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steady_mode: Option<SteadyModeDef>,
}

/// Simulation options with every default applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSimOptions {
    pub dt: f64,
    pub min_dt: f64,
    pub max_dt: f64,
    pub allowable_error: f64,
    pub max_steady_iterations: usize,
    pub steady_mode: SteadyModeDef,
}

pub const DEFAULT_MIN_DT: f64 = 1e-9;
pub const DEFAULT_ALLOWABLE_ERROR: f64 = 1e-6;
pub const DEFAULT_MAX_STEADY_ITERATIONS: usize = 100;

impl SimOptionsDef {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            min_dt: None,
            max_dt: None,
            allowable_error: None,
            max_steady_iterations: None,
            steady_mode: None,
        }
    }

    /// Apply defaults: `max_dt` falls back to `dt`.
    pub fn resolved(&self) -> ResolvedSimOptions {
        ResolvedSimOptions {
            dt: self.dt,
            min_dt: self.min_dt.unwrap_or(DEFAULT_MIN_DT),
            max_dt: self.max_dt.unwrap_or(self.dt),
            allowable_error: self.allowable_error.unwrap_or(DEFAULT_ALLOWABLE_ERROR),
            max_steady_iterations: self
                .max_steady_iterations
                .unwrap_or(DEFAULT_MAX_STEADY_ITERATIONS),
            steady_mode: self.steady_mode.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecorderOptionsDef {
    /// Where the command line tool writes the history.
    pub path: String,
    /// Minimum simulated time between transient samples [s].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_dt: Option<f64>,
    /// Minimum number of steady iterations between steady samples. A
    /// fractional window keeps every iteration that reaches it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_window: Option<f64>,
}

/// One declared simulation object, tagged by its `object` kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "object")]
pub enum SimObjectDef {
    #[serde(rename = "fluids.volumes.Static")]
    Static(StaticDef),
    #[serde(rename = "fluids.volumes.Void")]
    Void(VoidDef),
    #[serde(rename = "fluids.restrictions.Orifice")]
    Orifice(OrificeDef),
}

impl SimObjectDef {
    pub fn name(&self) -> &str {
        match self {
            SimObjectDef::Static(d) => &d.name,
            SimObjectDef::Void(d) => &d.name,
            SimObjectDef::Orifice(d) => &d.name,
        }
    }

    /// Object tag as written in model files.
    pub fn kind(&self) -> &'static str {
        match self {
            SimObjectDef::Static(_) => "fluids.volumes.Static",
            SimObjectDef::Void(_) => "fluids.volumes.Void",
            SimObjectDef::Orifice(_) => "fluids.restrictions.Orifice",
        }
    }

    /// Restriction names this object feeds and is fed by (volumes only).
    pub fn connections(&self) -> Option<(&[String], &[String])> {
        match self {
            SimObjectDef::Static(d) => Some((&d.connections_in, &d.connections_out)),
            SimObjectDef::Void(d) => Some((&d.connections_in, &d.connections_out)),
            SimObjectDef::Orifice(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaticDef {
    pub name: String,
    /// Pressure [Pa]
    pub press: f64,
    /// Temperature [K]
    pub temp: f64,
    /// Volume [m³]
    pub volume: f64,
    pub fluid: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections_in: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections_out: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoidDef {
    pub name: String,
    pub press: f64,
    pub temp: f64,
    pub fluid: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections_in: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections_out: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrificeDef {
    pub name: String,
    /// Effective flow area Cd·A [m²]
    pub cda: f64,
    #[serde(default = "default_mdot_method")]
    pub mdot_method: String,
}

fn default_mdot_method() -> String {
    "IdealCompressible".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve() {
        let opts = SimOptionsDef::new(0.5).resolved();
        assert_eq!(opts.max_dt, 0.5);
        assert_eq!(opts.min_dt, DEFAULT_MIN_DT);
        assert_eq!(opts.allowable_error, DEFAULT_ALLOWABLE_ERROR);
        assert_eq!(opts.max_steady_iterations, 100);
        assert_eq!(opts.steady_mode, SteadyModeDef::Pressure);
    }

    #[test]
    fn object_tag_parses() {
        let json = r#"{"object":"fluids.restrictions.Orifice","name":"O","cda":0.1}"#;
        let obj: SimObjectDef = serde_json::from_str(json).unwrap();
        assert_eq!(obj.name(), "O");
        assert_eq!(obj.kind(), "fluids.restrictions.Orifice");
        let SimObjectDef::Orifice(def) = obj else {
            panic!("expected orifice");
        };
        assert_eq!(def.mdot_method, "IdealCompressible");
    }

    #[test]
    fn unknown_object_tag_rejected() {
        let json = r#"{"object":"fluids.pumps.Centrifugal","name":"P"}"#;
        assert!(serde_json::from_str::<SimObjectDef>(json).is_err());
    }
}
