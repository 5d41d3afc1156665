//! Model validation logic.

use crate::schema::{ModelDef, RecorderOptionsDef, SimObjectDef, SimOptionsDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate name: {name} in {context}")]
    DuplicateName { name: String, context: String },

    #[error("Missing reference: {name} in {context}")]
    MissingReference { name: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub fn validate_model(model: &ModelDef) -> Result<(), ValidationError> {
    validate_sim_options(&model.sim_options)?;
    if let Some(recorder) = &model.recorder_options {
        validate_recorder_options(recorder)?;
    }

    let mut names = HashSet::new();
    let mut restrictions = HashSet::new();
    for object in &model.sim_objects {
        if object.name().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("{} name", object.kind()),
                value: String::new(),
                reason: "must not be empty".to_string(),
            });
        }
        if !names.insert(object.name()) {
            return Err(ValidationError::DuplicateName {
                name: object.name().to_string(),
                context: "SimObjects".to_string(),
            });
        }
        if let SimObjectDef::Orifice(_) = object {
            restrictions.insert(object.name());
        }
    }

    for object in &model.sim_objects {
        validate_object(object)?;
        if let Some((inbound, outbound)) = object.connections() {
            for (list, side) in [(inbound, "connections_in"), (outbound, "connections_out")] {
                for name in list {
                    if !restrictions.contains(name.as_str()) {
                        return Err(ValidationError::MissingReference {
                            name: name.clone(),
                            context: format!("'{}' {}", object.name(), side),
                        });
                    }
                }
            }
        }
    }

    Ok(())
}

fn validate_sim_options(options: &SimOptionsDef) -> Result<(), ValidationError> {
    validate_positive_finite("SimOptions dt", options.dt)?;
    if let Some(min_dt) = options.min_dt {
        validate_positive_finite("SimOptions min_dt", min_dt)?;
    }
    if let Some(max_dt) = options.max_dt {
        validate_positive_finite("SimOptions max_dt", max_dt)?;
    }
    if let Some(tol) = options.allowable_error {
        validate_positive_finite("SimOptions allowable_error", tol)?;
    }
    if options.max_steady_iterations == Some(0) {
        return Err(ValidationError::InvalidValue {
            field: "SimOptions max_steady_iterations".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let resolved = options.resolved();
    if resolved.min_dt > resolved.max_dt {
        return Err(ValidationError::InvalidValue {
            field: "SimOptions min_dt".to_string(),
            value: resolved.min_dt.to_string(),
            reason: format!("must not exceed max_dt = {}", resolved.max_dt),
        });
    }
    Ok(())
}

fn validate_recorder_options(options: &RecorderOptionsDef) -> Result<(), ValidationError> {
    let limits = [("min_dt", options.min_dt), ("pool_window", options.pool_window)];
    for (field, value) in limits {
        if let Some(v) = value
            && (!v.is_finite() || v < 0.0)
        {
            return Err(ValidationError::InvalidValue {
                field: format!("RecorderOptions {field}"),
                value: v.to_string(),
                reason: "must be non-negative and finite".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_object(object: &SimObjectDef) -> Result<(), ValidationError> {
    let name = object.name();
    match object {
        SimObjectDef::Static(def) => {
            validate_field(name, "press", def.press)?;
            validate_field(name, "temp", def.temp)?;
            validate_field(name, "volume", def.volume)?;
            validate_fluid(name, &def.fluid)?;
        }
        SimObjectDef::Void(def) => {
            validate_field(name, "press", def.press)?;
            validate_field(name, "temp", def.temp)?;
            validate_fluid(name, &def.fluid)?;
        }
        SimObjectDef::Orifice(def) => {
            validate_field(name, "cda", def.cda)?;
        }
    }
    Ok(())
}

fn validate_fluid(object: &str, fluid: &str) -> Result<(), ValidationError> {
    if fluid.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("'{}' fluid", object),
            value: fluid.to_string(),
            reason: "must name a fluid".to_string(),
        });
    }
    Ok(())
}

fn validate_field(object: &str, field: &str, value: f64) -> Result<(), ValidationError> {
    validate_positive_finite(&format!("'{}' {}", object, field), value)
}

fn validate_positive_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}
