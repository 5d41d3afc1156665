//! kk-project: declarative model file format and validation.
//!
//! A model file is JSON or YAML with three top-level keys: `SimOptions`,
//! optional `RecorderOptions`, and the ordered `SimObjects` list.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_model};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_json_str(content: &str) -> ProjectResult<ModelDef> {
    let model: ModelDef = serde_json::from_str(content)?;
    validate_model(&model)?;
    Ok(model)
}

pub fn from_yaml_str(content: &str) -> ProjectResult<ModelDef> {
    let model: ModelDef = serde_yaml::from_str(content)?;
    validate_model(&model)?;
    Ok(model)
}

pub fn load_json(path: &Path) -> ProjectResult<ModelDef> {
    from_json_str(&std::fs::read_to_string(path)?)
}

pub fn load_yaml(path: &Path) -> ProjectResult<ModelDef> {
    from_yaml_str(&std::fs::read_to_string(path)?)
}

/// Load by extension: `.yaml`/`.yml` as YAML, anything else as JSON.
pub fn load(path: &Path) -> ProjectResult<ModelDef> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => load_yaml(path),
        _ => load_json(path),
    }
}

pub fn save_json(path: &Path, model: &ModelDef) -> ProjectResult<()> {
    validate_model(model)?;
    std::fs::write(path, serde_json::to_string_pretty(model)?)?;
    Ok(())
}

pub fn save_yaml(path: &Path, model: &ModelDef) -> ProjectResult<()> {
    validate_model(model)?;
    std::fs::write(path, serde_yaml::to_string(model)?)?;
    Ok(())
}
