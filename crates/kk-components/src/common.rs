//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use kk_core::numeric::ensure_finite;

/// Pressure differences below this give zero flow (Pa).
pub const EPSILON_PRESSURE: f64 = 1e-5;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}
