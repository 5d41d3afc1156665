use crate::KkError;

/// Floating point type used throughout the engine.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, KkError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(KkError::NonFinite { what, value: v })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ensure_finite_passes_finite_values_through(v in proptest::num::f64::NORMAL) {
            prop_assert_eq!(ensure_finite(v, "value"), Ok(v));
        }
    }
}
