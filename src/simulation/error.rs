//! Construction errors for particles, rings and step parameters
//!
//! The step itself cannot fail; everything that could poison the state with
//! NaN is rejected here, before the first frame.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    NonPositiveMass(f64),
    NegativeRadius(f64),
    EmptyRing,
    NonFiniteValue(&'static str),
    InvalidBounceFactor(f64),
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::NonPositiveMass(m) => write!(f, "particle mass must be > 0, got {m}"),
            SimError::NegativeRadius(r) => write!(f, "particle radius must be >= 0, got {r}"),
            SimError::EmptyRing => write!(f, "a ring needs at least one particle"),
            SimError::NonFiniteValue(name) => write!(f, "{name} must be finite"),
            SimError::InvalidBounceFactor(b) => {
                write!(f, "bounce factor must lie in (-1, 0], got {b}")
            }
            SimError::InvalidParameter { name, value } => {
                write!(f, "invalid value for {name}: {value}")
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Reject NaN and infinities under a readable name
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::NonFiniteValue(name))
    }
}
