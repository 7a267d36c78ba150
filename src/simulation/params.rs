//! Physical constants for one simulation step
//!
//! `Parameters` holds the per-step scalars:
//! - downward gravity force (divided by mass when applied),
//! - minimum pair distance and spring stiffness for the constraint pass,
//! - floor line and bounce factor for ground collision

use crate::simulation::error::{ensure_finite, SimError};

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub gravity: f64, // force per step along +y
    pub min_distance: f64, // pairs closer than this get a spring force
    pub spring_constant: f64, // force per unit of overlap
    pub bounce_factor: f64, // vy multiplier on floor contact, in (-1, 0]
    pub floor_y: f64, // y of the ground line
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gravity: 0.01,
            min_distance: 15.0,
            spring_constant: 0.1,
            bounce_factor: -0.8,
            floor_y: 600.0,
        }
    }
}

impl Parameters {
    /// Check every field before a run; `step` assumes these hold
    pub fn validate(&self) -> Result<(), SimError> {
        ensure_finite("gravity", self.gravity)?;
        ensure_finite("min_distance", self.min_distance)?;
        ensure_finite("spring_constant", self.spring_constant)?;
        ensure_finite("bounce_factor", self.bounce_factor)?;
        ensure_finite("floor_y", self.floor_y)?;

        if self.min_distance < 0.0 {
            return Err(SimError::InvalidParameter {
                name: "min_distance",
                value: self.min_distance,
            });
        }
        if self.spring_constant < 0.0 {
            return Err(SimError::InvalidParameter {
                name: "spring_constant",
                value: self.spring_constant,
            });
        }
        if self.bounce_factor <= -1.0 || self.bounce_factor > 0.0 {
            return Err(SimError::InvalidBounceFactor(self.bounce_factor));
        }
        Ok(())
    }
}
