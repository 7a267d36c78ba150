//! High-level runtime settings
//!
//! Tick rate and frame budget for the driver, plus the window the viewer
//! opens. None of this reaches the physics step.

use std::time::Duration;

use crate::simulation::error::{ensure_finite, SimError};

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub tick_hz: f64, // simulation steps per second
    pub frames: Option<u64>, // stop after this many steps, None = until closed
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            frames: None,
        }
    }
}

impl Engine {
    /// The tick rate must be positive and its period must fit in a `Duration`
    pub fn validate(&self) -> Result<(), SimError> {
        let tick_hz = ensure_finite("tick_hz", self.tick_hz)?;
        if tick_hz <= 0.0 || Duration::try_from_secs_f64(1.0 / tick_hz).is_err() {
            return Err(SimError::InvalidParameter {
                name: "tick_hz",
                value: tick_hz,
            });
        }
        Ok(())
    }

    /// Wall-clock length of one tick.
    /// Saturates to `Duration::MAX` for a rate that fails [`Engine::validate`].
    pub fn tick_period(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.tick_hz).unwrap_or(Duration::MAX)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub width: f64, // also the horizontal extent of simulation space
    pub height: f64,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            title: "Bouncing Water Balloon".to_string(),
        }
    }
}

impl WindowSettings {
    /// Both sides finite and positive
    pub fn validate(&self) -> Result<(), SimError> {
        for (name, value) in [("window.width", self.width), ("window.height", self.height)] {
            if ensure_finite(name, value)? <= 0.0 {
                return Err(SimError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}
