//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – tick rate and optional frame budget
//! - [`WindowConfig`]     – viewer window size and title
//! - [`ParametersConfig`] – physical constants used by every step
//! - [`RingConfig`]       – how the initial ring of particles is laid out
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section and every field has a default, so a partial file is valid
//! and anything missing falls back to the classic balloon.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   tick_hz: 60.0           # steps per second
//!   frames: 600             # optional: stop after this many steps
//!
//! window:
//!   width: 800.0
//!   height: 600.0
//!   title: "Bouncing Water Balloon"
//!
//! parameters:
//!   gravity: 0.01           # force per step, divided by mass
//!   min_distance: 15.0
//!   spring_constant: 0.1
//!   bounce_factor: -0.8     # in (-1, 0]
//!   floor_y: 600.0          # defaults to the window height
//!
//! ring:
//!   count: 12
//!   center: [ 400.0, 300.0 ]
//!   radius: 50.0
//!   particle_radius: 10.0
//!   mass: 0.1
//! ```

use serde::Deserialize;

/// Driver settings
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub tick_hz: f64,        // simulation steps per second
    pub frames: Option<u64>, // stop after this many steps
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            frames: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f64,
    pub height: f64,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            title: "Bouncing Water Balloon".to_string(),
        }
    }
}

/// Physical constants for a scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub gravity: f64,         // downward force per step
    pub min_distance: f64,    // spring rest limit between any two particles
    pub spring_constant: f64, // force per unit overlap
    pub bounce_factor: f64,   // vy multiplier on floor contact
    pub floor_y: Option<f64>, // ground line, window height when missing
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            gravity: 0.01,
            min_distance: 15.0,
            spring_constant: 0.1,
            bounce_factor: -0.8,
            floor_y: None,
        }
    }
}

/// Layout of the initial ring
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RingConfig {
    pub count: usize,         // number of particles
    pub center: [f64; 2],     // ring center
    pub radius: f64,          // ring radius
    pub particle_radius: f64, // radius of each particle, used for floor contact
    pub mass: f64,            // mass of each particle
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            count: 12,
            center: [400.0, 300.0],
            radius: 50.0,
            particle_radius: 10.0,
            mass: 0.1,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub window: WindowConfig,
    pub parameters: ParametersConfig,
    pub ring: RingConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
