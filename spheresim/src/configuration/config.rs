//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`WorldConfig`]    – box size, update frequency and environment
//! - [`RunConfig`]      – how long to run and how often to report
//! - [`BodyConfig`]     – initial state and material of each sphere
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! world:
//!   size: [10.0, 10.0, 10.0]  # box extent in metres, walls at 0 and size
//!   update_frequency: 200.0   # minimum substeps per simulated second
//!   earth_like: true          # reference gravity and air
//!   # gravity: [0.0, -9.81, 0.0]
//!   # air_density: 1.2
//!
//! run:
//!   duration: 5.0             # simulated seconds
//!   report_interval: 0.5      # progress log every 0.5 s
//!
//! bodies:
//!   - position: [5.0, 8.0, 5.0]
//!     velocity: [1.0, 0.0, 0.0]
//!     radius: 0.5
//!     density: 500.0
//!     bounciness: 0.8
//!   - position: [5.0, 0.5, 5.0]
//!     radius: 0.5
//!     density: 7800.0
//!     movable: false
//! ```
//!
//! The scenario builder maps this onto a [`World`] through the regular
//! validating API, so a config can never produce a world the API would reject.
//!
//! [`World`]: crate::simulation::world::World

use serde::Deserialize;

/// The simulated box and its environment
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct WorldConfig {
    pub size: [f64; 3],               // extent on x, y, z
    pub update_frequency: f64,        // substeps per simulated second (at least)
    pub gravity: Option<[f64; 3]>,    // uniform field, overrides earth_like
    pub air_density: Option<f64>,     // medium density, overrides earth_like
    #[serde(default)]
    pub earth_like: bool,             // start from Earth gravity and air
}

/// Run length and reporting cadence
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub duration: f64,                // total simulated time in seconds
    pub report_interval: Option<f64>, // defaults to the whole duration
}

/// Initial state of one sphere
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub position: [f64; 3],
    pub velocity: Option<[f64; 3]>,     // defaults to rest
    pub acceleration: Option<[f64; 3]>, // self-acceleration, defaults to none
    pub radius: f64,
    pub density: f64,                   // kg/m³, mass follows from the volume
    pub bounciness: Option<f64>,        // defaults to 1 (elastic)
    pub movable: Option<bool>,          // defaults to true
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub world: WorldConfig,
    pub run: RunConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}
