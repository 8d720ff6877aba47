//! Physical constants and the per-world environment
//!
//! `WorldParams` holds everything a body needs to know about its world
//! during a substep:
//! - box size (walls at 0 and `size` on each axis),
//! - uniform gravity and medium density (`gravity`, `air_density`),
//! - the minimum update frequency bounding the substep length

use crate::error::{Result, SimError};
use crate::simulation::vector::{self, NVec3};

/// Gravitational constant in m³ kg⁻¹ s⁻²
pub const G: f64 = 6.674_30e-11;

/// Bodies lighter than this exert no gravity on others: at 1 m it would
/// induce less than 0.001 m/s²
pub const SIGNIFICANT_MASS: f64 = 0.001 / G;

/// Reference surface gravity (y axis up)
pub const EARTH_GRAVITY: NVec3 = NVec3::new(0.0, -9.81, 0.0);

/// Reference sea-level air density in kg/m³
pub const EARTH_AIR_DENSITY: f64 = 1.2;

/// Two spheres closer than the sum of radii minus this count as colliding
pub const CONTACT_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldParams {
    pub size: NVec3,           // box extent, walls at 0 and size
    pub gravity: NVec3,        // uniform field
    pub air_density: f64,      // medium density for drag
    pub update_frequency: f64, // substeps per simulated second (at least)
}

impl WorldParams {
    pub fn new(update_frequency: f64, size: NVec3) -> Result<Self> {
        Ok(Self {
            size: check_size(size)?,
            gravity: NVec3::zeros(),
            air_density: 0.0,
            update_frequency: check_update_frequency(update_frequency)?,
        })
    }

    /// Longest substep the world will integrate in one go
    pub fn max_step(&self) -> f64 {
        self.update_frequency.recip()
    }

    /// Velocities below this on `axis` are snapped to zero after a wall bounce
    pub fn dead_zone(&self, axis: usize) -> f64 {
        (self.size[axis] * 1e-4).max(1e-3)
    }

    /// True if `position` lies in `[0, size)` on every axis
    pub fn contains(&self, position: &NVec3) -> bool {
        vector::is_finite(position)
            && vector::all_less_or_equal(&NVec3::zeros(), position)
            && vector::all_less(position, &self.size)
    }
}

pub(crate) fn check_size(size: NVec3) -> Result<NVec3> {
    if vector::is_finite(&size) && vector::all_positive(&size) {
        Ok(size)
    } else {
        Err(SimError::InvalidWorldSize(vector::to_array(&size)))
    }
}

pub(crate) fn check_update_frequency(frequency: f64) -> Result<f64> {
    if frequency.is_finite() && frequency > 0.0 {
        Ok(frequency)
    } else {
        Err(SimError::InvalidUpdateFrequency(frequency))
    }
}

pub(crate) fn check_air_density(density: f64) -> Result<f64> {
    if density.is_finite() && density >= 0.0 {
        Ok(density)
    } else {
        Err(SimError::InvalidAirDensity(density))
    }
}
