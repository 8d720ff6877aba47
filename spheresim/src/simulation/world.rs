//! The simulated world and its time stepping
//!
//! A [`World`] is an immutable value: every mutating call returns a new
//! world and leaves the receiver untouched, so any number of threads may
//! hold the same snapshot.
//!
//! `simulate_time` splits the requested duration into substeps no longer
//! than `1 / update_frequency`. Each substep runs five stages over the
//! whole body list, each stage materializing a complete new list before the
//! next one starts:
//!
//! 1. accelerate (reads the pre-step snapshot)
//! 2. integrate
//! 3. wall collisions (needs the pre-integration list)
//! 4. inter-body penetration correction
//! 5. inter-body velocity deflection
//!
//! Within a stage bodies are computed independently, in parallel when the
//! `parallel` feature is enabled.

use std::sync::Arc;

use log::{debug, trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, SimError};
use crate::simulation::body::{Body, BodyId, Dynamics};
use crate::simulation::builder::BodyBuilder;
use crate::simulation::forces::AccelSet;
use crate::simulation::params::{
    check_air_density, check_update_frequency, WorldParams, EARTH_AIR_DENSITY, EARTH_GRAVITY,
};
use crate::simulation::snapshot::WorldSnapshot;
use crate::simulation::vector::{self, NVec3};

#[derive(Debug, Clone)]
pub struct World {
    params: WorldParams,
    bodies: Vec<Body>,
    forces: Arc<AccelSet>,
}

impl World {
    /// Empty world without gravity or medium, using [`AccelSet::standard`]
    pub fn new(update_frequency: f64, size: NVec3) -> Result<Self> {
        Ok(Self {
            params: WorldParams::new(update_frequency, size)?,
            bodies: Vec::new(),
            forces: Arc::new(AccelSet::standard()),
        })
    }

    /// Same world with `forces` in place of the standard acceleration terms
    pub fn with_forces(&self, forces: AccelSet) -> World {
        World {
            params: self.params,
            bodies: self.bodies.clone(),
            forces: Arc::new(forces),
        }
    }

    pub fn forces(&self) -> &AccelSet {
        &self.forces
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    pub fn size(&self) -> NVec3 {
        self.params.size
    }

    pub fn gravity(&self) -> NVec3 {
        self.params.gravity
    }

    pub fn air_density(&self) -> f64 {
        self.params.air_density
    }

    pub fn update_frequency(&self) -> f64 {
        self.params.update_frequency
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::from(self)
    }

    /// True for reference Earth gravity in reference air
    pub fn is_earth_like(&self) -> bool {
        self.params.gravity == EARTH_GRAVITY && self.params.air_density == EARTH_AIR_DENSITY
    }

    pub fn total_momentum(&self) -> NVec3 {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(NVec3::zeros(), |acc, p| acc + p)
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    /// Start building a body at `position`, which must lie inside the box
    pub fn create_at(&self, position: NVec3) -> Result<BodyBuilder> {
        if !self.params.contains(&position) {
            return Err(SimError::PositionOutOfBounds {
                position: vector::to_array(&position),
                size: vector::to_array(&self.params.size),
            });
        }
        Ok(BodyBuilder::new(position))
    }

    /// Add bodies in order
    ///
    /// A candidate whose id or exact position is already taken (including by
    /// an earlier candidate of the same call) is dropped without error.
    pub fn spawn(&self, candidates: impl IntoIterator<Item = Body>) -> World {
        let mut bodies = self.bodies.clone();
        for body in candidates {
            if bodies.iter().any(|b| b.id() == body.id() || b.position() == body.position()) {
                debug!("spawn of body {} dropped: id or position already taken", body.id());
                continue;
            }
            bodies.push(body);
        }
        self.with_bodies(bodies)
    }

    /// Swap the body with `id` for `body`, or remove it when `body` is `None`
    ///
    /// The replacement keeps the list position of the old body.
    pub fn replace(&self, id: BodyId, body: Option<Body>) -> Result<World> {
        let index = self
            .bodies
            .iter()
            .position(|b| b.id() == id)
            .ok_or(SimError::UnknownBody(id))?;

        let mut bodies = self.bodies.clone();
        match body {
            Some(body) => {
                if body.id() != id && bodies.iter().any(|b| b.id() == body.id()) {
                    return Err(SimError::InvalidBody(format!(
                        "replacement for {id} carries id {} which is already in use",
                        body.id()
                    )));
                }
                bodies[index] = body;
            }
            None => {
                bodies.remove(index);
            }
        }
        Ok(self.with_bodies(bodies))
    }

    /// Remove the body with `id`
    pub fn destroy(&self, id: BodyId) -> Result<World> {
        self.replace(id, None)
    }

    pub fn set_gravity(&self, gravity: NVec3) -> Result<World> {
        let gravity = vector::validate("gravity", gravity)?;
        Ok(self.with_params(WorldParams { gravity, ..self.params }))
    }

    pub fn set_air_density(&self, air_density: f64) -> Result<World> {
        let air_density = check_air_density(air_density)?;
        Ok(self.with_params(WorldParams { air_density, ..self.params }))
    }

    pub fn set_update_frequency(&self, update_frequency: f64) -> Result<World> {
        let update_frequency = check_update_frequency(update_frequency)?;
        Ok(self.with_params(WorldParams {
            update_frequency,
            ..self.params
        }))
    }

    /// Advance the world by `duration` seconds
    ///
    /// Runs as many substeps of at most `1 / update_frequency` as needed.
    pub fn simulate_time(&self, duration: f64) -> Result<World> {
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(SimError::InvalidDuration(duration));
        }

        let max_step = self.params.max_step();
        let mut world = self.clone();
        let mut remaining = duration;
        let mut substeps = 0usize;

        // floating residue from the subtraction is tolerated, hence > 0
        while remaining > 0.0 {
            let h = remaining.min(max_step);
            world = world.step(h)?;
            remaining -= h;
            substeps += 1;
        }

        debug!("simulated {duration} s in {substeps} substeps ({} bodies)", world.bodies.len());
        Ok(world)
    }

    /// One substep of length `dt` through the five stages
    fn step(&self, dt: f64) -> Result<World> {
        let n = self.bodies.len();
        let params = &self.params;
        let forces = &*self.forces;
        trace!("substep dt = {dt}, {n} bodies");

        let snapshot = &self.bodies;
        let accelerated = stage(n, |i| Ok(snapshot[i].calc_acceleration(forces, params, snapshot)))?;
        let moved = stage(n, |i| Ok(accelerated[i].apply_movement(dt)))?;
        let walled = stage(n, |i| moved[i].handle_wall_collision(&accelerated[i], params))?;
        let corrected = stage(n, |i| walled[i].calc_entity_collision_corrections(&accelerated[i], &walled))?;
        let deflected = stage(n, |i| Ok(walled[i].apply_entity_collision_deflections(&walled, &corrected)))?;

        Ok(self.with_bodies(deflected))
    }

    fn with_bodies(&self, bodies: Vec<Body>) -> World {
        World {
            params: self.params,
            bodies,
            forces: Arc::clone(&self.forces),
        }
    }

    fn with_params(&self, params: WorldParams) -> World {
        World {
            params,
            bodies: self.bodies.clone(),
            forces: Arc::clone(&self.forces),
        }
    }
}

/// Compute one stage: body `i` of the output is `f(i)`
#[cfg(feature = "parallel")]
fn stage<F>(n: usize, f: F) -> Result<Vec<Body>>
where
    F: Fn(usize) -> Result<Body> + Sync + Send,
{
    (0..n).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn stage<F>(n: usize, f: F) -> Result<Vec<Body>>
where
    F: Fn(usize) -> Result<Body> + Sync + Send,
{
    (0..n).map(f).collect()
}
