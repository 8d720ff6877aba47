//! Construction of new bodies
//!
//! A [`BodyBuilder`] is one configuration value: the position is fixed when
//! it is created (normally through [`World::create_at`]), everything else is
//! optional and checked by the terminal call that produces the [`Body`].
//!
//! [`World::create_at`]: crate::simulation::world::World::create_at

use crate::error::{Result, SimError};
use crate::simulation::body::{Body, BodyId, BodyState};
use crate::simulation::sphere::Sphere;
use crate::simulation::vector::{self, NVec3};

#[derive(Debug, Clone, PartialEq)]
pub struct BodyBuilder {
    position: NVec3,
    velocity: NVec3,
    acceleration: NVec3, // becomes the body's self-acceleration
    movable: bool,
}

impl BodyBuilder {
    /// Start a body at rest at `position`
    pub fn new(position: NVec3) -> Self {
        Self {
            position,
            velocity: NVec3::zeros(),
            acceleration: NVec3::zeros(),
            movable: true,
        }
    }

    /// Initial velocity and constant self-acceleration
    pub fn with_motion(self, velocity: NVec3, acceleration: NVec3) -> Self {
        Self {
            velocity,
            acceleration,
            ..self
        }
    }

    /// Mark the body as a fixed obstacle
    pub fn immovable(self) -> Self {
        Self { movable: false, ..self }
    }

    pub fn position(&self) -> NVec3 {
        self.position
    }

    /// Finish as a sphere of the given radius and material
    ///
    /// The mass follows from `density` and the sphere's volume.
    pub fn sphere(self, radius: f64, density: f64, bounciness: f64) -> Result<Body> {
        let position = vector::validate("position", self.position)?;
        let velocity = vector::validate("velocity", self.velocity)?;
        let acceleration = vector::validate("acceleration", self.acceleration)?;

        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidBody(format!("radius must be finite and positive, got {radius}")));
        }
        if !(density.is_finite() && density > 0.0) {
            return Err(SimError::InvalidBody(format!("density must be finite and positive, got {density}")));
        }
        if !(0.0..=1.0).contains(&bounciness) {
            return Err(SimError::InvalidBody(format!("bounciness must lie in [0, 1], got {bounciness}")));
        }
        if !self.movable && (velocity != NVec3::zeros() || acceleration != NVec3::zeros()) {
            return Err(SimError::InvalidBody("an immovable body cannot move or accelerate".into()));
        }

        let mass = density * Sphere::volume(radius);
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidBody(format!("derived mass {mass} is not finite and positive")));
        }

        let state = BodyState {
            id: BodyId::fresh(),
            position,
            velocity,
            acceleration,
            self_acceleration: acceleration,
            movable: self.movable,
            mass,
            density,
            bounciness,
        };
        Ok(Body::Sphere(Sphere::new(state, radius)))
    }

    /// Finish as a fixed sphere
    ///
    /// Immovable bodies never react to collisions, so their bounciness is 0.
    pub fn immovable_sphere(self, radius: f64, density: f64) -> Result<Body> {
        self.immovable().sphere(radius, density, 0.0)
    }
}
