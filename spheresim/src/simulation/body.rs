//! Bodies and the per-body transition contract
//!
//! A [`Body`] is an immutable value. Every stage of a substep produces a new
//! value carrying the same [`BodyId`]; the id is the only handle that stays
//! stable across time, so equality and hashing use it alone.
//!
//! Shape-specific physics lives in the variants (currently only
//! [`Sphere`]). Each variant implements [`Dynamics`], the five operations
//! the world pipeline runs in order.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::error::{Result, SimError};
use crate::simulation::forces::AccelSet;
use crate::simulation::params::WorldParams;
use crate::simulation::shape::ShapeKind;
use crate::simulation::sphere::Sphere;
use crate::simulation::vector::{self, NVec3};

static NEXT_BODY_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BodyId(pub u64);

impl BodyId {
    /// Allocate an id no other body in this process has
    pub(crate) fn fresh() -> Self {
        BodyId(NEXT_BODY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shape-independent kinematic and material state
#[derive(Debug, Clone, Copy)]
pub struct BodyState {
    pub(crate) id: BodyId,
    pub(crate) position: NVec3,
    pub(crate) velocity: NVec3,
    pub(crate) acceleration: NVec3,
    pub(crate) self_acceleration: NVec3, // propulsion, an input rather than derived
    pub(crate) movable: bool,
    pub(crate) mass: f64,
    pub(crate) density: f64,
    pub(crate) bounciness: f64,
}

/// The five operations each substep applies to every body, in this order
pub trait Dynamics: Sized {
    /// Recompute `acceleration` from forces acting on the pre-step snapshot
    fn calc_acceleration(&self, forces: &AccelSet, params: &WorldParams, snapshot: &[Body]) -> Self;

    /// Advance position and velocity by `dt` under the current acceleration
    fn apply_movement(&self, dt: f64) -> Self;

    /// Resolve penetration of the box faces; `prev` is this body before
    /// integration
    fn handle_wall_collision(&self, prev: &Body, params: &WorldParams) -> Result<Self>;

    /// Push this body out of every body in `bodies` it penetrates; `prev` is
    /// this body before integration
    fn calc_entity_collision_corrections(&self, prev: &Body, bodies: &[Body]) -> Result<Self>;

    /// Elastic velocity response
    ///
    /// Called on the pre-correction value: partners are detected in
    /// `before`, while this body's and its partners' corrected states are
    /// looked up in `after`. Impulses from several partners add up, so the
    /// result does not depend on list order.
    fn apply_entity_collision_deflections(&self, before: &[Body], after: &[Body]) -> Self;
}

#[derive(Debug, Clone)]
pub enum Body {
    Sphere(Sphere),
}

impl Body {
    pub(crate) fn state(&self) -> &BodyState {
        match self {
            Body::Sphere(s) => s.state(),
        }
    }

    pub fn id(&self) -> BodyId {
        self.state().id
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Body::Sphere(_) => ShapeKind::Sphere,
        }
    }

    pub fn position(&self) -> NVec3 {
        self.state().position
    }

    pub fn velocity(&self) -> NVec3 {
        self.state().velocity
    }

    pub fn acceleration(&self) -> NVec3 {
        self.state().acceleration
    }

    pub fn self_acceleration(&self) -> NVec3 {
        self.state().self_acceleration
    }

    pub fn is_movable(&self) -> bool {
        self.state().movable
    }

    pub fn mass(&self) -> f64 {
        self.state().mass
    }

    pub fn density(&self) -> f64 {
        self.state().density
    }

    pub fn bounciness(&self) -> f64 {
        self.state().bounciness
    }

    pub fn as_sphere(&self) -> Option<&Sphere> {
        match self {
            Body::Sphere(s) => Some(s),
        }
    }

    /// Radius of the smallest sphere enclosing the body
    pub fn bounding_radius(&self) -> f64 {
        match self {
            Body::Sphere(s) => s.radius(),
        }
    }

    pub fn momentum(&self) -> NVec3 {
        self.velocity() * self.mass()
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass() * self.velocity().norm_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position() - other.position()).norm()
    }

    /// Copy of this body moved to `position`
    pub fn with_position(&self, position: NVec3) -> Result<Body> {
        let position = vector::validate("position", position)?;
        Ok(self.map_state(|s| BodyState { position, ..s }))
    }

    /// Copy of this body with a new velocity; immovable bodies stay at rest
    pub fn with_velocity(&self, velocity: NVec3) -> Result<Body> {
        let velocity = vector::validate("velocity", velocity)?;
        if !self.is_movable() && velocity != NVec3::zeros() {
            return Err(SimError::InvalidBody(format!("immovable body {} cannot be given a velocity", self.id())));
        }
        Ok(self.map_state(|s| BodyState { velocity, ..s }))
    }

    /// Copy of this body with a new self-acceleration
    pub fn with_self_acceleration(&self, self_acceleration: NVec3) -> Result<Body> {
        let self_acceleration = vector::validate("self acceleration", self_acceleration)?;
        if !self.is_movable() && self_acceleration != NVec3::zeros() {
            return Err(SimError::InvalidBody(format!("immovable body {} cannot accelerate", self.id())));
        }
        Ok(self.map_state(|s| BodyState { self_acceleration, ..s }))
    }

    fn map_state(&self, f: impl FnOnce(BodyState) -> BodyState) -> Body {
        match self {
            Body::Sphere(s) => Body::Sphere(s.with_state(f(*s.state()))),
        }
    }
}

/// Check that `prev` is an earlier state of the body with id `id`
pub(crate) fn check_prev(id: BodyId, prev: &Body) -> Result<()> {
    if id == prev.id() {
        Ok(())
    } else {
        Err(SimError::IdentityMismatch { expected: id, found: prev.id() })
    }
}

impl Dynamics for Body {
    fn calc_acceleration(&self, forces: &AccelSet, params: &WorldParams, snapshot: &[Body]) -> Self {
        match self {
            Body::Sphere(s) => Body::Sphere(s.calc_acceleration(forces, params, snapshot)),
        }
    }

    fn apply_movement(&self, dt: f64) -> Self {
        match self {
            Body::Sphere(s) => Body::Sphere(s.apply_movement(dt)),
        }
    }

    fn handle_wall_collision(&self, prev: &Body, params: &WorldParams) -> Result<Self> {
        match self {
            Body::Sphere(s) => s.handle_wall_collision(prev, params).map(Body::Sphere),
        }
    }

    fn calc_entity_collision_corrections(&self, prev: &Body, bodies: &[Body]) -> Result<Self> {
        match self {
            Body::Sphere(s) => s.calc_entity_collision_corrections(prev, bodies).map(Body::Sphere),
        }
    }

    fn apply_entity_collision_deflections(&self, before: &[Body], after: &[Body]) -> Self {
        match self {
            Body::Sphere(s) => Body::Sphere(s.apply_entity_collision_deflections(before, after)),
        }
    }
}

impl PartialEq for Body {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Body {}

impl Hash for Body {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}
