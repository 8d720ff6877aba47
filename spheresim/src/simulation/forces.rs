//! Acceleration contributors for the sphere engine
//!
//! Defines the [`Acceleration`] trait and the terms a world combines into
//! its [`AccelSet`]: uniform gravity, significant-mass Newtonian gravity and
//! quadratic drag

use std::fmt;

use crate::simulation::body::{Body, BodyState};
use crate::simulation::params::{WorldParams, G, SIGNIFICANT_MASS};
use crate::simulation::shape::ShapeKind;
use crate::simulation::vector::NVec3;

/// The body an acceleration term is evaluated for
///
/// Carries the shape-dependent quantities so terms stay shape-agnostic.
pub struct ForceTarget<'a> {
    pub state: &'a BodyState,
    pub kind: ShapeKind,
    pub cross_section: f64, // area facing the flow
}

/// Trait for acceleration sources
/// Implementations return their contribution for a single body; `bodies` is
/// the pre-step snapshot and must not be read for any updated state
pub trait Acceleration {
    fn acceleration(&self, target: &ForceTarget<'_>, params: &WorldParams, bodies: &[Body]) -> NVec3;
}

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Uniform gravity, inter-body gravity and drag
    pub fn standard() -> Self {
        Self::new()
            .with(UniformGravity)
            .with(NewtonianGravity::default())
            .with(QuadraticDrag)
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Sum of every term's contribution for `target`
    pub fn total(&self, target: &ForceTarget<'_>, params: &WorldParams, bodies: &[Body]) -> NVec3 {
        self.terms
            .iter()
            .map(|term| term.acceleration(target, params, bodies))
            .fold(NVec3::zeros(), |acc, a| acc + a)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for AccelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccelSet").field("terms", &self.terms.len()).finish()
    }
}

/// The world's uniform gravity field
pub struct UniformGravity;

impl Acceleration for UniformGravity {
    fn acceleration(&self, _target: &ForceTarget<'_>, params: &WorldParams, _bodies: &[Body]) -> NVec3 {
        params.gravity
    }
}

/// Direct all-pairs Newtonian gravity without softening
/// Only bodies heavier than `significant_mass` attract; bodies sharing the
/// target's position are skipped since the direction is undefined
pub struct NewtonianGravity {
    pub g: f64,                // gravitational constant
    pub significant_mass: f64, // lighter sources are ignored
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self {
            g: G,
            significant_mass: SIGNIFICANT_MASS,
        }
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, target: &ForceTarget<'_>, _params: &WorldParams, bodies: &[Body]) -> NVec3 {
        let xi = target.state.position;

        bodies
            .iter()
            .filter(|other| other.id() != target.state.id)
            .filter(|other| other.mass() > self.significant_mass)
            .filter(|other| other.position() != xi)
            .map(|other| {
                // r points from the target towards the source
                let r = other.position() - xi;
                let r2 = r.norm_squared();
                r * (self.g * other.mass() / (r2 * r2.sqrt()))
            })
            .fold(NVec3::zeros(), |acc, a| acc + a)
    }
}

/// Quadratic drag in the world's medium
/// a = -v̂ · |v|² · ½ · Cd · ρ · A / m
pub struct QuadraticDrag;

impl Acceleration for QuadraticDrag {
    fn acceleration(&self, target: &ForceTarget<'_>, params: &WorldParams, _bodies: &[Body]) -> NVec3 {
        let v = target.state.velocity;
        let speed2 = v.norm_squared();
        if speed2 == 0.0 || params.air_density == 0.0 {
            return NVec3::zeros();
        }

        let magnitude = speed2 * 0.5 * target.kind.drag_coefficient() * params.air_density * target.cross_section
            / target.state.mass;
        -v.normalize() * magnitude
    }
}
