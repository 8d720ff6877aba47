//! Sphere physics
//!
//! The five per-substep transitions for spherical bodies. Every operation
//! returns a new value with the same id; immovable spheres pass through all
//! of them unchanged.

use std::f64::consts::PI;

use crate::error::Result;
use crate::simulation::body::{check_prev, Body, BodyState, Dynamics};
use crate::simulation::collision::{self, contact_time};
use crate::simulation::forces::{AccelSet, ForceTarget};
use crate::simulation::integrator;
use crate::simulation::params::WorldParams;
use crate::simulation::shape::ShapeKind;
use crate::simulation::vector::NVec3;

#[derive(Debug, Clone)]
pub struct Sphere {
    state: BodyState,
    radius: f64,
}

impl Sphere {
    pub(crate) fn new(state: BodyState, radius: f64) -> Self {
        Self { state, radius }
    }

    /// Volume of a sphere with the given radius
    pub fn volume(radius: f64) -> f64 {
        4.0 / 3.0 * PI * radius.powi(3)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Area facing the flow, π·r²
    pub fn cross_section(&self) -> f64 {
        PI * self.radius * self.radius
    }

    pub(crate) fn state(&self) -> &BodyState {
        &self.state
    }

    pub(crate) fn with_state(&self, state: BodyState) -> Sphere {
        Sphere { state, radius: self.radius }
    }

    /// Push out of a single penetrated partner
    ///
    /// Moves along the centre-to-centre direction by the overlap, or half of
    /// it when the partner is movable and expected to move the other half.
    /// The velocity is rebuilt at the reconstructed contact instant from
    /// `prev`'s kinematics.
    fn correct_against(&self, state: BodyState, prev: &BodyState, partner: &Body) -> BodyState {
        let Some(other) = partner.as_sphere() else {
            return state;
        };

        let offset = state.position - other.state.position;
        let distance = offset.norm();
        let overlap = self.radius + other.radius - distance;
        if distance == 0.0 || overlap <= 0.0 {
            return state;
        }
        let share = if other.state.movable { 0.5 } else { 1.0 };
        let position = state.position + offset / distance * overlap * share;

        BodyState {
            position,
            velocity: contact_velocity(prev, &position).unwrap_or(state.velocity),
            ..state
        }
    }
}

/// Velocity at the moment the body reached `position` from `prev`
///
/// Solves the motion equation along the travelled path using magnitudes.
/// `None` when the body is not accelerating (the velocity never changed) or
/// the reconstruction is not finite.
fn contact_velocity(prev: &BodyState, position: &NVec3) -> Option<NVec3> {
    let a = prev.acceleration;
    if a == NVec3::zeros() {
        return None;
    }

    let v = prev.velocity;
    let path = position - prev.position;
    // decelerating along the direction of travel counts as negative
    let along = if a.dot(&v) < 0.0 { -a.norm() } else { a.norm() };

    let t = contact_time(path.norm(), v.norm(), along);
    let velocity = v + a * t;
    velocity.iter().all(|c| c.is_finite()).then_some(velocity)
}

/// Velocity change of `own` from an elastic contact with `other`
/// - k = 2·m_o/(m + m_o), or 2 against an immovable partner
/// - Δv = k·proj_Δp(v_o − v), Δp = p − p_o
fn elastic_impulse(own: &BodyState, other: &Body) -> NVec3 {
    let k = if other.is_movable() {
        2.0 * other.mass() / (own.mass + other.mass())
    } else {
        2.0
    };
    let dp = own.position - other.position();
    let dv = other.velocity() - own.velocity;
    dp * (k * dv.dot(&dp) / dp.norm_squared())
}

/// Post-bounce velocity on one axis
///
/// `v0` and `a` are the axis velocity and acceleration at the start of the
/// substep, `s` the signed displacement from there to the wall contact.
fn wall_bounce(s: f64, v0: f64, a: f64, current: f64, bounciness: f64) -> f64 {
    let t = contact_time(s, v0, a);
    let hit = integrator::velocity_at(v0, a, t);

    // gravity may already have turned the body around within the substep
    let turned = v0 != 0.0 && hit != 0.0 && hit.signum() != v0.signum();
    let bounced = if turned { hit * bounciness } else { -hit * bounciness };

    if bounced.is_finite() {
        bounced
    } else {
        -bounciness * current
    }
}

impl Dynamics for Sphere {
    fn calc_acceleration(&self, forces: &AccelSet, params: &WorldParams, snapshot: &[Body]) -> Self {
        if !self.state.movable {
            return self.clone();
        }

        let target = ForceTarget {
            state: &self.state,
            kind: ShapeKind::Sphere,
            cross_section: self.cross_section(),
        };
        let acceleration = self.state.self_acceleration + forces.total(&target, params, snapshot);

        self.with_state(BodyState { acceleration, ..self.state })
    }

    fn apply_movement(&self, dt: f64) -> Self {
        if !self.state.movable {
            return self.clone();
        }
        self.with_state(integrator::advance(&self.state, dt))
    }

    fn handle_wall_collision(&self, prev: &Body, params: &WorldParams) -> Result<Self> {
        check_prev(self.state.id, prev)?;
        if !self.state.movable {
            return Ok(self.clone());
        }

        let before = prev.state();
        let mut position = self.state.position;
        let mut velocity = self.state.velocity;

        for axis in 0..3 {
            let low = self.radius;
            let high = params.size[axis] - self.radius;
            let wall = if position[axis] < low {
                low
            } else if position[axis] > high {
                high
            } else {
                continue;
            };

            position[axis] = wall;
            let v = wall_bounce(
                wall - before.position[axis],
                before.velocity[axis],
                before.acceleration[axis],
                velocity[axis],
                self.state.bounciness,
            );
            velocity[axis] = if v.abs() < params.dead_zone(axis) { 0.0 } else { v };
        }

        Ok(self.with_state(BodyState {
            position,
            velocity,
            ..self.state
        }))
    }

    fn calc_entity_collision_corrections(&self, prev: &Body, bodies: &[Body]) -> Result<Self> {
        check_prev(self.state.id, prev)?;
        if !self.state.movable {
            return Ok(self.clone());
        }

        // sequential: each correction starts from the previous one's result
        let corrected = collision::partners(self, bodies)
            .fold(self.state, |state, partner| self.correct_against(state, prev.state(), partner));

        Ok(self.with_state(corrected))
    }

    fn apply_entity_collision_deflections(&self, before: &[Body], after: &[Body]) -> Self {
        if !self.state.movable {
            return self.clone();
        }

        // our own corrected state, if the correction stage produced one
        let own = after
            .iter()
            .find(|b| b.id() == self.state.id)
            .map_or(self.state, |b| *b.state());

        // every partner's impulse is taken against the same incoming velocity
        let mut hit = false;
        let impulse = collision::partners(self, before)
            .filter_map(|partner| after.iter().find(|b| b.id() == partner.id()))
            .fold(NVec3::zeros(), |sum, other| {
                hit = true;
                sum + elastic_impulse(&own, other)
            });
        if !hit {
            return self.with_state(own);
        }

        let velocity = (own.velocity + impulse) * own.bounciness;
        self.with_state(BodyState { velocity, ..own })
    }
}
