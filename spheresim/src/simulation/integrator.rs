//! Fixed-step motion integration
//!
//! Bodies move under the acceleration computed at the start of the substep,
//! held constant for its whole length. For a constant field (uniform gravity
//! only) this is exact up to rounding.

use crate::simulation::body::BodyState;
use crate::simulation::vector::NVec3;

/// Position and velocity after `dt` under constant acceleration `a`
/// - x' = x + ½·a·dt² + v·dt
/// - v' = v + a·dt
pub fn constant_acceleration(x: NVec3, v: NVec3, a: NVec3, dt: f64) -> (NVec3, NVec3) {
    let x_next = x + 0.5 * a * dt * dt + v * dt;
    let v_next = v + a * dt;
    (x_next, v_next)
}

/// Advance a body's state by `dt`
/// Acceleration and self-acceleration are carried through unchanged
pub fn advance(state: &BodyState, dt: f64) -> BodyState {
    let (position, velocity) = constant_acceleration(state.position, state.velocity, state.acceleration, dt);
    BodyState {
        position,
        velocity,
        ..*state
    }
}

/// Velocity on one axis at time `t` into the substep
pub fn velocity_at(v: f64, a: f64, t: f64) -> f64 {
    v + t * a
}
