//! Continuous collision-time reconstruction
//!
//! A body moving with constant acceleration over a substep follows
//!
//! ```text
//! s(t) = v·t + ½·a·t²
//! ```
//!
//! so the instant it covered displacement `s` is a root of
//! `½·a·t² + v·t − s = 0`. Wall collisions solve this per axis with signed
//! quantities; inter-body corrections solve it along the path with
//! magnitudes. Both recover the velocity at the moment of contact rather than
//! the end-of-substep velocity.

use crate::simulation::body::Body;
use crate::simulation::params::CONTACT_TOLERANCE;
use crate::simulation::sphere::Sphere;

/// Time at which signed displacement `s` is reached from velocity `v` under
/// constant acceleration `a`
///
/// Picks the earliest non-negative root of the motion equation. Without
/// such a root (negative discriminant, or both roots in the past) the
/// magnitude form is used instead, see [`contact_time_magnitudes`]. The
/// result can still be non-finite when the body neither moves nor
/// accelerates; callers handle that case.
pub fn contact_time(s: f64, v: f64, a: f64) -> f64 {
    if a == 0.0 {
        let t = s / v;
        return if t >= 0.0 { t } else { contact_time_magnitudes(s, v, a) };
    }

    let disc = v * v + 2.0 * a * s;
    if disc >= 0.0 {
        let root = disc.sqrt();
        let t1 = (-v - root) / a;
        let t2 = (-v + root) / a;
        let (early, late) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        if early >= 0.0 {
            return early;
        }
        if late >= 0.0 {
            return late;
        }
    }

    contact_time_magnitudes(s, v, a)
}

/// Contact time from magnitudes only
///
/// Treats the motion as a straight run of length `|s|` starting at speed
/// `|v|` and speeding up at `|a|`, which always has exactly one
/// non-negative root when `|a| > 0`.
pub fn contact_time_magnitudes(s: f64, v: f64, a: f64) -> f64 {
    let (s, v, a) = (s.abs(), v.abs(), a.abs());
    if a == 0.0 {
        return s / v;
    }
    (-v + (v * v + 2.0 * a * s).sqrt()) / a
}

/// True if `sphere` and `other` interpenetrate
///
/// Exactly touching bodies do not count, neither do bodies sharing a
/// position (no separating direction exists).
pub fn overlaps(sphere: &Sphere, other: &Body) -> bool {
    let (a, b) = (sphere.state(), other.state());
    if a.id == b.id || a.position == b.position {
        return false;
    }
    match other {
        Body::Sphere(o) => {
            let reach = sphere.radius() + o.radius() - CONTACT_TOLERANCE;
            (a.position - b.position).norm() < reach
        }
    }
}

/// Every body in `bodies` that `sphere` currently penetrates, in list order
///
/// The correction and the deflection stage both call this on the same
/// post-wall list, so they always agree on the partner set.
pub fn partners<'a>(sphere: &'a Sphere, bodies: &'a [Body]) -> impl Iterator<Item = &'a Body> + 'a {
    bodies.iter().filter(move |other| overlaps(sphere, other))
}
