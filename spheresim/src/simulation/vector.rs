//! Vector helpers shared by every stage
//!
//! `NVec3` is the engine's only vector type. These helpers validate user
//! supplied vectors and compare them per component.

use nalgebra::Vector3;

use crate::error::{Result, SimError};

pub type NVec3 = Vector3<f64>;

/// True if no component is NaN or infinite
pub fn is_finite(v: &NVec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Reject vectors with non-finite components
pub fn validate(name: &'static str, v: NVec3) -> Result<NVec3> {
    if is_finite(&v) {
        Ok(v)
    } else {
        Err(SimError::NonFiniteVector { name, value: to_array(&v) })
    }
}

/// `a[i] < b[i]` for every axis
pub fn all_less(a: &NVec3, b: &NVec3) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x < y)
}

/// `a[i] <= b[i]` for every axis
pub fn all_less_or_equal(a: &NVec3, b: &NVec3) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x <= y)
}

/// `v[i] > 0` for every axis
pub fn all_positive(v: &NVec3) -> bool {
    all_less(&NVec3::zeros(), v)
}

pub fn to_array(v: &NVec3) -> [f64; 3] {
    [v.x, v.y, v.z]
}
