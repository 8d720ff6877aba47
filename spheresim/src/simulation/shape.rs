//! Registry of supported body shapes

use serde::Serialize;

/// Shape tag carried by every body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Sphere,
}

impl ShapeKind {
    /// Drag coefficient used in the quadratic drag law
    ///
    /// The sphere value is an idealized inviscid-fluid approximation.
    pub const fn drag_coefficient(self) -> f64 {
        match self {
            ShapeKind::Sphere => 0.1,
        }
    }
}
