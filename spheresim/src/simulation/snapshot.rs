//! Read-only views of a world for renderers and telemetry
//!
//! A snapshot copies out every world parameter and every body attribute in
//! plain arrays so it can be serialized without touching engine types.

use serde::Serialize;

use crate::simulation::body::{Body, BodyId};
use crate::simulation::shape::ShapeKind;
use crate::simulation::vector::to_array;
use crate::simulation::world::World;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub kind: ShapeKind,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub acceleration: [f64; 3],
    pub self_acceleration: [f64; 3],
    pub movable: bool,
    pub mass: f64,
    pub density: f64,
    pub bounciness: f64,
    pub radius: f64,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id(),
            kind: body.kind(),
            position: to_array(&body.position()),
            velocity: to_array(&body.velocity()),
            acceleration: to_array(&body.acceleration()),
            self_acceleration: to_array(&body.self_acceleration()),
            movable: body.is_movable(),
            mass: body.mass(),
            density: body.density(),
            bounciness: body.bounciness(),
            radius: body.bounding_radius(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub size: [f64; 3],
    pub gravity: [f64; 3],
    pub air_density: f64,
    pub update_frequency: f64,
    pub bodies: Vec<BodySnapshot>,
}

impl From<&World> for WorldSnapshot {
    fn from(world: &World) -> Self {
        Self {
            size: to_array(&world.size()),
            gravity: to_array(&world.gravity()),
            air_density: world.air_density(),
            update_frequency: world.update_frequency(),
            bodies: world.bodies().iter().map(BodySnapshot::from).collect(),
        }
    }
}
