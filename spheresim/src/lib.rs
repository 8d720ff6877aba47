pub mod error;
pub mod simulation;
pub mod configuration;

pub use error::{Result, SimError};

pub use simulation::body::{Body, BodyId, Dynamics};
pub use simulation::builder::BodyBuilder;
pub use simulation::forces::{AccelSet, Acceleration, ForceTarget, NewtonianGravity, QuadraticDrag, UniformGravity};
pub use simulation::params::{WorldParams, EARTH_AIR_DENSITY, EARTH_GRAVITY, G, SIGNIFICANT_MASS};
pub use simulation::scenario::Scenario;
pub use simulation::shape::ShapeKind;
pub use simulation::snapshot::{BodySnapshot, WorldSnapshot};
pub use simulation::sphere::Sphere;
pub use simulation::vector::NVec3;
pub use simulation::world::World;

pub use configuration::config::{BodyConfig, RunConfig, ScenarioConfig, WorldConfig};
