pub mod vector;
pub mod shape;
pub mod params;
pub mod body;
pub mod sphere;
pub mod collision;
pub mod forces;
pub mod integrator;
pub mod builder;
pub mod world;
pub mod snapshot;
pub mod scenario;
