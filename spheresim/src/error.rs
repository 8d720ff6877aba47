//! Error types for the simulation engine
//!
//! Every precondition violation is reported as a [`SimError`]; the engine
//! never substitutes defaults for bad input.

use thiserror::Error;

use crate::simulation::body::BodyId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("{name} has non-finite components: {value:?}")]
    NonFiniteVector { name: &'static str, value: [f64; 3] },

    #[error("world size must be finite and positive on every axis, got {0:?}")]
    InvalidWorldSize([f64; 3]),

    #[error("update frequency must be finite and positive, got {0}")]
    InvalidUpdateFrequency(f64),

    #[error("air density must be finite and non-negative, got {0}")]
    InvalidAirDensity(f64),

    #[error("position {position:?} lies outside the world bounds {size:?}")]
    PositionOutOfBounds { position: [f64; 3], size: [f64; 3] },

    #[error("simulated duration must be finite and non-negative, got {0}")]
    InvalidDuration(f64),

    #[error("no body with id {0}")]
    UnknownBody(BodyId),

    #[error("invalid body: {0}")]
    InvalidBody(String),

    #[error("previous state belongs to body {found}, expected body {expected}")]
    IdentityMismatch { expected: BodyId, found: BodyId },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, SimError>;
