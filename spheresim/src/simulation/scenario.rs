//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime
//! [`Scenario`] containing:
//! - the initial `World` with every configured body spawned
//! - the run settings (duration and report interval)
//!
//! Everything goes through `World` and `BodyBuilder`, so invalid values are
//! reported with the same errors as API calls.

use crate::configuration::config::{BodyConfig, RunConfig, ScenarioConfig, WorldConfig};
use crate::error::{Result, SimError};
use crate::simulation::body::Body;
use crate::simulation::params::{EARTH_AIR_DENSITY, EARTH_GRAVITY};
use crate::simulation::vector::NVec3;
use crate::simulation::world::World;

/// A ready-to-run world plus how long to run it
#[derive(Debug, Clone)]
pub struct Scenario {
    pub world: World,
    pub duration: f64,
    pub report_interval: f64,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let world = build_world(&cfg.world)?;

        // bodies: map `BodyConfig` -> runtime `Body` through the builder
        let bodies = cfg
            .bodies
            .iter()
            .map(|bc| build_body(&world, bc))
            .collect::<Result<Vec<Body>>>()?;
        let requested = bodies.len();
        let world = world.spawn(bodies);
        if world.body_count() < requested {
            log::warn!(
                "{} configured bodies share a position with an earlier one and were skipped",
                requested - world.body_count()
            );
        }

        let (duration, report_interval) = run_settings(&cfg.run)?;

        Ok(Self {
            world,
            duration,
            report_interval,
        })
    }

    /// Simulate `duration` seconds in report-interval chunks
    ///
    /// `report` sees the initial world at t = 0 and the world after every
    /// chunk. The chunk count is fixed up front; the last chunk ends exactly
    /// at `duration`.
    pub fn run<F>(&self, duration: f64, mut report: F) -> Result<World>
    where
        F: FnMut(&World, f64),
    {
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(SimError::InvalidDuration(duration));
        }

        let mut world = self.world.clone();
        report(&world, 0.0);
        if duration == 0.0 {
            return Ok(world);
        }

        // a zero-length scenario run for longer has no interval yet
        let interval = if self.report_interval > 0.0 {
            self.report_interval
        } else {
            duration
        };
        let chunks = (duration / interval).ceil().max(1.0) as usize;

        let mut elapsed = 0.0;
        for i in 1..=chunks {
            let end = (i as f64 * interval).min(duration);
            world = world.simulate_time(end - elapsed)?;
            elapsed = end;
            report(&world, elapsed);
        }
        Ok(world)
    }
}

fn build_world(cfg: &WorldConfig) -> Result<World> {
    let mut world = World::new(cfg.update_frequency, NVec3::from(cfg.size))?;

    if cfg.earth_like {
        world = world.set_gravity(EARTH_GRAVITY)?.set_air_density(EARTH_AIR_DENSITY)?;
    }
    if let Some(gravity) = cfg.gravity {
        world = world.set_gravity(NVec3::from(gravity))?;
    }
    if let Some(density) = cfg.air_density {
        world = world.set_air_density(density)?;
    }
    Ok(world)
}

fn build_body(world: &World, bc: &BodyConfig) -> Result<Body> {
    let velocity = bc.velocity.map_or(NVec3::zeros(), NVec3::from);
    let acceleration = bc.acceleration.map_or(NVec3::zeros(), NVec3::from);

    let builder = world
        .create_at(NVec3::from(bc.position))?
        .with_motion(velocity, acceleration);

    if bc.movable.unwrap_or(true) {
        builder.sphere(bc.radius, bc.density, bc.bounciness.unwrap_or(1.0))
    } else {
        builder.immovable_sphere(bc.radius, bc.density)
    }
}

fn run_settings(cfg: &RunConfig) -> Result<(f64, f64)> {
    let duration = cfg.duration;
    if !(duration.is_finite() && duration >= 0.0) {
        return Err(SimError::InvalidDuration(duration));
    }

    // missing or zero: report once, at the end
    let interval = match cfg.report_interval {
        None => duration,
        Some(i) if i.is_finite() && i > 0.0 => i,
        Some(i) if i == 0.0 => duration,
        Some(i) => return Err(SimError::InvalidDuration(i)),
    };
    Ok((duration, interval))
}
