//! Build fully-computed scenarios for the viewer
//!
//! Takes a validated `ParticleStore` plus runtime parameters and produces
//! the `Scenario` bundle handed to the renderer:
//! - field parameters (`FieldParams`)
//! - render parameters (`RenderParams`)
//! - the particles (for charge markers)
//! - the computed direction field (grid, raw and unit components)
//!
//! The scenario is inserted into Bevy as a `Resource` and only read from
//! there on.

use bevy::prelude::Resource;

use crate::configuration::config::ScenarioConfig;
use crate::field::engine::{compute_field, DirectionField};
use crate::field::errors::FieldError;
use crate::field::params::FieldParams;
use crate::field::states::Particle;
use crate::intake::{ConfigSource, ParticleSource, ParticleStore};
use crate::visualization::streamlines::RenderParams;

#[derive(Resource, Debug, Clone)]
pub struct Scenario {
    pub parameters: FieldParams,
    pub render: RenderParams,
    pub particles: Vec<Particle>,
    pub field: DirectionField,
}

impl Scenario {
    pub fn build_scenario(
        store: &ParticleStore,
        parameters: FieldParams,
        render: RenderParams,
    ) -> Result<Self, FieldError> {
        render.validate()?;
        let field = compute_field(store.particles(), &parameters)?;
        Ok(Self {
            parameters,
            render,
            particles: store.particles().to_vec(),
            field,
        })
    }

    /// Particles, grid and render settings all taken from one config
    pub fn from_config(cfg: &ScenarioConfig) -> anyhow::Result<Self> {
        let store: ParticleStore = ConfigSource { particles: &cfg.particles }.load()?;
        Ok(Self::build_scenario(&store, FieldParams::from(&cfg.grid), RenderParams::from(&cfg.render))?)
    }

    /// Particles from `source`, grid and render settings from `cfg`
    pub fn from_source(source: &mut dyn ParticleSource, cfg: &ScenarioConfig) -> anyhow::Result<Self> {
        let store = source.load()?;
        Ok(Self::build_scenario(&store, FieldParams::from(&cfg.grid), RenderParams::from(&cfg.render))?)
    }
}
