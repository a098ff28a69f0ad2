//! Particle intake
//!
//! Producers of a validated [`ParticleStore`]. The field engine only ever
//! sees the store, so sources can be swapped freely: interactive prompts,
//! YAML scenarios, or anything else that yields particles.

pub mod errors;
pub mod store;
pub mod prompt;

use crate::configuration::config::ParticleConfig;
use crate::field::states::Particle;

pub use errors::IntakeError;
pub use prompt::PromptSource;
pub use store::ParticleStore;

/// Anything that can produce a validated particle list
pub trait ParticleSource {
    fn load(&mut self) -> Result<ParticleStore, IntakeError>;
}

/// Particles taken from a scenario file
pub struct ConfigSource<'a> {
    pub particles: &'a [ParticleConfig],
}

impl ParticleSource for ConfigSource<'_> {
    fn load(&mut self) -> Result<ParticleStore, IntakeError> {
        let particles = self
            .particles
            .iter()
            .map(|pc| Particle::new(pc.x[0], pc.x[1], pc.q))
            .collect();
        ParticleStore::new(particles)
    }
}
