pub mod field;
pub mod intake;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use field::states::{Particle, ChargeSign, NVec2};
pub use field::params::{FieldParams, SingularityPolicy};
pub use field::errors::FieldError;
pub use field::grid::{Bounds, Grid, derive_bounds, linspace};
pub use field::coulomb::{FieldContribution, FieldSet, Coulomb, RawField};
pub use field::normalize::{UnitField, normalize};
pub use field::engine::{DirectionField, compute_field};
pub use field::scenario::Scenario;

pub use intake::{ParticleSource, ConfigSource, PromptSource, ParticleStore, IntakeError};

pub use configuration::config::{GridConfig, RenderConfig, ParticleConfig, ScenarioConfig, SingularityConfig};

pub use visualization::{efsim_vis2d::run_2d, streamlines::{trace_streamlines, RenderParams}};

pub use benchmark::benchmark::bench_field;
