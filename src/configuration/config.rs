//! Configuration types for loading field scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`GridConfig`]     – sampling grid and numerical options (optional)
//! - [`RenderConfig`]   – streamline options used only by the viewer (optional)
//! - [`ParticleConfig`] – position and charge of each particle
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! grid:
//!   resolution: 50           # samples per axis
//!   padding_multiplier: 2.0  # pad = multiplier * max axis range
//!   fallback_padding: 5.0    # pad for a single particle
//!   coulomb_k: 1.0
//!   singularity: propagate   # or "mask"
//!
//! render:
//!   streamline_density: 1.2
//!   step_scale: 0.5          # RK4 step in grid cells
//!   max_points: 600          # per streamline direction
//!
//! particles:
//!   - x: [ -1.0, 0.0 ]
//!     q: 1.0
//!   - x: [  1.0, 0.0 ]
//!     q: -1.0
//! ```
//!
//! Only `particles` is required; every other key falls back to its default.

use serde::Deserialize;

use crate::field::params::{
    FieldParams, SingularityPolicy, DEFAULT_FALLBACK_PADDING, DEFAULT_PADDING_MULTIPLIER, DEFAULT_RESOLUTION,
};
use crate::visualization::streamlines::RenderParams;

/// What to do with not-a-number cells
/// `singularity: "propagate"` or `singularity: "mask"`
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SingularityConfig {
    #[serde(rename = "propagate")] // keep not-a-number cells as they are
    #[default]
    Propagate,

    #[serde(rename = "mask")] // zero out non-finite unit vectors
    Mask,
}

impl From<SingularityConfig> for SingularityPolicy {
    fn from(cfg: SingularityConfig) -> Self {
        match cfg {
            SingularityConfig::Propagate => SingularityPolicy::Propagate,
            SingularityConfig::Mask => SingularityPolicy::Mask,
        }
    }
}

/// Sampling grid and numerical options
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GridConfig {
    pub resolution: usize, // samples per axis
    pub padding_multiplier: f64, // scale of the range-based pad
    pub fallback_padding: f64, // pad around a lone particle
    pub coulomb_k: f64, // coulomb constant
    pub singularity: SingularityConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            padding_multiplier: DEFAULT_PADDING_MULTIPLIER,
            fallback_padding: DEFAULT_FALLBACK_PADDING,
            coulomb_k: 1.0,
            singularity: SingularityConfig::Propagate,
        }
    }
}

impl From<&GridConfig> for FieldParams {
    fn from(cfg: &GridConfig) -> Self {
        FieldParams {
            resolution: cfg.resolution,
            padding_multiplier: cfg.padding_multiplier,
            fallback_padding: cfg.fallback_padding,
            k: cfg.coulomb_k,
            singularity: cfg.singularity.into(),
        }
    }
}

/// Streamline options, read only by the viewer
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RenderConfig {
    pub streamline_density: f64,
    pub step_scale: f64,
    pub max_points: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let p = RenderParams::default();
        Self {
            streamline_density: p.density,
            step_scale: p.step_scale,
            max_points: p.max_points,
        }
    }
}

impl From<&RenderConfig> for RenderParams {
    fn from(cfg: &RenderConfig) -> Self {
        RenderParams {
            density: cfg.streamline_density,
            step_scale: cfg.step_scale,
            max_points: cfg.max_points,
        }
    }
}

/// A single point charge
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    pub x: [f64; 2], // position
    pub q: f64, // charge
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub particles: Vec<ParticleConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_scenario_uses_defaults() {
        let cfg: ScenarioConfig = serde_yaml::from_str("particles:\n  - { x: [3.0, 4.0], q: 1.0 }\n").unwrap();
        assert_eq!(cfg.particles.len(), 1);
        let params = FieldParams::from(&cfg.grid);
        assert_eq!(params.resolution, 50);
        assert_eq!(params.padding_multiplier, 2.0);
        assert_eq!(params.fallback_padding, 5.0);
        assert_eq!(params.singularity, SingularityPolicy::Propagate);
        assert_eq!(RenderParams::from(&cfg.render).density, 1.2);
    }

    #[test]
    fn overrides_are_read() {
        let yaml = "
grid:
  resolution: 80
  singularity: mask
render:
  streamline_density: 2.0
particles:
  - x: [0.0, 0.0]
    q: -2.0
";
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.grid.resolution, 80);
        assert_eq!(cfg.grid.padding_multiplier, 2.0);
        assert_eq!(SingularityPolicy::from(cfg.grid.singularity), SingularityPolicy::Mask);
        assert_eq!(cfg.render.streamline_density, 2.0);
        assert_eq!(cfg.render.max_points, RenderParams::default().max_points);
    }
}
