//! Field pipeline: particles -> grid -> raw field -> unit field
//!
//! Pure and single pass. Nothing here keeps state between calls.

use log::{debug, info, warn};

use crate::field::coulomb::{Coulomb, FieldSet, RawField};
use crate::field::errors::FieldError;
use crate::field::grid::Grid;
use crate::field::normalize::UnitField;
use crate::field::params::FieldParams;
use crate::field::states::Particle;

/// Everything the renderer needs from one computation pass
#[derive(Debug, Clone)]
pub struct DirectionField {
    pub grid: Grid,
    pub raw: RawField,
    pub unit: UnitField,
}

impl DirectionField {
    /// Cells whose raw or unit value is not finite
    pub fn degenerate_cells(&self) -> usize {
        let raw_bad = self
            .raw
            .u
            .iter()
            .zip(self.raw.v.iter())
            .map(|(u, v)| !(u.is_finite() && v.is_finite()));
        let unit_bad = self
            .unit
            .u
            .iter()
            .zip(self.unit.v.iter())
            .map(|(u, v)| !(u.is_finite() && v.is_finite()));
        raw_bad.zip(unit_bad).filter(|(a, b)| *a || *b).count()
    }
}

/// Field set used by the pipeline: a single Coulomb term
pub fn coulomb_field_set(params: &FieldParams) -> FieldSet {
    FieldSet::new().with(Coulomb { k: params.k })
}

/// Compute the unit direction field of `particles`
///
/// Fails with `InvalidInput` on an empty particle list or bad parameters,
/// before any grid work is done.
pub fn compute_field(particles: &[Particle], params: &FieldParams) -> Result<DirectionField, FieldError> {
    if particles.is_empty() {
        return Err(FieldError::invalid("particle list is empty"));
    }

    let grid = Grid::for_particles(particles, params)?;
    debug!("grid {:?} over {:?}", grid.shape(), grid.bounds);

    let raw = coulomb_field_set(params).accumulate(&grid, particles);
    let unit = UnitField::from_raw(&raw, params.singularity);

    let field = DirectionField { grid, raw, unit };

    let degenerate = field.degenerate_cells();
    if degenerate > 0 {
        warn!(
            "{} degenerate cell(s) (sample on a charge or exact cancellation), policy {:?}",
            degenerate, params.singularity
        );
    }
    info!(
        "computed {}x{} direction field for {} particle(s)",
        params.resolution,
        params.resolution,
        particles.len()
    );

    Ok(field)
}
