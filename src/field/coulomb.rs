//! Field contributors for the superposition engine
//!
//! Defines the `FieldContribution` trait, the Coulomb point-charge term,
//! and `FieldSet`, which sums every registered term into one raw field.

use nalgebra::DMatrix;

use crate::field::grid::Grid;
use crate::field::states::Particle;

/// Raw superposed field components, same shape as the grid
#[derive(Debug, Clone, PartialEq)]
pub struct RawField {
    pub u: DMatrix<f64>, // x component
    pub v: DMatrix<f64>, // y component
}

impl RawField {
    pub fn zeros(grid: &Grid) -> Self {
        let (rows, cols) = grid.shape();
        Self {
            u: DMatrix::zeros(rows, cols),
            v: DMatrix::zeros(rows, cols),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.u.shape()
    }
}

/// Trait for field sources evaluated on a grid
/// Implementations add their contribution into `out` for every cell
pub trait FieldContribution {
    fn contribute(&self, grid: &Grid, particles: &[Particle], out: &mut RawField);
}

/// Collection of field terms
/// Each term implements [`FieldContribution`] and their contributions are
/// summed into a single raw field
pub struct FieldSet {
    terms: Vec<Box<dyn FieldContribution + Send + Sync>>,
}

impl FieldSet {
    /// Create an empty field set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a field term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: FieldContribution + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Evaluate every term on `grid` and return the summed raw field
    pub fn accumulate(&self, grid: &Grid, particles: &[Particle]) -> RawField {
        let mut out = RawField::zeros(grid);
        for term in &self.terms {
            term.contribute(grid, particles, &mut out);
        }
        out
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Inverse-square field of stationary point charges
/// The test charge is +1, so positive charges push away and negative
/// charges pull in
pub struct Coulomb {
    pub k: f64, // coulomb constant
}

impl Coulomb {
    /// Field magnitude of charge `q` at distance `r`
    #[inline]
    pub fn magnitude(&self, q: f64, r: f64) -> f64 {
        self.k * q / (r * r)
    }

    /// Add the field of a single particle to every cell of `out`
    ///
    /// A grid point sitting exactly on the particle has `r = 0`; the
    /// direction there is 0/0 and the resulting not-a-number is left in
    /// place for the normalisation step to deal with.
    pub fn add_particle(&self, grid: &Grid, p: &Particle, out: &mut RawField) {
        // a neutral particle contributes exactly nothing, even at r = 0
        if p.q == 0.0 {
            return;
        }

        let (px, py) = (p.x.x, p.x.y);
        let cells = grid.x.iter().zip(grid.y.iter());
        let acc = out.u.iter_mut().zip(out.v.iter_mut());

        for ((&x, &y), (u, v)) in cells.zip(acc) {
            // displacement from the particle to the sample point
            let dx = x - px;
            let dy = y - py;
            let r = dx.hypot(dy);

            // unit direction and scalar strength
            let ux = dx / r;
            let uy = dy / r;
            let s = self.magnitude(p.q, r);

            *u += s * ux;
            *v += s * uy;
        }
    }
}

impl Default for Coulomb {
    fn default() -> Self {
        Self { k: 1.0 }
    }
}

impl FieldContribution for Coulomb {
    fn contribute(&self, grid: &Grid, particles: &[Particle], out: &mut RawField) {
        for p in particles {
            self.add_particle(grid, p, out);
        }
    }
}
