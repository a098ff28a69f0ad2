//! Sampling grid for the field
//!
//! The grid is an axis-aligned rectangle around the charge cluster,
//! sampled with `N` evenly spaced points per axis. Coordinates are stored
//! as a mesh: `x[(i, j)] = xs[j]`, `y[(i, j)] = ys[i]`, so rows run along y
//! and columns along x.

use log::debug;
use nalgebra::DMatrix;

use crate::field::errors::FieldError;
use crate::field::params::FieldParams;
use crate::field::states::{NVec2, Particle};

/// Axis-aligned sampling rectangle `[xmin, xmax] x [ymin, ymax]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn contains(&self, p: &NVec2) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }
}

/// Pick the sampling rectangle for a set of particles
///
/// With two or more particles the pad is `padding_multiplier` times the
/// larger of the two axis ranges, applied on both sides of both axes.
/// A single particle has no range, so `fallback_padding` is used instead.
pub fn derive_bounds(particles: &[Particle], params: &FieldParams) -> Result<Bounds, FieldError> {
    let first = particles
        .first()
        .ok_or_else(|| FieldError::invalid("particle list is empty"))?;

    // Running min/max over all positions
    let (mut lo, mut hi) = (first.x, first.x);
    for p in &particles[1..] {
        lo = lo.inf(&p.x);
        hi = hi.sup(&p.x);
    }

    let pad = if particles.len() > 1 {
        let range = hi - lo;
        params.padding_multiplier * range.x.max(range.y)
    } else {
        params.fallback_padding
    };

    let bounds = Bounds {
        xmin: lo.x - pad,
        xmax: hi.x + pad,
        ymin: lo.y - pad,
        ymax: hi.y + pad,
    };
    debug!("grid bounds for {} particles (pad {}): {:?}", particles.len(), pad, bounds);
    Ok(bounds)
}

/// `n` evenly spaced samples from `start` to `stop`, both ends included
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            // pin the last sample so rounding never moves the far edge
            out[n - 1] = stop;
            out
        }
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    pub bounds: Bounds,
    pub xs: Vec<f64>, // sample positions along x (columns)
    pub ys: Vec<f64>, // sample positions along y (rows)
    pub x: DMatrix<f64>, // x coordinate of every sample
    pub y: DMatrix<f64>, // y coordinate of every sample
}

impl Grid {
    /// Mesh of `n x n` samples over `bounds`
    pub fn new(bounds: Bounds, n: usize) -> Self {
        let xs = linspace(bounds.xmin, bounds.xmax, n);
        let ys = linspace(bounds.ymin, bounds.ymax, n);
        let x = DMatrix::from_fn(n, n, |_, j| xs[j]);
        let y = DMatrix::from_fn(n, n, |i, _| ys[i]);
        Self { bounds, xs, ys, x, y }
    }

    /// Derive bounds from the particles and build the mesh
    pub fn for_particles(particles: &[Particle], params: &FieldParams) -> Result<Self, FieldError> {
        params.validate()?;
        let bounds = derive_bounds(particles, params)?;
        Ok(Self::new(bounds, params.resolution))
    }

    /// Samples per axis
    pub fn resolution(&self) -> usize {
        self.xs.len()
    }

    /// (rows, cols) of every array living on this grid
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    /// Spacing between neighbouring samples along (x, y)
    pub fn spacing(&self) -> NVec2 {
        let n = self.resolution();
        if n < 2 {
            return NVec2::zeros();
        }
        NVec2::new(
            self.bounds.width() / (n - 1) as f64,
            self.bounds.height() / (n - 1) as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let v = linspace(-20.0, 30.0, 50);
        assert_eq!(v.len(), 50);
        assert_eq!(v[0], -20.0);
        assert_eq!(v[49], 30.0);
        let step = 50.0 / 49.0;
        assert!((v[1] - v[0] - step).abs() < 1e-12);
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
    }

    #[test]
    fn mesh_rows_follow_y_and_columns_follow_x() {
        let b = Bounds { xmin: 0.0, xmax: 4.0, ymin: -2.0, ymax: 2.0 };
        let g = Grid::new(b, 5);
        assert_eq!(g.shape(), (5, 5));
        for i in 0..5 {
            for j in 0..5 {
                assert_eq!(g.x[(i, j)], j as f64);
                assert_eq!(g.y[(i, j)], i as f64 - 2.0);
            }
        }
        assert_eq!(g.spacing(), NVec2::new(1.0, 1.0));
    }

    #[test]
    fn pad_uses_larger_axis_range() {
        let ps = [Particle::new(0.0, 0.0, 1.0), Particle::new(1.0, 3.0, -1.0)];
        let b = derive_bounds(&ps, &FieldParams::default()).unwrap();
        assert_eq!(b, Bounds { xmin: -6.0, xmax: 7.0, ymin: -6.0, ymax: 9.0 });
    }

    #[test]
    fn empty_particles_rejected() {
        let err = derive_bounds(&[], &FieldParams::default()).unwrap_err();
        assert!(matches!(err, FieldError::InvalidInput(_)));
    }

    #[test]
    fn zero_resolution_rejected() {
        let params = FieldParams { resolution: 0, ..FieldParams::default() };
        let ps = [Particle::new(0.0, 0.0, 1.0)];
        assert!(Grid::for_particles(&ps, &params).is_err());
    }
}
