//! Streamline tracer over a unit direction field
//!
//! Seeds sit on a lattice of `round(30 * density)` cells per axis. Every
//! seed is integrated backward and forward with RK4 on the bilinearly
//! interpolated unit field. A line stops when it leaves the grid, hits a
//! not-a-number or vanishing sample, runs out of points, or enters a lattice
//! cell already claimed by another line. Seeds in claimed cells are skipped.

use crate::field::engine::DirectionField;
use crate::field::errors::FieldError;
use crate::field::grid::{Bounds, Grid};
use crate::field::normalize::UnitField;
use crate::field::states::NVec2;

/// Lattice cells per axis at density 1
const CELLS_AT_UNIT_DENSITY: f64 = 30.0;

/// Interpolated directions shorter than this mean the neighbouring samples
/// disagree (a source or sink sits inside the cell)
const MIN_AGREEMENT: f64 = 0.5;

/// Upper bound on lattice cells per axis
pub const MAX_LATTICE: usize = 2000;

#[derive(Debug, Clone)]
pub struct RenderParams {
    pub density: f64, // streamline density
    pub step_scale: f64, // RK4 step as a fraction of a grid cell
    pub max_points: usize, // per direction
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            density: 1.2,
            step_scale: 0.5,
            max_points: 600,
        }
    }
}

impl RenderParams {
    /// Lattice cells per axis for this density
    pub fn lattice_size(&self) -> f64 {
        (CELLS_AT_UNIT_DENSITY * self.density).round().max(1.0)
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(FieldError::invalid(format!(
                "streamline density must be finite and positive, got {}",
                self.density
            )));
        }
        if self.lattice_size() > MAX_LATTICE as f64 {
            return Err(FieldError::invalid(format!(
                "streamline density {} needs more than {} seed cells per axis",
                self.density, MAX_LATTICE
            )));
        }
        if !self.step_scale.is_finite() || self.step_scale <= 0.0 {
            return Err(FieldError::invalid(format!(
                "step scale must be finite and positive, got {}",
                self.step_scale
            )));
        }
        Ok(())
    }
}

/// Which streamline owns each lattice cell
struct Occupancy {
    bounds: Bounds,
    m: usize,
    owner: Vec<Option<usize>>,
}

impl Occupancy {
    fn new(bounds: Bounds, params: &RenderParams) -> Self {
        let m = params.lattice_size() as usize;
        Self {
            bounds,
            m,
            owner: vec![None; m * m],
        }
    }

    fn cell(&self, p: &NVec2) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let m = self.m as f64;
        let cx = (((p.x - self.bounds.xmin) / self.bounds.width() * m).floor() as usize).min(self.m - 1);
        let cy = (((p.y - self.bounds.ymin) / self.bounds.height() * m).floor() as usize).min(self.m - 1);
        Some(cy * self.m + cx)
    }

    fn center(&self, cell: usize) -> NVec2 {
        let (cx, cy) = (cell % self.m, cell / self.m);
        let m = self.m as f64;
        NVec2::new(
            self.bounds.xmin + (cx as f64 + 0.5) / m * self.bounds.width(),
            self.bounds.ymin + (cy as f64 + 0.5) / m * self.bounds.height(),
        )
    }

    /// Claim `cell` for line `id`; false if another line got there first
    fn claim(&mut self, cell: usize, id: usize) -> bool {
        match self.owner[cell] {
            Some(other) if other != id => false,
            _ => {
                self.owner[cell] = Some(id);
                true
            }
        }
    }
}

/// Bilinear sample of the unit field at world position `p`, renormalised
fn sample_direction(grid: &Grid, unit: &UnitField, p: &NVec2) -> Option<NVec2> {
    let n = grid.resolution();
    let b = &grid.bounds;
    let h = grid.spacing();
    if n < 2 || !b.contains(p) {
        return None;
    }

    // fractional (col, row) index
    let fx = (p.x - b.xmin) / h.x;
    let fy = (p.y - b.ymin) / h.y;
    let c0 = (fx.floor() as usize).min(n - 2);
    let r0 = (fy.floor() as usize).min(n - 2);
    let tx = fx - c0 as f64;
    let ty = fy - r0 as f64;

    let lerp2 = |a: &nalgebra::DMatrix<f64>| {
        let top = a[(r0, c0)] * (1.0 - tx) + a[(r0, c0 + 1)] * tx;
        let bot = a[(r0 + 1, c0)] * (1.0 - tx) + a[(r0 + 1, c0 + 1)] * tx;
        top * (1.0 - ty) + bot * ty
    };
    let d = NVec2::new(lerp2(&unit.u), lerp2(&unit.v));

    let m = d.norm();
    if !m.is_finite() || m < MIN_AGREEMENT {
        return None;
    }
    Some(d / m)
}

fn rk4_step(grid: &Grid, unit: &UnitField, p: NVec2, h: f64, sign: f64) -> Option<NVec2> {
    let f = |x: NVec2| sample_direction(grid, unit, &x).map(|d| d * sign);
    let k1 = f(p)?;
    let k2 = f(p + 0.5 * h * k1)?;
    let k3 = f(p + 0.5 * h * k2)?;
    let k4 = f(p + h * k3)?;
    let dir = (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0;
    let next = p + h * dir;
    next.iter().all(|c| c.is_finite()).then_some(next)
}

fn walk(
    field: &DirectionField,
    occ: &mut Occupancy,
    seed: NVec2,
    id: usize,
    h: f64,
    sign: f64,
    max_points: usize,
) -> Vec<NVec2> {
    let mut pts = Vec::new();
    let mut p = seed;
    for _ in 0..max_points {
        match occ.cell(&p) {
            Some(cell) if occ.claim(cell, id) => pts.push(p),
            _ => break,
        }
        match rk4_step(&field.grid, &field.unit, p, h, sign) {
            Some(next) => p = next,
            None => break,
        }
    }
    pts
}

/// Trace streamlines through `field`; each line is a world-space polyline
/// running in the direction of the field
///
/// Invalid render parameters (see [`RenderParams::validate`]) or a collapsed
/// grid give no lines.
pub fn trace_streamlines(field: &DirectionField, params: &RenderParams) -> Vec<Vec<NVec2>> {
    let grid = &field.grid;
    let b = grid.bounds;
    if params.validate().is_err() || grid.resolution() < 2 || b.width() <= 0.0 || b.height() <= 0.0 {
        return Vec::new();
    }

    let spacing = grid.spacing();
    let h = params.step_scale * spacing.x.min(spacing.y);
    let mut occ = Occupancy::new(b, params);

    let mut lines = Vec::new();
    let mut tried = vec![false; occ.owner.len()];
    for cell in 0..occ.owner.len() {
        if occ.owner[cell].is_some() || tried[cell] {
            continue;
        }
        tried[cell] = true;
        let id = lines.len();
        let seed = occ.center(cell);

        let mut back = walk(field, &mut occ, seed, id, h, -1.0, params.max_points);
        let fwd = walk(field, &mut occ, seed, id, h, 1.0, params.max_points);

        // reverse the backward half (dropping its copy of the seed) and join
        if !back.is_empty() {
            back.remove(0);
        }
        back.reverse();
        back.extend(fwd);

        if back.len() >= 2 {
            lines.push(back);
        } else {
            // too short to draw; give its cells back
            for o in occ.owner.iter_mut().filter(|o| **o == Some(id)) {
                *o = None;
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::engine::compute_field;
    use crate::field::params::FieldParams;
    use crate::field::states::Particle;

    #[test]
    fn lines_stay_inside_the_grid_and_are_finite() {
        let ps = [Particle::new(-1.0, 0.0, 1.0), Particle::new(1.0, 0.0, -1.0)];
        let field = compute_field(&ps, &FieldParams::default()).unwrap();
        let lines = trace_streamlines(&field, &RenderParams::default());
        assert!(!lines.is_empty());
        for line in &lines {
            assert!(line.len() >= 2);
            for p in line {
                assert!(p.x.is_finite() && p.y.is_finite());
                assert!(field.grid.bounds.contains(p));
            }
        }
    }

    #[test]
    fn single_positive_charge_lines_run_outward() {
        let ps = [Particle::new(0.0, 0.0, 1.0)];
        let field = compute_field(&ps, &FieldParams::default()).unwrap();
        let lines = trace_streamlines(&field, &RenderParams::default());
        assert!(!lines.is_empty());
        for line in &lines {
            let first = line[0].norm();
            let last = line[line.len() - 1].norm();
            assert!(last > first, "line runs inward: {} -> {}", first, last);

            // away from the charge every segment is radial
            for w in line.windows(2) {
                let (a, step) = (w[0], w[1] - w[0]);
                if a.norm() > 1.0 && step.norm() > 0.0 {
                    let sin = a.perp(&step).abs() / (a.norm() * step.norm());
                    assert!(sin < 0.05, "segment not radial at {:?}", a);
                }
            }
        }
    }

    #[test]
    fn nan_samples_stop_lines_instead_of_leaking() {
        // charge exactly on a grid node: that cell is not-a-number
        let ps = [Particle::new(0.0, 0.0, 1.0), Particle::new(4.0, 0.0, 1.0)];
        let params = FieldParams { resolution: 17, padding_multiplier: 1.5, ..FieldParams::default() };
        let field = compute_field(&ps, &params).unwrap();
        assert!(field.degenerate_cells() > 0);
        for line in trace_streamlines(&field, &RenderParams::default()) {
            assert!(line.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }

    #[test]
    fn render_params_are_validated() {
        assert!(RenderParams::default().validate().is_ok());
        let bad = [
            RenderParams { density: 1e10, ..RenderParams::default() },
            RenderParams { density: 0.0, ..RenderParams::default() },
            RenderParams { density: f64::NAN, ..RenderParams::default() },
            RenderParams { step_scale: 0.0, ..RenderParams::default() },
            RenderParams { step_scale: -0.5, ..RenderParams::default() },
            RenderParams { step_scale: f64::NAN, ..RenderParams::default() },
        ];
        for p in &bad {
            assert!(matches!(p.validate(), Err(FieldError::InvalidInput(_))), "{:?} accepted", p);
        }
    }

    #[test]
    fn huge_density_traces_nothing_instead_of_overflowing() {
        let ps = [Particle::new(-1.0, 0.0, 1.0), Particle::new(1.0, 0.0, -1.0)];
        let field = compute_field(&ps, &FieldParams::default()).unwrap();
        let lines = trace_streamlines(&field, &RenderParams { density: 1e10, ..RenderParams::default() });
        assert!(lines.is_empty());
    }

    #[test]
    fn higher_density_gives_more_lines() {
        let ps = [Particle::new(-1.0, 0.0, 1.0), Particle::new(1.0, 0.0, -1.0)];
        let field = compute_field(&ps, &FieldParams::default()).unwrap();
        let sparse = trace_streamlines(&field, &RenderParams { density: 0.5, ..RenderParams::default() });
        let dense = trace_streamlines(&field, &RenderParams { density: 2.0, ..RenderParams::default() });
        assert!(dense.len() > sparse.len());
    }
}
