//! Unit-vector field
//!
//! Every cell is scaled to length one so streamlines follow the geometry of
//! the field, not its strength. Cells with zero or undefined magnitude come
//! out as not-a-number unless the `Mask` policy is selected.

use nalgebra::DMatrix;

use crate::field::coulomb::RawField;
use crate::field::params::SingularityPolicy;

#[derive(Debug, Clone, PartialEq)]
pub struct UnitField {
    pub u: DMatrix<f64>, // x direction
    pub v: DMatrix<f64>, // y direction
}

impl UnitField {
    pub fn from_raw(raw: &RawField, policy: SingularityPolicy) -> Self {
        normalize(&raw.u, &raw.v, policy)
    }

    /// Direction at cell (row, col)
    pub fn at(&self, row: usize, col: usize) -> (f64, f64) {
        (self.u[(row, col)], self.v[(row, col)])
    }

    /// Number of cells whose direction is not finite
    pub fn non_finite_cells(&self) -> usize {
        self.u
            .iter()
            .zip(self.v.iter())
            .filter(|(u, v)| !(u.is_finite() && v.is_finite()))
            .count()
    }
}

/// Elementwise `(u, v) / hypot(u, v)`
pub fn normalize(u: &DMatrix<f64>, v: &DMatrix<f64>, policy: SingularityPolicy) -> UnitField {
    assert_eq!(u.shape(), v.shape(), "component arrays differ in shape");

    let mut uhat = u.clone();
    let mut vhat = v.clone();
    for (a, b) in uhat.iter_mut().zip(vhat.iter_mut()) {
        let m = a.hypot(*b);
        let (ua, ub) = (*a / m, *b / m);
        match policy {
            SingularityPolicy::Propagate => {
                *a = ua;
                *b = ub;
            }
            SingularityPolicy::Mask => {
                if ua.is_finite() && ub.is_finite() {
                    *a = ua;
                    *b = ub;
                } else {
                    *a = 0.0;
                    *b = 0.0;
                }
            }
        }
    }
    UnitField { u: uhat, v: vhat }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrays() -> (DMatrix<f64>, DMatrix<f64>) {
        let u = DMatrix::from_row_slice(2, 2, &[3.0, 0.0, -1.0, 0.0]);
        let v = DMatrix::from_row_slice(2, 2, &[4.0, 2.0, -1.0, 0.0]);
        (u, v)
    }

    #[test]
    fn cells_become_unit_length() {
        let (u, v) = arrays();
        let f = normalize(&u, &v, SingularityPolicy::Propagate);
        assert!((f.u[(0, 0)] - 0.6).abs() < 1e-12);
        assert!((f.v[(0, 0)] - 0.8).abs() < 1e-12);
        assert_eq!(f.at(0, 1), (0.0, 1.0));
        let (a, b) = f.at(1, 0);
        assert!((a.hypot(b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cancelled_cell_propagates_nan() {
        let (u, v) = arrays();
        let f = normalize(&u, &v, SingularityPolicy::Propagate);
        assert!(f.u[(1, 1)].is_nan());
        assert!(f.v[(1, 1)].is_nan());
        assert_eq!(f.non_finite_cells(), 1);
    }

    #[test]
    fn mask_zeroes_only_the_degenerate_cell() {
        let (u, v) = arrays();
        let masked = normalize(&u, &v, SingularityPolicy::Mask);
        let plain = normalize(&u, &v, SingularityPolicy::Propagate);
        assert_eq!(masked.at(1, 1), (0.0, 0.0));
        assert_eq!(masked.non_finite_cells(), 0);
        for (r, c) in [(0, 0), (0, 1), (1, 0)] {
            assert_eq!(masked.at(r, c), plain.at(r, c));
        }
    }
}
