//! Numerical parameters for the field pipeline
//!
//! `FieldParams` holds runtime settings:
//! - grid resolution (samples per axis),
//! - padding multiplier and the single-particle fallback padding,
//! - the Coulomb constant `k`,
//! - what to do with degenerate (not-a-number) samples

use crate::field::errors::FieldError;

pub const DEFAULT_RESOLUTION: usize = 50;
pub const DEFAULT_PADDING_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_FALLBACK_PADDING: f64 = 5.0;

/// Handling of cells where the direction is undefined
/// (grid point on top of a charge, or exact cancellation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingularityPolicy {
    /// Leave not-a-number values in the unit field
    #[default]
    Propagate,
    /// Replace non-finite unit vectors with the zero vector
    Mask,
}

#[derive(Debug, Clone)]
pub struct FieldParams {
    pub resolution: usize, // samples per axis (N)
    pub padding_multiplier: f64, // pad = multiplier * max axis range
    pub fallback_padding: f64, // pad used when there is a single particle
    pub k: f64, // coulomb constant
    pub singularity: SingularityPolicy,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            padding_multiplier: DEFAULT_PADDING_MULTIPLIER,
            fallback_padding: DEFAULT_FALLBACK_PADDING,
            k: 1.0,
            singularity: SingularityPolicy::Propagate,
        }
    }
}

impl FieldParams {
    /// Reject values that would make the grid meaningless
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.resolution == 0 {
            return Err(FieldError::invalid("grid resolution must be at least 1"));
        }
        if !self.padding_multiplier.is_finite() || self.padding_multiplier <= 0.0 {
            return Err(FieldError::invalid(format!(
                "padding multiplier must be finite and positive, got {}",
                self.padding_multiplier
            )));
        }
        if !self.fallback_padding.is_finite() || self.fallback_padding <= 0.0 {
            return Err(FieldError::invalid(format!(
                "fallback padding must be finite and positive, got {}",
                self.fallback_padding
            )));
        }
        // k = 0 zeroes every cell and leaves no direction anywhere
        if !self.k.is_finite() || self.k == 0.0 {
            return Err(FieldError::invalid(format!(
                "coulomb constant must be finite and non-zero, got {}",
                self.k
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FieldParams::default().validate().is_ok());
    }

    #[test]
    fn zero_or_bad_constant_rejected() {
        for k in [0.0, f64::NAN, f64::INFINITY] {
            let p = FieldParams { k, ..FieldParams::default() };
            assert!(matches!(p.validate(), Err(FieldError::InvalidInput(_))), "k = {} accepted", k);
        }
        let p = FieldParams { k: -2.0, ..FieldParams::default() };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn padding_must_be_positive() {
        let p = FieldParams { padding_multiplier: 0.0, ..FieldParams::default() };
        assert!(p.validate().is_err());
        let p = FieldParams { fallback_padding: 0.0, ..FieldParams::default() };
        assert!(p.validate().is_err());
        let p = FieldParams { fallback_padding: -1.0, ..FieldParams::default() };
        assert!(p.validate().is_err());
    }
}
