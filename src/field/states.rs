//! Core state types for the field computation.
//!
//! A `Particle` is a stationary point charge in the plane. The engine only
//! ever reads slices of particles; it never mutates them.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: NVec2, // position
    pub q: f64, // charge (sign matters, zero allowed)
}

impl Particle {
    pub fn new(x: f64, y: f64, q: f64) -> Self {
        Self {
            x: NVec2::new(x, y),
            q,
        }
    }
}

/// Marker class used by the renderer to tell charges apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeSign {
    Negative,
    Positive,
    Neutral,
}

impl ChargeSign {
    pub fn of(p: &Particle) -> Self {
        if p.q < 0.0 {
            ChargeSign::Negative
        } else if p.q > 0.0 {
            ChargeSign::Positive
        } else {
            ChargeSign::Neutral
        }
    }
}
