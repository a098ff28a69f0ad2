//! Validated particle list handed to the field engine.

use crate::field::states::Particle;
use crate::intake::errors::IntakeError;

/// Non-empty list of particles with finite values and pairwise distinct
/// positions. Read-only once built.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new(particles: Vec<Particle>) -> Result<Self, IntakeError> {
        if particles.is_empty() {
            return Err(IntakeError::Empty);
        }
        for (i, p) in particles.iter().enumerate() {
            if !(p.x.x.is_finite() && p.x.y.is_finite() && p.q.is_finite()) {
                return Err(IntakeError::NonFinite { index: i });
            }
            if particles[..i].iter().any(|o| o.x == p.x) {
                return Err(IntakeError::DuplicatePosition { x: p.x.x, y: p.x.y });
            }
        }
        Ok(Self { particles })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert!(matches!(ParticleStore::new(vec![]), Err(IntakeError::Empty)));
    }

    #[test]
    fn rejects_duplicate_position_even_with_other_charge() {
        let ps = vec![Particle::new(1.0, 2.0, 1.0), Particle::new(1.0, 2.0, -3.0)];
        match ParticleStore::new(ps) {
            Err(IntakeError::DuplicatePosition { x, y }) => assert_eq!((x, y), (1.0, 2.0)),
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_nan() {
        let ps = vec![Particle::new(0.0, 0.0, 1.0), Particle::new(f64::NAN, 0.0, 1.0)];
        assert!(matches!(ParticleStore::new(ps), Err(IntakeError::NonFinite { index: 1 })));
    }

    #[test]
    fn keeps_order() {
        let ps = vec![Particle::new(0.0, 0.0, 1.0), Particle::new(0.0, 1.0, 0.0)];
        let store = ParticleStore::new(ps.clone()).unwrap();
        assert_eq!(store.particles(), &ps[..]);
        assert_eq!(store.len(), 2);
    }
}
