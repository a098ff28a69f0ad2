//! Interactive, line-oriented particle entry
//!
//! Asks for a particle count, then one `x,y,q` line per particle. Malformed
//! lines and repeated positions are rejected with a message and asked for
//! again, up to `max_attempts` times per prompt.

use std::io::{BufRead, Write};

use log::warn;

use crate::field::states::Particle;
use crate::intake::errors::IntakeError;
use crate::intake::store::ParticleStore;
use crate::intake::ParticleSource;

pub const DEFAULT_MAX_ATTEMPTS: usize = 10;
/// Largest particle count accepted at the prompt
pub const MAX_PARTICLES: usize = 10_000;

pub struct PromptSource<R, W> {
    input: R,
    output: W,
    pub max_attempts: usize,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    fn say(&mut self, msg: &str) -> Result<(), IntakeError> {
        writeln!(self.output, "{}", msg)?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, IntakeError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(IntakeError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Ask `prompt` until `parse` accepts the answer or attempts run out
    fn ask<T>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> Result<T, IntakeError> {
        for _ in 0..self.max_attempts {
            self.say(prompt)?;
            let line = self.read_line()?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(reason) => {
                    warn!("rejected entry '{}': {}", line, reason);
                    self.say(&reason)?;
                }
            }
        }
        Err(IntakeError::TooManyAttempts(self.max_attempts))
    }
}

fn parse_count(line: &str) -> Result<usize, String> {
    match line.parse::<i64>() {
        Ok(n) if n > MAX_PARTICLES as i64 => Err(format!(
            "At most {} particles are supported. Please try again!",
            MAX_PARTICLES
        )),
        Ok(n) if n > 0 => Ok(n as usize),
        Ok(_) => Err("The number of particles must be greater than zero. Please try again!".into()),
        Err(_) => Err("Invalid characters entered. Please try again!".into()),
    }
}

/// Parse `x,y,q`
fn parse_particle(line: &str) -> Result<Particle, String> {
    let values: Result<Vec<f64>, _> = line.split(',').map(|s| s.trim().parse::<f64>()).collect();
    match values {
        Ok(v) if v.len() == 3 && v.iter().all(|f| f.is_finite()) => Ok(Particle::new(v[0], v[1], v[2])),
        Ok(v) if v.len() != 3 => Err("Expected exactly three values 'x,y,q'. Please try again!".into()),
        _ => Err("Invalid characters entered. Please try again!".into()),
    }
}

impl<R: BufRead, W: Write> ParticleSource for PromptSource<R, W> {
    fn load(&mut self) -> Result<ParticleStore, IntakeError> {
        let count = self.ask(
            "Enter the number of charged particles you wish to simulate:",
            parse_count,
        )?;

        let mut particles: Vec<Particle> = Vec::new();
        for i in 0..count {
            let prompt = format!(
                "Enter the coordinates and charge of particle {} using the format 'x,y,q':",
                i + 1
            );
            let p = self.ask(&prompt, |line| {
                let p = parse_particle(line)?;
                if particles.iter().any(|o| o.x == p.x) {
                    return Err("Invalid point entered. Only unique coordinates are accepted.".into());
                }
                Ok(p)
            })?;
            particles.push(p);
        }

        ParticleStore::new(particles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (Result<ParticleStore, IntakeError>, String) {
        let mut out = Vec::new();
        let res = PromptSource::new(input.as_bytes(), &mut out).load();
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn reads_count_then_particles() {
        let (res, out) = run("2\n0,0,1\n10, 0, -1.5\n");
        let store = res.unwrap();
        assert_eq!(store.particles(), &[Particle::new(0.0, 0.0, 1.0), Particle::new(10.0, 0.0, -1.5)]);
        assert!(out.contains("particle 2"));
    }

    #[test]
    fn retries_bad_count() {
        let (res, out) = run("abc\n0\n1\n3,4,2\n");
        assert_eq!(res.unwrap().len(), 1);
        assert!(out.contains("Invalid characters entered"));
        assert!(out.contains("greater than zero"));
    }

    #[test]
    fn retries_malformed_and_duplicate_particles() {
        let (res, out) = run("2\n1,2\n1,2,x\n1,2,3\n1,2,-3\n1,3,-3\n");
        let store = res.unwrap();
        assert_eq!(store.particles()[1], Particle::new(1.0, 3.0, -3.0));
        assert!(out.contains("exactly three values"));
        assert!(out.contains("Only unique coordinates are accepted."));
    }

    #[test]
    fn huge_count_is_retried_not_allocated() {
        let (res, out) = run("1000000000000000000\n99999999999999999999\n1\n0,0,1\n");
        assert_eq!(res.unwrap().len(), 1);
        assert!(out.contains("At most 10000 particles"));
        assert!(out.contains("Invalid characters entered"));
    }

    #[test]
    fn eof_is_an_error() {
        let (res, _) = run("3\n0,0,1\n");
        assert!(matches!(res, Err(IntakeError::EndOfInput)));
    }

    #[test]
    fn attempts_are_bounded() {
        let mut out = Vec::new();
        let res = PromptSource::new("x\nx\nx\n1\n".as_bytes(), &mut out)
            .with_max_attempts(3)
            .load();
        assert!(matches!(res, Err(IntakeError::TooManyAttempts(3))));
    }
}
