use std::time::Instant;

use crate::field::engine::compute_field;
use crate::field::params::FieldParams;
use crate::field::states::Particle;

/// Helper to build `p` particles with alternating sign, no rand needed
fn make_particles(p: usize) -> Vec<Particle> {
    (0..p)
        .map(|i| {
            let i_f = i as f64;
            let q = if i % 2 == 0 { 1.0 } else { -1.0 };
            // deterministic, distinct positions on a spiral
            Particle::new((i_f * 0.37).sin() * (1.0 + i_f), (i_f * 0.37).cos() * (1.0 + i_f), q)
        })
        .collect()
}

/// Time the full pipeline (grid, superposition, normalisation)
/// Paste output directly into excel to graph
pub fn bench_field() {
    let resolutions = [50, 100, 200, 400];
    let counts = [1, 4, 16, 64];
    let runs = 3;

    println!("N,P,ms");

    for n in resolutions {
        let params = FieldParams {
            resolution: n,
            ..FieldParams::default()
        };

        for p in counts {
            let particles = make_particles(p);

            // Warm up
            let _ = compute_field(&particles, &params);

            let t0 = Instant::now();
            for _ in 0..runs {
                if compute_field(&particles, &params).is_err() {
                    log::error!("benchmark case N = {}, P = {} failed", n, p);
                    return;
                }
            }
            let ms = t0.elapsed().as_secs_f64() * 1000.0 / runs as f64;

            println!("{},{},{:.6}", n, p, ms);
        }
    }
}
