use std::time::Instant;

use crate::simulation::engine::{Engine, WindowSettings};
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{initialize, NVec2};

/// Time one full step (gravity, integrate, floor, springs) for growing rings.
/// The spring pass is all-pairs, so the cost should grow roughly as n^2.
pub fn bench_step() {
    let ns = [12, 24, 48, 96, 192, 384, 768];
    let steps = 200;

    println!("N,us_per_step,pairs");
    for n in ns {
        // Keep neighbours about as far apart as in the 12-particle ring
        let ring_radius = 50.0 * n as f64 / 12.0;
        let scenario = initialize(n, NVec2::new(400.0, 300.0), ring_radius, 10.0, 0.1).and_then(
            |particles| {
                Scenario::from_parts(
                    Engine::default(),
                    WindowSettings::default(),
                    Parameters::default(),
                    particles,
                )
            },
        );
        let mut scenario = match scenario {
            Ok(s) => s,
            Err(e) => {
                log::warn!("skipping n = {n}: {e}");
                continue;
            }
        };

        // Warm-up
        scenario.tick();

        let t0 = Instant::now();
        for _ in 0..steps {
            scenario.tick();
        }
        let us_per_step = t0.elapsed().as_secs_f64() * 1e6 / steps as f64;

        println!("{},{:.3},{}", n, us_per_step, n * (n - 1) / 2);
    }
}
