//! Minimum-distance springs between every pair of particles
//!
//! One corrective pass per step, no iteration to convergence: an overlap left
//! over after this pass is corrected a little more on the next step.

use crate::simulation::forces::Force;
use crate::simulation::states::{NVec2, Particle, ParticleCollection};

/// Direction used when two particles sit on exactly the same point
pub const COINCIDENT_DIRECTION: NVec2 = NVec2::new(1.0, 0.0);

/// Spring force between every unordered pair closer than `min_distance`.
///
/// The force on `i` points along the angle from `i` to `j` with magnitude
/// `(min_distance - d) * spring_constant`; `j` gets the exact negation.
pub struct MinDistanceSpring {
    pub min_distance: f64,
    pub spring_constant: f64,
}

impl MinDistanceSpring {
    /// Force on `pi` from the pair `(pi, pj)`, or `None` when the pair is far
    /// enough apart. The force on `pj` is the negation of the returned value.
    pub fn pair_force(&self, pi: &Particle, pj: &Particle) -> Option<NVec2> {
        let r = pj.x - pi.x;
        let d = r.norm();
        if d >= self.min_distance {
            return None;
        }

        let overlap = self.min_distance - d;
        let magnitude = overlap * self.spring_constant;

        let dir = if d == 0.0 {
            log::debug!("coincident particles at {:?}, using fallback direction", pi.x);
            COINCIDENT_DIRECTION
        } else {
            let angle = r.y.atan2(r.x);
            NVec2::new(angle.cos(), angle.sin())
        };

        Some(magnitude * dir)
    }
}

impl Force for MinDistanceSpring {
    fn force(&self, particles: &ParticleCollection, out: &mut [NVec2]) {
        let ps = particles.particles();
        let n = ps.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            for j in (i + 1)..n {
                if let Some(f) = self.pair_force(&ps[i], &ps[j]) {
                    out[i] += f;
                    out[j] -= f;
                }
            }
        }
    }
}
