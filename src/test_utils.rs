use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::initial_conditions::gen_position;
use crate::particle::Particle;
use crate::particle::ParticleId;
use crate::prelude::Float;
use crate::prelude::MVec;
use crate::region::Region;

pub fn assert_float_is_close(x: Float, y: Float) {
    assert!((x - y).abs() < 1e-9, "{} {}", x, y)
}

pub fn assert_vec_is_close(x: MVec, y: MVec) {
    assert!((x - y).length() < 1e-9, "{} {}", x, y)
}

/// Resting particles at the cell centres of an `n` by `m` grid over
/// [0, 100]^2. They are distinct and strictly inside the square, but
/// may lie on quadrant boundaries of deeper levels (e.g. x = 25 for
/// n = 10).
pub fn get_particles(n: usize, m: usize) -> Vec<Particle> {
    (0..n)
        .flat_map(move |x| {
            (0..m).map(move |y| {
                Particle::new(
                    ParticleId(x * m + y),
                    MVec::new(
                        (x as Float + 0.5) * 100.0 / n as Float,
                        (y as Float + 0.5) * 100.0 / m as Float,
                    ),
                    MVec::ZERO,
                    1.0,
                )
            })
        })
        .collect()
}

pub fn get_random_particles(n: usize, region: &Region, seed: u64) -> Vec<Particle> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| Particle::new(ParticleId(i), gen_position(&mut rng, region), MVec::ZERO, 1.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::get_particles;
    use crate::prelude::MVec;

    #[test]
    fn grid_particles_are_distinct_and_inside_the_square() {
        let particles = get_particles(10, 10);
        assert_eq!(particles.len(), 100);
        for (i, p) in particles.iter().enumerate() {
            assert!(p.pos.x > 0.0 && p.pos.x < 100.0 && p.pos.y > 0.0 && p.pos.y < 100.0);
            assert!(particles[i + 1..].iter().all(|q| q.pos != p.pos));
        }
        // x = 25 is a quadrant boundary at depth 2.
        assert!(particles.iter().any(|p| p.pos == MVec::new(25.0, 25.0)));
    }
}
