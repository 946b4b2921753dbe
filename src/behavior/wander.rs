//! Random wander destinations
//!
//! Candidate points are drawn around the enemy and validated against the
//! host's reachable-point query. Retries are bounded: when no reachable
//! point turns up (isolated spawn, off-mesh island), the enemy stays in
//! place this tick and tries again next tick. Never recurses.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimConfig;
use crate::core::types::Vec3;
use crate::simulation::services::NavQuery;

/// Sample a random reachable destination near `origin`
///
/// Offsets are drawn in the horizontal plane; the nav query decides the
/// final height. Returns `None` once the attempt bound is exhausted.
pub fn sample_wander_destination(
    origin: Vec3,
    nav: &dyn NavQuery,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> Option<Vec3> {
    let radius = config.wander_radius;

    for _ in 0..config.wander_sample_attempts {
        let candidate = origin
            + Vec3::new(
                rng.gen_range(-radius..radius),
                0.0,
                rng.gen_range(-radius..radius),
            );

        if let Some(point) = nav.sample_reachable(candidate, config.wander_snap_distance) {
            return Some(point);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::cell::Cell;

    /// Flat plane: every candidate is reachable as-is
    struct OpenPlane;

    impl NavQuery for OpenPlane {
        fn sample_reachable(&self, near: Vec3, _max_snap: f32) -> Option<Vec3> {
            Some(Vec3::new(near.x, 0.0, near.z))
        }
    }

    /// Nothing is ever reachable; counts how often it was asked
    struct Void {
        queries: Cell<u32>,
    }

    impl NavQuery for Void {
        fn sample_reachable(&self, _near: Vec3, _max_snap: f32) -> Option<Vec3> {
            self.queries.set(self.queries.get() + 1);
            None
        }
    }

    #[test]
    fn test_open_plane_samples_within_radius() {
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let origin = Vec3::new(50.0, 0.0, -20.0);

        for _ in 0..100 {
            let point = sample_wander_destination(origin, &OpenPlane, &config, &mut rng)
                .expect("open plane always yields a point");
            assert!((point.x - origin.x).abs() < config.wander_radius);
            assert!((point.z - origin.z).abs() < config.wander_radius);
        }
    }

    #[test]
    fn test_unreachable_world_gives_up_after_bound() {
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let nav = Void {
            queries: Cell::new(0),
        };

        let result = sample_wander_destination(Vec3::ZERO, &nav, &config, &mut rng);

        assert!(result.is_none());
        assert_eq!(nav.queries.get(), config.wander_sample_attempts);
    }

    #[test]
    fn test_seeded_sampling_is_deterministic() {
        let config = SimConfig::default();
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);

        let pa = sample_wander_destination(Vec3::ZERO, &OpenPlane, &config, &mut a);
        let pb = sample_wander_destination(Vec3::ZERO, &OpenPlane, &config, &mut b);

        assert_eq!(pa, pb);
    }
}
