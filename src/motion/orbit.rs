use std::f64::consts::TAU;

use crate::foundation::core::Vec2;
use crate::foundation::error::{ShutterboxError, ShutterboxResult};
use crate::foundation::rand::random_float_from_seed;

/// Angular velocity of the orbit, radians of phase per second.
pub const ORBIT_SPEED: f64 = 5.0;

const WOBBLE_AMPLITUDE: f64 = 1.552;
const WOBBLE_RATE: f64 = 0.25;
const RADIUS_SCALE: f64 = 0.9;

/// A fixed set of points orbiting a shared center.
///
/// Each point owns a deterministic phase-offset pair, derived once from its
/// index, that desynchronizes otherwise identical orbits. Positions are
/// recomputed from scratch every frame; the phase table is the only state.
#[derive(Clone, Debug)]
pub struct OrbitField {
    phases: Vec<Vec2>,
}

impl OrbitField {
    pub fn new(point_count: usize) -> ShutterboxResult<Self> {
        if point_count == 0 {
            return Err(ShutterboxError::validation(
                "orbit field needs at least one point",
            ));
        }
        let phases = (0..point_count as u64).map(phase_offset).collect();
        Ok(Self { phases })
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Displacement of point `index` from the orbit center at time `t`.
    ///
    /// A low-frequency sin/cos term modulates the phase so orbits wobble and
    /// never close over short windows.
    pub fn position(&self, index: usize, t: f64, orbit_radius: f64) -> Vec2 {
        let phase = self.phases[index];
        let r = RADIUS_SCALE * orbit_radius;
        Vec2::new(
            r * (ORBIT_SPEED * t + phase.x + WOBBLE_AMPLITUDE * (WOBBLE_RATE * t).sin()).cos(),
            r * (ORBIT_SPEED * t + phase.y + WOBBLE_AMPLITUDE * (WOBBLE_RATE * t).cos()).sin(),
        )
    }
}

/// Phase pair for one point index: three seeded samples per axis, blended
/// with fixed weights, scaled to a full turn.
fn phase_offset(index: u64) -> Vec2 {
    let blend = |a: u64, b: u64, c: u64| {
        0.5 * random_float_from_seed(a)
            + 0.33 * random_float_from_seed(b)
            + 0.17 * random_float_from_seed(c)
    };
    Vec2::new(
        TAU * blend(index + 5, index + 3, index + 1),
        TAU * blend(index + 6, index + 4, index + 2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_points_is_rejected() {
        let err = OrbitField::new(0).unwrap_err();
        assert!(matches!(err, ShutterboxError::Validation(_)));
    }

    #[test]
    fn phase_offsets_are_stable_across_instances() {
        let a = OrbitField::new(16).unwrap();
        let b = OrbitField::new(16).unwrap();
        for i in 0..16 {
            let pa = a.position(i, 1.25, 100.0);
            let pb = b.position(i, 1.25, 100.0);
            assert_eq!(pa.x.to_bits(), pb.x.to_bits());
            assert_eq!(pa.y.to_bits(), pb.y.to_bits());
        }
    }

    #[test]
    fn points_stay_within_the_scaled_radius() {
        let field = OrbitField::new(8).unwrap();
        for i in 0..8 {
            for step in 0..50 {
                let p = field.position(i, step as f64 * 0.1, 100.0);
                assert!(p.x.abs() <= 90.0 + 1e-9);
                assert!(p.y.abs() <= 90.0 + 1e-9);
            }
        }
    }

    #[test]
    fn distinct_points_take_distinct_paths() {
        let field = OrbitField::new(4).unwrap();
        let a = field.position(0, 0.5, 100.0);
        let b = field.position(1, 0.5, 100.0);
        assert!((a.x - b.x).abs() > 1e-9 || (a.y - b.y).abs() > 1e-9);
    }
}
