//! Deterministic sampling and comparison helpers shared by the unit tests.

use hexaleg_types::{JointAngles, JointRates, LinkLengths};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::vector::Vec3;

/// Geometry of the reference hexapod leg.
pub const REFERENCE_LENGTHS: LinkLengths = LinkLengths::new(0.05, 0.20, 0.20);

/// Pose of the reference hexapod leg: (20°, -10°, 30°).
pub fn reference_angles() -> JointAngles {
    JointAngles::from_degrees(20.0, -10.0, 30.0)
}

/// Create a deterministic `ChaCha8Rng` from a seed.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Link lengths in `[0, 0.5)` metres.
pub fn random_lengths<R: Rng>(rng: &mut R) -> LinkLengths {
    LinkLengths::new(
        rng.random_range(0.0..0.5),
        rng.random_range(0.0..0.5),
        rng.random_range(0.0..0.5),
    )
}

/// Joint angles in `[-span, span)` radians.
pub fn random_angles<R: Rng>(rng: &mut R, span: f64) -> JointAngles {
    JointAngles::new(
        rng.random_range(-span..span),
        rng.random_range(-span..span),
        rng.random_range(-span..span),
    )
}

/// Joint rates in `[-2, 2)` rad/s.
pub fn random_rates<R: Rng>(rng: &mut R) -> JointRates {
    JointRates::new(
        rng.random_range(-2.0..2.0),
        rng.random_range(-2.0..2.0),
        rng.random_range(-2.0..2.0),
    )
}

#[track_caller]
pub fn assert_vec_close(actual: Vec3, expected: Vec3, tol: f64) {
    let err = actual.distance(expected);
    assert!(
        err <= tol,
        "expected {expected:?}, got {actual:?} (error {err:e} > {tol:e})"
    );
}
