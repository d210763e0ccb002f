//! The leg as a product of screw motors defined at the home pose.
//!
//! Every joint is a rotation about a line fixed in the base frame at the
//! all-zero configuration:
//!
//! | Joint | Axis | Through |
//! |---|---|---|
//! | hip yaw | `+Z` | `(0, 0, 0)` |
//! | thigh pitch | `+Y` | `(l1, 0, 0)` |
//! | knee pitch | `+Y` | `(l1 + l2, 0, 0)` |
//!
//! and the toe is obtained by a tool translator `(l3, 0, 0)` applied to the
//! base origin:
//!
//! ```text
//! M(θ) = S1(θ1) · S2(θ2) · S3(θ3) · T(l3, 0, 0)        toe = M(θ) · 0
//! ```
//!
//! The tool translator is not offset to the knee, so at the home pose the
//! toe sits at `(l3, 0, 0)`.  This is the motor chain of the reference
//! hexapod-leg example, and [`ScrewLeg::toe`] together with
//! [`ScrewLeg::home_jacobian`] reproduce its published outputs.
//!
//! [`ScrewLeg::home_jacobian`] evaluates the revolute columns with the
//! home-pose axes and pivots.  It is only the true velocity Jacobian at the
//! home pose; [`ScrewLeg::jacobian`] carries each axis and pivot through the
//! motors of the joints before it and satisfies `v_toe = J · θ̇` everywhere.

use hexaleg_types::{Joint, JointAngles, LinkLengths};
use tracing::trace;

use crate::jacobian::{Jacobian, revolute_column};
use crate::motor::Motor;
use crate::vector::Vec3;

/// Screw-motor model of a 3-DoF leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrewLeg {
    lengths: LinkLengths,
}

impl ScrewLeg {
    pub fn new(lengths: LinkLengths) -> Self {
        Self { lengths }
    }

    pub fn lengths(&self) -> LinkLengths {
        self.lengths
    }

    /// Rotation axis of `joint` at the home pose.
    pub fn home_axis(joint: Joint) -> Vec3 {
        match joint {
            Joint::HipYaw => Vec3::Z,
            Joint::ThighPitch | Joint::KneePitch => Vec3::Y,
        }
    }

    /// Point on the rotation axis of `joint` at the home pose.
    pub fn home_pivot(&self, joint: Joint) -> Vec3 {
        let LinkLengths { l1, l2, .. } = self.lengths;
        match joint {
            Joint::HipYaw => Vec3::zero(),
            Joint::ThighPitch => Vec3::new(l1, 0.0, 0.0),
            Joint::KneePitch => Vec3::new(l1 + l2, 0.0, 0.0),
        }
    }

    fn joint_motor(&self, joint: Joint, theta: f64) -> Motor {
        Motor::screw(self.home_pivot(joint), Self::home_axis(joint), theta, 0.0)
    }

    /// Motors preceding each joint: `[I, S1, S1·S2]`.
    fn partial_motors(&self, angles: JointAngles) -> [Motor; 3] {
        let m1 = self.joint_motor(Joint::HipYaw, angles.theta1);
        let m12 = m1.mul(self.joint_motor(Joint::ThighPitch, angles.theta2));
        [Motor::identity(), m1, m12]
    }

    /// Full base-to-toe motor `S1·S2·S3·T(l3)`.
    pub fn motor(&self, angles: JointAngles) -> Motor {
        Joint::ALL
            .into_iter()
            .fold(Motor::identity(), |m, joint| {
                m.mul(self.joint_motor(joint, angles.get(joint)))
            })
            .mul(Motor::translator(Vec3::X.scale(self.lengths.l3)))
    }

    /// Toe position in the world frame.
    pub fn toe(&self, angles: JointAngles) -> Vec3 {
        let toe = self.motor(angles).act_point(Vec3::zero());
        trace!(toe = ?toe, "screw-leg toe");
        toe
    }

    /// Joint pivots carried to the current pose, in joint order.
    pub fn pivots(&self, angles: JointAngles) -> [Vec3; 3] {
        let partial = self.partial_motors(angles);
        Joint::ALL.map(|joint| partial[joint.index()].act_point(self.home_pivot(joint)))
    }

    /// Joint axes carried to the current pose, in joint order.
    pub fn axes(&self, angles: JointAngles) -> [Vec3; 3] {
        let partial = self.partial_motors(angles);
        Joint::ALL.map(|joint| partial[joint.index()].act_dir(Self::home_axis(joint)))
    }

    /// Revolute columns with home-pose axes and pivots, evaluated at the
    /// posed toe.
    pub fn home_jacobian(&self, angles: JointAngles) -> Jacobian {
        let toe = self.toe(angles);
        Jacobian::from_columns(Joint::ALL.map(|joint| {
            revolute_column(self.home_pivot(joint), Self::home_axis(joint), toe)
        }))
    }

    /// True linear-velocity Jacobian of the toe at `angles`.
    pub fn jacobian(&self, angles: JointAngles) -> Jacobian {
        let toe = self.toe(angles);
        let pivots = self.pivots(angles);
        let axes = self.axes(angles);
        Jacobian::from_columns(Joint::ALL.map(|joint| {
            let i = joint.index();
            revolute_column(pivots[i], axes[i], toe)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        REFERENCE_LENGTHS, assert_vec_close, random_angles, random_lengths, random_rates,
        reference_angles, seeded_rng,
    };
    use hexaleg_types::JointRates;
    use std::f64::consts::PI;

    fn reference_leg() -> ScrewLeg {
        ScrewLeg::new(REFERENCE_LENGTHS)
    }

    #[test]
    fn reproduces_reference_toe() {
        let toe = reference_leg().toe(reference_angles());
        assert_vec_close(
            toe,
            Vec3::new(0.1879168356409856, 0.06839613469081296, 0.05183064269966951),
            1e-9,
        );
    }

    #[test]
    fn reproduces_reference_jacobian_columns() {
        let j = reference_leg().home_jacobian(reference_angles());
        assert_vec_close(j.j1(), Vec3::new(-0.06839613469081296, 0.1879168356409856, 0.0), 1e-9);
        assert_vec_close(j.j2(), Vec3::new(0.05183064269966951, 0.0, -0.1379168356409856), 1e-9);
        assert_vec_close(j.j3(), Vec3::new(0.05183064269966951, 0.0, 0.0620831643590144), 1e-9);
    }

    #[test]
    fn home_pose_toe_is_tool_offset() {
        let toe = reference_leg().toe(JointAngles::zero());
        assert_vec_close(toe, Vec3::new(0.20, 0.0, 0.0), 1e-15);
    }

    #[test]
    fn home_and_posed_jacobians_agree_at_home() {
        let leg = reference_leg();
        let home = leg.home_jacobian(JointAngles::zero());
        let posed = leg.jacobian(JointAngles::zero());
        for joint in Joint::ALL {
            assert_vec_close(home.column(joint), posed.column(joint), 1e-15);
        }
    }

    #[test]
    fn hip_column_is_the_same_in_both_forms() {
        // The hip axis never moves, so J1 is exact in the home form too.
        let mut rng = seeded_rng(17);
        for _ in 0..50 {
            let leg = ScrewLeg::new(random_lengths(&mut rng));
            let angles = random_angles(&mut rng, PI);
            assert_vec_close(leg.home_jacobian(angles).j1(), leg.jacobian(angles).j1(), 1e-14);
        }
    }

    #[test]
    fn posed_jacobian_matches_finite_difference() {
        let mut rng = seeded_rng(99);
        for _ in 0..100 {
            let leg = ScrewLeg::new(random_lengths(&mut rng));
            let angles = random_angles(&mut rng, 2.0 * PI);
            let rates = random_rates(&mut rng);
            let analytic = leg.jacobian(angles).apply(rates);
            for eps in [1e-4, 1e-5, 1e-6] {
                let now = leg.toe(angles);
                let next = leg.toe(angles.advanced(rates, eps));
                let numeric = next.sub(now).scale(1.0 / eps);
                let err = numeric.distance(analytic);
                assert!(err <= 60.0 * eps + 1e-8, "eps={eps:e}: error {err:e}");
            }
        }
    }

    #[test]
    fn home_jacobian_is_not_the_velocity_map_away_from_home() {
        let leg = reference_leg();
        let angles = reference_angles();
        let rates = JointRates::unit(Joint::ThighPitch);
        let eps = 1e-7;
        let numeric = leg.toe(angles.advanced(rates, eps)).sub(leg.toe(angles)).scale(1.0 / eps);
        assert!(numeric.distance(leg.home_jacobian(angles).j2()) > 1e-3);
        assert_vec_close(numeric, leg.jacobian(angles).j2(), 1e-5);
    }

    #[test]
    fn pivots_follow_preceding_joints() {
        let leg = reference_leg();
        let pivots = leg.pivots(JointAngles::new(PI / 2.0, 0.0, 0.0));
        assert_vec_close(pivots[0], Vec3::zero(), 1e-15);
        assert_vec_close(pivots[1], Vec3::new(0.0, 0.05, 0.0), 1e-12);
        assert_vec_close(pivots[2], Vec3::new(0.0, 0.25, 0.0), 1e-12);
        let axes = leg.axes(JointAngles::new(PI / 2.0, 0.0, 0.0));
        assert_vec_close(axes[1], Vec3::X.neg(), 1e-12);
    }

    #[test]
    fn zero_lengths_keep_toe_and_columns_at_zero() {
        let leg = ScrewLeg::new(LinkLengths::zero());
        let angles = reference_angles();
        assert_vec_close(leg.toe(angles), Vec3::zero(), 1e-15);
        for col in leg.jacobian(angles).columns() {
            assert_vec_close(col, Vec3::zero(), 1e-15);
        }
    }
}
