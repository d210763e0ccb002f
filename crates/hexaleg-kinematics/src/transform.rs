//! Rigid-body transforms.
//!
//! A [`RigidTransform`] pairs a [`RotationMatrix`] with a translation.  The
//! leg can be written as one product of six such transforms (rotate, then
//! extend along the rotated link, for each joint); [`leg_transform`] does
//! exactly that and serves as an independent derivation of the toe pose
//! computed link-by-link in [`crate::forward`].
//!
//! # Example
//!
//! ```rust
//! use hexaleg_kinematics::transform::RigidTransform;
//! use hexaleg_kinematics::{RotationMatrix, Vec3};
//!
//! // Yaw 90°, then step 1 m along the rotated X axis.
//! let t = RigidTransform::from_rotation(RotationMatrix::about_z(std::f64::consts::FRAC_PI_2))
//!     .compose(RigidTransform::from_translation(Vec3::X));
//! assert!((t.translation.y - 1.0).abs() < 1e-12);
//! ```

use hexaleg_types::{JointAngles, LinkLengths};
use serde::{Deserialize, Serialize};

use crate::rotation::RotationMatrix;
use crate::vector::Vec3;

/// Pose of frame B relative to frame A: a point expressed in B is mapped to
/// A by rotating it by `rotation` and then adding `translation`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RigidTransform {
    pub rotation: RotationMatrix,
    pub translation: Vec3,
}

impl RigidTransform {
    pub fn new(rotation: RotationMatrix, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::new(RotationMatrix::identity(), Vec3::zero())
    }

    pub fn from_rotation(rotation: RotationMatrix) -> Self {
        Self::new(rotation, Vec3::zero())
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(RotationMatrix::identity(), translation)
    }

    /// Compose two transforms.
    ///
    /// If `self` = T_A_B and `other` = T_B_C, the result is T_A_C.
    pub fn compose(self, other: Self) -> Self {
        let translation = self.translation.add(self.rotation.rotate(other.translation));
        let rotation = self.rotation.mul(&other.rotation);
        Self::new(rotation, translation)
    }

    /// Map a point: rotate, then translate.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation.rotate(p).add(self.translation)
    }

    /// Map a direction: rotation only.
    pub fn transform_dir(&self, v: Vec3) -> Vec3 {
        self.rotation.rotate(v)
    }

    pub fn inverse(&self) -> Self {
        let rt = self.rotation.transpose();
        Self::new(rt, rt.rotate(self.translation).neg())
    }
}

/// Base-to-toe transform of the leg as a single product:
///
/// ```text
/// Rot(Rz θ1) · Trans(l1 x̂) · Rot(Ry θ2) · Trans(l2 x̂) · Rot(Ry θ3) · Trans(l3 x̂)
/// ```
///
/// The translation of the result is the toe position; the rotation is the
/// cumulative `R1·R2·R3`.
pub fn leg_transform(lengths: LinkLengths, angles: JointAngles) -> RigidTransform {
    [
        RigidTransform::from_rotation(RotationMatrix::about_z(angles.theta1)),
        RigidTransform::from_translation(Vec3::X.scale(lengths.l1)),
        RigidTransform::from_rotation(RotationMatrix::about_y(angles.theta2)),
        RigidTransform::from_translation(Vec3::X.scale(lengths.l2)),
        RigidTransform::from_rotation(RotationMatrix::about_y(angles.theta3)),
        RigidTransform::from_translation(Vec3::X.scale(lengths.l3)),
    ]
    .into_iter()
    .fold(RigidTransform::identity(), RigidTransform::compose)
}
