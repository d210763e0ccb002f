//! Forward kinematics of the 3-DoF leg.
//!
//! The hip sits at the world origin.  Each joint rotates the frame
//! accumulated so far, and each link extends along the local X axis of
//! that frame:
//!
//! ```text
//! R1 = Rz(θ1)            thigh = R1 · (l1, 0, 0)
//! R2 = Ry(θ2)            knee  = thigh + R1·R2 · (l2, 0, 0)
//! R3 = Ry(θ3)            toe   = knee  + R1·R2·R3 · (l3, 0, 0)
//! ```
//!
//! Rotations accumulate left-multiplicatively: `R_cum(i) = R_cum(i-1) · R_i`.
//! Swapping the order changes the result.
//!
//! # Example
//!
//! ```rust
//! use hexaleg_kinematics::{compute_chain, JointAngles, LinkLengths};
//!
//! let chain = compute_chain(LinkLengths::new(0.05, 0.2, 0.2), JointAngles::zero());
//! assert!((chain.toe().x - 0.45).abs() < 1e-12);
//! ```

use hexaleg_types::{Joint, JointAngles, KinematicsError, LinkLengths};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::rotation::RotationMatrix;
use crate::vector::Vec3;

/// Result of forward kinematics: joint positions in the world frame and the
/// cumulative rotation after each joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicChain {
    hip: Vec3,
    thigh: Vec3,
    knee: Vec3,
    toe: Vec3,
    /// `[R1, R1·R2, R1·R2·R3]`
    rotations: [RotationMatrix; 3],
}

impl KinematicChain {
    /// Hip joint position; always the world origin.
    pub fn hip(&self) -> Vec3 {
        self.hip
    }

    /// Thigh joint position (distal end of the hip offset link).
    pub fn thigh(&self) -> Vec3 {
        self.thigh
    }

    /// Knee joint position.
    pub fn knee(&self) -> Vec3 {
        self.knee
    }

    /// Toe (end-effector) position.
    pub fn toe(&self) -> Vec3 {
        self.toe
    }

    /// `[hip, thigh, knee, toe]`
    pub fn positions(&self) -> [Vec3; 4] {
        [self.hip, self.thigh, self.knee, self.toe]
    }

    /// Cumulative rotation through `joint`: `R1`, `R1·R2` or `R1·R2·R3`.
    pub fn cumulative_rotation(&self, joint: Joint) -> RotationMatrix {
        self.rotations[joint.index()]
    }

    pub fn rotations(&self) -> [RotationMatrix; 3] {
        self.rotations
    }

    /// World-frame rotation axis of `joint`.
    ///
    /// The hip yaw turns about the fixed world Z axis.  Each pitch joint
    /// turns about the local Y axis carried by the rotations of the joints
    /// before it.
    pub fn joint_axis(&self, joint: Joint) -> Vec3 {
        match joint {
            Joint::HipYaw => Vec3::Z,
            Joint::ThighPitch => self.rotations[0].rotate(Vec3::Y),
            Joint::KneePitch => self.rotations[1].rotate(Vec3::Y),
        }
    }

    /// World-frame position of the point `joint` pivots about.
    pub fn joint_pivot(&self, joint: Joint) -> Vec3 {
        match joint {
            Joint::HipYaw => self.hip,
            Joint::ThighPitch => self.thigh,
            Joint::KneePitch => self.knee,
        }
    }
}

/// Compute joint positions and cumulative rotations.
///
/// Total: every input produces an output.  Angles are used as given (no
/// wrapping), and NaN or infinite inputs propagate into the result.
pub fn compute_chain(lengths: LinkLengths, angles: JointAngles) -> KinematicChain {
    let r1 = RotationMatrix::about_z(angles.theta1);
    let r12 = r1.mul(&RotationMatrix::about_y(angles.theta2));
    let r123 = r12.mul(&RotationMatrix::about_y(angles.theta3));

    // Each link's distal end is its proximal end plus the cumulative
    // rotation applied to the link's local extension (length, 0, 0).
    let hip = Vec3::zero();
    let thigh = hip.add(r1.rotate(Vec3::X.scale(lengths.l1)));
    let knee = thigh.add(r12.rotate(Vec3::X.scale(lengths.l2)));
    let toe = knee.add(r123.rotate(Vec3::X.scale(lengths.l3)));

    trace!(
        l1 = lengths.l1,
        l2 = lengths.l2,
        l3 = lengths.l3,
        theta1 = angles.theta1,
        theta2 = angles.theta2,
        theta3 = angles.theta3,
        toe_x = toe.x,
        toe_y = toe.y,
        toe_z = toe.z,
        "forward kinematics"
    );

    KinematicChain {
        hip,
        thigh,
        knee,
        toe,
        rotations: [r1, r12, r123],
    }
}

/// [`compute_chain`] with link-length validation.
///
/// # Errors
///
/// Returns [`KinematicsError::InvalidParameter`] if any link length is
/// negative or not finite.  Angles are never validated.
pub fn compute_chain_checked(
    lengths: LinkLengths,
    angles: JointAngles,
) -> Result<KinematicChain, KinematicsError> {
    let lengths = lengths.validated()?;
    Ok(compute_chain(lengths, angles))
}
