//! Linear-velocity Jacobian of the toe.
//!
//! For a revolute joint with world-frame unit axis `a` through pivot `p`,
//! a unit angular rate moves a point `x` with velocity `a × (x - p)`.
//! Stacking one such column per joint gives the 3×3 matrix `J` with
//!
//! ```text
//! v_toe = J · θ̇ = J1·θ̇1 + J2·θ̇2 + J3·θ̇3
//! ```
//!
//! A column vanishes when the toe lies on that joint's axis.  That is a
//! kinematic singularity, reported by [`Jacobian::singular_columns`] and
//! [`Jacobian::is_singular`] but never altered.

use hexaleg_types::{Joint, JointAngles, JointRates, LinkLengths};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::forward::{KinematicChain, compute_chain};
use crate::vector::Vec3;

/// 3×3 linear-velocity Jacobian stored as columns `[J1, J2, J3]`, in joint
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jacobian {
    columns: [Vec3; 3],
}

impl Jacobian {
    pub fn from_columns(columns: [Vec3; 3]) -> Self {
        Self { columns }
    }

    /// Toe velocity per unit hip-yaw rate.
    pub fn j1(&self) -> Vec3 {
        self.columns[0]
    }

    /// Toe velocity per unit thigh-pitch rate.
    pub fn j2(&self) -> Vec3 {
        self.columns[1]
    }

    /// Toe velocity per unit knee-pitch rate.
    pub fn j3(&self) -> Vec3 {
        self.columns[2]
    }

    pub fn column(&self, joint: Joint) -> Vec3 {
        self.columns[joint.index()]
    }

    pub fn columns(&self) -> [Vec3; 3] {
        self.columns
    }

    /// Row-major matrix form, `rows[i][j]` = component `i` of column `j`.
    pub fn rows(&self) -> [[f64; 3]; 3] {
        let [a, b, c] = self.columns;
        [[a.x, b.x, c.x], [a.y, b.y, c.y], [a.z, b.z, c.z]]
    }

    /// Toe linear velocity for the given joint rates: `J · θ̇`.
    pub fn apply(&self, rates: JointRates) -> Vec3 {
        self.columns
            .iter()
            .zip(rates.as_array())
            .fold(Vec3::zero(), |acc, (col, rate)| acc.add(col.scale(rate)))
    }

    /// `det J`, the signed volume spanned by the three columns.
    pub fn determinant(&self) -> f64 {
        let [a, b, c] = self.columns;
        a.dot(b.cross(c))
    }

    /// Joints whose column norm is at most `tol`.
    pub fn singular_columns(&self, tol: f64) -> Vec<Joint> {
        let singular: Vec<Joint> = Joint::ALL
            .into_iter()
            .filter(|&joint| self.column(joint).norm() <= tol)
            .collect();
        for joint in &singular {
            warn!(%joint, tol, "toe lies on joint axis: Jacobian column vanishes");
        }
        singular
    }

    /// `true` when `|det J| <= tol`: the toe cannot move in some direction.
    pub fn is_singular(&self, tol: f64) -> bool {
        let det = self.determinant();
        let singular = det.abs() <= tol;
        if singular {
            warn!(det, tol, "singular Jacobian");
        }
        singular
    }
}

/// Velocity column of a revolute joint: `û × (point - axis_point)`.
///
/// The axis direction is normalised first; the result is the velocity of
/// `point` per unit angular rate.
pub fn revolute_column(axis_point: Vec3, axis_dir: Vec3, point: Vec3) -> Vec3 {
    axis_dir.normalized().cross(point.sub(axis_point))
}

/// Velocity column of a prismatic joint: the unit slide direction.
pub fn prismatic_column(axis_dir: Vec3) -> Vec3 {
    axis_dir.normalized()
}

/// Build the Jacobian from a forward-kinematics result.
///
/// Joint 1 turns about world Z through the hip, joint 2 about `R1·Y`
/// through the thigh joint, joint 3 about `R1·R2·Y` through the knee.
pub fn compute_jacobian(chain: &KinematicChain) -> Jacobian {
    let toe = chain.toe();
    let columns = Joint::ALL.map(|joint| {
        revolute_column(chain.joint_pivot(joint), chain.joint_axis(joint), toe)
    });
    trace!(
        j1 = ?columns[0],
        j2 = ?columns[1],
        j3 = ?columns[2],
        "velocity jacobian"
    );
    Jacobian::from_columns(columns)
}

/// Forward finite-difference estimate of the toe velocity:
/// `(toe(θ + θ̇·ε) - toe(θ)) / ε`.
///
/// Its error against [`Jacobian::apply`] shrinks linearly with `eps`
/// until rounding dominates.
pub fn numerical_toe_velocity(
    lengths: LinkLengths,
    angles: JointAngles,
    rates: JointRates,
    eps: f64,
) -> Vec3 {
    let now = compute_chain(lengths, angles).toe();
    let next = compute_chain(lengths, angles.advanced(rates, eps)).toe();
    next.sub(now).scale(1.0 / eps)
}
