//! Rigid motions as unit dual quaternions ("motors").
//!
//! A [`Motor`] `r + ε d` holds a unit rotation quaternion `r` and a dual
//! part `d = ½ t r` encoding the translation `t`.  Motors compose by plain
//! multiplication, which makes them a convenient way to write a serial
//! chain as a product of screw motions about fixed lines:
//!
//! ```text
//! M = S1(θ1) · S2(θ2) · S3(θ3) · T(tool)
//! ```
//!
//! [`Motor::screw`] builds a rotation about an arbitrary line (plus an
//! optional pitch along it), which is what [`crate::screw::ScrewLeg`] uses.
//!
//! # Example
//!
//! ```rust
//! use hexaleg_kinematics::motor::Motor;
//! use hexaleg_kinematics::Vec3;
//!
//! // Quarter turn about the vertical line through (1, 0, 0).
//! let m = Motor::screw(Vec3::X, Vec3::Z, std::f64::consts::FRAC_PI_2, 0.0);
//! let p = m.act_point(Vec3::new(2.0, 0.0, 0.0));
//! assert!((p.x - 1.0).abs() < 1e-12);
//! assert!((p.y - 1.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::rotation::RotationMatrix;
use crate::vector::Vec3;

// ────────────────────────────────────────────────────────────────────────────
// Quaternion
// ────────────────────────────────────────────────────────────────────────────

/// A quaternion `w + xi + yj + zk`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// The identity rotation (no rotation).
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Pure quaternion `0 + v`.
    pub fn pure(v: Vec3) -> Self {
        Self::new(0.0, v.x, v.y, v.z)
    }

    /// Rotation by `theta` radians about `axis`.  The axis is normalised; a
    /// zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, theta: f64) -> Self {
        let u = axis.normalized();
        if u == Vec3::zero() {
            return Self::identity();
        }
        let (s, c) = (0.5 * theta).sin_cos();
        Self::new(c, u.x * s, u.y * s, u.z * s)
    }

    /// Vector (imaginary) part.
    pub fn vector(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Hamilton product: compose two rotations (`rhs` first).
    pub fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }

    pub fn add(self, rhs: Self) -> Self {
        Self::new(
            self.w + rhs.w,
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
        )
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(s * self.w, s * self.x, s * self.y, s * self.z)
    }

    /// Conjugate (== inverse for a unit quaternion).
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn norm(self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit quaternion in the same direction; zero normalises to identity.
    pub fn normalized(self) -> Self {
        let n = self.norm();
        if n == 0.0 {
            return Self::identity();
        }
        self.scale(1.0 / n)
    }

    /// Rotate a vector by this quaternion: p' = q * p * q*.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        self.mul(Self::pure(v)).mul(self.conjugate()).vector()
    }

    /// Equivalent rotation matrix of a unit quaternion.
    pub fn to_rotation_matrix(self) -> RotationMatrix {
        let Self { w, x, y, z } = self;
        RotationMatrix::from_rows([
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y - w * z),
                2.0 * (x * z + w * y),
            ],
            [
                2.0 * (x * y + w * z),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z - w * x),
            ],
            [
                2.0 * (x * z - w * y),
                2.0 * (y * z + w * x),
                1.0 - 2.0 * (x * x + y * y),
            ],
        ])
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Motor
// ────────────────────────────────────────────────────────────────────────────

/// A rigid motion in SE(3) as a unit dual quaternion `r + ε d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motor {
    /// Real part: rotation.
    r: Quaternion,
    /// Dual part: `½ t r`.
    d: Quaternion,
}

impl Default for Motor {
    fn default() -> Self {
        Self::identity()
    }
}

impl Motor {
    pub const fn identity() -> Self {
        Self {
            r: Quaternion::identity(),
            d: Quaternion::zero(),
        }
    }

    /// Pure rotation by `theta` about `axis` through the origin.
    pub fn rotation(axis: Vec3, theta: f64) -> Self {
        Self {
            r: Quaternion::from_axis_angle(axis, theta),
            d: Quaternion::zero(),
        }
    }

    /// Pure translation by `t`.
    pub fn translator(t: Vec3) -> Self {
        Self {
            r: Quaternion::identity(),
            d: Quaternion::pure(t.scale(0.5)),
        }
    }

    /// Rotation by `theta` about the line through `point` with direction
    /// `axis`, plus a translation of `pitch · theta` along the axis.
    ///
    /// `M = T(p) · R · T(-p) · T(pitch·θ·û)`
    pub fn screw(point: Vec3, axis: Vec3, theta: f64, pitch: f64) -> Self {
        let u = axis.normalized();
        Self::translator(point)
            .mul(Self::rotation(u, theta))
            .mul(Self::translator(point.neg()))
            .mul(Self::translator(u.scale(pitch * theta)))
    }

    /// Compose: `rhs` is applied first, then `self`.
    ///
    /// `(r1 + ε d1)(r2 + ε d2) = r1 r2 + ε (r1 d2 + d1 r2)`
    pub fn mul(self, rhs: Self) -> Self {
        Self {
            r: self.r.mul(rhs.r),
            d: self.r.mul(rhs.d).add(self.d.mul(rhs.r)),
        }
    }

    /// Inverse motion of a unit motor: the quaternion conjugate of both
    /// parts.
    pub fn inverse(self) -> Self {
        Self {
            r: self.r.conjugate(),
            d: self.d.conjugate(),
        }
    }

    /// Rotation part.
    pub fn rotation_quaternion(self) -> Quaternion {
        self.r
    }

    /// Translation part: `t = 2 (d r*)`.
    pub fn translation(self) -> Vec3 {
        self.d.mul(self.r.conjugate()).vector().scale(2.0)
    }

    /// Apply to a point: rotate, then translate.
    pub fn act_point(self, p: Vec3) -> Vec3 {
        self.r.rotate(p).add(self.translation())
    }

    /// Apply to a direction: rotation only.
    pub fn act_dir(self, v: Vec3) -> Vec3 {
        self.r.rotate(v)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    fn assert_vec_close(a: Vec3, b: Vec3, tol: f64) {
        assert!(a.distance(b) < tol, "expected {b:?}, got {a:?}");
    }

    // ── Quaternion ──────────────────────────────────────────────────────────

    #[test]
    fn quaternion_identity_rotate_is_noop() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_vec_close(Quaternion::identity().rotate(v), v, 1e-15);
    }

    #[test]
    fn quaternion_90deg_yaw_rotates_x_to_y() {
        let q = Quaternion::new(FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2);
        assert_vec_close(q.rotate(Vec3::X), Vec3::Y, 1e-12);
    }

    #[test]
    fn quaternion_conjugate_is_inverse() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 2.0, -0.5), 0.8);
        let prod = q.mul(q.conjugate());
        assert!((prod.w - 1.0).abs() < 1e-12);
        assert!(prod.vector().norm() < 1e-12);
    }

    #[test]
    fn quaternion_matrix_matches_elementary_rotations() {
        for theta in [-1.3, 0.2, 2.9] {
            let qz = Quaternion::from_axis_angle(Vec3::Z, theta).to_rotation_matrix();
            let qy = Quaternion::from_axis_angle(Vec3::Y, theta).to_rotation_matrix();
            assert!(qz.max_abs_diff(&RotationMatrix::about_z(theta)) < 1e-14);
            assert!(qy.max_abs_diff(&RotationMatrix::about_y(theta)) < 1e-14);
        }
    }

    #[test]
    fn zero_quaternion_normalizes_to_identity() {
        assert_eq!(Quaternion::zero().normalized(), Quaternion::identity());
    }

    // ── Motor ───────────────────────────────────────────────────────────────

    #[test]
    fn translator_moves_points_not_directions() {
        let m = Motor::translator(Vec3::new(1.0, -2.0, 0.5));
        assert_vec_close(m.act_point(Vec3::zero()), Vec3::new(1.0, -2.0, 0.5), 1e-15);
        assert_vec_close(m.act_dir(Vec3::X), Vec3::X, 1e-15);
    }

    #[test]
    fn mul_applies_right_operand_first() {
        // Translate along X, then yaw 90°: the point ends on +Y.
        let m = Motor::rotation(Vec3::Z, FRAC_PI_2).mul(Motor::translator(Vec3::X));
        assert_vec_close(m.act_point(Vec3::zero()), Vec3::Y, 1e-12);
        // Yaw first, then translate: the origin only translates.
        let m = Motor::translator(Vec3::X).mul(Motor::rotation(Vec3::Z, FRAC_PI_2));
        assert_vec_close(m.act_point(Vec3::zero()), Vec3::X, 1e-12);
    }

    #[test]
    fn screw_fixes_points_on_its_axis() {
        let m = Motor::screw(Vec3::new(0.25, 0.0, 0.0), Vec3::Y, 0.7, 0.0);
        let on_axis = Vec3::new(0.25, 3.0, 0.0);
        assert_vec_close(m.act_point(on_axis), on_axis, 1e-12);
    }

    #[test]
    fn screw_half_turn_reflects_through_axis() {
        let m = Motor::screw(Vec3::X, Vec3::Z, PI, 0.0);
        assert_vec_close(m.act_point(Vec3::zero()), Vec3::new(2.0, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn screw_pitch_advances_along_axis() {
        let m = Motor::screw(Vec3::zero(), Vec3::Z, 2.0 * PI, 0.1);
        let p = m.act_point(Vec3::X);
        assert_vec_close(p, Vec3::new(1.0, 0.0, 2.0 * PI * 0.1), 1e-12);
    }

    #[test]
    fn inverse_undoes_motion() {
        let m = Motor::screw(Vec3::new(0.1, 0.2, 0.3), Vec3::new(1.0, 1.0, 0.0), 1.1, 0.05)
            .mul(Motor::translator(Vec3::new(-0.4, 0.0, 0.2)));
        let p = Vec3::new(0.3, -0.7, 0.9);
        assert_vec_close(m.inverse().act_point(m.act_point(p)), p, 1e-12);
        assert_vec_close(m.mul(m.inverse()).act_point(p), p, 1e-12);
    }

    #[test]
    fn translation_of_composed_motor() {
        let m = Motor::rotation(Vec3::Z, FRAC_PI_2).mul(Motor::translator(Vec3::new(2.0, 0.0, 0.0)));
        assert_vec_close(m.translation(), Vec3::new(0.0, 2.0, 0.0), 1e-12);
        assert!((m.rotation_quaternion().norm() - 1.0).abs() < 1e-12);
    }
}
