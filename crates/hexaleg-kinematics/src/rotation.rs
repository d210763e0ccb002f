//! 3×3 rotation matrices.
//!
//! Only two elementary rotations are needed by the leg:
//!
//! ```text
//! Rz(φ): (x, y, z) -> (x cosφ - y sinφ, x sinφ + y cosφ, z)
//! Ry(φ): (x, y, z) -> (x cosφ + z sinφ, y, -x sinφ + z cosφ)
//! ```
//!
//! [`RotationMatrix::about_axis`] covers arbitrary axes for the motor and
//! transform helpers.

use serde::{Deserialize, Serialize};

use crate::vector::Vec3;

/// A 3×3 rotation matrix stored row-major.
///
/// Matrices produced by the constructors in this module are orthonormal
/// with determinant 1 up to floating-point rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationMatrix {
    m: [[f64; 3]; 3],
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl RotationMatrix {
    /// Build from rows.  The caller is responsible for orthonormality.
    pub const fn from_rows(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    pub const fn identity() -> Self {
        Self::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation by `phi` radians about the Z axis.
    pub fn about_z(phi: f64) -> Self {
        let (s, c) = phi.sin_cos();
        Self::from_rows([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation by `phi` radians about the Y axis.
    pub fn about_y(phi: f64) -> Self {
        let (s, c) = phi.sin_cos();
        Self::from_rows([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    /// Rotation by `phi` radians about an arbitrary axis (Rodrigues'
    /// formula).  The axis is normalised; a zero axis yields the identity.
    pub fn about_axis(axis: Vec3, phi: f64) -> Self {
        let u = axis.normalized();
        if u == Vec3::zero() {
            return Self::identity();
        }
        let (s, c) = phi.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (u.x, u.y, u.z);
        Self::from_rows([
            [t * x * x + c, t * x * y - s * z, t * x * z + s * y],
            [t * x * y + s * z, t * y * y + c, t * y * z - s * x],
            [t * x * z - s * y, t * y * z + s * x, t * z * z + c],
        ])
    }

    pub fn rows(&self) -> [[f64; 3]; 3] {
        self.m
    }

    /// Column `j` as a vector: the image of the `j`-th basis vector.
    pub fn column(&self, j: usize) -> Vec3 {
        Vec3::new(self.m[0][j], self.m[1][j], self.m[2][j])
    }

    /// Matrix product `self · rhs` (apply `rhs` first, then `self`).
    pub fn mul(&self, rhs: &Self) -> Self {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Self::from_rows(out)
    }

    /// Apply the rotation to a vector.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Transpose, which is the inverse of an orthonormal matrix.
    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self::from_rows([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    pub fn determinant(&self) -> f64 {
        self.column(0).dot(self.column(1).cross(self.column(2)))
    }

    /// `true` when the columns are orthonormal and the determinant is 1,
    /// both within `tol`.
    pub fn is_orthonormal(&self, tol: f64) -> bool {
        let cols = [self.column(0), self.column(1), self.column(2)];
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                if (cols[i].dot(cols[j]) - expected).abs() > tol {
                    return false;
                }
            }
        }
        (self.determinant() - 1.0).abs() <= tol
    }

    /// Largest absolute element-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        let mut max = 0.0_f64;
        for i in 0..3 {
            for j in 0..3 {
                max = max.max((self.m[i][j] - other.m[i][j]).abs());
            }
        }
        max
    }
}
