//! 4x4 transforms.
//!
//! Convention: row vectors, `v' = v * M`. `m[i][j]` maps input component
//! `i` to output component `j` and the translation lives in row 3. The
//! same convention runs through every transform routine here; mixing in a
//! column-vector matrix silently transposes rotations.

use std::ops::{Index, IndexMut, Mul};

use serde::{Deserialize, Serialize};

use crate::math::{Vec3, EPS};

/// Principal axis label for rotation construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// 4x4 matrix (row-major storage, row-vector convention).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    pub m: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Right-handed rotation about a principal axis, angle in radians.
    pub fn rotation(axis: Axis, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let mut r = Self::IDENTITY;
        match axis {
            Axis::X => {
                r.m[1][1] = cos;
                r.m[2][1] = -sin;
                r.m[1][2] = sin;
                r.m[2][2] = cos;
            }
            Axis::Y => {
                r.m[0][0] = cos;
                r.m[2][0] = sin;
                r.m[0][2] = -sin;
                r.m[2][2] = cos;
            }
            Axis::Z => {
                r.m[0][0] = cos;
                r.m[1][0] = -sin;
                r.m[0][1] = sin;
                r.m[1][1] = cos;
            }
        }
        r
    }

    /// Translation by `t` (row 3 under the row-vector convention).
    pub fn translation(t: Vec3) -> Self {
        let mut r = Self::IDENTITY;
        r.m[3][0] = t.x;
        r.m[3][1] = t.y;
        r.m[3][2] = t.z;
        r
    }

    /// Rotation about an arbitrary axis, angle in radians.
    ///
    /// Built by aligning `axis` to z with two principal rotations,
    /// rotating about z, then un-aligning. When the axis is (anti)parallel
    /// to x the alignment divides by ~0, so that case short-circuits to a
    /// direct x rotation, sign-flipped for negative x.
    pub fn rotation_about(axis: Vec3, angle: f64) -> Self {
        let (a, b, c) = (axis.x, axis.y, axis.z);
        let d = (b * b + c * c).sqrt();

        if d < EPS {
            let angle = if a < 0.0 { -angle } else { angle };
            return Self::rotation(Axis::X, angle);
        }

        let mut rx = Self::IDENTITY;
        rx.m[1][1] = c / d;
        rx.m[2][1] = -b / d;
        rx.m[1][2] = b / d;
        rx.m[2][2] = c / d;

        let mut irx = Self::IDENTITY;
        irx.m[1][1] = c / d;
        irx.m[2][1] = b / d;
        irx.m[1][2] = -b / d;
        irx.m[2][2] = c / d;

        let mut ry = Self::IDENTITY;
        ry.m[0][0] = d;
        ry.m[2][0] = -a;
        ry.m[0][2] = a;
        ry.m[2][2] = d;

        let mut iry = Self::IDENTITY;
        iry.m[0][0] = d;
        iry.m[2][0] = a;
        iry.m[0][2] = -a;
        iry.m[2][2] = d;

        rx * ry * Self::rotation(Axis::Z, angle) * iry * irx
    }

    /// Affine transform of a point: linear part plus translation row.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x * self.m[0][0] + p.y * self.m[1][0] + p.z * self.m[2][0] + self.m[3][0],
            p.x * self.m[0][1] + p.y * self.m[1][1] + p.z * self.m[2][1] + self.m[3][1],
            p.x * self.m[0][2] + p.y * self.m[1][2] + p.z * self.m[2][2] + self.m[3][2],
        )
    }

    /// Linear transform of a direction; the translation row is ignored.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            v.x * self.m[0][0] + v.y * self.m[1][0] + v.z * self.m[2][0],
            v.x * self.m[0][1] + v.y * self.m[1][1] + v.z * self.m[2][1],
            v.x * self.m[0][2] + v.y * self.m[1][2] + v.z * self.m[2][2],
        )
    }

    /// Transforms a surface normal by multiplying against the transposed
    /// linear part.
    ///
    /// This is only correct for orthonormal matrices (pure rotations),
    /// where the transpose equals the inverse. Callers owning scaled or
    /// sheared transforms must supply a normal-correct matrix themselves.
    pub fn transform_normal(&self, n: Vec3) -> Vec3 {
        Vec3::new(
            n.x * self.m[0][0] + n.y * self.m[0][1] + n.z * self.m[0][2],
            n.x * self.m[1][0] + n.y * self.m[1][1] + n.z * self.m[1][2],
            n.x * self.m[2][0] + n.y * self.m[2][1] + n.z * self.m[2][2],
        )
    }
}

impl Mul for Mat4 {
    type Output = Self;

    /// Standard row-by-column product. With the row-vector convention,
    /// `v * (a * b)` applies `a` first, then `b`. Order matters.
    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[i][0] * rhs.m[0][j]
                    + self.m[i][1] * rhs.m[1][j]
                    + self.m[i][2] * rhs.m[2][j]
                    + self.m[i][3] * rhs.m[3][j];
            }
        }
        Self { m: out }
    }
}

impl Index<usize> for Mat4 {
    type Output = [f64; 4];

    fn index(&self, row: usize) -> &[f64; 4] {
        &self.m[row]
    }
}

impl IndexMut<usize> for Mat4 {
    fn index_mut(&mut self, row: usize) -> &mut [f64; 4] {
        &mut self.m[row]
    }
}
