//! Quaternion rotation and interpolation.
//!
//! Rotation routines assume unit quaternions: the conjugate stands in for
//! the inverse and nothing here renormalizes intermediate results.
//! Callers own normalization.

use std::ops::{Add, Mul, Neg};

use serde::{Deserialize, Serialize};

use crate::math::{Vec3, EPS};
use crate::matrix::Mat4;

/// A rotation quaternion; `w` is the scalar part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Shortest-arc rotation mapping unit vector `from` onto unit vector
    /// `to`. Identity when the two are already (anti)aligned within
    /// [`EPS`] of each other.
    pub fn between(from: Vec3, to: Vec3) -> Self {
        let mut axis = from.cross(to);
        let sin2phi = axis.normalize();

        if sin2phi < EPS {
            return Self::IDENTITY;
        }

        let cos2phi = from.dot(to);
        let sinphi = ((1.0 - cos2phi) / 2.0).sqrt();
        let cosphi = ((1.0 + cos2phi) / 2.0).sqrt();

        Self::new(sinphi * axis.x, sinphi * axis.y, sinphi * axis.z, cosphi)
    }

    /// The equivalent rotation matrix (row-vector convention).
    pub fn to_matrix(self) -> Mat4 {
        let Self { x, y, z, w } = self;
        let mut mat = Mat4::IDENTITY;

        mat.m[0][0] = 1.0 - 2.0 * (y * y + z * z);
        mat.m[1][0] = 2.0 * (x * y - w * z);
        mat.m[2][0] = 2.0 * (x * z + w * y);

        mat.m[0][1] = 2.0 * (x * y + w * z);
        mat.m[1][1] = 1.0 - 2.0 * (x * x + z * z);
        mat.m[2][1] = 2.0 * (y * z - w * x);

        mat.m[0][2] = 2.0 * (x * z - w * y);
        mat.m[1][2] = 2.0 * (y * z + w * x);
        mat.m[2][2] = 1.0 - 2.0 * (x * x + y * y);

        mat
    }

    /// Recovers the rotation quaternion of an orthonormal matrix.
    ///
    /// When the trace is non-positive the largest diagonal element picks
    /// the construction branch, keeping the divisor well away from zero.
    pub fn from_matrix(m: &Mat4) -> Self {
        const NEXT: [usize; 3] = [1, 2, 0];

        let tr = m[0][0] + m[1][1] + m[2][2];

        if tr > 0.0 {
            let s = (tr + 1.0).sqrt();
            let w = 0.5 * s;
            let s = 0.5 / s;
            Self::new(
                (m[1][2] - m[2][1]) * s,
                (m[2][0] - m[0][2]) * s,
                (m[0][1] - m[1][0]) * s,
                w,
            )
        } else {
            let mut i = 0;
            if m[1][1] > m[0][0] {
                i = 1;
            }
            if m[2][2] > m[i][i] {
                i = 2;
            }
            let j = NEXT[i];
            let k = NEXT[j];

            let s = (m[i][i] - m[j][j] - m[k][k] + 1.0).sqrt();

            let mut q = [0.0; 4];
            q[i] = s * 0.5;

            let s = if s != 0.0 { 0.5 / s } else { s };

            q[3] = (m[j][k] - m[k][j]) * s;
            q[j] = (m[i][j] + m[j][i]) * s;
            q[k] = (m[i][k] + m[k][i]) * s;

            Self::new(q[0], q[1], q[2], q[3])
        }
    }

    /// Spherical linear interpolation from `self` (t = 0) to `other`
    /// (t = 1).
    ///
    /// The second operand is negated when the quaternions sit on opposite
    /// hemispheres, so the arc taken is always the shorter one. Nearly
    /// identical rotations fall back to a plain linear blend to keep the
    /// sine divisor away from zero.
    pub fn slerp(self, other: Self, t: f64) -> Self {
        let mut r = other;
        let mut cosphi = self.dot(r);

        if cosphi < 0.0 {
            cosphi = -cosphi;
            r = -r;
        }

        let (scale0, scale1) = if 1.0 - cosphi > EPS {
            let phi = cosphi.acos();
            let sinphi = phi.sin();
            (
                (phi * (1.0 - t)).sin() / sinphi,
                (phi * t).sin() / sinphi,
            )
        } else {
            (1.0 - t, t)
        };

        scale0 * self + scale1 * r
    }

    /// Rotates `v` by the sandwich product `q * (v, 0) * q*`.
    ///
    /// Valid for unit quaternions only, where the conjugate equals the
    /// inverse.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let p = Self::new(v.x, v.y, v.z, 0.0);
        let r = self * (p * self.conjugate());
        Vec3::new(r.x, r.y, r.z)
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product; under [`Quat::rotate`], `a * b` applies `b`'s
    /// rotation first and `a`'s second.
    fn mul(self, r: Self) -> Self {
        Self::new(
            self.y * r.z - self.z * r.y + r.w * self.x + self.w * r.x,
            self.z * r.x - self.x * r.z + r.w * self.y + self.w * r.y,
            self.x * r.y - self.y * r.x + r.w * self.z + self.w * r.z,
            self.w * r.w - self.x * r.x - self.y * r.y - self.z * r.z,
        )
    }
}

impl Add for Quat {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl Neg for Quat {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f64> for Quat {
    type Output = Self;
    fn mul(self, f: f64) -> Self {
        Self::new(self.x * f, self.y * f, self.z * f, self.w * f)
    }
}

impl Mul<Quat> for f64 {
    type Output = Quat;
    fn mul(self, q: Quat) -> Quat {
        q * self
    }
}
