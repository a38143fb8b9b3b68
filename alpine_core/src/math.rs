//! Vector math.
//!
//! This module intentionally stays small and deterministic.
//! It avoids SIMD/unsafe and focuses on stable semantics: all types are
//! plain `f64` value types, plain operators return new values, and the
//! compound-assign forms mutate in place.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Threshold below which a magnitude counts as zero in pivot selection
/// and degeneracy checks.
pub const EPS: f64 = 1.0e-9;

/// 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn length_sq(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    /// Scales to unit length in place and returns the prior magnitude.
    ///
    /// Vectors shorter than [`EPS`] are left unchanged and the reported
    /// magnitude is 0.0.
    pub fn normalize(&mut self) -> f64 {
        let len = self.length();
        if len < EPS {
            return 0.0;
        }
        *self *= 1.0 / len;
        len
    }

    pub fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn length_sq(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    /// Scales to unit length in place and returns the prior magnitude.
    ///
    /// Vectors shorter than [`EPS`] are left unchanged and the reported
    /// magnitude is 0.0.
    pub fn normalize(&mut self) -> f64 {
        let len = self.length();
        if len < EPS {
            return 0.0;
        }
        *self *= 1.0 / len;
        len
    }

    pub fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }

    /// Removes the component along `normal` (assumed unit length).
    pub fn project_onto_plane(self, normal: Self) -> Self {
        self - normal.dot(self) * normal
    }
}

/// 4D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vec4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    pub fn length_sq(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    /// Scales to unit length in place and returns the prior magnitude.
    ///
    /// Vectors shorter than [`EPS`] are left unchanged and the reported
    /// magnitude is 0.0.
    pub fn normalize(&mut self) -> f64 {
        let len = self.length();
        if len < EPS {
            return 0.0;
        }
        *self *= 1.0 / len;
        len
    }

    pub fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, f: f64) -> Self {
        Self::new(self.x * f, self.y * f)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;
    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, f: f64) {
        self.x *= f;
        self.y *= f;
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, f: f64) -> Self {
        Self::new(self.x * f, self.y * f, self.z * f)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, f: f64) {
        self.x *= f;
        self.y *= f;
        self.z *= f;
    }
}

impl Add for Vec4 {
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

impl Sub for Vec4 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

impl Neg for Vec4 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f64> for Vec4 {
    type Output = Self;
    fn mul(self, f: f64) -> Self {
        Self::new(self.x * f, self.y * f, self.z * f, self.w * f)
    }
}

impl Mul<Vec4> for f64 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        v * self
    }
}

impl AddAssign for Vec4 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
        self.w += rhs.w;
    }
}

impl SubAssign for Vec4 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
        self.w -= rhs.w;
    }
}

impl MulAssign<f64> for Vec4 {
    fn mul_assign(&mut self, f: f64) {
        self.x *= f;
        self.y *= f;
        self.z *= f;
        self.w *= f;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_is_symmetric() {
        let a = Vec3::new(1.0, -2.0, 3.0);
        let b = Vec3::new(4.0, 0.5, -1.0);
        assert_eq!(a.dot(b), b.dot(a));
    }

    #[test]
    fn cross_is_antisymmetric() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-2.0, 0.0, 5.0);
        assert_eq!(a.cross(b), -(b.cross(a)));
    }

    #[test]
    fn cross_of_axes() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn normalize_reports_magnitude() {
        let mut v = Vec3::new(3.0, 0.0, 4.0);
        let len = v.normalize();
        assert_eq!(len, 5.0);
        assert!((v.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_is_idempotent_on_unit_vectors() {
        let mut v = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(v.normalize(), 1.0);
        assert_eq!(v, Vec3::Y);
    }

    // Documented choice: a near-zero vector is left untouched and the
    // reported magnitude is exactly 0.0.
    #[test]
    fn normalize_of_zero_is_a_noop() {
        let mut v = Vec3::ZERO;
        assert_eq!(v.normalize(), 0.0);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn compound_assign_mutates_in_place() {
        let mut v = Vec2::new(1.0, 2.0);
        v += Vec2::new(0.5, 0.5);
        v *= 2.0;
        assert_eq!(v, Vec2::new(3.0, 5.0));
    }

    #[test]
    fn plain_operators_do_not_mutate() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(4.0, 3.0, 2.0, 1.0);
        let _ = a + b;
        let _ = a - b;
        let _ = a * 2.0;
        assert_eq!(a, Vec4::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn vec3_lerp_midpoint() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 4.0, 6.0);
        assert_eq!(a.lerp(b, 0.5), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn project_onto_plane_kills_normal_component() {
        let v = Vec3::new(3.0, 4.0, 5.0);
        let p = v.project_onto_plane(Vec3::Z);
        assert_eq!(p, Vec3::new(3.0, 4.0, 0.0));
        assert!(p.dot(Vec3::Z).abs() < 1e-12);
    }
}
