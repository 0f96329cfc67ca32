//! 3D points, vectors and rays.
//!
//! `Point3` and `Vec3` share the same triple layout but are kept as
//! distinct types: a point is a location, a vector is a displacement,
//! and only a vector normalizes or cross-products meaningfully.

use std::ops::{Add, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3(pub f32, pub f32, pub f32);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3(pub f32, pub f32, pub f32);

impl Vec3 {
    #[inline]
    pub fn scale(self, f: f32) -> Self {
        Self(self.0 * f, self.1 * f, self.2 * f)
    }

    #[inline]
    pub fn dot(self, v: Self) -> f32 {
        self.0 * v.0 + self.1 * v.1 + self.2 * v.2
    }

    #[inline]
    pub fn cross(self, v: Self) -> Self {
        Self(
            self.1 * v.2 - self.2 * v.1,
            self.2 * v.0 - self.0 * v.2,
            self.0 * v.1 - self.1 * v.0,
        )
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Normalizes in place; a no-op on the zero vector.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            self
        } else {
            self.scale(1.0 / len)
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, v: Self) -> Self {
        Self(self.0 + v.0, self.1 + v.1, self.2 + v.2)
    }
}
impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, v: Self) -> Self {
        Self(self.0 - v.0, self.1 - v.1, self.2 - v.2)
    }
}
impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, f: f32) -> Self {
        self.scale(f)
    }
}
impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(-self.0, -self.1, -self.2)
    }
}

impl Point3 {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(x, y, z)
    }
}

impl Add<Vec3> for Point3 {
    type Output = Point3;
    #[inline]
    fn add(self, v: Vec3) -> Point3 {
        Point3(self.0 + v.0, self.1 + v.1, self.2 + v.2)
    }
}
impl Sub for Point3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, p: Self) -> Vec3 {
        Vec3(self.0 - p.0, self.1 - p.1, self.2 - p.2)
    }
}
impl Sub<Vec3> for Point3 {
    type Output = Point3;
    #[inline]
    fn sub(self, v: Vec3) -> Point3 {
        Point3(self.0 - v.0, self.1 - v.1, self.2 - v.2)
    }
}

/// A ray with a unit-length direction, immutable once built.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction.scale(t)
    }
}
