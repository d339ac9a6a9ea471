use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// 2D vector for all physics calculations (double precision)
///
/// Also doubles as a complex number for orientations: a unit vector
/// `(cos a, sin a)` represents a rotation by `a`, and [`Vec2::rotate_by`]
/// composes two rotations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    /// Identity rotation
    pub const UNIT_X: Self = Self { x: 1.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: cos, y: sin }
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3D cross product
    #[inline]
    pub fn cross(&self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Unit vector in the same direction, or zero for the zero vector.
    #[inline]
    pub fn normalize(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        let len = self.length();
        Self { x: self.x / len, y: self.y / len }
    }

    /// Rotated +90 degrees: `(-y, x)`
    #[inline]
    pub fn perp(&self) -> Self {
        Self { x: -self.y, y: self.x }
    }

    /// Rotated -90 degrees: `(y, -x)`
    #[inline]
    pub fn perp_cw(&self) -> Self {
        Self { x: self.y, y: -self.x }
    }

    /// Complex product: rotates `self` by the rotation `r` (scaled by `|r|`).
    #[inline]
    pub fn rotate_by(&self, r: Vec2) -> Self {
        Self {
            x: self.x * r.x - self.y * r.y,
            y: self.y * r.x + self.x * r.y,
        }
    }

    #[inline]
    pub fn rotate(&self, angle: f64) -> Self {
        self.rotate_by(Self::from_angle(angle))
    }

    /// Inverse rotation of a unit vector (complex conjugate)
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self { x: self.x, y: -self.y }
    }

    /// Scalar angular velocity crossed with a vector: `w × r`
    #[inline]
    pub fn cross_scalar(w: f64, r: Vec2) -> Self {
        Self { x: -w * r.y, y: w * r.x }
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        (*self - other).length()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self * rhs.x, y: self * rhs.y }
    }
}

impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self { x: self.x / rhs, y: self.y / rhs }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from(v: [f64; 2]) -> Self {
        Self { x: v[0], y: v[1] }
    }
}
