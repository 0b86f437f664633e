//! Strongly-typed numeric primitives for frame geometry.
//!
//! - `Point` is a 2D position or displacement in millimeters (screen axes, y down)
//! - `Angle` stores radians in the frame-builder π-offset convention
//! - `Zoom` is a validated view multiplier
//!
//! Lengths stay plain `f64` millimeters; the π-offset is the only unit trap,
//! so it is the only one behind a newtype.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum NumericError {
    #[error("value is NaN")]
    NaN,
    #[error("value is infinite")]
    Infinite,
    #[error("value is zero")]
    Zero,
    #[error("value is negative")]
    Negative,
}

/// 2D point (or vector) in millimeters.
///
/// Arithmetic delegates to `glam::DVec2`. Nothing here guards against NaN:
/// a failed solve is expected to flow through as NaN and be detected with
/// [`Point::is_nan`] afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
    pub const NAN: Point = Point { x: f64::NAN, y: f64::NAN };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    #[inline]
    fn vec(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    /// Multiply both coordinates by `k`
    #[inline]
    pub fn scale(self, k: f64) -> Point {
        (self.vec() * k).into()
    }

    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.vec().dot(other.vec())
    }

    /// 2D scalar cross product `x1*y2 - y1*x2`.
    /// Positive when `other` turns counterclockwise from `self` (in y-up axes).
    #[inline]
    pub fn cross(self, other: Point) -> f64 {
        self.vec().perp_dot(other.vec())
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.vec().length()
    }

    /// Unit vector in the same direction. NaN for the zero vector.
    #[inline]
    pub fn unit(self) -> Point {
        self.scale(1.0 / self.length())
    }

    /// True if either coordinate is NaN
    #[inline]
    pub fn is_nan(self) -> bool {
        self.vec().is_nan()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.vec().is_finite()
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point { x: v.x, y: v.y }
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        p.vec()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        (self.vec() + rhs.vec()).into()
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        (self.vec() - rhs.vec()).into()
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        (-self.vec()).into()
    }
}

impl Mul<Point> for f64 {
    type Output = Point;
    fn mul(self, rhs: Point) -> Point {
        rhs.scale(self)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Convert frame-builder degrees into internal radians: `π + toRadians(deg)`.
#[inline]
pub fn to_radians_with_offset(degrees: f64) -> f64 {
    PI + degrees.to_radians()
}

/// Inverse of [`to_radians_with_offset`]: `toDegrees(rad - π)`.
#[inline]
pub fn to_degrees_without_offset(radians: f64) -> f64 {
    (radians - PI).to_degrees()
}

/// Tube angle in internal radians.
///
/// A frame-builder angle of 73° ("73° from horizontal") is stored as
/// `π + 73°` so that `vector_from_polar(len, angle)` points up and to the
/// rear in screen space. The raw radian value is never shown to humans.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(f64);

impl Angle {
    /// From frame-builder degrees (what a template store or a human supplies)
    pub fn from_frame_degrees(degrees: f64) -> Angle {
        Angle(to_radians_with_offset(degrees))
    }

    /// From an already-offset radian value
    pub const fn from_internal(radians: f64) -> Angle {
        Angle(radians)
    }

    /// Back to frame-builder degrees
    pub fn frame_degrees(self) -> f64 {
        to_degrees_without_offset(self.0)
    }

    /// The internal radian value, including the π offset
    #[inline]
    pub fn internal(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn tan(self) -> f64 {
        self.0.tan()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.frame_degrees())
    }
}

/// View zoom multiplier (unitless, strictly positive).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Zoom(f64);

impl Zoom {
    pub const ONE: Zoom = Zoom(1.0);

    /// Create a Zoom (unchecked, for constants).
    pub(crate) const fn new(factor: f64) -> Self {
        Zoom(factor)
    }

    /// Create a Zoom with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(factor: f64) -> Result<Self, NumericError> {
        if factor.is_nan() {
            Err(NumericError::NaN)
        } else if factor.is_infinite() {
            Err(NumericError::Infinite)
        } else if factor == 0.0 {
            Err(NumericError::Zero)
        } else if factor < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Zoom(factor))
        }
    }

    #[inline]
    pub fn factor(self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Zoom {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Zoom::try_new(raw).map_err(serde::de::Error::custom)
    }
}
