//! 2D vectors and window-to-normalized coordinate conversion.
//!
//! Mouse and touch devices report positions in normalized space. Platform glue
//! usually has window-space pixels, so each device is handed a
//! [`CoordinateTransform`] at construction instead of reaching for a global
//! window object.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Converts platform positions into the normalized space carried by events.
pub trait CoordinateTransform: Send + Sync {
    /// Convert an absolute location.
    fn to_normalized(&self, location: Vector2) -> Vector2;

    /// Convert a relative movement. The default removes the origin offset.
    fn to_normalized_delta(&self, delta: Vector2) -> Vector2 {
        self.to_normalized(delta) - self.to_normalized(Vector2::ZERO)
    }
}

/// Passes positions through unchanged (sources that already report normalized values).
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityTransform;

impl CoordinateTransform for IdentityTransform {
    fn to_normalized(&self, location: Vector2) -> Vector2 {
        location
    }
}

/// Maps window pixels to `[0, 1]` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowTransform {
    pub width: f32,
    pub height: f32,
}

impl WindowTransform {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl CoordinateTransform for WindowTransform {
    fn to_normalized(&self, location: Vector2) -> Vector2 {
        let x = if self.width > 0.0 { location.x / self.width } else { 0.0 };
        let y = if self.height > 0.0 { location.y / self.height } else { 0.0 };
        Vector2::new(x, y)
    }
}
