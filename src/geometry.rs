//! Vector kernel for 2D and 3D points
//!
//! Thin, pure wrappers over glam's double-precision vectors. Every operation
//! also has an `_into` form that writes into a caller-owned slot for hot
//! loops. NaN/Inf are propagated, never checked.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Principal axis used for rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

// === 2D ===

#[inline]
pub fn add2(a: DVec2, b: DVec2) -> DVec2 {
    a + b
}

#[inline]
pub fn sub2(a: DVec2, b: DVec2) -> DVec2 {
    a - b
}

#[inline]
pub fn scale2(v: DVec2, alpha: f64) -> DVec2 {
    v * alpha
}

#[inline]
pub fn dot2(a: DVec2, b: DVec2) -> f64 {
    a.dot(b)
}

/// Euclidean length
#[inline]
pub fn norm2(v: DVec2) -> f64 {
    v.length()
}

/// Euclidean distance between two points
#[inline]
pub fn dist2(a: DVec2, b: DVec2) -> f64 {
    norm2(sub2(a, b))
}

#[inline]
pub fn add2_into(out: &mut DVec2, a: DVec2, b: DVec2) {
    *out = add2(a, b);
}

#[inline]
pub fn sub2_into(out: &mut DVec2, a: DVec2, b: DVec2) {
    *out = sub2(a, b);
}

#[inline]
pub fn scale2_into(out: &mut DVec2, v: DVec2, alpha: f64) {
    *out = scale2(v, alpha);
}

// === 3D ===

#[inline]
pub fn add3(a: DVec3, b: DVec3) -> DVec3 {
    a + b
}

#[inline]
pub fn sub3(a: DVec3, b: DVec3) -> DVec3 {
    a - b
}

#[inline]
pub fn scale3(v: DVec3, alpha: f64) -> DVec3 {
    v * alpha
}

#[inline]
pub fn dot3(a: DVec3, b: DVec3) -> f64 {
    a.dot(b)
}

#[inline]
pub fn norm3(v: DVec3) -> f64 {
    v.length()
}

#[inline]
pub fn dist3(a: DVec3, b: DVec3) -> f64 {
    norm3(sub3(a, b))
}

/// Rotate `v` by `angle` radians about a principal axis (right-handed)
pub fn rotate(v: DVec3, angle: f64, axis: Axis) -> DVec3 {
    let (sin, cos) = angle.sin_cos();
    match axis {
        Axis::X => DVec3::new(v.x, v.y * cos - v.z * sin, v.y * sin + v.z * cos),
        Axis::Y => DVec3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos),
        Axis::Z => DVec3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z),
    }
}

#[inline]
pub fn add3_into(out: &mut DVec3, a: DVec3, b: DVec3) {
    *out = add3(a, b);
}

#[inline]
pub fn sub3_into(out: &mut DVec3, a: DVec3, b: DVec3) {
    *out = sub3(a, b);
}

#[inline]
pub fn scale3_into(out: &mut DVec3, v: DVec3, alpha: f64) {
    *out = scale3(v, alpha);
}

#[inline]
pub fn rotate_into(out: &mut DVec3, v: DVec3, angle: f64, axis: Axis) {
    *out = rotate(v, angle, axis);
}
