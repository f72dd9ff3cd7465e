// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column-major 3×3 transform with an optional perspective row.
//!
//! Compositor transforms may carry a perspective component, which
//! [`kurbo::Affine`] cannot represent. [`Matrix3`] covers what the adapter
//! needs (composition, point and path mapping, inversion, finiteness checks)
//! and converts to `Affine` whenever the perspective row is trivial.

use core::ops::Mul;

use kurbo::{Affine, BezPath, PathEl, Point, Vec2};

/// A column-major 3×3 matrix stored as `[[f64; 3]; 3]`.
///
/// Each inner array is one *column* `[x, y, w]`. Points are treated as column
/// vectors `(x, y, 1)`, so `a * b` applies `b` first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3 {
    /// Three columns, each a 3-element array `[x, y, w]`.
    pub cols: [[f64; 3]; 3],
}

impl Matrix3 {
    /// The 3×3 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Creates a matrix from nine row-major values.
    ///
    /// This is the layout compositor messages use:
    /// `[scale_x, skew_x, trans_x, skew_y, scale_y, trans_y, persp_0, persp_1, persp_2]`.
    #[inline]
    #[must_use]
    pub const fn from_row_major(v: [f64; 9]) -> Self {
        Self {
            cols: [[v[0], v[3], v[6]], [v[1], v[4], v[7]], [v[2], v[5], v[8]]],
        }
    }

    /// Returns the nine values in row-major order.
    #[inline]
    #[must_use]
    pub const fn to_row_major(self) -> [f64; 9] {
        let c = self.cols;
        [
            c[0][0], c[1][0], c[2][0], c[0][1], c[1][1], c[2][1], c[0][2], c[1][2], c[2][2],
        ]
    }

    /// Returns column `i` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `i >= 3`.
    #[inline]
    #[must_use]
    pub const fn col(self, i: usize) -> [f64; 3] {
        self.cols[i]
    }

    /// Creates a pure translation.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64) -> Self {
        Self {
            cols: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [x, y, 1.0]],
        }
    }

    /// Creates a non-uniform scale.
    #[inline]
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64) -> Self {
        Self {
            cols: [[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Creates a rotation about the origin (radians, positive is clockwise in
    /// a y-down coordinate system).
    #[inline]
    #[must_use]
    pub fn from_rotation(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            cols: [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Creates a matrix from a `kurbo` affine transform.
    #[inline]
    #[must_use]
    pub fn from_affine(affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self {
            cols: [[a, b, 0.0], [c, d, 0.0], [e, f, 1.0]],
        }
    }

    /// Returns `true` if the perspective row is `(0, 0, w)` with `w != 0`.
    #[inline]
    #[must_use]
    pub fn is_affine(&self) -> bool {
        self.cols[0][2] == 0.0 && self.cols[1][2] == 0.0 && self.cols[2][2] != 0.0
    }

    /// Converts to a `kurbo` affine transform, normalizing by the `w` term.
    ///
    /// Returns `None` when the matrix has a perspective component.
    #[must_use]
    pub fn to_affine(self) -> Option<Affine> {
        if !self.is_affine() {
            return None;
        }
        let w = self.cols[2][2];
        let c = self.cols;
        Some(Affine::new([
            c[0][0] / w,
            c[0][1] / w,
            c[1][0] / w,
            c[1][1] / w,
            c[2][0] / w,
            c[2][1] / w,
        ]))
    }

    /// Returns the translation column, ignoring any perspective.
    #[inline]
    #[must_use]
    pub const fn translation(self) -> Vec2 {
        Vec2::new(self.cols[2][0], self.cols[2][1])
    }

    /// Maps a point, dividing by the homogeneous coordinate.
    ///
    /// Points on the line at infinity (`w == 0`) map to non-finite
    /// coordinates.
    #[must_use]
    pub fn map_point(self, p: Point) -> Point {
        let c = self.cols;
        let x = c[0][0] * p.x + c[1][0] * p.y + c[2][0];
        let y = c[0][1] * p.x + c[1][1] * p.y + c[2][1];
        let w = c[0][2] * p.x + c[1][2] * p.y + c[2][2];
        Point::new(x / w, y / w)
    }

    /// Maps every control point of `path`.
    ///
    /// Affine matrices map curves exactly. With perspective, control points
    /// are projected individually, which matches how native path transforms
    /// behave.
    #[must_use]
    pub fn transform_path(&self, path: &BezPath) -> BezPath {
        if let Some(affine) = self.to_affine() {
            let mut out = path.clone();
            out.apply_affine(affine);
            return out;
        }
        path.elements()
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(p) => PathEl::MoveTo(self.map_point(p)),
                PathEl::LineTo(p) => PathEl::LineTo(self.map_point(p)),
                PathEl::QuadTo(p1, p2) => PathEl::QuadTo(self.map_point(p1), self.map_point(p2)),
                PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(
                    self.map_point(p1),
                    self.map_point(p2),
                    self.map_point(p3),
                ),
                PathEl::ClosePath => PathEl::ClosePath,
            })
            .collect()
    }

    /// Returns the inverse, or `None` if the matrix is singular or
    /// non-finite.
    #[must_use]
    pub fn inverse(self) -> Option<Self> {
        let [a, b, c, d, e, f, g, h, i] = self.to_row_major();
        let co_a = e * i - f * h;
        let co_b = f * g - d * i;
        let co_c = d * h - e * g;
        let det = a * co_a + b * co_b + c * co_c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self::from_row_major([
            co_a * inv,
            (c * h - b * i) * inv,
            (b * f - c * e) * inv,
            co_b * inv,
            (a * i - c * g) * inv,
            (c * d - a * f) * inv,
            co_c * inv,
            (b * g - a * h) * inv,
            (a * e - b * d) * inv,
        ]))
    }

    /// Is this matrix [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        let mut j = 0;
        while j < 3 {
            let mut i = 0;
            while i < 3 {
                if !self.cols[j][i].is_finite() {
                    return false;
                }
                i += 1;
            }
            j += 1;
        }
        true
    }

    /// Is any entry of this matrix [NaN]?
    ///
    /// [NaN]: f64::is_nan
    #[inline]
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        let mut j = 0;
        while j < 3 {
            let mut i = 0;
            while i < 3 {
                if self.cols[j][i].is_nan() {
                    return true;
                }
                i += 1;
            }
            j += 1;
        }
        false
    }
}

impl Default for Matrix3 {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Affine> for Matrix3 {
    #[inline]
    fn from(affine: Affine) -> Self {
        Self::from_affine(affine)
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 3]; 3];
        let mut j = 0;
        while j < 3 {
            let mut i = 0;
            while i < 3 {
                out[j][i] = a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2];
                i += 1;
            }
            j += 1;
        }
        Self { cols: out }
    }
}
