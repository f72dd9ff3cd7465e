// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overscroll stretch post-process.
//!
//! When a scrollable ancestor is overscrolled, the embedded view is stretched
//! along the overscroll axis by a pixel shader the host runs. This module
//! owns its parameters ([`StretchEffect::uniforms`]) and a CPU reference of
//! the sampling function ([`StretchEffect::sample_position`]) for hosts that
//! post-process in software.
//!
//! The effect is one-dimensional: a nonzero vertical overscroll takes
//! precedence and the horizontal delta is then ignored.

use kurbo::{Point, Size, Vec2};

/// Tuning for the stretch effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StretchConfig {
    /// Scales the overscroll delta before it is applied.
    pub max_stretch_intensity: f64,
    /// How strongly the stretch varies with distance from the anchored edge,
    /// in `[0, 1]`.
    pub interpolation_strength: f64,
}

impl Default for StretchConfig {
    fn default() -> Self {
        Self {
            max_stretch_intensity: 1.0,
            interpolation_strength: 0.7,
        }
    }
}

/// Value of one shader uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    /// A scalar.
    Float(f32),
    /// A two-component vector.
    Float2([f32; 2]),
}

/// A named shader uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniform {
    /// Uniform name as declared by the shader.
    pub name: &'static str,
    /// Value to bind.
    pub value: UniformValue,
}

/// A configured stretch effect for one placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StretchEffect {
    /// Size of the view being stretched.
    pub size: Size,
    /// See [`StretchConfig::max_stretch_intensity`].
    pub max_stretch_intensity: f64,
    /// Signed overscroll delta along each axis.
    pub overscroll: Vec2,
    /// See [`StretchConfig::interpolation_strength`].
    pub interpolation_strength: f64,
}

impl StretchEffect {
    /// Configures an effect for `overscroll`, or returns `None` when neither
    /// axis is overscrolled.
    #[must_use]
    pub fn for_overscroll(size: Size, overscroll: Vec2, config: &StretchConfig) -> Option<Self> {
        if overscroll.x.abs() > 0.0 || overscroll.y.abs() > 0.0 {
            Some(Self {
                size,
                max_stretch_intensity: config.max_stretch_intensity,
                overscroll,
                interpolation_strength: config.interpolation_strength,
            })
        } else {
            None
        }
    }

    /// Effective stretch intensity along each axis.
    #[must_use]
    pub fn intensity(&self) -> Vec2 {
        self.overscroll * self.max_stretch_intensity
    }

    /// Returns `true` if the stretch runs along the y axis.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.overscroll.y != 0.0
    }

    /// Uniform bindings for the host shader.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "shader uniforms are single precision"
    )]
    pub fn uniforms(&self) -> [Uniform; 5] {
        [
            Uniform {
                name: "u_size",
                value: UniformValue::Float2([self.size.width as f32, self.size.height as f32]),
            },
            Uniform {
                name: "u_max_stretch_intensity",
                value: UniformValue::Float(self.max_stretch_intensity as f32),
            },
            Uniform {
                name: "u_overscroll_x",
                value: UniformValue::Float(self.overscroll.x as f32),
            },
            Uniform {
                name: "u_overscroll_y",
                value: UniformValue::Float(self.overscroll.y as f32),
            },
            Uniform {
                name: "u_interpolation_strength",
                value: UniformValue::Float(self.interpolation_strength as f32),
            },
        ]
    }

    /// Maps an output pixel position to the source position it samples.
    ///
    /// Positive overscroll anchors the leading edge (0), negative overscroll
    /// anchors the trailing edge.
    #[must_use]
    pub fn sample_position(&self, p: Point) -> Point {
        let intensity = self.intensity();
        if self.is_vertical() {
            Point::new(p.x, self.sample_axis(p.y, self.size.height, intensity.y))
        } else {
            Point::new(self.sample_axis(p.x, self.size.width, intensity.x), p.y)
        }
    }

    fn sample_axis(&self, pos: f64, extent: f64, overscroll: f64) -> f64 {
        if extent <= 0.0 {
            return pos;
        }
        let norm = pos / extent;
        let stretched = 1.0 / (1.0 + overscroll.abs());
        let diff = stretched - 1.0;
        let variation = |offset: f64| 1.0 + (offset - 1.0) * self.interpolation_strength;

        let out = if overscroll > 0.0 {
            if norm <= 1.0 {
                let offset = 1.0 - norm;
                stretched - offset / (1.0 + overscroll * variation(offset))
            } else {
                diff + norm
            }
        } else if overscroll < 0.0 {
            if norm >= 0.0 {
                let offset = norm;
                1.0 - (stretched - offset / (1.0 - overscroll * variation(offset)))
            } else {
                -diff + norm
            }
        } else {
            norm
        };
        out * extent
    }
}
