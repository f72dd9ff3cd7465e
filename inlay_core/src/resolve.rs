// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folding a [`MutatorStack`] into a single composite.
//!
//! Resolution walks the stack root-to-leaf once:
//!
//! 1. **Transform**: `final = final * op`, the same parent-times-child
//!    composition the compositor uses for nested layers.
//! 2. **Opacity**: `opacity = opacity * op`, clamped to `[0, 1]` at the end.
//! 3. **Clip**: the clip shape is converted to a path and mapped through the
//!    transform accumulated so far, so every clip ends up in compositor space.
//!
//! Ops with non-finite fields are a contract violation by the compositor.
//! They are replaced by identity (a no-op) and reported with
//! `tracing::warn!`; resolution never fails on the paint path. The same
//! applies to finite ops whose result is not: a transform product that
//! overflows, or a clip mapped across a perspective vanishing line. A NaN
//! opacity product resolves to fully transparent.

use kurbo::{BezPath, Shape as _, Vec2};
use tracing::warn;

use crate::mutator::{MutationOp, MutatorStack};
use crate::transform::Matrix3;

/// Flattening tolerance used when converting rounded rectangles to paths.
pub const CLIP_TOLERANCE: f64 = 0.1;

/// The composite effect of every ancestor mutation for one frame.
///
/// Clip paths are in compositor space (physical pixels, before any
/// correction for the native view's placement) and keep stack order.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedComposite {
    /// Ordered product of all transform ops.
    pub final_transform: Matrix3,
    /// One path per clip op, in stack order.
    pub clip_paths: Vec<BezPath>,
    /// Product of all opacity ops, in `[0, 1]`.
    pub final_opacity: f64,
    /// Overscroll delta carried over from the stack.
    pub overscroll: Vec2,
    /// Number of ops replaced by identity because they were not finite.
    pub substituted_ops: usize,
}

impl Default for ResolvedComposite {
    fn default() -> Self {
        Self {
            final_transform: Matrix3::IDENTITY,
            clip_paths: Vec::new(),
            final_opacity: 1.0,
            overscroll: Vec2::ZERO,
            substituted_ops: 0,
        }
    }
}

impl ResolvedComposite {
    /// Returns `true` if a scrollable ancestor is overscrolled on either axis.
    #[must_use]
    pub fn has_overscroll(&self) -> bool {
        self.overscroll.x.abs() > 0.0 || self.overscroll.y.abs() > 0.0
    }
}

/// Resolves `stack` into a [`ResolvedComposite`].
///
/// Pure: the result depends only on `stack`. An empty stack resolves to the
/// identity transform, no clips, and full opacity.
#[must_use]
pub fn resolve(stack: &MutatorStack) -> ResolvedComposite {
    let mut out = ResolvedComposite::default();
    let mut opacity = 1.0_f64;

    for (index, op) in stack.ops().iter().enumerate() {
        if !op.is_finite() {
            warn!(index, kind = op.name(), "non-finite mutation op replaced with identity");
            out.substituted_ops += 1;
            continue;
        }
        let applied = match op {
            MutationOp::Opacity(factor) => {
                opacity *= factor;
                true
            }
            MutationOp::Transform(matrix) => {
                let next = out.final_transform * *matrix;
                let finite = next.is_finite();
                if finite {
                    out.final_transform = next;
                }
                finite
            }
            MutationOp::ClipRect(rect) => push_clip(
                &mut out.clip_paths,
                &out.final_transform,
                &rect.to_path(CLIP_TOLERANCE),
            ),
            MutationOp::ClipRRect(rrect) => push_clip(
                &mut out.clip_paths,
                &out.final_transform,
                &rrect.to_path(CLIP_TOLERANCE),
            ),
            MutationOp::ClipPath(path) => {
                push_clip(&mut out.clip_paths, &out.final_transform, path)
            }
        };
        if !applied {
            warn!(
                index,
                kind = op.name(),
                "mutation op resolved to non-finite values, replaced with identity"
            );
            out.substituted_ops += 1;
        }
    }

    // Overflow followed by a zero factor leaves NaN behind.
    out.final_opacity = if opacity.is_nan() {
        warn!("opacity product is NaN, treated as transparent");
        0.0
    } else {
        opacity.clamp(0.0, 1.0)
    };

    let overscroll = stack.overscroll();
    if overscroll.is_finite() {
        out.overscroll = overscroll;
    } else {
        warn!(?overscroll, "non-finite overscroll ignored");
    }
    out
}

/// Maps `path` into compositor space and keeps it if every point is finite.
///
/// A perspective transform sends points on its vanishing line to infinity.
fn push_clip(clips: &mut Vec<BezPath>, transform: &Matrix3, path: &BezPath) -> bool {
    let mapped = transform.transform_path(path);
    let finite = mapped.is_finite();
    if finite {
        clips.push(mapped);
    }
    finite
}
