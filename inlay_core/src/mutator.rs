// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestor mutation operations and the per-frame stack that carries them.
//!
//! The compositor walks from the root of its layer tree down to the embedded
//! view and records every clip, transform and opacity it passes through. The
//! result is a [`MutatorStack`]: built once per frame, ordered root-to-leaf,
//! and never edited afterwards. A new frame always brings a new stack.

use kurbo::{BezPath, PathEl, Rect, RoundedRect, Vec2};

use crate::transform::Matrix3;

/// One effect imposed on the embedded view by an ancestor layer.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationOp {
    /// Multiplies the effective opacity by a factor in `[0, 1]`.
    Opacity(f64),
    /// Concatenates a 3×3 affine or perspective transform.
    Transform(Matrix3),
    /// Intersects with an axis-aligned rectangle (ancestor-local space).
    ClipRect(Rect),
    /// Intersects with a rounded rectangle (ancestor-local space).
    ClipRRect(RoundedRect),
    /// Intersects with an arbitrary path (ancestor-local space).
    ClipPath(BezPath),
}

impl MutationOp {
    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Opacity(_) => "opacity",
            Self::Transform(_) => "transform",
            Self::ClipRect(_) => "clip_rect",
            Self::ClipRRect(_) => "clip_rrect",
            Self::ClipPath(_) => "clip_path",
        }
    }

    /// Returns `true` for clip variants.
    #[must_use]
    pub const fn is_clip(&self) -> bool {
        matches!(
            self,
            Self::ClipRect(_) | Self::ClipRRect(_) | Self::ClipPath(_)
        )
    }

    /// Returns `true` if every numeric field is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Opacity(factor) => factor.is_finite(),
            Self::Transform(matrix) => matrix.is_finite(),
            Self::ClipRect(rect) => rect.is_finite(),
            Self::ClipRRect(rrect) => {
                let radii = rrect.radii();
                rrect.rect().is_finite()
                    && radii.top_left.is_finite()
                    && radii.top_right.is_finite()
                    && radii.bottom_right.is_finite()
                    && radii.bottom_left.is_finite()
            }
            Self::ClipPath(path) => path_is_finite(path),
        }
    }
}

fn path_is_finite(path: &BezPath) -> bool {
    path.elements().iter().all(|el| match *el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => p.is_finite(),
        PathEl::QuadTo(p1, p2) => p1.is_finite() && p2.is_finite(),
        PathEl::CurveTo(p1, p2, p3) => p1.is_finite() && p2.is_finite() && p3.is_finite(),
        PathEl::ClosePath => true,
    })
}

/// Ordered ancestor mutations for one frame, plus the frame's overscroll.
///
/// Ops are ordered root-to-leaf: the outermost ancestor comes first. The
/// overscroll delta is signed; its magnitude is the fraction of the viewport
/// being stretched by a scrollable ancestor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutatorStack {
    ops: Vec<MutationOp>,
    overscroll: Vec2,
}

impl MutatorStack {
    /// Creates a stack from root-to-leaf ops and an overscroll delta.
    #[must_use]
    pub fn new(ops: impl IntoIterator<Item = MutationOp>, overscroll: Vec2) -> Self {
        Self {
            ops: ops.into_iter().collect(),
            overscroll,
        }
    }

    /// Starts building a stack one op at a time.
    #[must_use]
    pub fn builder() -> MutatorStackBuilder {
        MutatorStackBuilder::default()
    }

    /// The ops, root-to-leaf.
    #[must_use]
    pub fn ops(&self) -> &[MutationOp] {
        &self.ops
    }

    /// Final overscroll delta along each axis.
    #[must_use]
    pub const fn overscroll(&self) -> Vec2 {
        self.overscroll
    }

    /// Number of ops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if the stack holds no ops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Incrementally assembles a [`MutatorStack`] in root-to-leaf order.
#[derive(Clone, Debug, Default)]
pub struct MutatorStackBuilder {
    ops: Vec<MutationOp>,
    overscroll: Vec2,
}

impl MutatorStackBuilder {
    /// Appends an arbitrary op.
    #[must_use]
    pub fn push(mut self, op: MutationOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Appends an opacity factor.
    #[must_use]
    pub fn push_opacity(self, factor: f64) -> Self {
        self.push(MutationOp::Opacity(factor))
    }

    /// Appends a transform.
    #[must_use]
    pub fn push_transform(self, matrix: Matrix3) -> Self {
        self.push(MutationOp::Transform(matrix))
    }

    /// Appends a transform given as nine row-major values.
    #[must_use]
    pub fn push_transform_values(self, values: [f64; 9]) -> Self {
        self.push_transform(Matrix3::from_row_major(values))
    }

    /// Appends a rectangular clip.
    #[must_use]
    pub fn push_clip_rect(self, rect: Rect) -> Self {
        self.push(MutationOp::ClipRect(rect))
    }

    /// Appends a rounded-rectangle clip.
    #[must_use]
    pub fn push_clip_rrect(self, rrect: RoundedRect) -> Self {
        self.push(MutationOp::ClipRRect(rrect))
    }

    /// Appends a path clip.
    #[must_use]
    pub fn push_clip_path(self, path: BezPath) -> Self {
        self.push(MutationOp::ClipPath(path))
    }

    /// Sets the frame's overscroll delta.
    #[must_use]
    pub fn overscroll(mut self, x: f64, y: f64) -> Self {
        self.overscroll = Vec2::new(x, y);
        self
    }

    /// Finishes the stack.
    #[must_use]
    pub fn build(self) -> MutatorStack {
        MutatorStack {
            ops: self.ops,
            overscroll: self.overscroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn builder_preserves_order() {
        let stack = MutatorStack::builder()
            .push_clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0))
            .push_transform(Matrix3::from_translation(1.0, 2.0))
            .push_opacity(0.5)
            .build();
        let names: Vec<_> = stack.ops().iter().map(MutationOp::name).collect();
        assert_eq!(names, ["clip_rect", "transform", "opacity"]);
        assert_eq!(stack.len(), 3);
        assert!(!stack.is_empty());
    }

    #[test]
    fn builder_matches_new() {
        let built = MutatorStack::builder()
            .push_opacity(0.25)
            .overscroll(0.1, -0.2)
            .build();
        let direct = MutatorStack::new([MutationOp::Opacity(0.25)], Vec2::new(0.1, -0.2));
        assert_eq!(built, direct);
        assert_eq!(built.overscroll(), Vec2::new(0.1, -0.2));
    }

    #[test]
    fn default_stack_is_empty() {
        let stack = MutatorStack::default();
        assert!(stack.is_empty());
        assert_eq!(stack.overscroll(), Vec2::ZERO);
    }

    #[test]
    fn row_major_transform_values() {
        let stack = MutatorStack::builder()
            .push_transform_values([1.0, 0.0, 5.0, 0.0, 1.0, 6.0, 0.0, 0.0, 1.0])
            .build();
        assert_eq!(
            stack.ops()[0],
            MutationOp::Transform(Matrix3::from_translation(5.0, 6.0))
        );
    }

    #[test]
    fn finiteness_checks_every_variant() {
        assert!(MutationOp::Opacity(0.5).is_finite());
        assert!(!MutationOp::Opacity(f64::NAN).is_finite());

        let mut m = Matrix3::IDENTITY;
        m.cols[1][1] = f64::INFINITY;
        assert!(!MutationOp::Transform(m).is_finite());

        assert!(!MutationOp::ClipRect(Rect::new(0.0, 0.0, f64::NAN, 1.0)).is_finite());

        let rrect = RoundedRect::new(0.0, 0.0, f64::INFINITY, 10.0, 2.0);
        assert!(!MutationOp::ClipRRect(rrect).is_finite());

        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(f64::NEG_INFINITY, 4.0));
        assert!(!MutationOp::ClipPath(path).is_finite());
    }

    #[test]
    fn clip_classification() {
        assert!(MutationOp::ClipPath(BezPath::new()).is_clip());
        assert!(!MutationOp::Opacity(1.0).is_clip());
    }
}
