// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Re-expressing a resolved composite against the native view's own origin.
//!
//! The compositor works in physical pixels and computes the final transform
//! against the view's absolute screen position. The host has already placed
//! the view's frame at `(left, top)` and lets it draw in logical pixels, so
//! two corrections are needed before drawing:
//!
//! - **Density**: post-scale the transform by `1 / density_scale`.
//! - **Offset**: post-translate the transform by `(-left, -top)` and offset
//!   every clip path by the same amount, so the frame's position is not
//!   applied twice.
//!
//! Both corrections read one [`ViewPlacement`], so they always agree on the
//! origin.

use kurbo::{Affine, BezPath};

use crate::placement::ViewPlacement;
use crate::resolve::ResolvedComposite;
use crate::transform::Matrix3;

/// Draw-ready geometry for one paint pass.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrectedComposite {
    /// Transform applied to child content only.
    pub draw_transform: Matrix3,
    /// Clips applied to the parent canvas, in stack order.
    pub draw_clips: Vec<BezPath>,
}

/// Corrects `resolved` for density and for the view's placement.
#[must_use]
pub fn correct(resolved: &ResolvedComposite, placement: &ViewPlacement) -> CorrectedComposite {
    let origin = placement.origin();
    let inv_density = placement.density_scale().recip();

    let draw_transform = Matrix3::from_translation(-origin.x, -origin.y)
        * Matrix3::from_scale(inv_density, inv_density)
        * resolved.final_transform;

    let offset = Affine::translate(-origin);
    let draw_clips = resolved
        .clip_paths
        .iter()
        .map(|path| {
            let mut path = path.clone();
            path.apply_affine(offset);
            path
        })
        .collect();

    CorrectedComposite {
        draw_transform,
        draw_clips,
    }
}
