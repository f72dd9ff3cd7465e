// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paint pass.
//!
//! One paint walks a fixed sequence of phases:
//!
//! ```text
//!  Idle ─► ClippingParent ─► TransformingChildren ─► Composited
//! ```
//!
//! - **ClippingParent**: save the parent canvas and intersect every corrected
//!   clip, in stack order. Opacity is applied here by promoting the view to a
//!   hardware layer whenever the alpha changes.
//! - **TransformingChildren**: save again, concatenate the corrected
//!   transform, and let the children paint.
//! - **Composited**: both saves have been restored.
//!
//! Saves are held by [`SaveGuard`]s, so the canvas is restored in strict
//! nesting order even when the child painter returns an error or panics.

use crate::canvas::{Canvas, SaveGuard};
use crate::correct::correct;
use crate::error::{AdapterError, AdapterResult};
use crate::placement::ViewPlacement;
use crate::resolve::ResolvedComposite;
use crate::trace::{PaintPhaseEvent, Tracer};
use crate::view::NativeView;

/// Position of a paint pass in its phase sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaintPhase {
    /// No paint in progress.
    #[default]
    Idle,
    /// Clips are being applied to the parent canvas.
    ClippingParent,
    /// Children are painting under the corrected transform.
    TransformingChildren,
    /// The pass finished and the canvas has been restored.
    Composited,
}

impl PaintPhase {
    /// The phase that follows this one. `Composited` wraps back to `Idle`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Idle => Self::ClippingParent,
            Self::ClippingParent => Self::TransformingChildren,
            Self::TransformingChildren => Self::Composited,
            Self::Composited => Self::Idle,
        }
    }
}

/// Converts an opacity in `[0, 1]` to an 8-bit alpha, truncating.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "opacity is clamped to [0, 1] before scaling"
)]
pub fn opacity_to_alpha(opacity: f64) -> u8 {
    (255.0 * opacity.clamp(0.0, 1.0)) as u8
}

/// Paint-pass state carried between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderApplier {
    applied_alpha: u8,
    phase: PaintPhase,
    paint_count: u64,
}

impl Default for RenderApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderApplier {
    /// Creates an applier for a view that is fully opaque.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            applied_alpha: u8::MAX,
            phase: PaintPhase::Idle,
            paint_count: 0,
        }
    }

    /// Alpha most recently applied to the view.
    #[must_use]
    pub const fn applied_alpha(&self) -> u8 {
        self.applied_alpha
    }

    /// Phase reached by the most recent paint.
    #[must_use]
    pub const fn phase(&self) -> PaintPhase {
        self.phase
    }

    /// Number of paints started.
    #[must_use]
    pub const fn paint_count(&self) -> u64 {
        self.paint_count
    }

    fn advance(&mut self, tracer: &mut Tracer<'_>) {
        self.phase = self.phase.next();
        tracer.paint_phase(&PaintPhaseEvent {
            paint_index: self.paint_count,
            phase: self.phase,
        });
    }

    /// Paints `children` onto `canvas` under `composite`, corrected for
    /// `placement`.
    ///
    /// Returns [`AdapterError::NotPlaced`] without touching the canvas when no
    /// composite is known yet. A child error is returned after the canvas has
    /// been restored.
    pub fn paint<V, F>(
        &mut self,
        view: &mut V,
        canvas: &mut dyn Canvas,
        composite: Option<&ResolvedComposite>,
        placement: &ViewPlacement,
        children: F,
        tracer: &mut Tracer<'_>,
    ) -> AdapterResult<()>
    where
        V: NativeView + ?Sized,
        F: FnOnce(&mut dyn Canvas) -> anyhow::Result<()>,
    {
        let Some(composite) = composite else {
            return Err(AdapterError::NotPlaced);
        };
        let corrected = correct(composite, placement);
        self.paint_count += 1;
        self.phase = PaintPhase::Idle;

        {
            let mut parent = SaveGuard::new(canvas);
            self.advance(tracer);
            for clip in &corrected.draw_clips {
                parent.clip_path(clip);
            }

            let alpha = opacity_to_alpha(composite.final_opacity);
            if alpha != self.applied_alpha {
                view.promote_to_hardware_layer(alpha);
                self.applied_alpha = alpha;
            }

            let mut child = SaveGuard::new(&mut *parent);
            self.advance(tracer);
            child.concat(&corrected.draw_transform);
            children(&mut *child)?;
        }

        self.advance(tracer);
        Ok(())
    }
}
