// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where the native view currently sits, and where it sat when the current
//! gesture last sampled it.
//!
//! [`ViewPlacement`] is the only state the adapter keeps across calls. It is
//! written by placement updates and read by both the paint pass and touch
//! remapping, always in frame order on the UI thread.

use kurbo::{Size, Vec2};

use crate::error::{AdapterError, AdapterResult};

/// The frame the host assigns to the native view, in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ViewFrame {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl ViewFrame {
    /// Size of the frame.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Current and gesture-anchored origins of the native view.
///
/// `prev_left`/`prev_top` equal `left`/`top` except while a touch gesture is
/// being tracked, where they hold the origin sampled by the most recent touch
/// event of that gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewPlacement {
    left: i32,
    top: i32,
    prev_left: i32,
    prev_top: i32,
    density_scale: f64,
}

impl ViewPlacement {
    /// Creates a placement at the origin.
    ///
    /// `density_scale` is the host's logical-to-physical pixel ratio and is
    /// fixed for the lifetime of the placement.
    pub fn new(density_scale: f64) -> AdapterResult<Self> {
        if !density_scale.is_finite() || density_scale <= 0.0 {
            return Err(AdapterError::InvalidDensity(density_scale));
        }
        Ok(Self {
            left: 0,
            top: 0,
            prev_left: 0,
            prev_top: 0,
            density_scale,
        })
    }

    /// Returns this placement moved to `(left, top)`, outside of any gesture.
    #[must_use]
    pub const fn with_origin(mut self, left: i32, top: i32) -> Self {
        self.left = left;
        self.top = top;
        self.prev_left = left;
        self.prev_top = top;
        self
    }

    /// Current left edge.
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.left
    }

    /// Current top edge.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.top
    }

    /// Left edge sampled by the current gesture.
    #[must_use]
    pub const fn prev_left(&self) -> i32 {
        self.prev_left
    }

    /// Top edge sampled by the current gesture.
    #[must_use]
    pub const fn prev_top(&self) -> i32 {
        self.prev_top
    }

    /// Logical-to-physical pixel ratio.
    #[must_use]
    pub const fn density_scale(&self) -> f64 {
        self.density_scale
    }

    /// Current origin as a vector.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(f64::from(self.left), f64::from(self.top))
    }

    /// Gesture-sampled origin as a vector.
    #[must_use]
    pub fn previous_origin(&self) -> Vec2 {
        Vec2::new(f64::from(self.prev_left), f64::from(self.prev_top))
    }

    /// Moves the view. The gesture anchor follows unless a gesture is being
    /// tracked.
    pub(crate) fn move_to(&mut self, left: i32, top: i32, tracking: bool) {
        self.left = left;
        self.top = top;
        if !tracking {
            self.snapshot_previous();
        }
    }

    /// Records the current origin as the gesture anchor.
    pub(crate) fn snapshot_previous(&mut self) {
        self.prev_left = self.left;
        self.prev_top = self.top;
    }
}
