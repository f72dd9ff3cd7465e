// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-side native view the adapter drives.

use crate::placement::ViewFrame;
use crate::stretch::StretchEffect;

/// How the host's accessibility service should treat the embedded view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessibilityImportance {
    /// Let the host decide.
    #[default]
    Auto,
    /// The view is important for accessibility.
    Yes,
    /// The view is not important, but its descendants may be.
    No,
    /// Neither the view nor any descendant is important.
    NoHideDescendants,
}

/// Operations a host view exposes to the adapter.
///
/// Every method is called on the UI thread, in frame order.
pub trait NativeView {
    /// Positions and sizes the view within its host parent.
    fn set_frame(&mut self, frame: ViewFrame);

    /// Toggles the host's "skip drawing" optimization.
    fn set_will_not_draw(&mut self, will_not_draw: bool);

    /// Moves the view onto an offscreen hardware layer composited with
    /// `alpha`.
    fn promote_to_hardware_layer(&mut self, alpha: u8);

    /// Installs or clears the overscroll stretch post-process.
    fn set_render_effect(&mut self, effect: Option<&StretchEffect>);

    /// Accessibility importance of the embedded content, if it has a root.
    fn embedded_importance(&self) -> Option<AccessibilityImportance> {
        None
    }
}
