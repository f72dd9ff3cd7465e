// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`NativeView`] stand-in that logs every update.

use inlay_core::placement::ViewFrame;
use inlay_core::stretch::StretchEffect;
use inlay_core::view::{AccessibilityImportance, NativeView};
use serde::Serialize;

/// Stretch parameters as recorded by [`RecordingView`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StretchRecord {
    /// View width and height.
    pub size: [f64; 2],
    /// Signed overscroll along x and y.
    pub overscroll: [f64; 2],
    /// Intensity scale.
    pub max_stretch_intensity: f64,
    /// Interpolation strength.
    pub interpolation_strength: f64,
}

impl From<&StretchEffect> for StretchRecord {
    fn from(effect: &StretchEffect) -> Self {
        Self {
            size: [effect.size.width, effect.size.height],
            overscroll: [effect.overscroll.x, effect.overscroll.y],
            max_stretch_intensity: effect.max_stretch_intensity,
            interpolation_strength: effect.interpolation_strength,
        }
    }
}

/// One recorded view update.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ViewCommand {
    /// `set_frame`.
    SetFrame {
        /// Left edge.
        left: i32,
        /// Top edge.
        top: i32,
        /// Width.
        width: u32,
        /// Height.
        height: u32,
    },
    /// `set_will_not_draw`.
    SetWillNotDraw {
        /// New flag value.
        will_not_draw: bool,
    },
    /// `promote_to_hardware_layer`.
    PromoteToHardwareLayer {
        /// Layer alpha.
        alpha: u8,
    },
    /// `set_render_effect`.
    SetRenderEffect {
        /// The effect, or `None` when cleared.
        effect: Option<StretchRecord>,
    },
}

/// A [`NativeView`] that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingView {
    commands: Vec<ViewCommand>,
    importance: Option<AccessibilityImportance>,
}

impl RecordingView {
    /// Creates a view with no embedded accessibility root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accessibility importance reported for the embedded content.
    #[must_use]
    pub fn with_importance(mut self, importance: AccessibilityImportance) -> Self {
        self.importance = Some(importance);
        self
    }

    /// Recorded updates, oldest first.
    #[must_use]
    pub fn commands(&self) -> &[ViewCommand] {
        &self.commands
    }

    /// Serializes the recording as compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.commands)
    }
}

impl NativeView for RecordingView {
    fn set_frame(&mut self, frame: ViewFrame) {
        self.commands.push(ViewCommand::SetFrame {
            left: frame.left,
            top: frame.top,
            width: frame.width,
            height: frame.height,
        });
    }

    fn set_will_not_draw(&mut self, will_not_draw: bool) {
        self.commands.push(ViewCommand::SetWillNotDraw { will_not_draw });
    }

    fn promote_to_hardware_layer(&mut self, alpha: u8) {
        self.commands.push(ViewCommand::PromoteToHardwareLayer { alpha });
    }

    fn set_render_effect(&mut self, effect: Option<&StretchEffect>) {
        self.commands.push(ViewCommand::SetRenderEffect {
            effect: effect.map(StretchRecord::from),
        });
    }

    fn embedded_importance(&self) -> Option<AccessibilityImportance> {
        self.importance
    }
}
