// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Remapping device touches into compositor coordinates.
//!
//! Touch coordinates arrive relative to the native view. The compositor wants
//! them relative to its own surface, so every pointer is offset by the view's
//! origin (the *anchor*). The subtlety is a view that moves while a finger is
//! down, for example inside a scrolling list: each move event must be
//! anchored on the origin the view had when that event fired, not the origin
//! of a placement update that landed in between.
//!
//! ```text
//!            Down                      Up / Cancel / other
//!  NoGesture ─────► Tracking ─────────────────────► NoGesture
//!                    │    ▲
//!                    └────┘ Move: anchor = prev, then prev = current
//! ```

use kurbo::Vec2;

use crate::placement::ViewPlacement;

/// Action code of a touch event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionAction {
    /// First pointer went down.
    Down,
    /// Last pointer went up.
    Up,
    /// One or more pointers moved.
    Move,
    /// The gesture was aborted.
    Cancel,
    /// A secondary pointer went down.
    PointerDown {
        /// Index of the pointer that changed.
        index: u8,
    },
    /// A secondary pointer went up.
    PointerUp {
        /// Index of the pointer that changed.
        index: u8,
    },
    /// Any other action code, kept verbatim.
    Other(i32),
}

impl MotionAction {
    const DOWN: u8 = 0;
    const UP: u8 = 1;
    const MOVE: u8 = 2;
    const CANCEL: u8 = 3;
    const POINTER_DOWN: u8 = 5;
    const POINTER_UP: u8 = 6;

    /// Decodes a raw action code. The low byte is the action, the next byte
    /// the pointer index of secondary pointer events.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        let [kind, index, ..] = raw.to_le_bytes();
        match kind {
            Self::DOWN => Self::Down,
            Self::UP => Self::Up,
            Self::MOVE => Self::Move,
            Self::CANCEL => Self::Cancel,
            Self::POINTER_DOWN => Self::PointerDown { index },
            Self::POINTER_UP => Self::PointerUp { index },
            _ => Self::Other(raw),
        }
    }

    /// Encodes the action back into a raw action code.
    #[must_use]
    pub const fn to_raw(self) -> i32 {
        match self {
            Self::Down => Self::DOWN as i32,
            Self::Up => Self::UP as i32,
            Self::Move => Self::MOVE as i32,
            Self::Cancel => Self::CANCEL as i32,
            Self::PointerDown { index } => ((index as i32) << 8) | Self::POINTER_DOWN as i32,
            Self::PointerUp { index } => ((index as i32) << 8) | Self::POINTER_UP as i32,
            Self::Other(raw) => raw,
        }
    }
}

/// Kind of tool producing a pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToolType {
    /// Unknown tool.
    #[default]
    Unknown,
    /// A finger.
    Finger,
    /// A stylus tip.
    Stylus,
    /// A mouse or trackpad.
    Mouse,
    /// A stylus eraser.
    Eraser,
    /// Any other tool code, kept verbatim.
    Other(i32),
}

impl ToolType {
    /// Decodes a raw tool type code.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Unknown,
            1 => Self::Finger,
            2 => Self::Stylus,
            3 => Self::Mouse,
            4 => Self::Eraser,
            other => Self::Other(other),
        }
    }
}

/// Identity of one pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointerProperties {
    /// Stable pointer id for the duration of the gesture.
    pub id: i32,
    /// Tool that produced the pointer.
    pub tool_type: ToolType,
}

/// Sampled state of one pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerCoords {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Normalized pressure.
    pub pressure: f64,
    /// Normalized contact size.
    pub size: f64,
    /// Major axis of the touch ellipse.
    pub touch_major: f64,
    /// Minor axis of the touch ellipse.
    pub touch_minor: f64,
    /// Major axis of the tool ellipse.
    pub tool_major: f64,
    /// Minor axis of the tool ellipse.
    pub tool_minor: f64,
    /// Orientation in radians.
    pub orientation: f64,
}

/// One pointer of a touch event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    /// Identity.
    pub properties: PointerProperties,
    /// Coordinates.
    pub coords: PointerCoords,
}

/// A device touch event, as delivered to the native view.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Action code.
    pub action: MotionAction,
    /// Every pointer currently down.
    pub pointers: Vec<Pointer>,
    /// Modifier key state.
    pub meta_state: i32,
    /// Mouse and stylus button state.
    pub button_state: i32,
    /// Coordinate precision along each axis.
    pub precision: Vec2,
    /// Input device id.
    pub device_id: i32,
    /// Screen edges touched.
    pub edge_flags: i32,
    /// Input source class.
    pub source: i32,
    /// Event flags.
    pub flags: i32,
    /// Time the gesture started, in milliseconds.
    pub down_time: u64,
    /// Time of this event, in milliseconds.
    pub event_time: u64,
    /// Identifier shared with the compositor's copy of the event.
    pub motion_event_id: i64,
}

impl TouchEvent {
    /// Creates an event with the given action and pointers and zeroed
    /// metadata.
    #[must_use]
    pub fn new(action: MotionAction, pointers: impl IntoIterator<Item = Pointer>) -> Self {
        Self {
            action,
            pointers: pointers.into_iter().collect(),
            meta_state: 0,
            button_state: 0,
            precision: Vec2::new(1.0, 1.0),
            device_id: 0,
            edge_flags: 0,
            source: 0,
            flags: 0,
            down_time: 0,
            event_time: 0,
            motion_event_id: 0,
        }
    }

    /// Number of pointers.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }
}

/// Whether a gesture is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// No pointer is down.
    #[default]
    NoGesture,
    /// A gesture started with a down event and has not ended yet.
    Tracking,
}

/// A touch event translated into compositor coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct RemappedTouch {
    /// The event with every pointer offset by `anchor`.
    pub event: TouchEvent,
    /// The origin the event was anchored on.
    pub anchor: Vec2,
}

/// Receives remapped touches on behalf of the compositor.
pub trait TouchProcessor {
    /// Handles a touch. Every forwarded touch counts as consumed.
    fn on_touch_event(&mut self, touch: &RemappedTouch);
}

/// Gesture-aware touch remapping.
#[derive(Clone, Copy, Debug, Default)]
pub struct TouchRemapper {
    state: GestureState,
}

impl TouchRemapper {
    /// Creates a remapper outside of any gesture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture state.
    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    /// Returns `true` while a gesture is being tracked.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        matches!(self.state, GestureState::Tracking)
    }

    /// Advances the gesture state for `action` and returns the anchor the
    /// event must be offset by.
    pub fn anchor_for(&mut self, action: MotionAction, placement: &mut ViewPlacement) -> Vec2 {
        match action {
            MotionAction::Down => {
                placement.snapshot_previous();
                self.state = GestureState::Tracking;
                placement.origin()
            }
            MotionAction::Move => {
                if self.is_tracking() {
                    let anchor = placement.previous_origin();
                    placement.snapshot_previous();
                    anchor
                } else {
                    placement.origin()
                }
            }
            MotionAction::PointerDown { .. } | MotionAction::PointerUp { .. } => {
                placement.origin()
            }
            MotionAction::Up | MotionAction::Cancel | MotionAction::Other(_) => {
                self.state = GestureState::NoGesture;
                placement.snapshot_previous();
                placement.origin()
            }
        }
    }

    /// Remaps `event`, or returns `None` for an event without pointers.
    ///
    /// Only pointer `x`/`y` change; every other field is forwarded as is.
    pub fn remap(
        &mut self,
        event: &TouchEvent,
        placement: &mut ViewPlacement,
    ) -> Option<RemappedTouch> {
        if event.pointers.is_empty() {
            return None;
        }
        let anchor = self.anchor_for(event.action, placement);
        let mut event = event.clone();
        for pointer in &mut event.pointers {
            pointer.coords.x += anchor.x;
            pointer.coords.y += anchor.y;
        }
        Some(RemappedTouch { event, anchor })
    }
}
