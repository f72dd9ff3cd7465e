// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instrumentation hooks for placement, paint and touch.
//!
//! [`TraceSink`] has one method per event, each defaulting to a no-op.
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. With the `trace` feature
//! **off**, every `Tracer` method compiles to nothing; with it **on**, each
//! performs a single `Option` branch before dispatching.
//!
//! Diagnostics about malformed input go through `tracing` instead; sinks see
//! only the normal flow of events.

use kurbo::Vec2;

use crate::apply::PaintPhase;
use crate::placement::ViewFrame;
use crate::touch::{GestureState, MotionAction};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a placement update has been applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementEvent {
    /// Monotonic placement counter, starting at 1.
    pub placement_index: u64,
    /// Frame applied to the native view.
    pub frame: ViewFrame,
    /// Overscroll delta of the stack.
    pub overscroll: Vec2,
    /// Whether a stretch effect is now configured.
    pub stretch_configured: bool,
    /// Ops replaced by identity during resolution.
    pub substituted_ops: usize,
}

/// Emitted each time the paint pass enters a new phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintPhaseEvent {
    /// Monotonic paint counter, starting at 1.
    pub paint_index: u64,
    /// Phase just entered.
    pub phase: PaintPhase,
}

/// Emitted after a touch has been remapped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchRemapEvent {
    /// Action of the remapped event.
    pub action: MotionAction,
    /// Origin the event was anchored on.
    pub anchor: Vec2,
    /// Gesture state after the event.
    pub gesture: GestureState,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives adapter trace events.
///
/// All methods have default no-op implementations.
pub trait TraceSink {
    /// Called after a placement update.
    fn on_placement(&mut self, e: &PlacementEvent) {
        _ = e;
    }

    /// Called on each paint phase transition.
    fn on_paint_phase(&mut self, e: &PaintPhaseEvent) {
        _ = e;
    }

    /// Called after a touch has been remapped.
    fn on_touch_remap(&mut self, e: &TouchRemapEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PlacementEvent`].
    #[inline]
    pub fn placement(&mut self, e: &PlacementEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_placement(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PaintPhaseEvent`].
    #[inline]
    pub fn paint_phase(&mut self, e: &PaintPhaseEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_paint_phase(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TouchRemapEvent`].
    #[inline]
    pub fn touch_remap(&mut self, e: &TouchRemapEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_touch_remap(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Phases(Vec<PaintPhase>);

    impl TraceSink for Phases {
        fn on_paint_phase(&mut self, e: &PaintPhaseEvent) {
            self.0.push(e.phase);
        }
    }

    #[test]
    fn noop_sink_accepts_everything() {
        let mut sink = NoopSink;
        let mut tracer = Tracer::new(&mut sink);
        tracer.touch_remap(&TouchRemapEvent {
            action: MotionAction::Down,
            anchor: Vec2::ZERO,
            gesture: GestureState::Tracking,
        });
        tracer.placement(&PlacementEvent {
            placement_index: 1,
            frame: ViewFrame::default(),
            overscroll: Vec2::ZERO,
            stretch_configured: false,
            substituted_ops: 0,
        });
    }

    #[test]
    fn none_tracer_is_silent() {
        let mut tracer = Tracer::none();
        tracer.paint_phase(&PaintPhaseEvent {
            paint_index: 1,
            phase: PaintPhase::ClippingParent,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_when_enabled() {
        let mut sink = Phases::default();
        {
            let mut tracer = Tracer::new(&mut sink);
            tracer.paint_phase(&PaintPhaseEvent {
                paint_index: 1,
                phase: PaintPhase::Composited,
            });
        }
        assert_eq!(sink.0, [PaintPhase::Composited]);
    }

    #[cfg(not(feature = "trace"))]
    #[test]
    fn tracer_compiles_away_when_disabled() {
        let mut sink = Phases::default();
        {
            let mut tracer = Tracer::new(&mut sink);
            tracer.paint_phase(&PaintPhaseEvent {
                paint_index: 1,
                phase: PaintPhase::Composited,
            });
        }
        assert!(sink.0.is_empty());
    }
}
