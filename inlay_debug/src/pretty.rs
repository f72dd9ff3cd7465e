// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use inlay_core::apply::PaintPhase;
use inlay_core::touch::{GestureState, MotionAction};
use inlay_core::trace::{PaintPhaseEvent, PlacementEvent, TouchRemapEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn phase_name(phase: PaintPhase) -> &'static str {
    match phase {
        PaintPhase::Idle => "idle",
        PaintPhase::ClippingParent => "clip",
        PaintPhase::TransformingChildren => "children",
        PaintPhase::Composited => "composited",
    }
}

fn action_name(action: MotionAction) -> String {
    match action {
        MotionAction::Down => "down".into(),
        MotionAction::Up => "up".into(),
        MotionAction::Move => "move".into(),
        MotionAction::Cancel => "cancel".into(),
        MotionAction::PointerDown { index } => format!("pointer_down[{index}]"),
        MotionAction::PointerUp { index } => format!("pointer_up[{index}]"),
        MotionAction::Other(raw) => format!("other({raw})"),
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_placement(&mut self, e: &PlacementEvent) {
        let stretch = if e.stretch_configured { "on" } else { "off" };
        let _ = writeln!(
            self.writer,
            "[placement] #{} frame=({}, {}) {}x{} overscroll=({}, {}) stretch={stretch} substituted={}",
            e.placement_index,
            e.frame.left,
            e.frame.top,
            e.frame.width,
            e.frame.height,
            e.overscroll.x,
            e.overscroll.y,
            e.substituted_ops,
        );
    }

    fn on_paint_phase(&mut self, e: &PaintPhaseEvent) {
        let _ = writeln!(
            self.writer,
            "[paint] #{} {}",
            e.paint_index,
            phase_name(e.phase),
        );
    }

    fn on_touch_remap(&mut self, e: &TouchRemapEvent) {
        let gesture = match e.gesture {
            GestureState::NoGesture => "idle",
            GestureState::Tracking => "tracking",
        };
        let _ = writeln!(
            self.writer,
            "[touch] {} anchor=({}, {}) gesture={gesture}",
            action_name(e.action),
            e.anchor.x,
            e.anchor.y,
        );
    }
}

#[cfg(test)]
mod tests {
    use inlay_core::adapter::{AdapterConfig, PlatformViewAdapter};
    use inlay_core::mutator::MutatorStack;
    use inlay_core::touch::{Pointer, RemappedTouch, TouchEvent, TouchProcessor};
    use inlay_core::trace::Tracer;

    use super::*;
    use crate::recording::RecordingCanvas;
    use crate::view::RecordingView;

    struct Accept;

    impl TouchProcessor for Accept {
        fn on_touch_event(&mut self, _: &RemappedTouch) {}
    }

    #[test]
    fn pretty_print_adapter_session() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        let mut adapter = PlatformViewAdapter::new(RecordingView::new(), AdapterConfig::new(2.0))
            .unwrap()
            .with_touch_processor(Accept);
        {
            let mut tracer = Tracer::new(&mut sink);
            adapter.update_placement_traced(
                MutatorStack::builder().overscroll(0.5, 0.0).build(),
                10,
                20,
                30,
                40,
                &mut tracer,
            );
            adapter
                .paint_traced(&mut RecordingCanvas::new(), |_| Ok(()), &mut tracer)
                .unwrap();
            adapter.handle_touch_traced(
                &TouchEvent::new(MotionAction::PointerDown { index: 1 }, [Pointer::default(); 2]),
                &mut tracer,
            );
        }
        let output = String::from_utf8(sink.into_writer()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "[placement] #1 frame=(10, 20) 30x40 overscroll=(0.5, 0) stretch=on substituted=0",
                "[paint] #1 clip",
                "[paint] #1 children",
                "[paint] #1 composited",
                "[touch] pointer_down[1] anchor=(10, 20) gesture=idle",
            ]
        );
    }
}
