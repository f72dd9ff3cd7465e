// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw command recording.
//!
//! [`RecordingCanvas`] implements [`Canvas`] and appends one [`DrawCommand`]
//! per call. The log serializes to JSON, one object per command tagged by
//! `"op"`, so two paint passes can be compared byte for byte.

use std::io::Write;

use inlay_core::canvas::Canvas;
use inlay_core::transform::Matrix3;
use kurbo::BezPath;
use serde::Serialize;

/// One recorded canvas call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// `save`, with the save count before the push.
    Save {
        /// Save count before the push.
        depth: usize,
    },
    /// `restore_to_count`.
    RestoreToCount {
        /// Target save count.
        count: usize,
    },
    /// `clip_path`, with the path in SVG notation.
    ClipPath {
        /// SVG path data.
        path: String,
    },
    /// `concat`, with the matrix in row-major order.
    Concat {
        /// Row-major matrix values.
        matrix: [f64; 9],
    },
    /// Content drawn by a child painter.
    Draw {
        /// Caller-supplied label.
        label: String,
    },
}

/// A [`Canvas`] that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    depth: usize,
}

impl RecordingCanvas {
    /// Creates an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands, oldest first.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Current save count.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` if every save has been restored.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.depth == 0
    }

    /// Records child content.
    pub fn draw(&mut self, label: impl Into<String>) {
        self.commands.push(DrawCommand::Draw {
            label: label.into(),
        });
    }

    /// Discards the recording.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }

    /// Serializes the recording as compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.commands)
    }

    /// Writes the recording as pretty-printed JSON.
    pub fn export(&self, writer: &mut dyn Write) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, &self.commands)
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) -> usize {
        let depth = self.depth;
        self.commands.push(DrawCommand::Save { depth });
        self.depth += 1;
        depth
    }

    fn restore_to_count(&mut self, count: usize) {
        self.commands.push(DrawCommand::RestoreToCount { count });
        self.depth = self.depth.min(count);
    }

    fn clip_path(&mut self, path: &BezPath) {
        self.commands.push(DrawCommand::ClipPath {
            path: path.to_svg(),
        });
    }

    fn concat(&mut self, matrix: &Matrix3) {
        self.commands.push(DrawCommand::Concat {
            matrix: matrix.to_row_major(),
        });
    }
}

#[cfg(test)]
mod tests {
    use inlay_core::adapter::{AdapterConfig, PlatformViewAdapter};
    use inlay_core::error::AdapterError;
    use inlay_core::mutator::MutatorStack;
    use kurbo::{Rect, RoundedRect, Shape as _};
    use serde_json::Value;

    use super::*;
    use crate::view::RecordingView;

    fn adapter(density: f64) -> PlatformViewAdapter<RecordingView> {
        PlatformViewAdapter::new(RecordingView::new(), AdapterConfig::new(density)).unwrap()
    }

    fn nested_stack() -> MutatorStack {
        MutatorStack::builder()
            .push_transform(Matrix3::from_rotation(0.4))
            .push_clip_rrect(RoundedRect::new(0.0, 0.0, 120.0, 80.0, 6.0))
            .push_opacity(0.75)
            .push_transform(Matrix3::from_translation(15.0, -5.0))
            .push_clip_rect(Rect::new(-10.0, -10.0, 50.0, 50.0))
            .build()
    }

    #[test]
    fn json_is_tagged_by_op() {
        let mut canvas = RecordingCanvas::new();
        let count = canvas.save();
        canvas.concat(&Matrix3::from_translation(1.0, 2.0));
        canvas.restore_to_count(count);
        let parsed: Vec<Value> = serde_json::from_str(&canvas.to_json().unwrap()).unwrap();
        assert_eq!(parsed[0]["op"], "save");
        assert_eq!(parsed[0]["depth"], 0);
        assert_eq!(parsed[1]["op"], "concat");
        assert_eq!(parsed[1]["matrix"][2], 1.0);
        assert_eq!(parsed[2]["op"], "restore_to_count");
        assert!(canvas.is_balanced());
    }

    #[test]
    fn repeated_paints_record_identical_json() {
        let mut adapter = adapter(2.625);
        adapter.update_placement(nested_stack(), 37, 81, 200, 120);

        let mut first = RecordingCanvas::new();
        adapter.paint(&mut first, |_| Ok(())).unwrap();
        let mut second = RecordingCanvas::new();
        adapter.paint(&mut second, |_| Ok(())).unwrap();

        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
        assert!(first.is_balanced());
    }

    #[test]
    fn translated_view_with_density() {
        let mut adapter = adapter(2.0);
        let stack = MutatorStack::builder()
            .push_clip_rect(Rect::new(0.0, 0.0, 200.0, 200.0))
            .push_transform(Matrix3::from_translation(20.0, 0.0))
            .build();
        adapter.update_placement(stack, 100, 50, 100, 100);

        let mut canvas = RecordingCanvas::new();
        adapter.paint(&mut canvas, |_| Ok(())).unwrap();
        assert_eq!(
            canvas.commands()[3],
            DrawCommand::Concat {
                matrix: [0.5, 0.0, -90.0, 0.0, 0.5, -50.0, 0.0, 0.0, 1.0],
            }
        );
        let DrawCommand::ClipPath { path } = &canvas.commands()[1] else {
            panic!("expected a clip, got {:?}", canvas.commands()[1]);
        };
        let clip = BezPath::from_svg(path).unwrap();
        assert_eq!(clip.bounding_box(), Rect::new(-100.0, -50.0, 100.0, 150.0));
    }

    #[test]
    fn child_painter_draws_inside_saves() {
        let mut adapter = adapter(1.0);
        adapter.update_placement(MutatorStack::default(), 0, 0, 10, 10);
        let mut canvas = RecordingCanvas::new();
        let mut inner = RecordingCanvas::new();
        adapter
            .paint(&mut canvas, |c| {
                // Children see the canvas two saves deep.
                let depth = c.save();
                c.restore_to_count(depth);
                inner.draw(format!("depth {depth}"));
                Ok(())
            })
            .unwrap();
        assert_eq!(
            inner.commands(),
            [DrawCommand::Draw {
                label: "depth 2".into()
            }]
        );
        assert!(canvas.is_balanced());
    }

    #[test]
    fn failing_child_leaves_canvas_balanced() {
        let mut adapter = adapter(1.0);
        adapter.update_placement(nested_stack(), 0, 0, 10, 10);
        let mut canvas = RecordingCanvas::new();
        let result = adapter.paint(&mut canvas, |_| Err(anyhow::anyhow!("surface lost")));
        assert!(matches!(result, Err(AdapterError::Children(_))));
        assert!(canvas.is_balanced());
        assert_eq!(
            canvas.commands().last(),
            Some(&DrawCommand::RestoreToCount { count: 0 })
        );
    }

    #[test]
    fn panicking_child_leaves_canvas_balanced() {
        let mut adapter = adapter(1.0);
        adapter.update_placement(nested_stack(), 0, 0, 10, 10);
        let mut canvas = RecordingCanvas::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            adapter.paint(&mut canvas, |_| panic!("child painter panicked"))
        }));
        assert!(result.is_err());
        assert!(canvas.is_balanced());
    }

    #[test]
    fn export_is_valid_json() {
        let mut adapter = adapter(1.5);
        adapter.update_placement(nested_stack(), 3, 4, 50, 50);
        let mut canvas = RecordingCanvas::new();
        adapter.paint(&mut canvas, |_| Ok(())).unwrap();

        let mut out = Vec::new();
        canvas.export(&mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), canvas.commands().len());
        let clips = parsed.iter().filter(|c| c["op"] == "clip_path").count();
        assert_eq!(clips, 2);
    }
}
