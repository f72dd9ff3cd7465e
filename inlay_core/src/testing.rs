// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared test doubles.

use std::io;
use std::sync::{Arc, Mutex};

use kurbo::{BezPath, Point};

use crate::canvas::Canvas;
use crate::placement::ViewFrame;
use crate::stretch::StretchEffect;
use crate::transform::Matrix3;
use crate::view::{AccessibilityImportance, NativeView};

pub(crate) const EPS: f64 = 1e-9;

pub(crate) fn assert_point_near(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
        "{a:?} != {b:?}"
    );
}

/// Runs `f` under a fmt subscriber and returns what it logged.
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buffer);
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || LogWriter(Arc::clone(&sink)))
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    (result, logs)
}

struct LogWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Seeded generator for randomized property tests.
#[derive(Clone, Debug)]
pub(crate) struct Lcg(u64);

impl Lcg {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    /// Uniform in `[lo, hi)`.
    pub(crate) fn range(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0);
        lo + unit * (hi - lo)
    }

    pub(crate) fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        let span = i64::from(hi) - i64::from(lo);
        let offset = i64::from(self.next_u32()) % span;
        i32::try_from(i64::from(lo) + offset).expect("in range")
    }

    /// A rotation followed by a translation, both random.
    pub(crate) fn rigid_motion(&mut self) -> Matrix3 {
        let angle = self.range(-core::f64::consts::PI, core::f64::consts::PI);
        let tx = self.range(-500.0, 500.0);
        let ty = self.range(-500.0, 500.0);
        Matrix3::from_translation(tx, ty) * Matrix3::from_rotation(angle)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum CanvasOp {
    Save(usize),
    Restore(usize),
    Clip(BezPath),
    Concat(Matrix3),
}

#[derive(Debug, Default)]
pub(crate) struct TestCanvas {
    pub(crate) ops: Vec<CanvasOp>,
    pub(crate) depth: usize,
}

impl Canvas for TestCanvas {
    fn save(&mut self) -> usize {
        let before = self.depth;
        self.depth += 1;
        self.ops.push(CanvasOp::Save(before));
        before
    }

    fn restore_to_count(&mut self, count: usize) {
        self.depth = count;
        self.ops.push(CanvasOp::Restore(count));
    }

    fn clip_path(&mut self, path: &BezPath) {
        self.ops.push(CanvasOp::Clip(path.clone()));
    }

    fn concat(&mut self, matrix: &Matrix3) {
        self.ops.push(CanvasOp::Concat(*matrix));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ViewOp {
    Frame(ViewFrame),
    WillNotDraw(bool),
    HardwareLayer(u8),
    Effect(Option<StretchEffect>),
}

#[derive(Debug, Default)]
pub(crate) struct TestView {
    pub(crate) ops: Vec<ViewOp>,
    pub(crate) importance: Option<AccessibilityImportance>,
}

impl TestView {
    pub(crate) fn hardware_layers(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                ViewOp::HardwareLayer(alpha) => Some(*alpha),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_effect(&self) -> Option<Option<StretchEffect>> {
        self.ops.iter().rev().find_map(|op| match op {
            ViewOp::Effect(effect) => Some(*effect),
            _ => None,
        })
    }
}

impl NativeView for TestView {
    fn set_frame(&mut self, frame: ViewFrame) {
        self.ops.push(ViewOp::Frame(frame));
    }

    fn set_will_not_draw(&mut self, will_not_draw: bool) {
        self.ops.push(ViewOp::WillNotDraw(will_not_draw));
    }

    fn promote_to_hardware_layer(&mut self, alpha: u8) {
        self.ops.push(ViewOp::HardwareLayer(alpha));
    }

    fn set_render_effect(&mut self, effect: Option<&StretchEffect>) {
        self.ops.push(ViewOp::Effect(effect.copied()));
    }

    fn embedded_importance(&self) -> Option<AccessibilityImportance> {
        self.importance
    }
}
