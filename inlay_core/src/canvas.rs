// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface the paint pass drives.
//!
//! Only the four operations the adapter needs are modelled. Hosts forward
//! them to their native canvas.

use core::ops::{Deref, DerefMut};

use kurbo::BezPath;

use crate::transform::Matrix3;

/// A save/restore drawing surface.
pub trait Canvas {
    /// Pushes the current clip and matrix, returning the save count before
    /// the push.
    fn save(&mut self) -> usize;

    /// Pops saved state until the save count equals `count`.
    fn restore_to_count(&mut self, count: usize);

    /// Intersects the current clip with `path`.
    fn clip_path(&mut self, path: &BezPath);

    /// Pre-concatenates `matrix` onto the current matrix.
    fn concat(&mut self, matrix: &Matrix3);
}

/// Saves a canvas on creation and restores it on drop.
///
/// Guards nest: an inner guard borrows the outer one mutably, so restores
/// always run innermost first, including while unwinding.
pub struct SaveGuard<'a> {
    canvas: &'a mut dyn Canvas,
    count: usize,
}

impl<'a> SaveGuard<'a> {
    /// Saves `canvas` and returns a guard that restores it.
    pub fn new(canvas: &'a mut dyn Canvas) -> Self {
        let count = canvas.save();
        Self { canvas, count }
    }

    /// The save count the guard restores to.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

impl core::fmt::Debug for SaveGuard<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SaveGuard")
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl<'a> Deref for SaveGuard<'a> {
    type Target = dyn Canvas + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.canvas
    }
}

impl DerefMut for SaveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.canvas
    }
}

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.canvas.restore_to_count(self.count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CanvasOp, TestCanvas};

    #[test]
    fn guards_restore_innermost_first() {
        let mut canvas = TestCanvas::default();
        {
            let mut outer = SaveGuard::new(&mut canvas);
            outer.concat(&Matrix3::IDENTITY);
            {
                let inner = SaveGuard::new(&mut *outer);
                assert_eq!(inner.count(), 1);
            }
        }
        assert_eq!(canvas.depth, 0);
        assert_eq!(
            canvas.ops,
            [
                CanvasOp::Save(0),
                CanvasOp::Concat(Matrix3::IDENTITY),
                CanvasOp::Save(1),
                CanvasOp::Restore(1),
                CanvasOp::Restore(0),
            ]
        );
    }

    #[test]
    fn guard_restores_while_unwinding() {
        let mut canvas = TestCanvas::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = SaveGuard::new(&mut canvas);
            panic!("child painter exploded");
        }));
        assert!(result.is_err());
        assert_eq!(canvas.depth, 0);
        assert_eq!(canvas.ops.last(), Some(&CanvasOp::Restore(0)));
    }
}
