// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording and pretty-printing for inlay diagnostics.
//!
//! This crate provides host stand-ins and [`TraceSink`](inlay_core::trace::TraceSink)
//! implementations for development and golden testing:
//!
//! - [`recording::RecordingCanvas`]: a [`Canvas`](inlay_core::canvas::Canvas)
//!   that logs every draw command and exports the log as JSON.
//! - [`view::RecordingView`]: a [`NativeView`](inlay_core::view::NativeView)
//!   that logs every view update.
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.

pub mod pretty;
pub mod recording;
pub mod view;
