// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutator stack resolution for natively rendered views embedded in a
//! compositor's layer tree.
//!
//! The compositor tracks ancestor clips, transforms and opacity for every
//! layer in its own physical-pixel coordinate space. An embedded native view
//! lives in the host's view system instead, is positioned by the host, draws
//! in logical pixels, and receives touches from the device. `inlay_core`
//! bridges the two so the native view renders and hit-tests exactly where the
//! compositor expects it.
//!
//! # Architecture
//!
//! ```text
//!   Compositor
//!       │  MutatorStack (one per frame)
//!       ▼
//!   resolve() ──► ResolvedComposite ──► correct() ──► CorrectedComposite
//!                                                          │
//!                 ┌────────────────────────────────────────┘
//!                 ▼
//!   PlatformViewAdapter::paint() ──► Canvas (parent clips, child transform)
//!
//!   TouchEvent ──► TouchRemapper (anchored on ViewPlacement) ──► TouchProcessor
//! ```
//!
//! **[`mutator`]**: [`MutationOp`](mutator::MutationOp) and the immutable,
//! per-frame [`MutatorStack`](mutator::MutatorStack).
//!
//! **[`resolve`]**: folds a stack into one transform, an ordered list of
//! clip paths, and an effective opacity. Non-finite ops are replaced by
//! identity and reported through `tracing`.
//!
//! **[`correct`]**: re-expresses a resolved composite against the native
//! view's local origin and logical pixel density.
//!
//! **[`adapter`]** / **[`apply`]**: the host-facing entry points. Placement
//! updates, the paint-pass state machine, touch delivery, focus and
//! accessibility plumbing.
//!
//! **[`touch`]**: gesture-aware remapping of device touches into compositor
//! coordinates.
//!
//! **[`stretch`]**: parameters and a CPU reference for the overscroll stretch
//! post-process.
//!
//! **[`canvas`]** / **[`view`]** / **[`focus`]**: the traits a host
//! implements to receive draw commands, view updates and focus changes.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) hooks for placement, paint
//! phase and touch events, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Threading
//!
//! All entry points are expected to run sequentially on the host's UI thread.
//! Nothing here locks, blocks or spawns work.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod adapter;
pub mod apply;
pub mod canvas;
pub mod correct;
pub mod error;
pub mod focus;
pub mod mutator;
pub mod placement;
pub mod resolve;
pub mod stretch;
pub mod touch;
pub mod trace;
pub mod transform;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
