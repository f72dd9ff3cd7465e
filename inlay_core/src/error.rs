// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types returned by adapter entry points.
//!
//! Contract violations inside a [`MutatorStack`](crate::mutator::MutatorStack)
//! are not errors: resolution substitutes identity and keeps painting. Only
//! host integration mistakes and failures in child painting surface here.

/// Convenience result type used across the adapter.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Errors raised by [`PlatformViewAdapter`](crate::adapter::PlatformViewAdapter).
#[derive(thiserror::Error, Debug)]
pub enum AdapterError {
    /// The density scale was zero, negative, or not finite.
    #[error("density scale must be finite and positive, got {0}")]
    InvalidDensity(f64),

    /// A paint pass was requested before the first placement update, so no
    /// geometry is known yet.
    #[error("paint requested before the first placement update")]
    NotPlaced,

    /// The child painter failed. Canvas state was restored before returning.
    #[error(transparent)]
    Children(#[from] anyhow::Error),
}
