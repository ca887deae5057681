//! Errors surfaced by flex layout.

use core::fmt;
use std::collections::TryReserveError;

use thiserror::Error;

use crate::ItemRef;

pub type Result<T> = core::result::Result<T, FlexLayoutError>;

/// Measurement a child was missing when an item record was finalized.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MeasurementKind {
    InlineSizes,
    BlockLayout,
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InlineSizes => formatter.write_str("intrinsic inline sizes"),
            Self::BlockLayout => formatter.write_str("block layout"),
        }
    }
}

/// A flex layout pass failed and produced no geometry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlexLayoutError {
    /// Growing a temporary item or line buffer failed.
    #[error("out of memory while reserving {what}")]
    OutOfMemory {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },
    /// An item record needed a measurement that was never scheduled.
    #[error("missing {kind} for flex item {item:?}")]
    MissingMeasurement { item: ItemRef, kind: MeasurementKind },
}

/// Reserve room for `additional` more elements, reporting allocation failure
/// as [`FlexLayoutError::OutOfMemory`].
///
/// # Errors
/// Returns `OutOfMemory` when the allocator refuses the request.
pub fn try_reserve<T>(buffer: &mut Vec<T>, additional: usize, what: &'static str) -> Result<()> {
    buffer
        .try_reserve(additional)
        .map_err(|source| FlexLayoutError::OutOfMemory { what, source })
}

/// Allocate an empty buffer with room for `capacity` elements.
///
/// # Errors
/// Returns `OutOfMemory` when the allocator refuses the request.
pub fn try_with_capacity<T>(capacity: usize, what: &'static str) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    try_reserve(&mut buffer, capacity, what)?;
    Ok(buffer)
}
