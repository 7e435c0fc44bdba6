#![forbid(unsafe_code)]

//! Geometry sampling: measured item widths to per-item boundaries.
//!
//! Boundaries are laid out left to right starting at offset 0 in the strip's
//! own frame, each item followed by the fixed gap. An item whose width was
//! never measured (not rendered yet, or unmounted) is skipped: it contributes
//! neither a boundary nor space, which makes later targets approximate but
//! never invalid.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tabshift_core::Rect;

/// Layout extent of one item along the drag axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// Position of the item in the ordered sequence.
    pub index: usize,
    pub start: f32,
    pub end: f32,
    pub mid: f32,
}

impl Boundary {
    /// Width of the item.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f32 {
        self.end - self.start
    }
}

/// Accumulate boundaries from per-index widths.
///
/// `widths` yields one entry per item in order; `None` marks an item with no
/// measurable geometry. Returns an empty list when nothing is measurable,
/// which callers treat as "retry on the next tick".
pub fn sample_boundaries<I>(widths: I, gap: f32) -> Vec<Boundary>
where
    I: IntoIterator<Item = Option<f32>>,
{
    let mut boundaries = Vec::new();
    let mut cursor = 0.0_f32;

    for (index, width) in widths.into_iter().enumerate() {
        let Some(width) = width.filter(|w| is_measurable(*w)) else {
            continue;
        };
        boundaries.push(Boundary {
            index,
            start: cursor,
            end: cursor + width,
            mid: cursor + width / 2.0,
        });
        cursor += width + gap;
    }

    boundaries
}

#[inline]
fn is_measurable(width: f32) -> bool {
    width.is_finite() && width >= 0.0
}

/// Index-keyed cache of measured item widths, plus the strip origin.
///
/// The host records a width whenever an item is laid out and forgets it
/// when the item unmounts. Entries are keyed by position, so any change to
/// the rendered set must be mirrored with [`truncate`](Self::truncate) or
/// [`clear`](Self::clear) before the next sample.
#[derive(Debug, Clone, Default)]
pub struct GeometrySampler {
    widths: AHashMap<usize, f32>,
    origin_x: f32,
}

impl GeometrySampler {
    /// Create an empty sampler with the strip origin at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the measured width of the item at `index`.
    ///
    /// Non-finite or negative widths are stored as "unmeasured".
    pub fn record(&mut self, index: usize, width: f32) {
        if is_measurable(width) {
            self.widths.insert(index, width);
        } else {
            self.widths.remove(&index);
        }
    }

    /// Record widths for a whole strip, replacing everything known.
    pub fn record_all<I>(&mut self, widths: I)
    where
        I: IntoIterator<Item = f32>,
    {
        self.widths.clear();
        for (index, width) in widths.into_iter().enumerate() {
            self.record(index, width);
        }
    }

    /// Drop the measurement for one index.
    pub fn forget(&mut self, index: usize) {
        self.widths.remove(&index);
    }

    /// Drop every measurement at or past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.widths.retain(|index, _| *index < len);
    }

    /// Drop every measurement.
    pub fn clear(&mut self) {
        self.widths.clear();
    }

    /// Measured width of the item at `index`.
    #[must_use]
    pub fn width(&self, index: usize) -> Option<f32> {
        self.widths.get(&index).copied()
    }

    /// Number of items with a measurement.
    #[must_use]
    pub fn measured_len(&self) -> usize {
        self.widths.len()
    }

    /// Set the left edge of the strip container in pointer coordinates.
    pub fn set_origin(&mut self, origin_x: f32) {
        if origin_x.is_finite() {
            self.origin_x = origin_x;
        }
    }

    /// Take the origin from the container's bounding box.
    pub fn set_container(&mut self, container: Rect) {
        self.set_origin(container.left());
    }

    /// Left edge of the strip container in pointer coordinates.
    #[must_use]
    pub fn origin(&self) -> f32 {
        self.origin_x
    }

    /// Sample boundaries for the first `item_count` items.
    #[must_use]
    pub fn sample(&self, item_count: usize, gap: f32) -> Vec<Boundary> {
        sample_boundaries((0..item_count).map(|index| self.width(index)), gap)
    }
}
