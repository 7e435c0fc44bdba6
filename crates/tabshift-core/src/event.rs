#![forbid(unsafe_code)]

//! Canonical drag input types.
//!
//! The input layer translates platform drag callbacks (drag-start, drag,
//! drag-over, drop, drag-end) into [`DragEvent`] values. Nothing here carries
//! a timestamp; the consumer receives `now` alongside each event so replay
//! stays deterministic.
//!
//! # Design Notes
//!
//! - Pointer positions are in the same frame as the container rectangle the
//!   host reports (usually viewport coordinates).
//! - `Move` and `Over` are distinct because platforms fire them from
//!   different targets, but the reorder engine treats them identically.
//! - `ItemsChanged` is not a pointer event: the host sends it whenever the
//!   item list changes size underneath an interaction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Stable identity of one item in the reorderable sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Raw numeric value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Canonical drag input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragEvent {
    /// Pointer pressed on the item at `index` and the platform began a drag.
    Start {
        /// Position of the item in the current order.
        index: usize,
        pointer: Point,
    },

    /// The dragged item reported a new pointer position.
    Move { pointer: Point },

    /// The pointer moved over the strip while a drag is active.
    Over { pointer: Point },

    /// The pointer was released over a valid drop target.
    Drop,

    /// The drag finished without (or after) a drop.
    End,

    /// The host's item list changed length.
    ItemsChanged { len: usize },
}

impl DragEvent {
    /// Stable snake_case label for logs and traces.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "drag_start",
            Self::Move { .. } => "drag_move",
            Self::Over { .. } => "drag_over",
            Self::Drop => "drop",
            Self::End => "drag_end",
            Self::ItemsChanged { .. } => "items_changed",
        }
    }

    /// Whether the event belongs to pointer input (everything except
    /// `ItemsChanged`).
    #[must_use]
    pub const fn is_pointer_event(&self) -> bool {
        !matches!(self, Self::ItemsChanged { .. })
    }
}
