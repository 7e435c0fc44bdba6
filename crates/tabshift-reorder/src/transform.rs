#![forbid(unsafe_code)]

//! Preview offsets: how far each item should be translated this frame.
//!
//! Rules, in priority order:
//!
//! 1. While settling, every offset is zero. The canonical order just changed
//!    underneath the preview and applying both would double-jump.
//! 2. The dragged item follows the pointer delta 1:1.
//! 3. With no drag, nothing moves.
//! 4. Items between the origin and the target slide exactly one slot
//!    (dragged width plus gap) toward the origin to open space.
//!
//! The shifted items always form one contiguous run between the origin and
//! the target, and each shift is the same single-slot distance.

use serde::{Deserialize, Serialize};
use tabshift_core::ItemId;

use crate::session::DragSession;

/// Everything the calculator needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct PreviewView<'a> {
    pub session: Option<&'a DragSession>,
    pub settling: bool,
    /// Measured width of the dragged item (0 when unmeasured).
    pub dragged_width: f32,
    pub gap: f32,
    /// Shift transition length for items that animate.
    pub transition_ms: u64,
}

impl PreviewView<'_> {
    /// Distance a displaced neighbor moves.
    #[inline]
    #[must_use]
    pub fn slot_shift(&self) -> f32 {
        self.dragged_width + self.gap
    }

    /// Offset for the item at `index`.
    #[must_use]
    pub fn offset(&self, index: usize) -> f32 {
        if self.settling {
            return 0.0;
        }
        let Some(session) = self.session else {
            return 0.0;
        };

        let d = session.dragged_index;
        let t = session.target_index;

        if index == d {
            session.offset()
        } else if d < t && d < index && index <= t {
            -self.slot_shift()
        } else if d > t && t <= index && index < d {
            self.slot_shift()
        } else {
            0.0
        }
    }

    /// Whether the item at `index` is the one being dragged.
    #[inline]
    #[must_use]
    pub fn is_dragged(&self, index: usize) -> bool {
        !self.settling && self.session.is_some_and(|s| s.dragged_index == index)
    }
}

/// Render instructions for one item in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemPreview {
    pub index: usize,
    pub id: ItemId,
    /// Translation along the layout axis.
    pub offset: f32,
    /// Whether the host should animate toward `offset`. False for the item
    /// under the pointer, the item that was just dropped, and every item
    /// while settling.
    pub animate: bool,
    /// Transition length to animate with; 0 when `animate` is false.
    pub transition_ms: u64,
    /// Draw above its neighbors.
    pub lifted: bool,
}

/// Build the preview for a whole strip.
///
/// `ids` yields the item ids in their current order.
pub fn preview_frame<I>(
    ids: I,
    view: &PreviewView<'_>,
    just_dropped: Option<ItemId>,
) -> Vec<ItemPreview>
where
    I: IntoIterator<Item = ItemId>,
{
    ids.into_iter()
        .enumerate()
        .map(|(index, id)| {
            let dragged = view.is_dragged(index);
            let animate = !(dragged || view.settling || just_dropped == Some(id));
            ItemPreview {
                index,
                id,
                offset: view.offset(index),
                animate,
                transition_ms: if animate { view.transition_ms } else { 0 },
                lifted: dragged,
            }
        })
        .collect()
}
