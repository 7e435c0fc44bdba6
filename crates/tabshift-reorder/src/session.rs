#![forbid(unsafe_code)]

//! Drag session data and the lifecycle vocabulary of the reorder engine.
//!
//! ```text
//! Idle -> Dragging -> (Committing) -> Settling -> Idle
//!            \-----> Idle (drop on origin, release outside, list change)
//! ```
//!
//! `Committing` never persists between events: the drop handler clears the
//! session, raises the settle flag and applies the move in one step, so no
//! observer can see preview offsets and the new order at the same time.

use serde::{Deserialize, Serialize};
use tabshift_core::{ItemId, Point};

/// The single active drag.
///
/// Exists only while a drag is in progress; "no session" means idle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub dragged_id: ItemId,
    /// Position of the dragged item when the drag started.
    pub dragged_index: usize,
    pub start: Point,
    pub current: Point,
    /// Slot the dragged item would occupy if dropped now.
    pub target_index: usize,
    /// Item count captured at drag start.
    pub item_count: usize,
}

impl DragSession {
    /// Begin a session with the pointer resting at `pointer`.
    #[must_use]
    pub fn begin(
        dragged_id: ItemId,
        dragged_index: usize,
        pointer: Point,
        item_count: usize,
    ) -> Self {
        Self {
            dragged_id,
            dragged_index,
            start: pointer,
            current: pointer,
            target_index: dragged_index,
            item_count,
        }
    }

    /// Signed drag offset along the layout axis.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.current.axis_delta(self.start)
    }

    /// Whether dropping now would change the order.
    #[inline]
    #[must_use]
    pub fn is_displaced(&self) -> bool {
        self.dragged_index != self.target_index
    }
}

/// Short-lived markers raised by a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettleFlags {
    /// Item that should snap into place without a transition.
    pub just_dropped: Option<ItemId>,
    /// Commit frame in progress; every preview offset is forced to zero.
    pub settling: bool,
}

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReorderState {
    Idle,
    Dragging { session: DragSession },
    Settling { just_dropped: Option<ItemId> },
}

impl ReorderState {
    /// Stable snake_case label.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::Settling { .. } => "settling",
        }
    }

    /// Active session, if dragging.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Dragging { session } => Some(session),
            Self::Idle | Self::Settling { .. } => None,
        }
    }
}

/// Why a drag ended without a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// Dropped with the target equal to the origin slot.
    DroppedOnOrigin,
    /// Released outside any valid drop target.
    ReleasedOutside,
    /// The item list changed length during the drag.
    ItemsChanged,
    /// Cancelled by the host.
    Programmatic,
}

/// Explicit diagnostics for events that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderNoopReason {
    IdleWithoutActiveDrag,
    ActiveDragAlreadyInProgress,
    /// Move event reported the `(0, 0)` placeholder position.
    NullPointerSentinel,
    NonFinitePointer,
    IndexOutOfRange,
    /// A prior commit is still inside its guard window.
    DropInFlight,
}

/// Which post-commit timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleTimerKind {
    /// Clears the re-entrancy guard and the settling flag.
    ReleaseGuard,
    /// Clears the just-dropped marker.
    ClearJustDropped,
}

/// Effect emitted by one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ReorderEffect {
    DragStarted {
        id: ItemId,
        index: usize,
        pointer: Point,
        /// A settle window was still open and got closed early.
        interrupted_settle: bool,
    },
    PointerUpdated {
        pointer: Point,
        offset: f32,
        target: usize,
    },
    TargetChanged {
        pointer: Point,
        offset: f32,
        previous: usize,
        target: usize,
    },
    Committed {
        id: ItemId,
        from: usize,
        to: usize,
    },
    Canceled {
        id: Option<ItemId>,
        reason: CancelReason,
    },
    ItemsResized {
        len: usize,
    },
    TimerFired {
        timer: SettleTimerKind,
        generation: u64,
    },
    Noop {
        reason: ReorderNoopReason,
    },
}

impl ReorderEffect {
    /// Whether this effect left every piece of state untouched.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Noop { .. })
    }
}

/// One state-machine transition with deterministic telemetry fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderTransition {
    pub transition_id: u64,
    pub from: ReorderState,
    pub to: ReorderState,
    pub effect: ReorderEffect,
}
