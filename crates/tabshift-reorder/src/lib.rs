#![forbid(unsafe_code)]

//! Drag-to-reorder for horizontal tab strips.
//!
//! # Role in tabshift
//! `tabshift-reorder` turns [`DragEvent`](tabshift_core::DragEvent)s into two
//! outputs: a per-item preview offset for every frame, and a single
//! [`OrderStore::move_item`] call when a drop lands on a new slot.
//!
//! # Pipeline
//!
//! ```text
//! widths ──► GeometrySampler ──► Boundary[] ──► resolve_target ──► target
//!                                                                    │
//! DragEvent ──► ReorderEngine ──► DragSession ◄──────────────────────┘
//!                    │                 │
//!                    │                 └──► PreviewView ──► ItemPreview[]
//!                    └──► OrderStore::move_item (on drop)
//! ```
//!
//! # Example
//!
//! ```
//! use tabshift_core::{DragEvent, ItemId, Point};
//! use tabshift_reorder::{ReorderEngine, TabOrder};
//! use web_time::Instant;
//!
//! let mut tabs: TabOrder<&str> = [(ItemId(1), "a"), (ItemId(2), "b"), (ItemId(3), "c")]
//!     .into_iter()
//!     .collect();
//! let mut engine = ReorderEngine::default();
//! engine.geometry_mut().record_all([100.0, 100.0, 100.0]);
//!
//! let now = Instant::now();
//! let start = DragEvent::Start { index: 0, pointer: Point::new(50.0, 10.0) };
//! engine.handle(&start, now, &mut tabs);
//! engine.handle(&DragEvent::Move { pointer: Point::new(170.0, 10.0) }, now, &mut tabs);
//! engine.handle(&DragEvent::Drop, now, &mut tabs);
//!
//! assert_eq!(tabs.ids(), vec![ItemId(2), ItemId(1), ItemId(3)]);
//! ```

pub mod boundary;
pub mod config;
pub mod engine;
pub mod resolver;
pub mod session;
pub mod settle;
pub mod store;
pub mod transform;

pub use boundary::{Boundary, GeometrySampler, sample_boundaries};
pub use config::{ReorderConfig, ReorderConfigError};
pub use engine::ReorderEngine;
pub use resolver::resolve_target;
pub use session::{
    CancelReason, DragSession, ReorderEffect, ReorderNoopReason, ReorderState, ReorderTransition,
    SettleFlags, SettleTimerKind,
};
pub use settle::{FiredTimer, SettleTimers};
pub use store::{OrderStore, Tab, TabOrder, move_within};
pub use transform::{ItemPreview, PreviewView, preview_frame};
