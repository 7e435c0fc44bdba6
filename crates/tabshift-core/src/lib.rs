#![forbid(unsafe_code)]

//! Core: pointer geometry, item identity, and drag events.
//!
//! # Role in tabshift
//! `tabshift-core` is the input layer. It owns the small value types every
//! other crate speaks: layout-axis [`Point`](geometry::Point) and
//! [`Rect`](geometry::Rect), stable [`ItemId`](event::ItemId)s, and the
//! normalized [`DragEvent`](event::DragEvent) vocabulary.
//!
//! # How it fits in the system
//! The reorder engine (`tabshift-reorder`) consumes `DragEvent` values and
//! drives the drag session lifecycle. The harness (`tabshift-harness`)
//! produces them from scripted traces. Rendering lives entirely in the host.

pub mod event;
pub mod geometry;
pub mod logging;

pub use event::{DragEvent, ItemId};
pub use geometry::{Point, Rect};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#[cfg(feature = "tracing-json")]
pub use logging::{LoggingInitError, init_json_logging};
