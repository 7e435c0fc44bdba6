#![forbid(unsafe_code)]

//! Test tooling for tabshift.
//!
//! - [`script`]: JSONL drag scripts and their builder.
//! - [`replay`]: deterministic replay against a fresh engine.
//! - [`recording_store`]: an order store that logs every move request.
//! - [`drag_storm`]: seeded fault-injection storms.
//! - [`determinism`]: blake3 digests of replay output.

pub mod determinism;
pub mod drag_storm;
pub mod recording_store;
pub mod replay;
pub mod script;

pub use determinism::{order_digest, transition_digest};
pub use drag_storm::{DragStormConfig, StormPattern, generate};
pub use recording_store::{MoveCall, RecordingStore};
pub use replay::{ReplayReport, replay};
pub use script::{DragScript, SCHEMA_VERSION, ScriptError, ScriptRecord};
