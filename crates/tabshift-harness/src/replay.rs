#![forbid(unsafe_code)]

//! Deterministic script replay.
//!
//! The replayer owns a virtual clock anchored at one `Instant`; each step
//! runs at `anchor + at_ms`. Due settle timers are fired before every step,
//! then the step is applied. Closing an item removes it from the store,
//! re-measures the remaining widths and reports `ItemsChanged`, which is how
//! a host mirrors a middle-click close.

use serde::Serialize;
use tabshift_core::{DragEvent, ItemId};
use tabshift_reorder::{
    OrderStore, ReorderConfig, ReorderConfigError, ReorderEffect, ReorderEngine, ReorderTransition,
};
use web_time::{Duration, Instant};

use crate::determinism::{order_digest, transition_digest};
use crate::recording_store::{MoveCall, RecordingStore};
use crate::script::{DragScript, ScriptRecord};

/// Everything observable from one replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub transitions: Vec<ReorderTransition>,
    pub final_order: Vec<ItemId>,
    pub move_calls: Vec<MoveCall>,
}

impl ReplayReport {
    /// Number of committed drops.
    #[must_use]
    pub fn commits(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| matches!(t.effect, ReorderEffect::Committed { .. }))
            .count()
    }

    /// Combined digest of the transition stream and the final order.
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        Ok(format!(
            "{}|{}",
            transition_digest(&self.transitions)?,
            order_digest(&self.final_order)
        ))
    }
}

/// Replay `script` against a fresh engine and a fresh store of
/// `script.item_count()` items with ids `0..n`.
pub fn replay(
    script: &DragScript,
    config: ReorderConfig,
) -> Result<ReplayReport, ReorderConfigError> {
    let mut engine = ReorderEngine::new(config)?;
    let mut store = RecordingStore::with_len(script.item_count());
    let mut widths = script.item_widths.clone();
    engine.geometry_mut().record_all(widths.iter().copied());
    engine.geometry_mut().set_origin(script.strip_origin);

    let _span =
        tracing::info_span!("replay", script = %script.name, items = widths.len()).entered();

    let anchor = Instant::now();
    let mut transitions = Vec::new();

    for step in script.steps() {
        let Some(at_ms) = step.at_ms() else { continue };
        let now = anchor + Duration::from_millis(at_ms);
        transitions.extend(engine.tick(now));

        if let Some(event) = step.to_event() {
            transitions.push(engine.handle(&event, now, &mut store));
            continue;
        }
        if let ScriptRecord::CloseItem { index, .. } = *step {
            if store.close(index).is_none() {
                tracing::debug!(index, at_ms, "close ignored: index out of range");
                continue;
            }
            widths.remove(index);
            engine.geometry_mut().record_all(widths.iter().copied());
            let changed = DragEvent::ItemsChanged { len: store.len() };
            transitions.push(engine.handle(&changed, now, &mut store));
        }
    }

    tracing::info!(
        transitions = transitions.len(),
        moves = store.calls().len(),
        "replay finished"
    );

    Ok(ReplayReport {
        transitions,
        final_order: store.ids(),
        move_calls: store.calls().to_vec(),
    })
}
