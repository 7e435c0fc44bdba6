#![forbid(unsafe_code)]

//! An [`OrderStore`] that records every move request.

use serde::{Deserialize, Serialize};
use tabshift_core::ItemId;
use tabshift_reorder::{OrderStore, TabOrder};

/// One `move_item` call as the store saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCall {
    pub from: usize,
    pub to: usize,
    /// Store length when the call arrived.
    pub len: usize,
    /// Id at `from` before the move, if `from` was in range.
    pub id: Option<ItemId>,
}

impl MoveCall {
    /// Whether the call used distinct in-range indices.
    #[must_use]
    pub fn is_legal(&self) -> bool {
        self.from != self.to && self.from < self.len && self.to < self.len
    }
}

/// Tab order wrapper that keeps a log of move requests.
#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    order: TabOrder<()>,
    calls: Vec<MoveCall>,
}

impl RecordingStore {
    /// Store with ids `0..len`.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            order: (0..len as u64).map(|id| (ItemId(id), ())).collect(),
            calls: Vec::new(),
        }
    }

    /// Remove the item at `index`, returning its id.
    pub fn close(&mut self, index: usize) -> Option<ItemId> {
        let id = self.order.get(index)?.id;
        self.order.remove(id);
        tracing::debug!(%id, index, "item closed");
        Some(id)
    }

    /// Every move request so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[MoveCall] {
        &self.calls
    }

    /// Ids in current order.
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.order.ids()
    }
}

impl OrderStore for RecordingStore {
    fn len(&self) -> usize {
        self.order.len()
    }

    fn id_at(&self, index: usize) -> Option<ItemId> {
        self.order.id_at(index)
    }

    fn move_item(&mut self, from: usize, to: usize) {
        let call = MoveCall {
            from,
            to,
            len: self.order.len(),
            id: self.order.id_at(from),
        };
        if call.is_legal() {
            tracing::debug!(from, to, "move_item");
        } else {
            tracing::warn!(from, to, len = call.len, "illegal move_item request");
        }
        self.calls.push(call);
        self.order.move_item(from, to);
    }
}
