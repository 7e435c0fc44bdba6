#![forbid(unsafe_code)]

//! The canonical ordered sequence the engine commits into.
//!
//! [`OrderStore`] is the collaborator seam: the engine reads the length and
//! ids, and calls [`move_item`](OrderStore::move_item) exactly once per
//! successful drop. Moves use list semantics: the item at `from` ends up at
//! `to` and everything in between shifts by one slot. They never swap.

use tabshift_core::ItemId;

/// Canonical ordered sequence of items.
pub trait OrderStore {
    /// Number of items.
    fn len(&self) -> usize;

    /// Whether the sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Id of the item at `index`.
    fn id_at(&self, index: usize) -> Option<ItemId>;

    /// Move the item at `from` to `to`, shifting the items in between.
    ///
    /// Applied synchronously before the next frame is rendered. Out-of-range
    /// or equal indices leave the sequence untouched.
    fn move_item(&mut self, from: usize, to: usize);
}

/// Shift `items[from]` to position `to`. Returns whether anything moved.
pub fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

impl OrderStore for Vec<ItemId> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn id_at(&self, index: usize) -> Option<ItemId> {
        self.get(index).copied()
    }

    fn move_item(&mut self, from: usize, to: usize) {
        move_within(self, from, to);
    }
}

/// One item with its opaque payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab<T> {
    pub id: ItemId,
    pub payload: T,
}

/// `Vec`-backed tab order with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabOrder<T> {
    tabs: Vec<Tab<T>>,
}

impl<T> Default for TabOrder<T> {
    fn default() -> Self {
        Self { tabs: Vec::new() }
    }
}

impl<T> TabOrder<T> {
    /// Create an empty order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tab. Returns `false` (and drops nothing) if the id is
    /// already present.
    pub fn push(&mut self, id: ItemId, payload: T) -> bool {
        if self.position(id).is_some() {
            return false;
        }
        self.tabs.push(Tab { id, payload });
        true
    }

    /// Remove the tab with `id` (closing it), returning it.
    pub fn remove(&mut self, id: ItemId) -> Option<Tab<T>> {
        let index = self.position(id)?;
        Some(self.tabs.remove(index))
    }

    /// Current position of `id`.
    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    /// Tab at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Tab<T>> {
        self.tabs.get(index)
    }

    /// Ids in order.
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.tabs.iter().map(|tab| tab.id).collect()
    }

    /// Iterate tabs in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tab<T>> {
        self.tabs.iter()
    }

    /// Number of tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether there are no tabs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

impl<T> FromIterator<(ItemId, T)> for TabOrder<T> {
    /// Later duplicates of an id are dropped.
    fn from_iter<I: IntoIterator<Item = (ItemId, T)>>(iter: I) -> Self {
        let mut order = Self::new();
        for (id, payload) in iter {
            order.push(id, payload);
        }
        order
    }
}

impl<T> OrderStore for TabOrder<T> {
    fn len(&self) -> usize {
        self.tabs.len()
    }

    fn id_at(&self, index: usize) -> Option<ItemId> {
        self.tabs.get(index).map(|tab| tab.id)
    }

    fn move_item(&mut self, from: usize, to: usize) {
        move_within(&mut self.tabs, from, to);
    }
}
