// ── Generic reactive entity collection ──
//
// Ordered single-writer storage with O(1) id lookups and push-based
// change notification via `watch` channels. Every mutation publishes a
// fresh immutable snapshot; snapshots handed out earlier never change.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::watch;

use crate::model::{Client, ClientId};
use crate::stream::Snapshot;

/// An entity that can live in an [`EntityCollection`].
pub trait Identified {
    type Id: Clone + Eq + Hash + fmt::Display;

    fn id(&self) -> &Self::Id;
}

impl Identified for Client {
    type Id = ClientId;

    fn id(&self) -> &ClientId {
        &self.id
    }
}

/// An ordered, reactive collection for a single entity type.
///
/// Insertion order is display order: new entities go to the front,
/// replacements keep their position, removals close the gap.
pub(crate) struct EntityCollection<T: Identified + Clone + Send + Sync + 'static> {
    /// Primary storage in display order.
    by_id: IndexMap<T::Id, Arc<T>>,

    /// Bumped on every mutation.
    version: u64,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Snapshot<T>>,
}

impl<T: Identified + Clone + Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: IndexMap::new(),
            version: 0,
            snapshot,
        }
    }

    /// Insert an entity at the front. Returns `false` (and changes
    /// nothing) if its id is already present.
    pub(crate) fn insert_front(&mut self, entity: T) -> bool {
        let id = entity.id().clone();
        if self.by_id.contains_key(&id) {
            return false;
        }
        self.by_id.shift_insert(0, id, Arc::new(entity));
        self.publish();
        true
    }

    /// Append an entity at the back, replacing any entity with the same
    /// id in place. Used when loading a stored collection in order.
    pub(crate) fn push_back(&mut self, entity: T) {
        let id = entity.id().clone();
        self.by_id.insert(id, Arc::new(entity));
        self.publish();
    }

    /// Replace the entity with the same id, keeping its position.
    /// Returns the previous value, or `None` if the id was unknown (in
    /// which case nothing changes).
    pub(crate) fn replace(&mut self, entity: T) -> Option<Arc<T>> {
        let slot = self.by_id.get_mut(entity.id())?;
        let previous = std::mem::replace(slot, Arc::new(entity));
        self.publish();
        Some(previous)
    }

    /// Remove an entity by id. Returns the removed entity if it existed.
    pub(crate) fn remove(&mut self, id: &T::Id) -> Option<Arc<T>> {
        let removed = self.by_id.shift_remove(id);
        if removed.is_some() {
            self.publish();
        }
        removed
    }

    /// Rewrite entities in place. `f` returns `Some(new)` for entities
    /// that change; a single snapshot is published if anything did.
    /// Returns the number of changed entities.
    pub(crate) fn update_where(&mut self, mut f: impl FnMut(&T) -> Option<T>) -> usize {
        let mut changed = 0;
        for slot in self.by_id.values_mut() {
            if let Some(updated) = f(&**slot) {
                *slot = Arc::new(updated);
                changed += 1;
            }
        }
        if changed > 0 {
            self.publish();
        }
        changed
    }

    /// Look up an entity by id.
    pub(crate) fn get_by_id(&self, id: &T::Id) -> Option<Arc<T>> {
        self.by_id.get(id).map(Arc::clone)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Rebuild the snapshot, broadcast it, and bump the version.
    fn publish(&mut self) {
        let values: Vec<Arc<T>> = self.by_id.values().map(Arc::clone).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.version += 1;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        value: &'static str,
    }

    impl Identified for Item {
        type Id = String;

        fn id(&self) -> &String {
            &self.id
        }
    }

    fn item(id: &str, value: &'static str) -> Item {
        Item {
            id: id.into(),
            value,
        }
    }

    fn values(col: &EntityCollection<Item>) -> Vec<&'static str> {
        col.snapshot().iter().map(|i| i.value).collect()
    }

    #[test]
    fn insert_front_prepends() {
        let mut col = EntityCollection::new();
        assert!(col.insert_front(item("1", "a")));
        assert!(col.insert_front(item("2", "b")));
        assert_eq!(values(&col), ["b", "a"]);
    }

    #[test]
    fn insert_front_rejects_existing_id() {
        let mut col = EntityCollection::new();
        col.insert_front(item("1", "a"));
        let before = col.version();
        assert!(!col.insert_front(item("1", "z")));
        assert_eq!(values(&col), ["a"]);
        assert_eq!(col.version(), before);
    }

    #[test]
    fn replace_keeps_position() {
        let mut col = EntityCollection::new();
        col.push_back(item("1", "a"));
        col.push_back(item("2", "b"));
        col.push_back(item("3", "c"));

        let old = col.replace(item("2", "B")).unwrap();
        assert_eq!(old.value, "b");
        assert_eq!(values(&col), ["a", "B", "c"]);
        assert!(col.replace(item("9", "x")).is_none());
    }

    #[test]
    fn remove_closes_gap() {
        let mut col = EntityCollection::new();
        col.push_back(item("1", "a"));
        col.push_back(item("2", "b"));
        col.push_back(item("3", "c"));

        let removed = col.remove(&"2".to_owned()).unwrap();
        assert_eq!(removed.value, "b");
        assert_eq!(values(&col), ["a", "c"]);
        assert!(col.get_by_id(&"2".to_owned()).is_none());
        assert!(col.remove(&"2".to_owned()).is_none());
    }

    #[test]
    fn snapshots_are_immutable() {
        let mut col = EntityCollection::new();
        col.push_back(item("1", "a"));
        let before = col.snapshot();

        col.insert_front(item("2", "b"));
        col.remove(&"1".to_owned());

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].value, "a");
        assert_eq!(values(&col), ["b"]);
    }

    #[test]
    fn update_where_publishes_once() {
        let mut col = EntityCollection::new();
        col.push_back(item("1", "a"));
        col.push_back(item("2", "b"));
        let before = col.version();

        let changed = col.update_where(|i| (i.value == "b").then(|| item("2", "B")));
        assert_eq!(changed, 1);
        assert_eq!(col.version(), before + 1);
        assert_eq!(values(&col), ["a", "B"]);

        assert_eq!(col.update_where(|_| None), 0);
        assert_eq!(col.version(), before + 1);
    }

    #[test]
    fn empty_collection() {
        let col: EntityCollection<Item> = EntityCollection::new();
        assert!(col.is_empty());
        assert_eq!(col.len(), 0);
        assert!(col.snapshot().is_empty());
    }
}
