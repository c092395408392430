// ── Change subscriptions ──
//
// Front ends that keep a view open (a watch loop, a future UI) follow
// the client list through an EntityStream instead of polling the store.

mod filter;

use std::sync::Arc;

use tokio::sync::watch;

pub use filter::ClientFilter;

/// Shared, immutable view of a collection at one version.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// Receiving end of a collection's snapshot channel.
///
/// Holds the snapshot seen last; [`changed()`](Self::changed) waits for
/// the next mutation and swaps it in.
pub struct EntityStream<T: Send + Sync + 'static> {
    seen: Snapshot<T>,
    receiver: watch::Receiver<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> EntityStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Snapshot<T>>) -> Self {
        let seen = Arc::clone(&receiver.borrow());
        Self { seen, receiver }
    }

    /// Snapshot as of subscription or the last `changed()`.
    pub fn current(&self) -> &Snapshot<T> {
        &self.seen
    }

    /// Next snapshot after a mutation. `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.receiver.changed().await.ok()?;
        self.seen = Arc::clone(&self.receiver.borrow_and_update());
        Some(Arc::clone(&self.seen))
    }
}
