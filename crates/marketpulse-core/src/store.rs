use std::sync::Arc;

use tokio::sync::watch;

use crate::{RefreshResult, UtcDateTime};

/// Caller-owned holder of the latest refresh result.
///
/// Results are swapped in whole, so readers never observe a partially
/// updated snapshot. Cloning the store shares the same slot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    tx: Arc<watch::Sender<Option<Arc<RefreshResult>>>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn publish(&self, result: RefreshResult) {
        self.tx.send_replace(Some(Arc::new(result)));
    }

    pub fn latest(&self) -> Option<Arc<RefreshResult>> {
        self.tx.borrow().clone()
    }

    pub fn last_updated(&self) -> Option<UtcDateTime> {
        self.tx.borrow().as_ref().map(|result| result.completed_at)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<RefreshResult>>> {
        self.tx.subscribe()
    }

    /// Callback suitable for [`crate::scheduler::start`].
    pub fn sink(&self) -> impl FnMut(RefreshResult) + Send + 'static {
        let store = self.clone();
        move |result| store.publish(result)
    }
}
