//! Published snapshot
//!
//! Readers get an `Arc` to a complete snapshot or [`PoolError::NotReady`];
//! a rebuild swaps the pointer only after it has fully succeeded.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{PoolError, Result};
use crate::models::Snapshot;

/// Shared handle to the current snapshot
#[derive(Clone, Default)]
pub struct SnapshotStore {
    current: Arc<RwLock<Option<Arc<Snapshot>>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the visible snapshot
    pub async fn publish(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        *self.current.write().await = Some(snapshot);
        log::info!("Published new snapshot");
    }

    /// The latest published snapshot
    pub async fn current(&self) -> Result<Arc<Snapshot>> {
        self.current.read().await.clone().ok_or(PoolError::NotReady)
    }

    pub async fn is_ready(&self) -> bool {
        self.current.read().await.is_some()
    }
}
