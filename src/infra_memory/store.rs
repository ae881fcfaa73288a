use crate::domain_model::*;
use crate::domain_port::{StorageTx, TxManager};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone)]
pub(super) struct FriendshipRow {
    pub stats: FriendshipStats,
    pub since: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Default)]
pub(super) struct MemoryState {
    /// Keyed by `(user_id, friend_id)`.
    pub friendships: HashMap<(UserId, UserId), FriendshipRow>,
    pub requests: Vec<FriendRequest>,
    pub affinity: HashMap<UserPair, Option<i64>>,
}

/// Process-local store for development and tests.
///
/// Implements every store port; see the sibling modules. Transactions take
/// the state lock for their whole lifetime and publish a working copy on
/// commit.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub(super) state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds what the store-side affinity computation returns for a pair.
    pub async fn set_affinity(&self, a: UserId, b: UserId, score: Option<i64>) {
        self.state
            .lock()
            .await
            .affinity
            .insert(UserPair::new(a, b), score);
    }

    /// Overwrites the counters of both directed rows, as the store's
    /// interaction tracking would.
    pub async fn set_stats(&self, a: UserId, b: UserId, stats: FriendshipStats) {
        let mut state = self.state.lock().await;
        for key in [(a, b), (b, a)] {
            if let Some(row) = state.friendships.get_mut(&key) {
                row.stats = stats;
            }
        }
    }

    /// Drops a single directed row, leaving the pair inconsistent.
    pub async fn remove_directed(&self, user: UserId, friend: UserId) {
        self.state.lock().await.friendships.remove(&(user, friend));
    }
}

pub struct MemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    pub(super) working: MemoryState,
}

#[async_trait::async_trait]
impl StorageTx for MemoryTx {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        let MemoryTx { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[async_trait::async_trait]
impl TxManager for MemoryStore {
    async fn begin(&self) -> anyhow::Result<Box<dyn StorageTx>> {
        let guard = self.state.clone().lock_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(MemoryTx { guard, working }))
    }
}
