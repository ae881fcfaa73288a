use crate::domain_model::{AffinityView, UserId};

#[derive(Debug, thiserror::Error)]
pub enum AffinityError {
    #[error("affinity lookup timed out")]
    Timeout,
    #[error("store error: {0}")]
    Store(String),
}

/// Never fails: a lookup that cannot complete is shown as a score of 0.
#[async_trait::async_trait]
pub trait AffinityService: Send + Sync {
    /// `None` when `viewer == other`.
    async fn affinity(&self, viewer: UserId, other: UserId) -> Option<AffinityView>;
    /// Results come back in the order of `others`.
    async fn affinity_many(
        &self,
        viewer: UserId,
        others: &[UserId],
    ) -> Vec<(UserId, Option<AffinityView>)>;
}
