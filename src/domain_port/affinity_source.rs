use crate::application_port::AffinityError;
use crate::domain_model::UserId;

/// The store-side affinity computation. Idempotent and side-effect free.
#[async_trait::async_trait]
pub trait AffinitySource: Send + Sync {
    /// `Ok(None)` when the computation produced no value.
    async fn calculate_affinity(&self, a: UserId, b: UserId)
    -> Result<Option<i64>, AffinityError>;
}
