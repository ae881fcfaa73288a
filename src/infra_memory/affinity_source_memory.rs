use super::store::MemoryStore;
use crate::application_port::AffinityError;
use crate::domain_model::{UserId, UserPair};
use crate::domain_port::AffinitySource;

#[async_trait::async_trait]
impl AffinitySource for MemoryStore {
    /// Unknown pairs score `None`, like a store function with no shared data.
    async fn calculate_affinity(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Option<i64>, AffinityError> {
        let state = self.state.lock().await;
        Ok(state
            .affinity
            .get(&UserPair::new(a, b))
            .copied()
            .flatten())
    }
}
