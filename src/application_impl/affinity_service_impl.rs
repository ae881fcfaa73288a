use crate::application_port::{AffinityError, AffinityService};
use crate::domain_model::{AffinityScore, AffinityView, UserId};
use crate::domain_port::AffinitySource;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub struct RealAffinityService {
    source: Arc<dyn AffinitySource>,
    timeout: Duration,
}

impl RealAffinityService {
    pub fn new(source: Arc<dyn AffinitySource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    async fn lookup(&self, a: UserId, b: UserId) -> Result<Option<i64>, AffinityError> {
        tokio::time::timeout(self.timeout, self.source.calculate_affinity(a, b))
            .await
            .map_err(|_| AffinityError::Timeout)?
    }

    async fn score(&self, viewer: UserId, other: UserId) -> AffinityScore {
        match self.lookup(viewer, other).await {
            Ok(Some(raw)) => AffinityScore::try_from(raw).unwrap_or_else(|raw| {
                warn!(%viewer, %other, raw, "affinity out of range, clamping");
                AffinityScore::clamped(raw)
            }),
            Ok(None) => AffinityScore::default(),
            Err(e) => {
                warn!(%viewer, %other, "affinity lookup failed, showing 0: {e}");
                AffinityScore::default()
            }
        }
    }
}

#[async_trait::async_trait]
impl AffinityService for RealAffinityService {
    async fn affinity(&self, viewer: UserId, other: UserId) -> Option<AffinityView> {
        if viewer == other {
            return None;
        }
        Some(self.score(viewer, other).await.into())
    }

    async fn affinity_many(
        &self,
        viewer: UserId,
        others: &[UserId],
    ) -> Vec<(UserId, Option<AffinityView>)> {
        let lookups = others.iter().map(|&other| async move {
            (other, self.affinity(viewer, other).await)
        });
        join_all(lookups).await
    }
}
