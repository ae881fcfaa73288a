use crate::application_port::AffinityError;
use crate::domain_model::UserId;
use crate::domain_port::AffinitySource;
use sqlx::{MySqlPool, Row};

/// Calls the store's `calculate_affinity` function.
pub struct MySqlAffinitySource {
    pool: MySqlPool,
}

impl MySqlAffinitySource {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AffinitySource for MySqlAffinitySource {
    async fn calculate_affinity(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Option<i64>, AffinityError> {
        let row = sqlx::query("SELECT calculate_affinity(?, ?) AS score")
            .bind(a)
            .bind(b)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AffinityError::Store(format!("call calculate_affinity: {e}")))?;

        row.try_get::<Option<i64>, _>("score")
            .map_err(|e| AffinityError::Store(format!("decode score: {e}")))
    }
}
