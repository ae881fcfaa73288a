use super::util::{downcast, is_dup_key};
use crate::application_port::RelationError;
use crate::domain_model::*;
use crate::domain_port::{FriendRequestClaim, FriendRequestRepo, StorageTx};
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlFriendRequestRepo {
    pool: MySqlPool,
}

impl MySqlFriendRequestRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn decode_request(row: &MySqlRow) -> Result<FriendRequest, RelationError> {
    let store = |field: &str, e: sqlx::Error| RelationError::Store(format!("decode {field}: {e}"));

    Ok(FriendRequest {
        id: row.try_get("id").map_err(|e| store("id", e))?,
        sender: row.try_get("sender_id").map_err(|e| store("sender_id", e))?,
        receiver: row.try_get("receiver_id").map_err(|e| store("receiver_id", e))?,
        status: row
            .try_get::<String, _>("status")
            .map_err(|e| store("status", e))?
            .parse()
            .map_err(RelationError::Store)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| store("created_at", e))?,
    })
}

#[async_trait::async_trait]
impl FriendRequestRepo for MySqlFriendRequestRepo {
    async fn claim_pending(
        &self,
        sender: UserId,
        receiver: UserId,
    ) -> Result<FriendRequestClaim, RelationError> {
        let request = FriendRequest::new_pending(sender, receiver);

        // `pending_pair` is unique while a request for the pair is pending
        let res = sqlx::query(
            r#"
INSERT INTO friend_requests (id, sender_id, receiver_id, status, created_at)
VALUES (?, ?, ?, 'pending', ?)
"#,
        )
        .bind(request.id)
        .bind(sender)
        .bind(receiver)
        .bind(request.created_at)
        .execute(&self.pool)
        .await;

        match res {
            Ok(_) => Ok(FriendRequestClaim::Won(request)),
            Err(e) if is_dup_key(&e) => Ok(FriendRequestClaim::Existing),
            Err(e) => Err(RelationError::Store(format!("insert friend request: {e}"))),
        }
    }

    async fn find_pending(
        &self,
        sender: UserId,
        receiver: UserId,
    ) -> Result<Option<FriendRequest>, RelationError> {
        let row = sqlx::query(
            r#"
SELECT id, sender_id, receiver_id, status, created_at
FROM friend_requests
WHERE sender_id = ? AND receiver_id = ? AND status = 'pending'
"#,
        )
        .bind(sender)
        .bind(receiver)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RelationError::Store(format!("select friend request: {e}")))?;

        row.as_ref().map(decode_request).transpose()
    }

    async fn resolve_pending_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        sender: UserId,
        receiver: UserId,
        status: FriendRequestStatus,
    ) -> Result<bool, RelationError> {
        if !FriendRequestStatus::Pending.can_transition_to(status) {
            return Err(RelationError::Store(format!(
                "invalid friend request transition to {}",
                status.as_str()
            )));
        }

        let tx = downcast(tx)?;

        let res = sqlx::query(
            r#"
UPDATE friend_requests
SET status = ?
WHERE sender_id = ? AND receiver_id = ? AND status = 'pending'
"#,
        )
        .bind(status.as_str())
        .bind(sender)
        .bind(receiver)
        .execute(tx.conn())
        .await
        .map_err(|e| RelationError::Store(format!("update friend request: {e}")))?;

        Ok(res.rows_affected() == 1)
    }

    async fn list_pending_for(
        &self,
        receiver: UserId,
    ) -> Result<Vec<FriendRequest>, RelationError> {
        let rows = sqlx::query(
            r#"
SELECT id, sender_id, receiver_id, status, created_at
FROM friend_requests
WHERE receiver_id = ? AND status = 'pending'
ORDER BY created_at DESC
"#,
        )
        .bind(receiver)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RelationError::Store(format!("list friend requests: {e}")))?;

        rows.iter().map(decode_request).collect()
    }
}
