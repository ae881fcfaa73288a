use super::util::{downcast, is_dup_key};
use crate::application_port::RelationError;
use crate::domain_model::*;
use crate::domain_port::{FriendshipRepo, StorageTx};
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlFriendshipRepo {
    pool: MySqlPool,
}

impl MySqlFriendshipRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn decode_stats(row: &MySqlRow) -> Result<FriendshipStats, RelationError> {
    let level = row
        .try_get::<String, _>("level")
        .map_err(|e| RelationError::Store(format!("decode level: {e}")))?
        .parse::<FriendshipLevel>()
        .map_err(RelationError::Store)?;
    let interaction_count = row
        .try_get::<i64, _>("interaction_count")
        .map_err(|e| RelationError::Store(format!("decode interaction_count: {e}")))?;
    let affinity_score = row
        .try_get::<i64, _>("affinity_score")
        .map_err(|e| RelationError::Store(format!("decode affinity_score: {e}")))?;

    Ok(FriendshipStats {
        level,
        interaction_count: u32::try_from(interaction_count).map_err(|_| {
            RelationError::Store(format!("interaction_count out of range: {interaction_count}"))
        })?,
        affinity_score: AffinityScore::clamped(affinity_score).value(),
    })
}

#[async_trait::async_trait]
impl FriendshipRepo for MySqlFriendshipRepo {
    async fn find_stats(
        &self,
        user: UserId,
        friend: UserId,
    ) -> Result<Option<FriendshipStats>, RelationError> {
        let row = sqlx::query(
            r#"
SELECT level, interaction_count, affinity_score
FROM friendships
WHERE (user_id = ? AND friend_id = ?)
   OR (user_id = ? AND friend_id = ?)
ORDER BY user_id = ? DESC
LIMIT 1
"#,
        )
        .bind(user)
        .bind(friend)
        .bind(friend)
        .bind(user)
        .bind(user)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RelationError::Store(format!("select friendship: {e}")))?;

        row.as_ref().map(decode_stats).transpose()
    }

    async fn list_for_user(&self, user: UserId) -> Result<Vec<Friendship>, RelationError> {
        let rows = sqlx::query(
            r#"
SELECT friend_id, level, interaction_count, affinity_score, created_at
FROM friendships
WHERE user_id = ?
ORDER BY created_at DESC,
         friend_id ASC
"#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RelationError::Store(format!("list friendships: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(Friendship {
                    user_id: user,
                    friend_id: row
                        .try_get::<UserId, _>("friend_id")
                        .map_err(|e| RelationError::Store(format!("decode friend_id: {e}")))?,
                    stats: decode_stats(row)?,
                    since: row
                        .try_get::<DateTime<Utc>, _>("created_at")
                        .map_err(|e| RelationError::Store(format!("decode created_at: {e}")))?,
                })
            })
            .collect()
    }

    async fn insert_pair_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        pair: UserPair,
    ) -> Result<(), RelationError> {
        let tx = downcast(tx)?;

        let res = sqlx::query(
            r#"
INSERT INTO friendships (user_id, friend_id, level, interaction_count, affinity_score)
VALUES (?, ?, 'conhecido', 0, 0),
       (?, ?, 'conhecido', 0, 0)
"#,
        )
        .bind(pair.min())
        .bind(pair.max())
        .bind(pair.max())
        .bind(pair.min())
        .execute(tx.conn())
        .await;

        match res {
            Ok(_) => Ok(()),
            Err(e) if is_dup_key(&e) => Err(RelationError::AlreadyFriends),
            Err(e) => Err(RelationError::Store(format!("insert friendship: {e}"))),
        }
    }

    async fn delete_pair_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        pair: UserPair,
    ) -> Result<u64, RelationError> {
        let tx = downcast(tx)?;

        let res = sqlx::query(
            r#"
DELETE FROM friendships
WHERE (user_id = ? AND friend_id = ?)
   OR (user_id = ? AND friend_id = ?)
"#,
        )
        .bind(pair.min())
        .bind(pair.max())
        .bind(pair.max())
        .bind(pair.min())
        .execute(tx.conn())
        .await
        .map_err(|e| RelationError::Store(format!("delete friendship: {e}")))?;

        Ok(res.rows_affected())
    }
}
