use super::store::{FriendshipRow, MemoryStore, MemoryTx};
use crate::application_port::RelationError;
use crate::domain_model::*;
use crate::domain_port::{FriendshipRepo, StorageTx, downcast_tx};
use chrono::Utc;

fn working(tx: &mut dyn StorageTx) -> Result<&mut MemoryTx, RelationError> {
    downcast_tx::<MemoryTx>(tx).map_err(|e| RelationError::Store(e.to_string()))
}

#[async_trait::async_trait]
impl FriendshipRepo for MemoryStore {
    async fn find_stats(
        &self,
        user: UserId,
        friend: UserId,
    ) -> Result<Option<FriendshipStats>, RelationError> {
        let state = self.state.lock().await;
        Ok(state
            .friendships
            .get(&(user, friend))
            .or_else(|| state.friendships.get(&(friend, user)))
            .map(|row| row.stats))
    }

    async fn list_for_user(&self, user: UserId) -> Result<Vec<Friendship>, RelationError> {
        let state = self.state.lock().await;
        let mut out: Vec<Friendship> = state
            .friendships
            .iter()
            .filter(|((user_id, _), _)| *user_id == user)
            .map(|(&(user_id, friend_id), row)| Friendship {
                user_id,
                friend_id,
                stats: row.stats,
                since: row.since,
            })
            .collect();
        out.sort_by(|a, b| b.since.cmp(&a.since).then(a.friend_id.cmp(&b.friend_id)));
        Ok(out)
    }

    async fn insert_pair_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        pair: UserPair,
    ) -> Result<(), RelationError> {
        let tx = working(tx)?;
        let (a, b) = (pair.min(), pair.max());
        if tx.working.friendships.contains_key(&(a, b))
            || tx.working.friendships.contains_key(&(b, a))
        {
            return Err(RelationError::AlreadyFriends);
        }

        let since = Utc::now();
        for key in [(a, b), (b, a)] {
            tx.working.friendships.insert(
                key,
                FriendshipRow {
                    stats: FriendshipStats::new_acquaintance(),
                    since,
                },
            );
        }
        Ok(())
    }

    async fn delete_pair_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        pair: UserPair,
    ) -> Result<u64, RelationError> {
        let tx = working(tx)?;
        let (a, b) = (pair.min(), pair.max());
        let mut removed = 0;
        for key in [(a, b), (b, a)] {
            if tx.working.friendships.remove(&key).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
