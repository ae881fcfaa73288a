use crate::application_port::RelationError;
use crate::domain_model::*;
use crate::domain_port::StorageTx;

/// Friendships are stored as two directed rows, one per participant.
#[async_trait::async_trait]
pub trait FriendshipRepo: Send + Sync {
    /// Counters of the pair as seen from `user`, falling back to the
    /// reverse row when only that one exists.
    async fn find_stats(
        &self,
        user: UserId,
        friend: UserId,
    ) -> Result<Option<FriendshipStats>, RelationError>;
    async fn list_for_user(&self, user: UserId) -> Result<Vec<Friendship>, RelationError>;
    /// Inserts both directed rows at level `conhecido`.
    async fn insert_pair_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        pair: UserPair,
    ) -> Result<(), RelationError>;
    /// Deletes both directed rows and returns how many existed.
    async fn delete_pair_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        pair: UserPair,
    ) -> Result<u64, RelationError>;
}
