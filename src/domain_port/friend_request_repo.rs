use crate::application_port::RelationError;
use crate::domain_model::*;
use crate::domain_port::StorageTx;

pub enum FriendRequestClaim {
    Won(FriendRequest),
    Existing,
}

#[async_trait::async_trait]
pub trait FriendRequestRepo: Send + Sync {
    /// Inserts a pending request unless one is already pending for the pair.
    async fn claim_pending(
        &self,
        sender: UserId,
        receiver: UserId,
    ) -> Result<FriendRequestClaim, RelationError>;
    async fn find_pending(
        &self,
        sender: UserId,
        receiver: UserId,
    ) -> Result<Option<FriendRequest>, RelationError>;
    /// Moves the pending request from `sender` to `receiver` to `status`.
    /// Returns `false` when there was no pending request to move.
    async fn resolve_pending_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        sender: UserId,
        receiver: UserId,
        status: FriendRequestStatus,
    ) -> Result<bool, RelationError>;
    /// Newest first.
    async fn list_pending_for(&self, receiver: UserId)
    -> Result<Vec<FriendRequest>, RelationError>;
}
