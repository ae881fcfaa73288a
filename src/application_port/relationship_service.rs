use crate::domain_model::*;

#[derive(Debug, thiserror::Error)]
pub enum RelationError {
    #[error("cannot befriend yourself")]
    SelfRelation,
    #[error("friend request already exists")]
    FriendRequestExists,
    #[error("friendship already established")]
    AlreadyFriends,
    #[error("no pending friend request")]
    RequestNotFound,
    #[error("not friends")]
    NotFriends,
    #[error("store error: {0}")]
    Store(String),
}

#[async_trait::async_trait]
pub trait RelationshipService: Send + Sync {
    async fn send_friend_request(
        &self,
        sender: UserId,
        receiver: UserId,
    ) -> Result<FriendRequest, RelationError>;
    async fn accept_friend_request(
        &self,
        receiver: UserId,
        sender: UserId,
    ) -> Result<(), RelationError>;
    async fn reject_friend_request(
        &self,
        receiver: UserId,
        sender: UserId,
    ) -> Result<(), RelationError>;
    async fn remove_friend(&self, me: UserId, other: UserId) -> Result<(), RelationError>;
    async fn pending_requests(&self, receiver: UserId)
    -> Result<Vec<FriendRequest>, RelationError>;
    async fn relationship_status(
        &self,
        me: UserId,
        other: UserId,
    ) -> Result<RelationshipStatus, RelationError>;
    /// `None` when the pair are not friends or the lookup failed.
    async fn level_progress(&self, me: UserId, other: UserId) -> Option<LevelProgress>;
    async fn friend_circle(&self, user: UserId) -> Result<FriendCircle, RelationError>;
}
