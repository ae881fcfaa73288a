use crate::application_port::{RelationError, RelationshipService};
use crate::domain_model::*;
use crate::domain_port::{FriendRequestClaim, FriendRequestRepo, FriendshipRepo, TxManager};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct RealRelationshipService {
    friendship_repo: Arc<dyn FriendshipRepo>,
    friend_request_repo: Arc<dyn FriendRequestRepo>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealRelationshipService {
    pub fn new(
        friendship_repo: Arc<dyn FriendshipRepo>,
        friend_request_repo: Arc<dyn FriendRequestRepo>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            friendship_repo,
            friend_request_repo,
            tx_manager,
        }
    }

    async fn resolve_request(
        &self,
        receiver: UserId,
        sender: UserId,
        status: FriendRequestStatus,
    ) -> Result<(), RelationError> {
        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| RelationError::Store(e.to_string()))?;

        let moved = self
            .friend_request_repo
            .resolve_pending_in_tx(&mut *tx, sender, receiver, status)
            .await?;
        if !moved {
            let _ = tx.rollback().await;
            return Err(RelationError::RequestNotFound);
        }

        // both directed rows land with the status change or not at all
        if status == FriendRequestStatus::Accepted {
            if let Err(e) = self
                .friendship_repo
                .insert_pair_in_tx(&mut *tx, UserPair::new(sender, receiver))
                .await
            {
                let _ = tx.rollback().await;
                return Err(e);
            }
        }

        tx.commit()
            .await
            .map_err(|e| RelationError::Store(e.to_string()))?;

        info!(%sender, %receiver, status = status.as_str(), "friend request resolved");
        Ok(())
    }
}

#[async_trait::async_trait]
impl RelationshipService for RealRelationshipService {
    async fn send_friend_request(
        &self,
        sender: UserId,
        receiver: UserId,
    ) -> Result<FriendRequest, RelationError> {
        if sender == receiver {
            return Err(RelationError::SelfRelation);
        }
        if self
            .friendship_repo
            .find_stats(sender, receiver)
            .await?
            .is_some()
        {
            return Err(RelationError::AlreadyFriends);
        }

        match self
            .friend_request_repo
            .claim_pending(sender, receiver)
            .await?
        {
            FriendRequestClaim::Won(request) => {
                info!(%sender, %receiver, request = %request.id, "friend request sent");
                Ok(request)
            }
            FriendRequestClaim::Existing => Err(RelationError::FriendRequestExists),
        }
    }

    async fn accept_friend_request(
        &self,
        receiver: UserId,
        sender: UserId,
    ) -> Result<(), RelationError> {
        self.resolve_request(receiver, sender, FriendRequestStatus::Accepted)
            .await
    }

    async fn reject_friend_request(
        &self,
        receiver: UserId,
        sender: UserId,
    ) -> Result<(), RelationError> {
        self.resolve_request(receiver, sender, FriendRequestStatus::Rejected)
            .await
    }

    async fn remove_friend(&self, me: UserId, other: UserId) -> Result<(), RelationError> {
        if me == other {
            return Err(RelationError::SelfRelation);
        }

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| RelationError::Store(e.to_string()))?;

        let removed = match self
            .friendship_repo
            .delete_pair_in_tx(&mut *tx, UserPair::new(me, other))
            .await
        {
            Ok(removed) => removed,
            Err(e) => {
                let _ = tx.rollback().await;
                return Err(e);
            }
        };
        if removed == 0 {
            let _ = tx.rollback().await;
            return Err(RelationError::NotFriends);
        }
        if removed != 2 {
            // deleting the orphan restores the invariant
            error!(%me, %other, removed, "friendship had a missing directed row");
        }

        tx.commit()
            .await
            .map_err(|e| RelationError::Store(e.to_string()))?;

        info!(%me, %other, "friendship removed");
        Ok(())
    }

    async fn pending_requests(
        &self,
        receiver: UserId,
    ) -> Result<Vec<FriendRequest>, RelationError> {
        self.friend_request_repo.list_pending_for(receiver).await
    }

    async fn relationship_status(
        &self,
        me: UserId,
        other: UserId,
    ) -> Result<RelationshipStatus, RelationError> {
        if me == other {
            return Ok(RelationshipStatus::Myself);
        }

        if let Some(stats) = self.friendship_repo.find_stats(me, other).await? {
            return Ok(RelationshipStatus::Friends {
                level: stats.level,
                affinity_score: stats.affinity_score,
            });
        }
        if self
            .friend_request_repo
            .find_pending(me, other)
            .await?
            .is_some()
        {
            return Ok(RelationshipStatus::PendingSent);
        }
        if self
            .friend_request_repo
            .find_pending(other, me)
            .await?
            .is_some()
        {
            return Ok(RelationshipStatus::PendingReceived);
        }

        Ok(RelationshipStatus::Stranger)
    }

    async fn level_progress(&self, me: UserId, other: UserId) -> Option<LevelProgress> {
        if me == other {
            return None;
        }
        match self.friendship_repo.find_stats(me, other).await {
            Ok(stats) => stats.map(|s| s.progress()),
            Err(e) => {
                warn!(%me, %other, "friendship lookup failed, hiding progress: {e}");
                None
            }
        }
    }

    async fn friend_circle(&self, user: UserId) -> Result<FriendCircle, RelationError> {
        let friendships = self.friendship_repo.list_for_user(user).await?;
        Ok(FriendCircle::group(friendships))
    }
}
