use super::store::{MemoryStore, MemoryTx};
use crate::application_port::RelationError;
use crate::domain_model::*;
use crate::domain_port::{FriendRequestClaim, FriendRequestRepo, StorageTx, downcast_tx};

fn is_pending_between(request: &FriendRequest, pair: UserPair) -> bool {
    request.status == FriendRequestStatus::Pending
        && UserPair::new(request.sender, request.receiver) == pair
}

#[async_trait::async_trait]
impl FriendRequestRepo for MemoryStore {
    async fn claim_pending(
        &self,
        sender: UserId,
        receiver: UserId,
    ) -> Result<FriendRequestClaim, RelationError> {
        let mut state = self.state.lock().await;
        let pair = UserPair::new(sender, receiver);
        if state.requests.iter().any(|r| is_pending_between(r, pair)) {
            return Ok(FriendRequestClaim::Existing);
        }

        let request = FriendRequest::new_pending(sender, receiver);
        state.requests.push(request.clone());
        Ok(FriendRequestClaim::Won(request))
    }

    async fn find_pending(
        &self,
        sender: UserId,
        receiver: UserId,
    ) -> Result<Option<FriendRequest>, RelationError> {
        let state = self.state.lock().await;
        Ok(state
            .requests
            .iter()
            .find(|r| {
                r.sender == sender
                    && r.receiver == receiver
                    && r.status == FriendRequestStatus::Pending
            })
            .cloned())
    }

    async fn resolve_pending_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        sender: UserId,
        receiver: UserId,
        status: FriendRequestStatus,
    ) -> Result<bool, RelationError> {
        let tx = downcast_tx::<MemoryTx>(tx).map_err(|e| RelationError::Store(e.to_string()))?;
        let pending = tx.working.requests.iter_mut().find(|r| {
            r.sender == sender && r.receiver == receiver && r.status == FriendRequestStatus::Pending
        });

        match pending {
            Some(request) if request.status.can_transition_to(status) => {
                request.status = status;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_pending_for(
        &self,
        receiver: UserId,
    ) -> Result<Vec<FriendRequest>, RelationError> {
        let state = self.state.lock().await;
        let mut out: Vec<FriendRequest> = state
            .requests
            .iter()
            .filter(|r| r.receiver == receiver && r.status == FriendRequestStatus::Pending)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }
}
