use crate::domain_model::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct FriendRequestId(pub uuid::Uuid);

impl fmt::Display for FriendRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FriendRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendRequestStatus::Pending => "pending",
            FriendRequestStatus::Accepted => "accepted",
            FriendRequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, FriendRequestStatus::Pending)
    }

    /// Only `pending` moves, and only to a terminal state.
    pub fn can_transition_to(&self, next: FriendRequestStatus) -> bool {
        matches!(self, FriendRequestStatus::Pending) && next.is_terminal()
    }
}

impl FromStr for FriendRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(FriendRequestStatus::Pending),
            "accepted" => Ok(FriendRequestStatus::Accepted),
            "rejected" => Ok(FriendRequestStatus::Rejected),
            other => Err(format!("unknown friend request status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendRequest {
    pub id: FriendRequestId,
    pub sender: UserId,
    pub receiver: UserId,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl FriendRequest {
    pub fn new_pending(sender: UserId, receiver: UserId) -> Self {
        Self {
            id: FriendRequestId(uuid::Uuid::new_v4()),
            sender,
            receiver,
            status: FriendRequestStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FriendRequestStatus::*;

    #[test]
    fn only_pending_transitions() {
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(Pending));
        for terminal in [Accepted, Rejected] {
            for next in [Pending, Accepted, Rejected] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn status_parses_store_tags() {
        for status in [Pending, Accepted, Rejected] {
            assert_eq!(status.as_str().parse::<FriendRequestStatus>(), Ok(status));
        }
        assert!("cancelled".parse::<FriendRequestStatus>().is_err());
    }
}
