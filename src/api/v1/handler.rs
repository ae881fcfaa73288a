use super::error::*;
use crate::application_port::{AffinityService, RelationshipService};
use crate::domain_model::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::{self, reject};

pub const MAX_AFFINITY_BATCH: usize = 100;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

// region affinity

/// `affinity` is null when a resident looks at their own profile.
#[derive(Debug, Serialize)]
pub struct AffinityEntry {
    pub user_id: UserId,
    pub affinity: Option<AffinityView>,
}

pub async fn get_affinity(
    other: UserId,
    me: UserId,
    affinity_service: Arc<dyn AffinityService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let affinity = affinity_service.affinity(me, other).await;
    let entry = AffinityEntry {
        user_id: other,
        affinity,
    };
    Ok(warp::reply::json(&ApiResponse::ok(entry)))
}

#[derive(Debug, Deserialize)]
pub struct AffinityBatchRequest {
    pub user_ids: Vec<UserId>,
}

pub async fn affinity_batch(
    body: AffinityBatchRequest,
    me: UserId,
    affinity_service: Arc<dyn AffinityService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    if body.user_ids.len() > MAX_AFFINITY_BATCH {
        return Err(reject::custom(ApiErrorCode::BatchTooLarge));
    }

    let entries: Vec<AffinityEntry> = affinity_service
        .affinity_many(me, &body.user_ids)
        .await
        .into_iter()
        .map(|(user_id, affinity)| AffinityEntry { user_id, affinity })
        .collect();
    Ok(warp::reply::json(&ApiResponse::ok(entries)))
}

// endregion

// region friendship

#[derive(Debug, Serialize)]
pub struct LevelBadge {
    pub level: FriendshipLevel,
    pub label: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
}

impl From<FriendshipLevel> for LevelBadge {
    fn from(level: FriendshipLevel) -> Self {
        Self {
            level,
            label: level.label(),
            description: level.description(),
            emoji: level.emoji(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FriendshipResponse {
    pub user_id: UserId,
    pub relationship: RelationshipStatus,
    pub badge: Option<LevelBadge>,
    pub progress: Option<LevelProgress>,
}

pub async fn get_friendship(
    other: UserId,
    me: UserId,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let relationship = relationship_service
        .relationship_status(me, other)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let (badge, progress) = match relationship {
        RelationshipStatus::Friends { level, .. } => (
            Some(LevelBadge::from(level)),
            relationship_service.level_progress(me, other).await,
        ),
        _ => (None, None),
    };

    let response = FriendshipResponse {
        user_id: other,
        relationship,
        badge,
        progress,
    };
    Ok(warp::reply::json(&ApiResponse::ok(response)))
}

pub async fn get_friend_circle(
    user: UserId,
    _me: UserId,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let circle = relationship_service
        .friend_circle(user)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&ApiResponse::ok(circle)))
}

pub async fn remove_friend(
    other: UserId,
    me: UserId,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    relationship_service
        .remove_friend(me, other)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&ApiResponse::ok(())))
}

// endregion

// region friend requests

pub async fn list_friend_requests(
    me: UserId,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let requests = relationship_service
        .pending_requests(me)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&ApiResponse::ok(requests)))
}

#[derive(Debug, Deserialize)]
pub struct SendFriendRequest {
    pub receiver_id: UserId,
}

pub async fn send_friend_request(
    body: SendFriendRequest,
    me: UserId,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let request = relationship_service
        .send_friend_request(me, body.receiver_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&ApiResponse::ok(request)))
}

pub async fn accept_friend_request(
    sender: UserId,
    me: UserId,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    relationship_service
        .accept_friend_request(me, sender)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&ApiResponse::ok(())))
}

pub async fn reject_friend_request(
    sender: UserId,
    me: UserId,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    relationship_service
        .reject_friend_request(me, sender)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&ApiResponse::ok(())))
}

// endregion
