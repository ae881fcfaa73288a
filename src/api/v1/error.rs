use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (code, message, status) = if let Some(code) = err.find::<ApiErrorCode>() {
        (code.clone(), code.to_string(), StatusCode::OK)
    } else if err.is_not_found() {
        (
            ApiErrorCode::NotFound,
            ApiErrorCode::NotFound.to_string(),
            StatusCode::NOT_FOUND,
        )
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        (ApiErrorCode::BadRequest, e.to_string(), StatusCode::BAD_REQUEST)
    } else if err.find::<reject::MethodNotAllowed>().is_some() {
        (
            ApiErrorCode::NotFound,
            ApiErrorCode::NotFound.to_string(),
            StatusCode::METHOD_NOT_ALLOWED,
        )
    } else {
        (
            ApiErrorCode::InternalError,
            format!("Unhandled error: {:?}", err),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    };

    let json = warp::reply::json(&ApiResponse::<()>::err(code, message));
    Ok(warp::reply::with_status(json, status))
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Error, Serialize)]
pub enum ApiErrorCode {
    #[error("Token is not valid")]
    InvalidToken,
    #[error("You cannot befriend yourself")]
    SelfRelation,
    #[error("A friend request is already pending")]
    FriendRequestExists,
    #[error("You are already friends")]
    AlreadyFriends,
    #[error("No pending friend request")]
    RequestNotFound,
    #[error("You are not friends")]
    NotFriends,
    #[error("Too many users in one request")]
    BatchTooLarge,
    #[error("Malformed request")]
    BadRequest,
    #[error("Not found")]
    NotFound,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<AuthError> for ApiErrorCode {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::TokenInvalid | AuthError::TokenExpired => ApiErrorCode::InvalidToken,
            AuthError::InternalError(e) => ApiErrorCode::internal(e),
        }
    }
}

impl From<RelationError> for ApiErrorCode {
    fn from(error: RelationError) -> Self {
        match error {
            RelationError::SelfRelation => ApiErrorCode::SelfRelation,
            RelationError::FriendRequestExists => ApiErrorCode::FriendRequestExists,
            RelationError::AlreadyFriends => ApiErrorCode::AlreadyFriends,
            RelationError::RequestNotFound => ApiErrorCode::RequestNotFound,
            RelationError::NotFriends => ApiErrorCode::NotFriends,
            RelationError::Store(e) => ApiErrorCode::internal(e),
        }
    }
}
