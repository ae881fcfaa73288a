use super::error::*;
use super::handler;
use crate::application_port::AuthService;
use crate::domain_model::UserId;
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, http, reject};

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let affinity = warp::path!("affinity" / UserId)
        .and(warp::get())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.affinity_service.clone()))
        .and_then(handler::get_affinity);

    let affinity_batch = warp::path!("affinity")
        .and(warp::post())
        .and(warp::body::content_length_limit(64 * 1024))
        .and(warp::body::json())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.affinity_service.clone()))
        .and_then(handler::affinity_batch);

    let friendship = warp::path!("friendship" / UserId)
        .and(warp::get())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.relationship_service.clone()))
        .and_then(handler::get_friendship);

    let friend_circle = warp::path!("friend_circle" / UserId)
        .and(warp::get())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.relationship_service.clone()))
        .and_then(handler::get_friend_circle);

    let remove_friend = warp::path!("friends" / UserId)
        .and(warp::delete())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.relationship_service.clone()))
        .and_then(handler::remove_friend);

    let list_requests = warp::path!("friend_requests")
        .and(warp::get())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.relationship_service.clone()))
        .and_then(handler::list_friend_requests);

    let send_request = warp::path!("friend_requests")
        .and(warp::post())
        .and(warp::body::content_length_limit(4 * 1024))
        .and(warp::body::json())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.relationship_service.clone()))
        .and_then(handler::send_friend_request);

    let accept_request = warp::path!("friend_requests" / UserId / "accept")
        .and(warp::post())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.relationship_service.clone()))
        .and_then(handler::accept_friend_request);

    let reject_request = warp::path!("friend_requests" / UserId / "reject")
        .and(warp::post())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.relationship_service.clone()))
        .and_then(handler::reject_friend_request);

    affinity
        .or(affinity_batch)
        .or(friendship)
        .or(friend_circle)
        .or(remove_friend)
        .or(list_requests)
        .or(send_request)
        .or(accept_request)
        .or(reject_request)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

fn with_verification(
    auth_service: Arc<dyn AuthService>,
) -> impl Filter<Extract = (UserId,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>(http::header::AUTHORIZATION.as_ref()).and_then(
        move |header: Option<String>| {
            let auth_service = auth_service.clone();
            async move {
                let token = header
                    .as_deref()
                    .and_then(|h| h.strip_prefix("Bearer "))
                    .ok_or_else(|| reject::custom(ApiErrorCode::InvalidToken))?;
                let user_id = auth_service
                    .verify_token(token)
                    .await
                    .map_err(ApiErrorCode::from)
                    .map_err(reject::custom)?;
                Ok::<UserId, warp::Rejection>(user_id)
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::v1::recover_error;
    use crate::domain_model::{FriendshipLevel, FriendshipStats};
    use crate::infra_memory::MemoryStore;
    use serde_json::Value;
    use std::time::Duration;
    use warp::http::StatusCode;

    fn user(n: u128) -> UserId {
        UserId(uuid::Uuid::from_u128(n))
    }

    fn api(
        store: MemoryStore,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone {
        let server = Arc::new(Server::in_memory(store, Duration::from_millis(200)));
        warp::path("api")
            .and(warp::path("v1"))
            .and(routes(server))
            .recover(recover_error)
    }

    fn bearer(user: UserId) -> String {
        format!("Bearer {user}")
    }

    fn body<B: AsRef<[u8]>>(res: &warp::http::Response<B>) -> Value {
        serde_json::from_slice(res.body().as_ref()).unwrap()
    }

    #[tokio::test]
    async fn affinity_is_labeled_and_hidden_for_self() {
        let store = MemoryStore::new();
        store.set_affinity(user(1), user(2), Some(80)).await;
        let api = api(store.clone());

        let res = warp::test::request()
            .method("GET")
            .path(&format!("/api/v1/affinity/{}", user(2)))
            .header("authorization", bearer(user(1)))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let json = body(&res);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["affinity"]["score"], 80);
        assert_eq!(json["data"]["affinity"]["label"], "Sintonia Incrível!");

        let res = warp::test::request()
            .method("GET")
            .path(&format!("/api/v1/affinity/{}", user(1)))
            .header("authorization", bearer(user(1)))
            .reply(&api)
            .await;
        assert_eq!(body(&res)["data"]["affinity"], Value::Null);
    }

    #[tokio::test]
    async fn batch_affinity_defaults_unknown_pairs_to_zero() {
        let store = MemoryStore::new();
        store.set_affinity(user(1), user(3), Some(45)).await;
        let api = api(store.clone());

        let res = warp::test::request()
            .method("POST")
            .path("/api/v1/affinity")
            .header("authorization", bearer(user(1)))
            .json(&serde_json::json!({ "user_ids": [user(2), user(3)] }))
            .reply(&api)
            .await;
        let json = body(&res);
        assert_eq!(json["data"][0]["affinity"]["score"], 0);
        assert_eq!(json["data"][0]["affinity"]["label"], "Conhecidos da Praça");
        assert_eq!(json["data"][1]["affinity"]["label"], "Começando a se conhecer");
    }

    #[tokio::test]
    async fn missing_or_bad_token_is_rejected() {
        let api = api(MemoryStore::new());

        let res = warp::test::request()
            .method("GET")
            .path("/api/v1/friend_requests")
            .reply(&api)
            .await;
        let json = body(&res);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "InvalidToken");

        let res = warp::test::request()
            .method("GET")
            .path("/api/v1/friend_requests")
            .header("authorization", "Bearer nobody")
            .reply(&api)
            .await;
        assert_eq!(body(&res)["error"]["code"], "InvalidToken");
    }

    #[tokio::test]
    async fn request_lifecycle_over_http() {
        let store = MemoryStore::new();
        let api = api(store.clone());

        let res = warp::test::request()
            .method("POST")
            .path("/api/v1/friend_requests")
            .header("authorization", bearer(user(1)))
            .json(&serde_json::json!({ "receiver_id": user(2) }))
            .reply(&api)
            .await;
        assert_eq!(body(&res)["data"]["status"], "pending");

        let res = warp::test::request()
            .method("POST")
            .path("/api/v1/friend_requests")
            .header("authorization", bearer(user(2)))
            .json(&serde_json::json!({ "receiver_id": user(1) }))
            .reply(&api)
            .await;
        assert_eq!(body(&res)["error"]["code"], "FriendRequestExists");

        let res = warp::test::request()
            .method("GET")
            .path("/api/v1/friend_requests")
            .header("authorization", bearer(user(2)))
            .reply(&api)
            .await;
        assert_eq!(body(&res)["data"].as_array().unwrap().len(), 1);

        let res = warp::test::request()
            .method("POST")
            .path(&format!("/api/v1/friend_requests/{}/accept", user(1)))
            .header("authorization", bearer(user(2)))
            .reply(&api)
            .await;
        assert_eq!(body(&res)["success"], true);

        store
            .set_stats(
                user(1),
                user(2),
                FriendshipStats {
                    level: FriendshipLevel::Conhecido,
                    interaction_count: 2,
                    affinity_score: 10,
                },
            )
            .await;
        let res = warp::test::request()
            .method("GET")
            .path(&format!("/api/v1/friendship/{}", user(2)))
            .header("authorization", bearer(user(1)))
            .reply(&api)
            .await;
        let json = body(&res);
        assert_eq!(json["data"]["relationship"]["status"], "friends");
        assert_eq!(json["data"]["badge"]["label"], "Conhecido da Praça");
        assert_eq!(json["data"]["progress"]["requirement"], "2/3 interações");
        assert_eq!(json["data"]["progress"]["next_level_label"], "Vizinho Próximo");

        let res = warp::test::request()
            .method("DELETE")
            .path(&format!("/api/v1/friends/{}", user(1)))
            .header("authorization", bearer(user(2)))
            .reply(&api)
            .await;
        assert_eq!(body(&res)["success"], true);

        let res = warp::test::request()
            .method("GET")
            .path(&format!("/api/v1/friend_circle/{}", user(1)))
            .header("authorization", bearer(user(1)))
            .reply(&api)
            .await;
        let json = body(&res);
        assert_eq!(json["data"]["total"], 0);
        assert_eq!(json["data"]["summary"], "0 vínculos na cidade");
    }

    #[tokio::test]
    async fn oversized_batch_is_refused() {
        let api = api(MemoryStore::new());
        let ids: Vec<UserId> = (0..=handler::MAX_AFFINITY_BATCH as u128).map(user).collect();

        let res = warp::test::request()
            .method("POST")
            .path("/api/v1/affinity")
            .header("authorization", bearer(user(1)))
            .json(&serde_json::json!({ "user_ids": ids }))
            .reply(&api)
            .await;
        assert_eq!(body(&res)["error"]["code"], "BatchTooLarge");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let api = api(MemoryStore::new());
        let res = warp::test::request()
            .method("GET")
            .path("/api/v1/nowhere")
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
