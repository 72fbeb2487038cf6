//! # HTTP client for the profile backend
//!
//! [`ApiClient`] is a thin `reqwest` wrapper that knows the backend's paths
//! and response shapes. The page controller talks to it through the
//! [`ProfileApi`] trait, so tests can drive the controller with a fake and
//! the component never sees `reqwest` directly.
//!
//! ## Endpoints
//!
//! | Method | Request | Auth |
//! |--------|---------|------|
//! | [`user_id_by_username`](ProfileApi::user_id_by_username) | `GET /user/id/username<name>` | none |
//! | [`post_ids`](ProfileApi::post_ids) | `GET /user/<name>/posts` | bearer |
//! | [`posts`](ProfileApi::posts) | `GET /posts/<id>,<id>,...` | bearer |
//! | [`following`](ProfileApi::following) | `GET /user/<id>/following` | none |
//! | [`follow`](ProfileApi::follow) / [`unfollow`](ProfileApi::unfollow) | `POST` / `DELETE /user/follow/<id>` | bearer |
//!
//! Path segments are concatenated as-is, without escaping. The username
//! lookup in particular has no `/` between `username` and the name; that is
//! the path the page has always requested.
//!
//! Bearer calls take the token as an `Option`: with `None` no
//! `Authorization` header is sent and the backend answers 401, which comes
//! back as [`ApiError::Status`].

use std::future::Future;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use session::config::ApiConfig;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{
    FollowResponse, FollowingResponse, PostIdsResponse, PostsResponse, UserIdResponse,
};

/// The backend calls the profile page depends on.
pub trait ProfileApi {
    /// Resolve a username to a user id; `Ok(None)` if no such user.
    fn user_id_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<String>, ApiError>>;

    /// Ordered ids of the user's posts.
    fn post_ids(
        &self,
        username: &str,
        token: Option<&str>,
    ) -> impl Future<Output = Result<Vec<String>, ApiError>>;

    /// Post bodies for a batch of ids.
    fn posts(
        &self,
        ids: &[String],
        token: Option<&str>,
    ) -> impl Future<Output = Result<PostsResponse, ApiError>>;

    /// Ids of the users `user_id` follows.
    fn following(&self, user_id: &str) -> impl Future<Output = Result<Vec<String>, ApiError>>;

    fn follow(
        &self,
        user_id: &str,
        token: Option<&str>,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn unfollow(
        &self,
        user_id: &str,
        token: Option<&str>,
    ) -> impl Future<Output = Result<(), ApiError>>;
}

/// `reqwest`-backed [`ProfileApi`].
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the configured backend.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        #[allow(unused_mut)]
        let mut builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, authenticated = token.is_some(), "api request");
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let resp = self.request(Method::GET, path, token).send().await?;
        read_json(resp).await
    }

    async fn send_follow(
        &self,
        method: Method,
        user_id: &str,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let resp = self
            .request(method, &format!("/user/follow/{user_id}"), token)
            .send()
            .await?;
        let body: FollowResponse = read_json(resp).await?;
        if body.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                body.msg.unwrap_or_else(|| "request was not applied".to_string()),
            ))
        }
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

impl ProfileApi for ApiClient {
    async fn user_id_by_username(&self, username: &str) -> Result<Option<String>, ApiError> {
        let resp: UserIdResponse = self
            .get_json(&format!("/user/id/username{username}"), None)
            .await?;
        Ok(resp.user_id)
    }

    async fn post_ids(&self, username: &str, token: Option<&str>) -> Result<Vec<String>, ApiError> {
        let resp: PostIdsResponse = self
            .get_json(&format!("/user/{username}/posts"), token)
            .await?;
        Ok(resp.post_id_arr)
    }

    async fn posts(&self, ids: &[String], token: Option<&str>) -> Result<PostsResponse, ApiError> {
        self.get_json(&format!("/posts/{}", ids.join(",")), token)
            .await
    }

    async fn following(&self, user_id: &str) -> Result<Vec<String>, ApiError> {
        let resp: FollowingResponse = self
            .get_json(&format!("/user/{user_id}/following"), None)
            .await?;
        Ok(resp.following_arr)
    }

    async fn follow(&self, user_id: &str, token: Option<&str>) -> Result<(), ApiError> {
        self.send_follow(Method::POST, user_id, token).await
    }

    async fn unfollow(&self, user_id: &str, token: Option<&str>) -> Result<(), ApiError> {
        self.send_follow(Method::DELETE, user_id, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: format!("{}/", server.uri()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_username_lookup_path_has_no_separator() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/id/usernamealice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"userId": 3})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.user_id_by_username("alice").await.unwrap().as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_username_lookup_unknown_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/id/usernamenobody"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"userId": null})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.user_id_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_post_ids_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/alice/posts"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"postIdArr": [2, 1]})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.post_ids("alice", Some("tok")).await.unwrap(), vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_no_token_sends_no_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/alice/posts"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Missing Authorization Header"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.post_ids("alice", None).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "request failed with status code 401");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_posts_joins_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/p1,p2"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "posts": {"p1": {"content": "one"}, "p2": {"content": "two"}}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let ids = vec!["p1".to_string(), "p2".to_string()];
        let resp = client.posts(&ids, Some("tok")).await.unwrap();
        assert_eq!(resp.in_order(&ids).len(), 2);
    }

    #[tokio::test]
    async fn test_bad_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/3/following"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(matches!(client.following("3").await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_follow_and_unfollow() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/follow/9"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/user/follow/9"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({"msg": "User unfollow failed"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.follow("9", Some("tok")).await.unwrap();
        let err = client.unfollow("9", Some("tok")).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_follow_rejected_in_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/follow/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": false})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(matches!(client.follow("9", Some("tok")).await, Err(ApiError::Rejected(_))));
    }
}
