use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult};
use crate::session::ClientSession;
use network_types::*;

/// The remote operations the navigation pipeline and the action executor depend on.
///
/// `ApiClient` is the HTTP implementation; tests substitute in-memory fakes.
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Fetch a page payload for an API path such as `/posts/all`
    async fn fetch_page(&self, api_path: &str) -> ApiResult<FeedPage>;

    /// Create a new post
    async fn create_post(&self, request: &CreatePostRequest) -> ApiResult<()>;

    /// Toggle the authenticated user's like on a post
    async fn toggle_like(&self, post_id: PostId) -> ApiResult<LikeToggleResponse>;

    /// Replace the body of a post owned by the authenticated user
    async fn update_post_body(&self, post_id: PostId, body: &str) -> ApiResult<()>;

    /// Follow or unfollow a user, whichever the server decides applies
    async fn toggle_follow(&self, username: &str) -> ApiResult<FollowResponse>;
}

/// API client for communicating with the Network server
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<ClientSession>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>, session: Arc<ClientSession>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Helper to add session cookie and CSRF token to request if available
    fn add_auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let Some(credentials) = self.session.credentials() else {
            return req;
        };

        let mut cookie = format!("sessionid={}", credentials.session_id);
        let req = match &credentials.csrf_token {
            Some(token) => {
                cookie.push_str(&format!("; csrftoken={}", token));
                req.header("X-CSRFToken", token)
            }
            None => req,
        };
        req.header(reqwest::header::COOKIE, cookie)
    }

    /// Turn a non-success response into the matching `ApiError`
    async fn error_from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        status_error(status, &error_text)
    }

    /// Helper to handle API responses
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        if response.status().is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Helper for endpoints whose success carries no payload we consume
    async fn handle_empty_response(&self, response: reqwest::Response) -> ApiResult<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }
}

/// Error for a non-success status, preferring the server's `{error}` text
fn status_error(code: u16, body: &str) -> ApiError {
    let message = if let Ok(body) = serde_json::from_str::<ErrorResponse>(body) {
        body.error
    } else if body.contains("<html") || body.contains("<!DOCTYPE") {
        // Django debug pages and proxies answer with HTML
        format!("Server returned {} error. Please check the server URL.", code)
    } else if body.trim().is_empty() {
        format!("Server returned {}", code)
    } else {
        body.to_string()
    };

    ApiError::status(code, message)
}

#[async_trait]
impl FeedApi for ApiClient {
    async fn fetch_page(&self, api_path: &str) -> ApiResult<FeedPage> {
        let url = self.url(api_path);
        log::debug!(target: "api_calls", "GET {}", url);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn create_post(&self, request: &CreatePostRequest) -> ApiResult<()> {
        let url = self.url("/posts");
        log::debug!(target: "api_calls", "POST {}", url);
        let req = self.add_auth_header(self.client.post(&url).json(request));
        let response = req.send().await?;
        self.handle_empty_response(response).await
    }

    async fn toggle_like(&self, post_id: PostId) -> ApiResult<LikeToggleResponse> {
        let url = self.url(&format!("/posts/{}", post_id));
        log::debug!(target: "api_calls", "PUT {} (toggle_like)", url);
        let request = PostActionRequest {
            action: PostAction::ToggleLike,
        };
        let req = self.add_auth_header(self.client.put(&url).json(&request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn update_post_body(&self, post_id: PostId, body: &str) -> ApiResult<()> {
        let url = self.url(&format!("/posts/{}", post_id));
        log::debug!(target: "api_calls", "PUT {} (body)", url);
        let request = UpdatePostRequest {
            body: body.to_string(),
        };
        let req = self.add_auth_header(self.client.put(&url).json(&request));
        let response = req.send().await?;
        // 204 No Content on success
        self.handle_empty_response(response).await
    }

    async fn toggle_follow(&self, username: &str) -> ApiResult<FollowResponse> {
        let url = self.url(&format!("/follow/{}", urlencoding::encode(username)));
        log::debug!(target: "api_calls", "PUT {}", url);
        let req = self.add_auth_header(self.client.put(&url).json(&serde_json::json!({})));
        let response = req.send().await?;
        self.handle_response(response).await
    }
}
