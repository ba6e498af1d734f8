//! In-memory `FeedApi` used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use network_types::{CreatePostRequest, FeedPage, FollowAction, FollowResponse, LikeToggleResponse, PostId};

use crate::api::{ApiError, ApiResult, FeedApi};

#[derive(Default)]
struct FakeState {
    pages: HashMap<String, FeedPage>,
    fetches: Vec<String>,
    fail_pages: bool,
    like_response: Option<LikeToggleResponse>,
    fail_likes: bool,
    like_calls: Vec<PostId>,
    follow_action: Option<FollowAction>,
    fail_follows: bool,
    follow_calls: Vec<String>,
    fail_updates: bool,
    update_calls: Vec<(PostId, String)>,
    fail_creates: bool,
    created: Vec<CreatePostRequest>,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn set_page(&self, api_path: &str, page: FeedPage) {
        self.with(|s| {
            s.pages.insert(api_path.to_string(), page);
        });
    }

    pub fn fail_pages(&self, fail: bool) {
        self.with(|s| s.fail_pages = fail);
    }

    pub fn fetches(&self) -> Vec<String> {
        self.with(|s| s.fetches.clone())
    }

    pub fn set_like_response(&self, response: LikeToggleResponse) {
        self.with(|s| s.like_response = Some(response));
    }

    pub fn fail_likes(&self, fail: bool) {
        self.with(|s| s.fail_likes = fail);
    }

    pub fn like_calls(&self) -> Vec<PostId> {
        self.with(|s| s.like_calls.clone())
    }

    pub fn set_follow_action(&self, action: FollowAction) {
        self.with(|s| s.follow_action = Some(action));
    }

    pub fn fail_follows(&self, fail: bool) {
        self.with(|s| s.fail_follows = fail);
    }

    pub fn follow_calls(&self) -> Vec<String> {
        self.with(|s| s.follow_calls.clone())
    }

    pub fn fail_updates(&self, fail: bool) {
        self.with(|s| s.fail_updates = fail);
    }

    pub fn update_calls(&self) -> Vec<(PostId, String)> {
        self.with(|s| s.update_calls.clone())
    }

    pub fn fail_creates(&self, fail: bool) {
        self.with(|s| s.fail_creates = fail);
    }

    pub fn created_posts(&self) -> Vec<CreatePostRequest> {
        self.with(|s| s.created.clone())
    }
}

#[async_trait]
impl FeedApi for FakeApi {
    async fn fetch_page(&self, api_path: &str) -> ApiResult<FeedPage> {
        self.with(|s| {
            s.fetches.push(api_path.to_string());
            if s.fail_pages {
                return Err(ApiError::status(500, "Internal Server Error"));
            }
            Ok(s.pages.get(api_path).cloned().unwrap_or_default())
        })
    }

    async fn create_post(&self, request: &CreatePostRequest) -> ApiResult<()> {
        self.with(|s| {
            if s.fail_creates {
                return Err(ApiError::status(400, "Post rejected"));
            }
            s.created.push(request.clone());
            Ok(())
        })
    }

    async fn toggle_like(&self, post_id: PostId) -> ApiResult<LikeToggleResponse> {
        self.with(|s| {
            s.like_calls.push(post_id);
            if s.fail_likes {
                return Err(ApiError::status(500, "Internal Server Error"));
            }
            Ok(s.like_response.unwrap_or(LikeToggleResponse { likes: 1, liked: true }))
        })
    }

    async fn update_post_body(&self, post_id: PostId, body: &str) -> ApiResult<()> {
        self.with(|s| {
            s.update_calls.push((post_id, body.to_string()));
            if s.fail_updates {
                return Err(ApiError::status(403, "Forbidden"));
            }
            Ok(())
        })
    }

    async fn toggle_follow(&self, username: &str) -> ApiResult<FollowResponse> {
        self.with(|s| {
            s.follow_calls.push(username.to_string());
            if s.fail_follows {
                return Err(ApiError::status(502, "Bad Gateway"));
            }
            let action = s.follow_action.unwrap_or(FollowAction::Followed);
            Ok(FollowResponse {
                message: format!("You have {} {}", action.as_str(), username),
                action,
            })
        })
    }
}
