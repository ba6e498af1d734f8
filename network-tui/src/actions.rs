//! Client-initiated mutations and how their results reach the view.
//!
//! Each action is split in two: a synchronous `begin` that snapshots what a
//! rollback needs (and disables whatever must not be triggered twice), and a
//! `settle` that applies exactly one of commit or rollback once the request
//! has finished. The request itself runs in between, on
//! [`OptimisticActionExecutor`].

use std::sync::Arc;
use std::time::Instant;

use network_types::{CreatePostRequest, FeedPage, FollowResponse, LikeToggleResponse, PostId};

use crate::api::{ApiError, ApiResult, FeedApi};
use crate::logging::LogConfig;
use crate::notice::NoticeSlot;
use crate::session::ClientSession;
use crate::view::{EditSubmission, EntryRef, FollowButton, LikeAffordance, ViewPanelManager};

pub const NO_CHANGES_NOTICE: &str = "No changes made.";
pub const POST_UPDATED_NOTICE: &str = "Post updated.";
pub const POST_CREATED_NOTICE: &str = "Post created.";

/// Tagged result of a mutation; callers apply exactly one transition per variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome<T> {
    Committed(T),
    Failed { reason: String },
}

impl<T> ActionOutcome<T> {
    pub fn failed(reason: impl Into<String>) -> Self {
        ActionOutcome::Failed { reason: reason.into() }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, ActionOutcome::Committed(_))
    }

    fn from_api(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => ActionOutcome::Committed(value),
            Err(e) => ActionOutcome::Failed {
                reason: categorize_error(&e),
            },
        }
    }
}

/// Turn an API error into a message fit for a notice
pub fn categorize_error(error: &ApiError) -> String {
    match error {
        ApiError::Transport(_) => "Network Error: Connection failed. Check your network and try again".to_string(),
        ApiError::Payload(_) => "Error: Unexpected response from server".to_string(),
        ApiError::Status { code: 401 | 403, .. } => {
            "Authorization Error: Session expired or insufficient permissions. Please log in again".to_string()
        }
        ApiError::Status { code: 400, message } => format!("Validation Error: {}", message),
        ApiError::Status { code: 404, message } => format!("Not Found: {}", message),
        ApiError::Status { message, .. } if error.is_server_error() => format!("Server Error: {}", message),
        ApiError::Status { message, .. } => format!("Error: {}", message),
    }
}

/// Issues mutations against the remote API on behalf of the session's user
#[derive(Clone)]
pub struct OptimisticActionExecutor {
    api: Arc<dyn FeedApi>,
    session: Arc<ClientSession>,
    log_config: LogConfig,
}

impl OptimisticActionExecutor {
    pub fn new(api: Arc<dyn FeedApi>, session: Arc<ClientSession>, log_config: LogConfig) -> Self {
        Self {
            api,
            session,
            log_config,
        }
    }

    pub fn api(&self) -> &Arc<dyn FeedApi> {
        &self.api
    }

    pub fn session(&self) -> &Arc<ClientSession> {
        &self.session
    }

    /// Fetch the page behind a navigation; load failures are rendered by the router
    pub async fn load_page(&self, api_path: &str) -> ApiResult<FeedPage> {
        log_api_call!(self.log_config, "GET {}", api_path);
        let result = self.api.fetch_page(api_path).await;
        if let Err(e) = &result {
            log::warn!("GET {} failed: {}", api_path, e);
        }
        result
    }

    pub async fn toggle_like(&self, post_id: PostId) -> ActionOutcome<LikeToggleResponse> {
        log_api_call!(self.log_config, "PUT /posts/{} toggle_like", post_id);
        let outcome = ActionOutcome::from_api(self.api.toggle_like(post_id).await);
        log_action!(self.log_config, "toggle like on post {}: {:?}", post_id, outcome);
        outcome
    }

    /// Follow or unfollow `username`. Refused without a request for
    /// anonymous sessions and for the session's own user.
    pub async fn toggle_follow(&self, username: &str) -> ActionOutcome<FollowResponse> {
        if !self.session.is_authenticated() {
            return ActionOutcome::failed("Log in to follow users.");
        }
        if self.session.is_current_user(username) {
            return ActionOutcome::failed("You cannot follow yourself.");
        }

        log_api_call!(self.log_config, "PUT /follow/{}", username);
        let outcome = ActionOutcome::from_api(self.api.toggle_follow(username).await);
        log_action!(self.log_config, "toggle follow on {}: {:?}", username, outcome);
        outcome
    }

    /// Submit a new top-level post; blank bodies never reach the server
    pub async fn create_post(&self, body: &str) -> ActionOutcome<()> {
        let body = body.trim();
        if body.is_empty() {
            return ActionOutcome::failed("Post cannot be empty.");
        }

        log_api_call!(self.log_config, "POST /posts ({} chars)", body.len());
        let outcome = ActionOutcome::from_api(self.api.create_post(&CreatePostRequest::top_level(body)).await);
        log_action!(self.log_config, "create post: {:?}", outcome);
        outcome
    }

    pub async fn update_post_body(&self, post_id: PostId, body: &str) -> ActionOutcome<()> {
        log_api_call!(self.log_config, "PUT /posts/{} body", post_id);
        let outcome = ActionOutcome::from_api(self.api.update_post_body(post_id, body).await);
        log_action!(self.log_config, "update post {}: {:?}", post_id, outcome);
        outcome
    }

    /// Run the request for a begun action
    pub async fn execute(&self, action: PendingAction) -> SettledAction {
        match action {
            PendingAction::Like(pending) => {
                let outcome = self.toggle_like(pending.entry.post_id).await;
                SettledAction::Like(pending, outcome)
            }
            PendingAction::Follow(pending) => {
                let outcome = self.toggle_follow(&pending.username).await;
                SettledAction::Follow(pending, outcome)
            }
            PendingAction::Edit(pending) => {
                let outcome = self.update_post_body(pending.entry.post_id, &pending.new_body).await;
                SettledAction::Edit(pending, outcome)
            }
            PendingAction::Create(pending) => {
                let outcome = self.create_post(&pending.body).await;
                SettledAction::Create(pending, outcome)
            }
        }
    }
}

/// Like state captured when the toggle was pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLike {
    pub entry: EntryRef,
    pub previous: LikeAffordance,
}

impl PendingLike {
    pub fn begin(panels: &mut ViewPanelManager, entry: EntryRef) -> Option<Self> {
        let rendered = panels.entry_mut(&entry)?;
        Some(Self {
            entry,
            previous: rendered.like,
        })
    }

    pub fn settle(self, outcome: ActionOutcome<LikeToggleResponse>, panels: &mut ViewPanelManager, notices: &mut NoticeSlot) {
        match outcome {
            ActionOutcome::Committed(response) => {
                if let Some(rendered) = panels.entry_mut(&self.entry) {
                    rendered.apply_like(&response);
                }
            }
            ActionOutcome::Failed { reason } => {
                if let Some(rendered) = panels.entry_mut(&self.entry) {
                    rendered.restore_like(self.previous);
                }
                notices.failure(format!("Could not update like. {}", reason));
            }
        }
    }
}

/// Follow button and count as they were before the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFollow {
    pub render_id: u64,
    pub username: String,
    pub previous: FollowButton,
    pub previous_count: u32,
}

impl PendingFollow {
    /// Disable the button on the profile header built by `render_id`.
    ///
    /// `None` when there is no button or a request is already in flight.
    pub fn begin(panels: &mut ViewPanelManager, render_id: u64) -> Option<Self> {
        let header = panels.profile_header_mut(render_id)?;
        let previous_count = header.followers_count;
        let username = header.username.clone();
        let button = header.follow.as_mut()?;
        if !button.enabled {
            return None;
        }

        let previous = button.clone();
        button.begin_request();
        Some(Self {
            render_id,
            username,
            previous,
            previous_count,
        })
    }

    /// Settle the request; the button ends enabled on every path
    pub fn settle(self, outcome: ActionOutcome<FollowResponse>, panels: &mut ViewPanelManager, notices: &mut NoticeSlot) {
        let header = panels.profile_header_mut(self.render_id);

        match outcome {
            ActionOutcome::Committed(response) => {
                if let Some(header) = header {
                    if let Some(button) = header.follow.as_mut() {
                        button.commit(response.action, Instant::now());
                    }
                    header.apply_follow(response.action);
                }
                let message = if response.message.trim().is_empty() {
                    format!("{} {}.", capitalize(response.action.as_str()), self.username)
                } else {
                    response.message
                };
                notices.success(message);
            }
            ActionOutcome::Failed { reason } => {
                if let Some(header) = header {
                    let mut restored = self.previous;
                    restored.enabled = true;
                    header.follow = Some(restored);
                    header.followers_count = self.previous_count;
                }
                notices.failure(format!("Could not update follow. {}", reason));
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// An inline edit waiting on the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub entry: EntryRef,
    pub previous_body: String,
    pub new_body: String,
}

impl PendingEdit {
    /// Resolve a save press. Unchanged drafts close the editor with a notice
    /// and never produce a request.
    pub fn begin(panels: &mut ViewPanelManager, entry: EntryRef, notices: &mut NoticeSlot) -> Option<Self> {
        let rendered = panels.entry_mut(&entry)?;
        match rendered.submit_edit() {
            EditSubmission::Submit(new_body) => Some(Self {
                entry,
                previous_body: rendered.post.body.clone(),
                new_body,
            }),
            EditSubmission::Unchanged => {
                notices.info(NO_CHANGES_NOTICE);
                None
            }
            EditSubmission::Ignored => None,
        }
    }

    pub fn settle(self, outcome: ActionOutcome<()>, panels: &mut ViewPanelManager, notices: &mut NoticeSlot) {
        let rendered = panels.entry_mut(&self.entry);
        match outcome {
            ActionOutcome::Committed(()) => {
                if let Some(rendered) = rendered {
                    rendered.commit_edit(self.new_body);
                }
                notices.success(POST_UPDATED_NOTICE);
            }
            ActionOutcome::Failed { reason } => {
                if let Some(rendered) = rendered {
                    rendered.post.body = self.previous_body;
                    rendered.fail_edit();
                }
                notices.failure(format!("Could not update post. {}", reason));
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCreate {
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Like(PendingLike),
    Follow(PendingFollow),
    Edit(PendingEdit),
    Create(PendingCreate),
}

/// A pending action paired with how its request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettledAction {
    Like(PendingLike, ActionOutcome<LikeToggleResponse>),
    Follow(PendingFollow, ActionOutcome<FollowResponse>),
    Edit(PendingEdit, ActionOutcome<()>),
    Create(PendingCreate, ActionOutcome<()>),
}
