//! Client paths and the API paths they fetch.
//!
//! Three views exist: all posts, the following feed and a user's profile.
//! Every other path falls back to all posts.

use serde::{Deserialize, Serialize};

pub const ALL_POSTS_PATH: &str = "/all";
pub const FOLLOWING_PATH: &str = "/following";
const PROFILE_PREFIX: &str = "/profile/";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "view", content = "user", rename_all = "snake_case")]
pub enum RouteKind {
    AllPosts,
    Following,
    Profile(String),
}

/// A client path paired with the API path that feeds it.
///
/// The pair is always built together and stored in history as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    pub ui_path: String,
    pub api_path: String,
    pub kind: RouteKind,
}

impl Route {
    pub fn all_posts() -> Self {
        Self {
            ui_path: ALL_POSTS_PATH.to_string(),
            api_path: "/posts/all".to_string(),
            kind: RouteKind::AllPosts,
        }
    }

    pub fn following() -> Self {
        Self {
            ui_path: FOLLOWING_PATH.to_string(),
            api_path: "/posts/following".to_string(),
            kind: RouteKind::Following,
        }
    }

    pub fn profile(user: &str) -> Self {
        let encoded = urlencoding::encode(user);
        Self {
            ui_path: format!("{}{}", PROFILE_PREFIX, encoded),
            api_path: format!("/posts/profile/{}", encoded),
            kind: RouteKind::Profile(user.to_string()),
        }
    }

    /// Build a route from an explicit path pair.
    ///
    /// The view is classified from `ui_path`; `api_path` is kept as given.
    pub fn from_paths(ui_path: &str, api_path: &str) -> Self {
        let kind = load_url(ui_path).kind;
        Self {
            ui_path: ui_path.to_string(),
            api_path: api_path.to_string(),
            kind,
        }
    }

    /// Username of a profile route
    pub fn profile_user(&self) -> Option<&str> {
        match &self.kind {
            RouteKind::Profile(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_all_posts(&self) -> bool {
        matches!(self.kind, RouteKind::AllPosts)
    }
}

/// Classify a raw client path into a route. Total: never fails.
pub fn load_url(path: &str) -> Route {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    if let Some(rest) = path.strip_prefix(PROFILE_PREFIX) {
        let segment = rest.split('/').next().unwrap_or_default();
        if segment.is_empty() {
            return Route::all_posts();
        }
        let user = urlencoding::decode(segment)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| segment.to_string());
        return Route::profile(&user);
    }

    match path.trim_end_matches('/') {
        FOLLOWING_PATH => Route::following(),
        _ => Route::all_posts(),
    }
}
