use serde::{Deserialize, Serialize};

/// Marker sent in `PUT /posts/{id}` bodies that mutate post state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostAction {
    ToggleLike,
}

/// What a follow toggle did on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowAction {
    Followed,
    Unfollowed,
}

impl FollowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowAction::Followed => "followed",
            FollowAction::Unfollowed => "unfollowed",
        }
    }

    /// True when the authenticated user now follows the target
    pub fn is_following(&self) -> bool {
        matches!(self, FollowAction::Followed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorScheme {
    #[default]
    Default,
    Dark,
    Light,
    Solarized,
}
