use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::{FollowAction, PostAction};

/// Server-side post identifier
pub type PostId = u64;

/// Format the server uses when serializing post timestamps
pub const SERVER_TIMESTAMP_FORMAT: &str = "%b %d %Y, %I:%M %p";

/// Parse a server timestamp such as `"Mar 04 2024, 09:15 PM"`.
pub fn parse_server_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), SERVER_TIMESTAMP_FORMAT).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub user: String,
    pub body: String,
    #[serde(default)]
    pub likes: u32,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,
    pub user: String,
    pub body: String,
    pub timestamp: String,
    #[serde(default)]
    pub likes: u32,
    /// Whether the authenticated user has liked this post
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub comments: Vec<CommentRecord>,
}

impl PostRecord {
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_server_timestamp(&self.timestamp)
    }
}

/// Follower information attached to profile pages
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileRecord {
    pub followers: Vec<String>,
    pub followers_count: u32,
    pub following_count: u32,
}

impl ProfileRecord {
    pub fn is_followed_by(&self, username: &str) -> bool {
        self.followers.iter().any(|f| f == username)
    }
}

/// Payload returned by every `GET /posts/...` page endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub page_name: Option<String>,
    #[serde(default)]
    pub data: Vec<PostRecord>,
    #[serde(default)]
    pub followers: Option<Vec<String>>,
    #[serde(default)]
    pub followers_count: Option<u32>,
    #[serde(default)]
    pub following_count: Option<u32>,
}

impl FeedPage {
    /// Follower fields, present only on profile pages.
    ///
    /// Missing counts fall back to the length of the followers list (or zero).
    pub fn profile(&self) -> Option<ProfileRecord> {
        if self.followers.is_none() && self.followers_count.is_none() && self.following_count.is_none() {
            return None;
        }

        let followers = self.followers.clone().unwrap_or_default();
        let followers_count = self
            .followers_count
            .unwrap_or(followers.len() as u32);

        Some(ProfileRecord {
            followers,
            followers_count,
            following_count: self.following_count.unwrap_or(0),
        })
    }
}

// Request/Response types for API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub body: String,
    /// Parent post id for comments; top-level posts send an empty string
    pub parent: String,
}

impl CreatePostRequest {
    pub fn top_level(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            parent: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostActionRequest {
    pub action: PostAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggleResponse {
    pub likes: u32,
    pub liked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowResponse {
    #[serde(default)]
    pub message: String,
    pub action: FollowAction,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_page_deserializes_follower_fields() {
        let json = r#"{
            "page_name": "bob",
            "data": [{"id": 7, "user": "bob", "body": "hi", "timestamp": "Mar 04 2024, 09:15 PM", "likes": 2}],
            "followers": ["alice"],
            "followers_count": 1,
            "following_count": 4
        }"#;

        let page: FeedPage = serde_json::from_str(json).unwrap();
        let profile = page.profile().expect("profile fields present");

        assert_eq!(page.data.len(), 1);
        assert!(!page.data[0].liked, "liked defaults to false");
        assert!(profile.is_followed_by("alice"));
        assert_eq!(profile.followers_count, 1);
        assert_eq!(profile.following_count, 4);
    }

    #[test]
    fn test_feed_page_without_follower_fields_has_no_profile() {
        let page: FeedPage = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(page.profile().is_none());
        assert!(page.page_name.is_none());
    }

    #[test]
    fn test_create_post_request_has_empty_parent() {
        let value = serde_json::to_value(CreatePostRequest::top_level("hello")).unwrap();
        assert_eq!(value, serde_json::json!({"body": "hello", "parent": ""}));
    }

    #[test]
    fn test_server_timestamp_parsing() {
        let parsed = parse_server_timestamp("Mar 04 2024, 09:15 PM").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2024-03-04 21:15");
        assert!(parse_server_timestamp("yesterday").is_none());
    }
}
