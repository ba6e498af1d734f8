use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use network::api::{ApiError, ApiResult, FeedApi};
use network::app::App;
use network::logging::LogConfig;
use network::route::{load_url, Route, RouteKind};
use network::session::ClientSession;
use network::view::{FollowLabel, Node, Panel, PanelHeader};
use network_types::{
    CreatePostRequest, FeedPage, FollowAction, FollowResponse, LikeToggleResponse, PostId, PostRecord,
};
use proptest::prelude::*;

/// Serves fixed pages and records every fetch
#[derive(Default)]
struct PageServer {
    pages: HashMap<String, FeedPage>,
    fetches: Mutex<Vec<String>>,
}

impl PageServer {
    fn with_page(mut self, api_path: &str, page: FeedPage) -> Self {
        self.pages.insert(api_path.to_string(), page);
        self
    }

    fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedApi for PageServer {
    async fn fetch_page(&self, api_path: &str) -> ApiResult<FeedPage> {
        self.fetches.lock().unwrap().push(api_path.to_string());
        self.pages
            .get(api_path)
            .cloned()
            .ok_or_else(|| ApiError::status(404, format!("No page at {}", api_path)))
    }

    async fn create_post(&self, _request: &CreatePostRequest) -> ApiResult<()> {
        Ok(())
    }

    async fn toggle_like(&self, _post_id: PostId) -> ApiResult<LikeToggleResponse> {
        Ok(LikeToggleResponse { likes: 1, liked: true })
    }

    async fn update_post_body(&self, _post_id: PostId, _body: &str) -> ApiResult<()> {
        Ok(())
    }

    async fn toggle_follow(&self, username: &str) -> ApiResult<FollowResponse> {
        Ok(FollowResponse {
            message: format!("You are now following {}", username),
            action: FollowAction::Followed,
        })
    }
}

fn post(id: u64, user: &str) -> PostRecord {
    PostRecord {
        id,
        user: user.to_string(),
        body: format!("post {} by {}", id, user),
        timestamp: "Jan 02 2024, 10:30 AM".to_string(),
        likes: 0,
        liked: false,
        comments: vec![],
    }
}

fn server() -> Arc<PageServer> {
    Arc::new(
        PageServer::default()
            .with_page(
                "/posts/all",
                FeedPage {
                    data: vec![post(2, "bob"), post(1, "alice")],
                    ..Default::default()
                },
            )
            .with_page(
                "/posts/profile/bob",
                FeedPage {
                    page_name: Some("bob".to_string()),
                    data: vec![post(2, "bob")],
                    followers: Some(vec!["carol".to_string()]),
                    followers_count: Some(1),
                    following_count: Some(3),
                },
            ),
    )
}

fn app_for(api: Arc<PageServer>, user: &str, path: &str) -> App {
    App::new(api, Arc::new(ClientSession::authenticated(user)), path, LogConfig::disabled())
}

fn visible_users(app: &App) -> Vec<String> {
    let Some(panel) = app.visible_panel() else {
        return vec![];
    };
    app.router
        .panels()
        .target(panel)
        .nodes()
        .iter()
        .filter_map(|node| match node {
            Node::Post(entry) => Some(entry.post.user.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_browse_follow_and_return() {
    let api = server();
    let mut app = app_for(api.clone(), "alice", "/");

    let effects = app.start();
    app.drive_all(effects).await;
    assert_eq!(app.router.history().location(), "/all");
    assert_eq!(visible_users(&app), vec!["bob", "alice"]);

    // First entry is bob's post
    let effects = app.open_selected_profile();
    app.drive_all(effects).await;
    assert_eq!(app.visible_panel(), Some(Panel::Profile));
    assert_eq!(app.router.history().location(), "/profile/bob");

    let effects = app.toggle_follow();
    app.drive_all(effects).await;
    match app.router.panels().header(Panel::Profile) {
        PanelHeader::Profile(header) => {
            assert_eq!(header.followers_count, 2);
            let button = header.follow.as_ref().unwrap();
            assert_eq!(button.label, FollowLabel::Unfollow);
            assert!(button.enabled);
        }
        other => panic!("expected profile header, got {:?}", other),
    }

    let effects = app.go_back();
    app.drive_all(effects).await;
    assert_eq!(app.visible_panel(), Some(Panel::Feed));
    assert_eq!(app.router.history().location(), "/all");

    let effects = app.go_forward();
    app.drive_all(effects).await;
    assert_eq!(app.router.history().location(), "/profile/bob");

    assert_eq!(
        api.fetches(),
        vec!["/posts/all", "/posts/profile/bob", "/posts/all", "/posts/profile/bob"]
    );
}

#[tokio::test]
async fn test_failed_page_shows_message_and_keeps_history() {
    let api = server();
    let mut app = app_for(api.clone(), "alice", "/following");

    let effects = app.start();
    app.drive_all(effects).await;

    assert_eq!(app.router.history().location(), "/following");
    let target = app.router.panels().target(Panel::Following);
    assert_eq!(target.message(), Some("Failed to load posts."));
    assert!(app.notices.current().is_some());
}

#[tokio::test]
async fn test_navigating_to_current_location_does_not_grow_history() {
    let api = server();
    let mut app = app_for(api, "alice", "/all");

    let effects = app.start();
    app.drive_all(effects).await;
    let effects = app.open_all_posts();
    app.drive_all(effects).await;

    assert_eq!(app.router.history().len(), 1);
    assert!(!app.router.history().can_go_back());
}

proptest! {
    #[test]
    fn prop_load_url_is_total(path in ".{0,40}") {
        let route = load_url(&path);
        prop_assert!(route.ui_path.starts_with('/'));
        prop_assert!(route.api_path.starts_with("/posts/"));
    }

    #[test]
    fn prop_profile_routes_round_trip(user in "[^/?#]{1,20}") {
        let route = Route::profile(&user);
        let reloaded = load_url(&route.ui_path);
        prop_assert_eq!(reloaded.kind, RouteKind::Profile(user));
        prop_assert_eq!(reloaded.api_path, route.api_path);
    }
}
