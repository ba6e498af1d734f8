use std::time::{Duration, Instant};

use network_types::{FeedPage, FollowAction, ProfileRecord};

use crate::route::{Route, RouteKind};
use crate::session::ClientSession;

/// How long the follow button shows its success color
pub const FOLLOW_FLASH_DURATION: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowLabel {
    Follow,
    Unfollow,
    Loading,
}

impl FollowLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowLabel::Follow => "Follow",
            FollowLabel::Unfollow => "Unfollow",
            FollowLabel::Loading => "...",
        }
    }

    fn for_state(following: bool) -> Self {
        if following {
            FollowLabel::Unfollow
        } else {
            FollowLabel::Follow
        }
    }
}

/// Follow/unfollow toggle shown on other users' profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowButton {
    pub label: FollowLabel,
    pub following: bool,
    pub enabled: bool,
    pub flash_until: Option<Instant>,
}

impl FollowButton {
    pub fn new(following: bool) -> Self {
        Self {
            label: FollowLabel::for_state(following),
            following,
            enabled: true,
            flash_until: None,
        }
    }

    /// Disable the button and show the loading label while a request is pending
    pub fn begin_request(&mut self) {
        self.enabled = false;
        self.label = FollowLabel::Loading;
        self.flash_until = None;
    }

    /// Adopt the state the server reported
    pub fn commit(&mut self, action: FollowAction, now: Instant) {
        self.following = action.is_following();
        self.label = FollowLabel::for_state(self.following);
        self.enabled = true;
        self.flash_until = Some(now + FOLLOW_FLASH_DURATION);
    }

    pub fn is_flashing(&self, now: Instant) -> bool {
        self.flash_until.is_some_and(|until| now < until)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileHeader {
    pub username: String,
    pub followers_count: u32,
    pub following_count: u32,
    /// `None` for anonymous viewers and on the viewer's own profile
    pub follow: Option<FollowButton>,
    /// Navigation that produced this header
    pub render_id: u64,
}

impl ProfileHeader {
    /// Move the follower count by one in the direction the server reported
    pub fn apply_follow(&mut self, action: FollowAction) {
        self.followers_count = match action {
            FollowAction::Followed => self.followers_count.saturating_add(1),
            FollowAction::Unfollowed => self.followers_count.saturating_sub(1),
        };
    }
}

/// Header shown above a panel's feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelHeader {
    #[default]
    Empty,
    Loading { title: String },
    Titled { title: String },
    Profile(ProfileHeader),
}

impl PanelHeader {
    pub fn loading(route: &Route) -> Self {
        PanelHeader::Loading {
            title: default_title(route),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            PanelHeader::Empty => None,
            PanelHeader::Loading { title } | PanelHeader::Titled { title } => Some(title),
            PanelHeader::Profile(header) => Some(&header.username),
        }
    }
}

fn default_title(route: &Route) -> String {
    match &route.kind {
        RouteKind::AllPosts => "All Posts".to_string(),
        RouteKind::Following => "Following".to_string(),
        RouteKind::Profile(user) => user.clone(),
    }
}

/// Header for a loaded page; profile routes get follower counts and the follow button
pub fn render_page_header(session: &ClientSession, route: &Route, page: &FeedPage, render_id: u64) -> PanelHeader {
    if let RouteKind::Profile(user) = &route.kind {
        let profile = page.profile().unwrap_or_default();
        return PanelHeader::Profile(render_profile_header(session, user, &profile, render_id));
    }

    let title = page
        .page_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| default_title(route));
    PanelHeader::Titled { title }
}

pub fn render_profile_header(
    session: &ClientSession,
    username: &str,
    profile: &ProfileRecord,
    render_id: u64,
) -> ProfileHeader {
    let follow = match session.username() {
        Some(viewer) if viewer != username => Some(FollowButton::new(profile.is_followed_by(viewer))),
        _ => None,
    };

    ProfileHeader {
        username: username.to_string(),
        followers_count: profile.followers_count,
        following_count: profile.following_count,
        follow,
        render_id,
    }
}
