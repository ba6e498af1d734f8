use std::sync::Arc;

use network_types::{LikeToggleResponse, PostId, PostRecord};

use super::panels::{Node, RenderTarget};
use crate::route::Route;
use crate::session::ClientSession;

/// Shown in place of entries when a page has no posts
pub const EMPTY_FEED_MESSAGE: &str = "No posts yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeGlyph {
    Filled,
    Outline,
}

impl LikeGlyph {
    pub fn symbol(&self) -> &'static str {
        match self {
            LikeGlyph::Filled => "♥",
            LikeGlyph::Outline => "♡",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeColor {
    Red,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeVisual {
    pub glyph: LikeGlyph,
    pub color: LikeColor,
}

/// The like toggle on a rendered entry.
///
/// `liked` is the persisted state; `previewing` is a hover-only overlay that
/// never reaches the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeAffordance {
    pub liked: bool,
    pub likes: u32,
    previewing: bool,
}

impl LikeAffordance {
    pub fn new(liked: bool, likes: u32) -> Self {
        Self {
            liked,
            likes,
            previewing: false,
        }
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    pub fn visual(&self) -> LikeVisual {
        if self.liked || self.previewing {
            LikeVisual {
                glyph: LikeGlyph::Filled,
                color: LikeColor::Red,
            }
        } else {
            LikeVisual {
                glyph: LikeGlyph::Outline,
                color: LikeColor::Muted,
            }
        }
    }

    /// Preview the liked look; no-op over an already liked post
    pub fn pointer_enter(&mut self) {
        if !self.liked {
            self.previewing = true;
        }
    }

    pub fn pointer_leave(&mut self) {
        self.previewing = false;
    }

    /// Roll back to persisted values captured earlier. The hover preview
    /// belongs to the cursor's current position and is left alone.
    pub fn restore(&mut self, previous: LikeAffordance) {
        self.liked = previous.liked;
        self.likes = previous.likes;
    }

    /// Adopt the server's authoritative values
    pub fn commit(&mut self, response: &LikeToggleResponse) {
        self.liked = response.liked;
        self.likes = response.likes;
        self.previewing = false;
    }
}

/// Interactions wired to an entry when it is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affordance {
    Like,
    /// Opens the author's profile
    Profile(Route),
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing {
        draft: String,
        /// A save request is in flight; controls stay visible but inert
        saving: bool,
    },
}

/// What a save attempt resolved to before any request is made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSubmission {
    /// Blank or identical to the current body; the entry is back to viewing
    Unchanged,
    Submit(String),
    /// Not editing, or a save is already in flight
    Ignored,
}

/// One post as it appears in the current render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPostEntry {
    pub post: PostRecord,
    pub like: LikeAffordance,
    pub affordances: Vec<Affordance>,
    pub edit: EditState,
}

impl RenderedPostEntry {
    pub fn id(&self) -> PostId {
        self.post.id
    }

    pub fn can_edit(&self) -> bool {
        self.affordances.contains(&Affordance::Edit)
    }

    pub fn profile_route(&self) -> Option<&Route> {
        self.affordances.iter().find_map(|affordance| match affordance {
            Affordance::Profile(route) => Some(route),
            _ => None,
        })
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.edit, EditState::Editing { .. })
    }

    /// Open inline editing pre-filled with the current body
    pub fn begin_edit(&mut self) -> bool {
        if !self.can_edit() || self.is_editing() {
            return false;
        }
        self.edit = EditState::Editing {
            draft: self.post.body.clone(),
            saving: false,
        };
        true
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.edit {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Viewing => None,
        }
    }

    /// Editable draft, unavailable while a save is pending
    pub fn draft_mut(&mut self) -> Option<&mut String> {
        match &mut self.edit {
            EditState::Editing { draft, saving: false } => Some(draft),
            _ => None,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Viewing;
    }

    pub fn submit_edit(&mut self) -> EditSubmission {
        let EditState::Editing { draft, saving } = &mut self.edit else {
            return EditSubmission::Ignored;
        };
        if *saving {
            return EditSubmission::Ignored;
        }

        if draft.trim().is_empty() || *draft == self.post.body {
            self.edit = EditState::Viewing;
            return EditSubmission::Unchanged;
        }

        *saving = true;
        EditSubmission::Submit(draft.clone())
    }

    pub fn commit_edit(&mut self, body: String) {
        self.post.body = body;
        self.edit = EditState::Viewing;
    }

    /// Keep the controls and the draft so the user can retry or cancel
    pub fn fail_edit(&mut self) {
        if let EditState::Editing { saving, .. } = &mut self.edit {
            *saving = false;
        }
    }

    pub fn apply_like(&mut self, response: &LikeToggleResponse) {
        self.like.commit(response);
        self.post.likes = response.likes;
        self.post.liked = response.liked;
    }

    /// Put back a like state captured before a request
    pub fn restore_like(&mut self, previous: LikeAffordance) {
        self.like.restore(previous);
        self.post.likes = previous.likes;
        self.post.liked = previous.liked;
    }
}

/// Builds rendered entries for the session's user
#[derive(Debug, Clone)]
pub struct FeedRenderer {
    session: Arc<ClientSession>,
}

impl FeedRenderer {
    pub fn new(session: Arc<ClientSession>) -> Self {
        Self { session }
    }

    /// Replace everything in `target` with entries for `posts`, in order
    pub fn render(&self, target: &mut RenderTarget, posts: Vec<PostRecord>) {
        target.clear();

        if posts.is_empty() {
            target.push(Node::Message(EMPTY_FEED_MESSAGE.to_string()));
            return;
        }

        for post in posts {
            target.push(Node::Post(self.build_entry(post)));
        }
    }

    pub fn build_entry(&self, post: PostRecord) -> RenderedPostEntry {
        let mut affordances = vec![Affordance::Like, Affordance::Profile(Route::profile(&post.user))];
        if self.session.is_current_user(&post.user) {
            affordances.push(Affordance::Edit);
        }

        RenderedPostEntry {
            like: LikeAffordance::new(post.liked, post.likes),
            post,
            affordances,
            edit: EditState::Viewing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: PostId, user: &str, body: &str, liked: bool) -> PostRecord {
        PostRecord {
            id,
            user: user.to_string(),
            body: body.to_string(),
            timestamp: "Mar 04 2024, 09:15 PM".to_string(),
            likes: 3,
            liked,
            comments: vec![],
        }
    }

    fn renderer(user: &str) -> FeedRenderer {
        FeedRenderer::new(Arc::new(ClientSession::authenticated(user)))
    }

    #[test]
    fn test_render_preserves_order() {
        let mut target = RenderTarget::default();
        renderer("alice").render(
            &mut target,
            vec![post(9, "bob", "first", false), post(2, "alice", "second", true), post(5, "carol", "third", false)],
        );

        let ids: Vec<PostId> = target.entries().map(|e| e.id()).collect();
        assert_eq!(ids, vec![9, 2, 5]);
    }

    #[test]
    fn test_render_empty_feed_shows_message() {
        let mut target = RenderTarget::default();
        target.push(Node::Skeleton);
        renderer("alice").render(&mut target, vec![]);

        assert_eq!(target.entry_count(), 0);
        assert_eq!(target.message(), Some(EMPTY_FEED_MESSAGE));
        assert!(!target.is_loading());
    }

    #[test]
    fn test_edit_affordance_only_for_own_posts() {
        let renderer = renderer("alice");
        let own = renderer.build_entry(post(1, "alice", "mine", false));
        let other = renderer.build_entry(post(2, "bob", "theirs", false));

        assert!(own.can_edit());
        assert!(!other.can_edit());
        assert_eq!(other.profile_route(), Some(&Route::profile("bob")));

        let anonymous = FeedRenderer::new(Arc::new(ClientSession::anonymous()));
        assert!(!anonymous.build_entry(post(1, "alice", "mine", false)).can_edit());
    }

    #[test]
    fn test_like_visual_reflects_liked() {
        assert_eq!(LikeAffordance::new(true, 1).visual().glyph, LikeGlyph::Filled);
        let outline = LikeAffordance::new(false, 0).visual();
        assert_eq!(outline.glyph, LikeGlyph::Outline);
        assert_eq!(outline.color, LikeColor::Muted);
    }

    #[test]
    fn test_hover_preview_reverts_on_leave() {
        let mut like = LikeAffordance::new(false, 0);
        like.pointer_enter();
        assert_eq!(like.visual().color, LikeColor::Red);
        assert!(!like.liked);

        like.pointer_leave();
        assert_eq!(like, LikeAffordance::new(false, 0));
    }

    #[test]
    fn test_hover_is_noop_when_liked() {
        let mut like = LikeAffordance::new(true, 4);
        like.pointer_enter();
        assert!(!like.is_previewing());
    }

    #[test]
    fn test_submit_unchanged_returns_to_viewing() {
        let mut entry = renderer("alice").build_entry(post(1, "alice", "hello", false));
        assert!(entry.begin_edit());
        assert_eq!(entry.draft(), Some("hello"));

        assert_eq!(entry.submit_edit(), EditSubmission::Unchanged);
        assert_eq!(entry.edit, EditState::Viewing);
        assert_eq!(entry.post.body, "hello");
    }

    #[test]
    fn test_submit_blank_is_unchanged() {
        let mut entry = renderer("alice").build_entry(post(1, "alice", "hello", false));
        entry.begin_edit();
        entry.draft_mut().unwrap().clear();
        entry.draft_mut().unwrap().push_str("   ");

        assert_eq!(entry.submit_edit(), EditSubmission::Unchanged);
        assert!(!entry.is_editing());
    }

    #[test]
    fn test_submit_changed_locks_draft_until_settled() {
        let mut entry = renderer("alice").build_entry(post(1, "alice", "hello", false));
        entry.begin_edit();
        entry.draft_mut().unwrap().push_str(" world");

        assert_eq!(entry.submit_edit(), EditSubmission::Submit("hello world".to_string()));
        assert!(entry.draft_mut().is_none());
        assert_eq!(entry.submit_edit(), EditSubmission::Ignored);

        entry.fail_edit();
        assert_eq!(entry.draft(), Some("hello world"));
        assert!(entry.draft_mut().is_some());

        entry.submit_edit();
        entry.commit_edit("hello world".to_string());
        assert_eq!(entry.post.body, "hello world");
        assert!(!entry.is_editing());
    }

    #[test]
    fn test_whitespace_only_change_is_submitted_as_typed() {
        let mut entry = renderer("alice").build_entry(post(1, "alice", "hello", false));
        entry.begin_edit();
        entry.draft_mut().unwrap().push('\n');

        assert_eq!(entry.submit_edit(), EditSubmission::Submit("hello\n".to_string()));
    }

    #[test]
    fn test_restore_keeps_current_hover() {
        let mut like = LikeAffordance::new(false, 3);
        like.pointer_enter();
        let snapshot = like;

        // Cursor leaves while a request is in flight
        like.pointer_leave();
        like.restore(snapshot);

        assert!(!like.is_previewing());
        assert_eq!(like.visual().glyph, LikeGlyph::Outline);
        assert_eq!((like.liked, like.likes), (false, 3));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut entry = renderer("alice").build_entry(post(1, "alice", "hello", false));
        entry.begin_edit();
        entry.draft_mut().unwrap().push_str("!!!");
        entry.cancel_edit();

        assert_eq!(entry.edit, EditState::Viewing);
        assert_eq!(entry.post.body, "hello");
    }

    #[test]
    fn test_cannot_edit_others_posts() {
        let mut entry = renderer("alice").build_entry(post(1, "bob", "hello", false));
        assert!(!entry.begin_edit());
        assert_eq!(entry.submit_edit(), EditSubmission::Ignored);
    }

    #[test]
    fn test_apply_like_uses_server_values() {
        let mut entry = renderer("alice").build_entry(post(1, "bob", "hello", false));
        entry.like.pointer_enter();
        entry.apply_like(&LikeToggleResponse { likes: 10, liked: true });

        assert_eq!(entry.like.likes, 10);
        assert!(entry.like.liked && entry.post.liked);
        assert!(!entry.like.is_previewing());
    }
}
