//! The client's view model: three panels, their headers and the rendered
//! post entries inside them. The terminal UI draws this; nothing here knows
//! about ratatui.

pub mod feed;
pub mod header;
pub mod panels;

pub use feed::{
    Affordance, EditState, EditSubmission, FeedRenderer, LikeAffordance, LikeColor, LikeGlyph,
    LikeVisual, RenderedPostEntry,
};
pub use header::{FollowButton, FollowLabel, PanelHeader, ProfileHeader};
pub use panels::{EntryRef, Node, Panel, RenderTarget, ViewPanelManager, DEFAULT_SKELETON_COUNT};
