use network_types::PostId;

use super::feed::RenderedPostEntry;
use super::header::{PanelHeader, ProfileHeader};
use crate::route::RouteKind;

/// Number of placeholder rows shown while a page loads
pub const DEFAULT_SKELETON_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Feed,
    Profile,
    Following,
}

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::Feed, Panel::Profile, Panel::Following];

    pub fn for_route(kind: &RouteKind) -> Self {
        match kind {
            RouteKind::AllPosts => Panel::Feed,
            RouteKind::Following => Panel::Following,
            RouteKind::Profile(_) => Panel::Profile,
        }
    }

    fn index(self) -> usize {
        match self {
            Panel::Feed => 0,
            Panel::Profile => 1,
            Panel::Following => 2,
        }
    }
}

/// One child of a render target
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Loading placeholder
    Skeleton,
    Post(RenderedPostEntry),
    /// Static text such as "No posts yet." or a load failure
    Message(String),
}

/// The single container a panel renders posts into.
///
/// Every `clear` starts a new render pass with a new generation; anything
/// addressed to an older generation refers to entries that no longer exist.
#[derive(Debug, Default)]
pub struct RenderTarget {
    generation: u64,
    nodes: Vec<Node>,
}

impl RenderTarget {
    pub fn clear(&mut self) {
        self.generation += 1;
        self.nodes.clear();
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_loading(&self) -> bool {
        self.nodes.iter().any(|node| matches!(node, Node::Skeleton))
    }

    pub fn message(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            Node::Message(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = &RenderedPostEntry> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Post(entry) => Some(entry),
            _ => None,
        })
    }

    fn entries_mut(&mut self) -> impl Iterator<Item = &mut RenderedPostEntry> {
        self.nodes.iter_mut().filter_map(|node| match node {
            Node::Post(entry) => Some(entry),
            _ => None,
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }

    pub fn entry_at(&self, index: usize) -> Option<&RenderedPostEntry> {
        self.entries().nth(index)
    }

    pub fn entry_at_mut(&mut self, index: usize) -> Option<&mut RenderedPostEntry> {
        self.entries_mut().nth(index)
    }

    pub fn entry(&self, post_id: PostId) -> Option<&RenderedPostEntry> {
        self.entries().find(|entry| entry.id() == post_id)
    }

    pub fn entry_mut(&mut self, post_id: PostId) -> Option<&mut RenderedPostEntry> {
        self.entries_mut().find(|entry| entry.id() == post_id)
    }
}

/// Address of a rendered entry within one specific render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRef {
    pub panel: Panel,
    pub generation: u64,
    pub post_id: PostId,
}

#[derive(Debug, Default)]
struct PanelView {
    visible: bool,
    header: PanelHeader,
    target: RenderTarget,
}

/// Owns the three mutually exclusive panels
#[derive(Debug)]
pub struct ViewPanelManager {
    panels: [PanelView; 3],
}

impl Default for ViewPanelManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewPanelManager {
    /// All panels start hidden until the first navigation
    pub fn new() -> Self {
        Self {
            panels: Default::default(),
        }
    }

    fn view(&self, panel: Panel) -> &PanelView {
        &self.panels[panel.index()]
    }

    fn view_mut(&mut self, panel: Panel) -> &mut PanelView {
        &mut self.panels[panel.index()]
    }

    /// Make `which` the only visible panel
    pub fn show_panel(&mut self, which: Panel) {
        for panel in Panel::ALL {
            self.view_mut(panel).visible = panel == which;
        }
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.view(panel).visible
    }

    pub fn visible_panels(&self) -> Vec<Panel> {
        Panel::ALL.into_iter().filter(|panel| self.is_visible(*panel)).collect()
    }

    pub fn visible_panel(&self) -> Option<Panel> {
        Panel::ALL.into_iter().find(|panel| self.is_visible(*panel))
    }

    /// Clear the panel's render target and fill it with `count` placeholders
    pub fn render_skeleton(&mut self, panel: Panel, count: usize) {
        let target = &mut self.view_mut(panel).target;
        target.clear();
        for _ in 0..count {
            target.push(Node::Skeleton);
        }
    }

    /// Replace the panel's render target with a single static message
    pub fn render_message(&mut self, panel: Panel, text: impl Into<String>) {
        let target = &mut self.view_mut(panel).target;
        target.clear();
        target.push(Node::Message(text.into()));
    }

    pub fn target(&self, panel: Panel) -> &RenderTarget {
        &self.view(panel).target
    }

    pub fn target_mut(&mut self, panel: Panel) -> &mut RenderTarget {
        &mut self.view_mut(panel).target
    }

    pub fn header(&self, panel: Panel) -> &PanelHeader {
        &self.view(panel).header
    }

    pub fn set_header(&mut self, panel: Panel, header: PanelHeader) {
        self.view_mut(panel).header = header;
    }

    /// The entry `entry` points at, if its render pass is still current
    pub fn entry_mut(&mut self, entry: &EntryRef) -> Option<&mut RenderedPostEntry> {
        let target = self.target_mut(entry.panel);
        if target.generation() != entry.generation {
            return None;
        }
        target.entry_mut(entry.post_id)
    }

    /// The profile header produced by navigation `render_id`, if still shown
    pub fn profile_header_mut(&mut self, render_id: u64) -> Option<&mut ProfileHeader> {
        match &mut self.view_mut(Panel::Profile).header {
            PanelHeader::Profile(header) if header.render_id == render_id => Some(header),
            _ => None,
        }
    }
}
