use network_types::{ColorScheme, FeedPage};
use ratatui::style::Style;
use tui_textarea::TextArea;

use crate::actions::{OptimisticActionExecutor, PendingAction, SettledAction};
use crate::api::ApiResult;
use crate::logging::LogConfig;
use crate::notice::NoticeSlot;
use crate::router::{NavTicket, Router};
use crate::view::EntryRef;

/// Longest post the composer accepts
pub const MAX_POST_CHARS: usize = 280;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Navigation, // Browsing, shortcuts active
    Composing,  // New post composer has focus
    Editing(EntryRef),
}

/// New post composer using tui-textarea
pub struct ComposerState {
    pub open: bool,
    pub submitting: bool,
    pub textarea: TextArea<'static>,
    pub max_chars: usize,
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposerState {
    pub fn new() -> Self {
        Self {
            open: false,
            submitting: false,
            textarea: Self::fresh_textarea(),
            max_chars: MAX_POST_CHARS,
        }
    }

    fn fresh_textarea() -> TextArea<'static> {
        let mut textarea = TextArea::default();
        // Enable hard tab indent for better wrapping behavior
        textarea.set_hard_tab_indent(true);
        textarea.set_cursor_line_style(Style::default());
        textarea
    }

    pub fn content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn char_count(&self) -> usize {
        self.content().chars().count()
    }

    pub fn is_blank(&self) -> bool {
        self.content().trim().is_empty()
    }

    /// Drop the text after a successful submit
    pub fn clear(&mut self) {
        self.textarea = Self::fresh_textarea();
        self.submitting = false;
    }
}

/// Work the event loop must run off the UI thread
#[derive(Debug)]
pub enum Effect {
    LoadPage(NavTicket),
    Action(PendingAction),
}

impl Effect {
    pub async fn run(self, executor: &OptimisticActionExecutor) -> Completion {
        match self {
            Effect::LoadPage(ticket) => {
                let result = executor.load_page(&ticket.route.api_path).await;
                Completion::PageLoaded { ticket, result }
            }
            Effect::Action(action) => Completion::ActionSettled(executor.execute(action).await),
        }
    }
}

/// A finished effect, fed back into [`App::apply`](super::App::apply)
#[derive(Debug)]
pub enum Completion {
    PageLoaded {
        ticket: NavTicket,
        result: ApiResult<FeedPage>,
    },
    ActionSettled(SettledAction),
}

/// Application state
pub struct App {
    pub running: bool,
    pub router: Router,
    pub executor: OptimisticActionExecutor,
    pub notices: NoticeSlot,
    /// Cursor over the visible panel's entries; moving it is the hover
    pub selected: usize,
    pub composer: ComposerState,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub log_config: LogConfig,
    pub color_scheme: ColorScheme,
    /// Shown in the status bar
    pub server_label: String,
}
