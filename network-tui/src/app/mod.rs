use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use network_types::ColorScheme;

use crate::actions::{
    ActionOutcome, OptimisticActionExecutor, PendingAction, PendingCreate, PendingEdit, PendingFollow, PendingLike, SettledAction,
    POST_CREATED_NOTICE,
};
use crate::api::FeedApi;
use crate::logging::LogConfig;
use crate::notice::NoticeSlot;
use crate::route::Route;
use crate::router::{LoadOutcome, Router};
use crate::session::ClientSession;
use crate::view::{EntryRef, Panel, RenderedPostEntry};

pub mod state;
pub use state::*;
pub mod handlers;

impl App {
    pub fn new(api: Arc<dyn FeedApi>, session: Arc<ClientSession>, initial_path: &str, log_config: LogConfig) -> Self {
        Self {
            running: true,
            router: Router::new(session.clone(), initial_path, log_config.clone()),
            executor: OptimisticActionExecutor::new(api, session, log_config.clone()),
            notices: NoticeSlot::new(),
            selected: 0,
            composer: ComposerState::new(),
            input_mode: InputMode::Navigation,
            show_help: false,
            log_config,
            color_scheme: ColorScheme::Default,
            server_label: String::new(),
        }
    }

    pub fn session(&self) -> &Arc<ClientSession> {
        self.router.session()
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Load the initial location
    pub fn start(&mut self) -> Vec<Effect> {
        let ticket = self.router.start();
        self.reset_cursor();
        vec![Effect::LoadPage(ticket)]
    }

    pub fn navigate(&mut self, route: Route) -> Vec<Effect> {
        let ticket = self.router.navigate(route, true);
        self.reset_cursor();
        vec![Effect::LoadPage(ticket)]
    }

    pub fn open_all_posts(&mut self) -> Vec<Effect> {
        self.navigate(Route::all_posts())
    }

    pub fn open_following(&mut self) -> Vec<Effect> {
        if !self.session().is_authenticated() {
            self.notices.info("Log in to see who you follow.");
            return Vec::new();
        }
        self.navigate(Route::following())
    }

    pub fn open_own_profile(&mut self) -> Vec<Effect> {
        match self.session().username().map(str::to_string) {
            Some(username) => self.navigate(Route::profile(&username)),
            None => {
                self.notices.info("Not logged in.");
                Vec::new()
            }
        }
    }

    /// Follow the profile link of the selected entry
    pub fn open_selected_profile(&mut self) -> Vec<Effect> {
        let route = self.selected_entry().and_then(|entry| entry.profile_route().cloned());
        match route {
            Some(route) => self.navigate(route),
            None => Vec::new(),
        }
    }

    pub fn go_back(&mut self) -> Vec<Effect> {
        match self.router.back() {
            Some(ticket) => {
                self.reset_cursor();
                vec![Effect::LoadPage(ticket)]
            }
            None => Vec::new(),
        }
    }

    pub fn go_forward(&mut self) -> Vec<Effect> {
        match self.router.forward() {
            Some(ticket) => {
                self.reset_cursor();
                vec![Effect::LoadPage(ticket)]
            }
            None => Vec::new(),
        }
    }

    pub fn reload(&mut self) -> Vec<Effect> {
        match self.router.reload() {
            Some(ticket) => {
                self.reset_cursor();
                vec![Effect::LoadPage(ticket)]
            }
            None => Vec::new(),
        }
    }

    /// A new render pass invalidates the cursor and any inline edit
    fn reset_cursor(&mut self) {
        self.selected = 0;
        if matches!(self.input_mode, InputMode::Editing(_)) {
            self.input_mode = InputMode::Navigation;
        }
    }

    pub fn visible_panel(&self) -> Option<Panel> {
        self.router.panels().visible_panel()
    }

    pub fn selected_entry(&self) -> Option<&RenderedPostEntry> {
        let panel = self.visible_panel()?;
        self.router.panels().target(panel).entry_at(self.selected)
    }

    fn selected_entry_ref(&self) -> Option<EntryRef> {
        let panel = self.visible_panel()?;
        let target = self.router.panels().target(panel);
        let entry = target.entry_at(self.selected)?;
        Some(EntryRef {
            panel,
            generation: target.generation(),
            post_id: entry.id(),
        })
    }

    fn entry_count(&self) -> usize {
        self.visible_panel()
            .map(|panel| self.router.panels().target(panel).entry_count())
            .unwrap_or(0)
    }

    /// Move the cursor; the entry it leaves loses its like preview and the
    /// entry it lands on gains one
    fn move_cursor(&mut self, to: usize) {
        let Some(panel) = self.visible_panel() else {
            return;
        };
        let from = self.selected;
        let target = self.router.panels_mut().target_mut(panel);
        if let Some(entry) = target.entry_at_mut(from) {
            entry.like.pointer_leave();
        }
        if let Some(entry) = target.entry_at_mut(to) {
            entry.like.pointer_enter();
        }
        self.selected = to;
    }

    pub fn select_next(&mut self) {
        let count = self.entry_count();
        if count > 0 && self.selected + 1 < count {
            self.move_cursor(self.selected + 1);
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.move_cursor(self.selected - 1);
        }
    }

    pub fn toggle_like_selected(&mut self) -> Vec<Effect> {
        let Some(entry) = self.selected_entry_ref() else {
            return Vec::new();
        };
        match PendingLike::begin(self.router.panels_mut(), entry) {
            Some(pending) => vec![Effect::Action(PendingAction::Like(pending))],
            None => Vec::new(),
        }
    }

    /// Toggle follow on the profile currently shown
    pub fn toggle_follow(&mut self) -> Vec<Effect> {
        if self.visible_panel() != Some(Panel::Profile) {
            return Vec::new();
        }
        let Some(render_id) = self.router.current_ticket_id() else {
            return Vec::new();
        };
        match PendingFollow::begin(self.router.panels_mut(), render_id) {
            Some(pending) => vec![Effect::Action(PendingAction::Follow(pending))],
            None => Vec::new(),
        }
    }

    pub fn begin_edit_selected(&mut self) {
        let Some(entry_ref) = self.selected_entry_ref() else {
            return;
        };
        let Some(entry) = self.router.panels_mut().entry_mut(&entry_ref) else {
            return;
        };
        if entry.begin_edit() {
            self.input_mode = InputMode::Editing(entry_ref);
        } else if !entry.can_edit() {
            self.notices.info("You can only edit your own posts.");
        }
    }

    fn editing_entry(&mut self) -> Option<&mut RenderedPostEntry> {
        let InputMode::Editing(entry_ref) = self.input_mode else {
            return None;
        };
        self.router.panels_mut().entry_mut(&entry_ref)
    }

    pub fn push_edit_char(&mut self, c: char) {
        if let Some(draft) = self.editing_entry().and_then(|entry| entry.draft_mut()) {
            draft.push(c);
        }
    }

    pub fn pop_edit_char(&mut self) {
        if let Some(draft) = self.editing_entry().and_then(|entry| entry.draft_mut()) {
            draft.pop();
        }
    }

    pub fn cancel_edit(&mut self) {
        if let Some(entry) = self.editing_entry() {
            if entry.draft_mut().is_none() {
                // A save is in flight
                return;
            }
            entry.cancel_edit();
        }
        self.input_mode = InputMode::Navigation;
    }

    pub fn save_edit(&mut self) -> Vec<Effect> {
        let InputMode::Editing(entry_ref) = self.input_mode else {
            return Vec::new();
        };
        match PendingEdit::begin(self.router.panels_mut(), entry_ref, &mut self.notices) {
            Some(pending) => vec![Effect::Action(PendingAction::Edit(pending))],
            None => {
                let still_editing = self
                    .router
                    .panels_mut()
                    .entry_mut(&entry_ref)
                    .is_some_and(|entry| entry.is_editing());
                if !still_editing {
                    self.input_mode = InputMode::Navigation;
                }
                Vec::new()
            }
        }
    }

    pub fn open_composer(&mut self) {
        if !self.session().is_authenticated() {
            self.notices.info("Log in to post.");
            return;
        }
        self.composer.open = true;
        self.input_mode = InputMode::Composing;
    }

    /// Hide the composer, keeping its text for next time
    pub fn close_composer(&mut self) {
        self.composer.open = false;
        self.input_mode = InputMode::Navigation;
    }

    pub fn handle_composer_input(&mut self, key: KeyEvent) {
        if self.composer.submitting {
            return;
        }
        if let KeyCode::Char(_) = key.code {
            if self.composer.char_count() >= self.composer.max_chars {
                return;
            }
        }

        use tui_textarea::Input;
        let input = Input::from(crossterm::event::Event::Key(key));
        self.composer.textarea.input(input);
    }

    pub fn submit_composer(&mut self) -> Vec<Effect> {
        if self.composer.submitting {
            return Vec::new();
        }
        if self.composer.is_blank() {
            self.notices.failure("Post cannot be empty.");
            return Vec::new();
        }

        self.composer.submitting = true;
        let body = self.composer.content().trim().to_string();
        vec![Effect::Action(PendingAction::Create(PendingCreate { body }))]
    }

    /// Feed a finished effect back into the view; may start follow-up effects
    pub fn apply(&mut self, completion: Completion) -> Vec<Effect> {
        match completion {
            Completion::PageLoaded { ticket, result } => {
                match self.router.complete_load(&ticket, result) {
                    LoadOutcome::Rendered { entries } => {
                        log_debug!(self.log_config, "{} loaded with {} posts", ticket.route.ui_path, entries);
                        self.reset_cursor();
                    }
                    LoadOutcome::Failed { reason } => self.notices.failure(reason),
                    LoadOutcome::Stale => {}
                }
                Vec::new()
            }
            Completion::ActionSettled(settled) => self.apply_settled(settled),
        }
    }

    fn apply_settled(&mut self, settled: SettledAction) -> Vec<Effect> {
        match settled {
            SettledAction::Like(pending, outcome) => {
                pending.settle(outcome, self.router.panels_mut(), &mut self.notices);
                Vec::new()
            }
            SettledAction::Follow(pending, outcome) => {
                pending.settle(outcome, self.router.panels_mut(), &mut self.notices);
                Vec::new()
            }
            SettledAction::Edit(pending, outcome) => {
                let entry = pending.entry;
                let committed = outcome.is_committed();
                pending.settle(outcome, self.router.panels_mut(), &mut self.notices);
                if committed && self.input_mode == InputMode::Editing(entry) {
                    self.input_mode = InputMode::Navigation;
                }
                Vec::new()
            }
            SettledAction::Create(_, outcome) => match outcome {
                ActionOutcome::Committed(()) => {
                    self.composer.clear();
                    self.close_composer();
                    self.notices.success(POST_CREATED_NOTICE);
                    self.navigate(Route::all_posts())
                }
                ActionOutcome::Failed { reason } => {
                    self.composer.submitting = false;
                    self.notices.failure(format!("Could not create post. {}", reason));
                    Vec::new()
                }
            },
        }
    }

    /// Run `effect` and everything it leads to, in order
    pub async fn drive(&mut self, effect: Effect) {
        let mut queue = VecDeque::from([effect]);
        while let Some(effect) = queue.pop_front() {
            let completion = effect.run(&self.executor).await;
            queue.extend(self.apply(completion));
        }
    }

    /// Run several effects to completion
    pub async fn drive_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.drive(effect).await;
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.notices.clear_expired(now);
    }
}
