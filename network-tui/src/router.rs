//! Maps client paths to fetches and renders, and keeps history consistent.
//!
//! The router never performs I/O. Each navigation synchronously shows the
//! route's panel with a skeleton and hands back a [`NavTicket`]; whoever runs
//! the fetch passes the result to [`Router::complete_load`] with that ticket.
//! Only the most recent ticket may render.

use std::sync::Arc;

use network_types::FeedPage;

use crate::api::ApiResult;
use crate::actions::categorize_error;
use crate::history::{BrowserHistory, PopEvent};
use crate::logging::LogConfig;
use crate::route::{load_url, Route};
use crate::session::ClientSession;
use crate::view::header::render_page_header;
use crate::view::{FeedRenderer, Panel, PanelHeader, ViewPanelManager, DEFAULT_SKELETON_COUNT};

/// Shown in place of the feed when a page fails to load
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load posts.";

/// A navigation waiting for its page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTicket {
    pub id: u64,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered { entries: usize },
    Failed { reason: String },
    /// A newer navigation started before this fetch finished
    Stale,
}

pub struct Router {
    session: Arc<ClientSession>,
    history: BrowserHistory,
    panels: ViewPanelManager,
    feed: FeedRenderer,
    current: Option<NavTicket>,
    next_ticket: u64,
    log_config: LogConfig,
}

impl Router {
    pub fn new(session: Arc<ClientSession>, initial_location: impl Into<String>, log_config: LogConfig) -> Self {
        Self {
            feed: FeedRenderer::new(session.clone()),
            session,
            history: BrowserHistory::new(initial_location),
            panels: ViewPanelManager::new(),
            current: None,
            next_ticket: 1,
            log_config,
        }
    }

    /// Load whatever the initial location points at.
    ///
    /// The initial history entry is rewritten to the normalized route so a
    /// later pop back to it replays the same fetch.
    pub fn start(&mut self) -> NavTicket {
        let route = load_url(self.history.location());
        log_navigation!(self.log_config, "start at {} -> {}", self.history.location(), route.api_path);
        self.history.replace_state(route_state(&route), route.ui_path.clone());
        self.load(route)
    }

    pub fn navigate_to(&mut self, ui_path: &str, api_path: &str, push_history: bool) -> NavTicket {
        self.navigate(Route::from_paths(ui_path, api_path), push_history)
    }

    /// Navigate to `route`, pushing a history entry unless it is already the
    /// current location
    pub fn navigate(&mut self, route: Route, push_history: bool) -> NavTicket {
        if push_history && route.ui_path != self.history.location() {
            log_navigation!(self.log_config, "push {} ({})", route.ui_path, route.api_path);
            self.history.push_state(route_state(&route), route.ui_path.clone());
        }
        self.load(route)
    }

    /// Replay a history entry without pushing a new one
    pub fn handle_pop(&mut self, event: PopEvent) -> NavTicket {
        let remembered = event
            .state
            .and_then(|state| serde_json::from_value::<Route>(state).ok());

        let route = match remembered {
            Some(route) => route,
            None => {
                log_navigation!(self.log_config, "pop without state, re-deriving {}", event.location);
                load_url(&event.location)
            }
        };
        log_navigation!(self.log_config, "pop to {} ({})", route.ui_path, route.api_path);
        self.load(route)
    }

    pub fn back(&mut self) -> Option<NavTicket> {
        let event = self.history.back()?;
        Some(self.handle_pop(event))
    }

    pub fn forward(&mut self) -> Option<NavTicket> {
        let event = self.history.forward()?;
        Some(self.handle_pop(event))
    }

    /// Fetch the current route again without touching history
    pub fn reload(&mut self) -> Option<NavTicket> {
        let route = self.current.as_ref()?.route.clone();
        log_navigation!(self.log_config, "reload {}", route.api_path);
        Some(self.load(route))
    }

    fn load(&mut self, route: Route) -> NavTicket {
        let panel = Panel::for_route(&route.kind);
        self.panels.show_panel(panel);
        self.panels.set_header(panel, PanelHeader::loading(&route));
        self.panels.render_skeleton(panel, DEFAULT_SKELETON_COUNT);

        let ticket = NavTicket {
            id: self.next_ticket,
            route,
        };
        self.next_ticket += 1;
        self.current = Some(ticket.clone());
        ticket
    }

    pub fn is_current(&self, ticket: &NavTicket) -> bool {
        self.current.as_ref().is_some_and(|current| current.id == ticket.id)
    }

    /// Render the result of the fetch issued for `ticket`
    pub fn complete_load(&mut self, ticket: &NavTicket, result: ApiResult<FeedPage>) -> LoadOutcome {
        if !self.is_current(ticket) {
            log_navigation!(
                self.log_config,
                "dropping stale response for {} (ticket {})",
                ticket.route.api_path,
                ticket.id
            );
            return LoadOutcome::Stale;
        }

        let panel = Panel::for_route(&ticket.route.kind);
        match result {
            Ok(page) => {
                let header = render_page_header(&self.session, &ticket.route, &page, ticket.id);
                self.panels.set_header(panel, header);

                let entries = page.data.len();
                self.feed.render(self.panels.target_mut(panel), page.data);
                log_rendering!(self.log_config, "rendered {} posts into {:?}", entries, panel);
                LoadOutcome::Rendered { entries }
            }
            Err(e) => {
                let reason = categorize_error(&e);
                log::warn!("Failed to load {}: {}", ticket.route.api_path, e);
                let title = self
                    .panels
                    .header(panel)
                    .title()
                    .map(str::to_string)
                    .unwrap_or_else(|| ticket.route.ui_path.clone());
                self.panels.set_header(panel, PanelHeader::Titled { title });
                self.panels.render_message(panel, LOAD_FAILURE_MESSAGE);
                LoadOutcome::Failed { reason }
            }
        }
    }

    pub fn session(&self) -> &Arc<ClientSession> {
        &self.session
    }

    pub fn history(&self) -> &BrowserHistory {
        &self.history
    }

    pub fn panels(&self) -> &ViewPanelManager {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut ViewPanelManager {
        &mut self.panels
    }

    /// Route of the latest navigation
    pub fn current_route(&self) -> Option<&Route> {
        self.current.as_ref().map(|ticket| &ticket.route)
    }

    /// Ticket id of the latest navigation
    pub fn current_ticket_id(&self) -> Option<u64> {
        self.current.as_ref().map(|ticket| ticket.id)
    }
}

fn route_state(route: &Route) -> serde_json::Value {
    serde_json::to_value(route).unwrap_or(serde_json::Value::Null)
}
