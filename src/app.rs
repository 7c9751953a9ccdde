use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use log::{info, warn};
use quote_machine_core::{
    AppError, Config, FavoritesStore, HoverTarget, Quote, QuoteClient, QuoteError, QuoteMachine,
    RequestTicket, Resolution,
};
use tokio::sync::mpsc::UnboundedSender;
use crate::tui::AppEvent;

/// One-line message shown in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct App {
    pub should_quit: bool,

    // Core state machine and quote source
    pub machine: QuoteMachine,
    pub client: QuoteClient,

    // Saved quotes panel selection
    pub panel_state: ListState,

    pub status: Option<Status>,
    pub animation_frame: usize,

    // Clickable areas for mouse hit-testing (updated during render)
    pub quote_button_area: Option<Rect>,
    pub share_button_area: Option<Rect>,
    pub creator_area: Option<Rect>,
    pub panel_area: Option<Rect>,

    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(config: &Config, favorites: FavoritesStore, events: UnboundedSender<AppEvent>) -> Self {
        let machine = QuoteMachine::new(favorites).with_min_contrast(config.min_contrast());
        Self::with_parts(machine, QuoteClient::new(config.endpoint()), events)
    }

    pub fn with_parts(machine: QuoteMachine, client: QuoteClient, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            should_quit: false,
            machine,
            client,
            panel_state: ListState::default(),
            status: None,
            animation_frame: 0,
            quote_button_area: None,
            share_button_area: None,
            creator_area: None,
            panel_area: None,
            events,
        }
    }

    /// Start fetching a new quote in the background.
    ///
    /// The result comes back as `AppEvent::QuoteFetched`.
    pub fn request_quote(&mut self) {
        let ticket = self.machine.begin_request();
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = client.fetch_random_quote().await;
            // Receiver only goes away on shutdown
            let _ = events.send(AppEvent::QuoteFetched(ticket, outcome));
        });
    }

    pub fn on_quote_fetched(&mut self, ticket: RequestTicket, outcome: Result<Quote, QuoteError>) {
        match self.machine.resolve_request(ticket, outcome) {
            Ok(Resolution::Applied(view)) => {
                if let Some(quote) = view.current_quote {
                    info!("Showing quote {} by {}", quote.id, quote.author);
                }
                self.status = None;
            }
            Ok(Resolution::Stale) => {}
            Err(e) => self.status = Some(Status::Error(e.to_string())),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.machine.is_loading()
    }

    pub fn panel_open(&self) -> bool {
        self.machine.view().panel_open
    }

    pub fn toggle_favorite(&mut self) {
        if self.machine.view().is_empty() {
            return;
        }
        match self.machine.toggle_favorite() {
            Ok(_) => {
                let message = if self.machine.current_is_saved() { "Saved" } else { "Removed from saved" };
                self.status = Some(Status::Info(message.to_string()));
            }
            Err(e) => self.report(AppError::from(e)),
        }
        self.clamp_panel_selection();
    }

    pub fn open_panel(&mut self) {
        self.machine.open_panel();
        if self.panel_state.selected().is_none() && !self.machine.favorites().is_empty() {
            self.panel_state.select(Some(0));
        }
    }

    pub fn close_panel(&mut self) {
        self.machine.close_panel();
    }

    pub fn toggle_panel(&mut self) {
        if self.panel_open() {
            self.close_panel();
        } else {
            self.open_panel();
        }
    }

    pub fn panel_nav_down(&mut self) {
        let len = self.machine.favorites().len();
        if len > 0 {
            let i = self.panel_state.selected().unwrap_or(0);
            self.panel_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn panel_nav_up(&mut self) {
        let i = self.panel_state.selected().unwrap_or(0);
        self.panel_state.select(Some(i.saturating_sub(1)));
    }

    pub fn highlighted_saved_quote(&self) -> Option<&Quote> {
        self.panel_state
            .selected()
            .and_then(|i| self.machine.favorites().get(i))
    }

    /// Show the highlighted saved quote (closes the panel).
    pub fn select_highlighted(&mut self) {
        if let Some(quote) = self.highlighted_saved_quote().cloned() {
            self.machine.select_saved_quote(quote);
            self.status = None;
        }
    }

    pub fn delete_highlighted(&mut self) {
        let Some(id) = self.highlighted_saved_quote().map(|q| q.id.clone()) else {
            return;
        };
        if let Err(e) = self.machine.delete_saved_quote(&id) {
            self.report(AppError::from(e));
        }
        self.clamp_panel_selection();
    }

    pub fn show_share_link(&mut self) {
        if let Some(url) = self.machine.share_url() {
            self.status = Some(Status::Info(url));
        }
    }

    /// Update hover flags from the mouse position.
    pub fn hover_at(&mut self, x: u16, y: u16) {
        let targets = [
            (HoverTarget::QuoteButton, self.quote_button_area),
            (HoverTarget::ShareButton, self.share_button_area),
            (HoverTarget::CreatorLink, self.creator_area),
        ];
        for (target, area) in targets {
            let hovered = !self.panel_open() && area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
            if self.machine.view().hover.get(target) != hovered {
                self.machine.set_hover(target, hovered);
            }
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 4;
        }
    }

    fn report(&mut self, error: AppError) {
        warn!("{}", error);
        self.status = Some(Status::Error(error.to_string()));
    }

    /// Keep the panel selection inside the list after removals
    fn clamp_panel_selection(&mut self) {
        let len = self.machine.favorites().len();
        match self.panel_state.selected() {
            _ if len == 0 => self.panel_state.select(None),
            Some(i) if i >= len => self.panel_state.select(Some(len - 1)),
            None if self.panel_open() => self.panel_state.select(Some(0)),
            _ => {}
        }
    }
}

/// Check if a point is within a rectangle
pub fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}
