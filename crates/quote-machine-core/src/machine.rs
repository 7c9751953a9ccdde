//! The application state machine.
//!
//! `QuoteMachine` owns the view state and the favorites store. Every
//! transition goes through a named method (or `apply`) and hands back a
//! fresh `ViewState` snapshot; callers never mutate state directly.
//!
//! Fetching a quote is split in two so the network call can run elsewhere:
//! `begin_request` issues a ticket, `resolve_request` folds the result back
//! in. Tickets are ordered, and a successful result is only applied if
//! nothing newer has been shown since the ticket was issued.

use std::future::Future;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::{sample_color, Color, ACCENT_MIN_CONTRAST};
use crate::error::{AppError, PersistenceError, QuoteError};
use crate::favorites::FavoritesStore;
use crate::quote::Quote;
use crate::state::{HoverTarget, ViewState};

/// Identifies one quote request. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// Outcome of folding a successful fetch back into the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Applied(ViewState),
    /// A newer quote was already shown; the result was dropped.
    Stale,
}

/// Synchronous user intents.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    OpenPanel,
    ClosePanel,
    TogglePanel,
    SelectSavedQuote(Quote),
    ToggleFavorite,
    DeleteSavedQuote(String),
    SetHover(HoverTarget, bool),
}

pub struct QuoteMachine {
    view: ViewState,
    favorites: FavoritesStore,
    rng: StdRng,
    min_contrast: f64,
    last_issued: u64,
    applied_through: u64,
    in_flight: usize,
}

impl QuoteMachine {
    pub fn new(favorites: FavoritesStore) -> Self {
        Self::with_rng(favorites, StdRng::from_entropy())
    }

    pub fn with_rng(favorites: FavoritesStore, rng: StdRng) -> Self {
        Self {
            view: ViewState::default(),
            favorites,
            rng,
            min_contrast: ACCENT_MIN_CONTRAST,
            last_issued: 0,
            applied_through: 0,
            in_flight: 0,
        }
    }

    /// Override the accent contrast threshold (against white).
    pub fn with_min_contrast(mut self, min_contrast: f64) -> Self {
        self.min_contrast = min_contrast;
        self
    }

    pub fn min_contrast(&self) -> f64 {
        self.min_contrast
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn snapshot(&self) -> ViewState {
        self.view.clone()
    }

    pub fn favorites(&self) -> &[Quote] {
        self.favorites.list()
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn current_is_saved(&self) -> bool {
        self.view
            .current_id()
            .map(|id| self.favorites.contains(id))
            .unwrap_or(false)
    }

    /// True while at least one issued request has not been resolved.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn share_url(&self) -> Option<String> {
        self.view.current_quote.as_ref().map(Quote::share_url)
    }

    // Quote requests

    pub fn begin_request(&mut self) -> RequestTicket {
        self.last_issued += 1;
        self.in_flight += 1;
        debug!("Quote request #{} started", self.last_issued);
        RequestTicket(self.last_issued)
    }

    /// Fold a finished fetch into the view state.
    ///
    /// Failures leave the state untouched and are returned as-is.
    pub fn resolve_request(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Quote, QuoteError>,
    ) -> Result<Resolution, QuoteError> {
        self.in_flight = self.in_flight.saturating_sub(1);

        let quote = match outcome {
            Ok(quote) => quote,
            Err(e) => {
                warn!("Quote request #{} failed: {}", ticket.0, e);
                return Err(e);
            }
        };

        if ticket.0 <= self.applied_through {
            debug!(
                "Dropping stale quote {} from request #{} (already showing #{})",
                quote.id, ticket.0, self.applied_through
            );
            return Ok(Resolution::Stale);
        }

        self.applied_through = ticket.0;
        self.show_quote(quote);
        Ok(Resolution::Applied(self.snapshot()))
    }

    /// Fetch and apply a quote in one step.
    pub async fn request_new_quote<F>(&mut self, fetch: F) -> Result<ViewState, QuoteError>
    where
        F: Future<Output = Result<Quote, QuoteError>>,
    {
        let ticket = self.begin_request();
        let outcome = fetch.await;
        self.resolve_request(ticket, outcome)?;
        Ok(self.snapshot())
    }

    // Panel

    pub fn open_panel(&mut self) -> ViewState {
        self.view.panel_open = true;
        self.snapshot()
    }

    pub fn close_panel(&mut self) -> ViewState {
        self.view.panel_open = false;
        self.snapshot()
    }

    pub fn toggle_panel(&mut self) -> ViewState {
        self.view.panel_open = !self.view.panel_open;
        self.snapshot()
    }

    /// Show a saved quote without touching the network.
    ///
    /// No-op when it is already the current quote. Closes the panel and
    /// supersedes any request still in flight.
    pub fn select_saved_quote(&mut self, quote: Quote) -> ViewState {
        if self.view.current_quote.as_ref().is_some_and(|current| current.same_id(&quote)) {
            return self.snapshot();
        }
        self.applied_through = self.last_issued;
        self.show_quote(quote);
        self.view.panel_open = false;
        self.snapshot()
    }

    // Favorites

    /// Save or unsave the current quote. No-op while nothing is shown.
    pub fn toggle_favorite(&mut self) -> Result<ViewState, PersistenceError> {
        if let Some(quote) = &self.view.current_quote {
            self.favorites.toggle(quote)?;
        }
        Ok(self.snapshot())
    }

    /// Remove a saved quote. The current quote stays on screen either way.
    pub fn delete_saved_quote(&mut self, id: &str) -> Result<ViewState, PersistenceError> {
        self.favorites.remove(id)?;
        Ok(self.snapshot())
    }

    pub fn set_hover(&mut self, target: HoverTarget, hovered: bool) -> ViewState {
        self.view.hover.set(target, hovered);
        self.snapshot()
    }

    pub fn apply(&mut self, intent: Intent) -> Result<ViewState, AppError> {
        let view = match intent {
            Intent::OpenPanel => self.open_panel(),
            Intent::ClosePanel => self.close_panel(),
            Intent::TogglePanel => self.toggle_panel(),
            Intent::SelectSavedQuote(quote) => self.select_saved_quote(quote),
            Intent::ToggleFavorite => self.toggle_favorite()?,
            Intent::DeleteSavedQuote(id) => self.delete_saved_quote(&id)?,
            Intent::SetHover(target, hovered) => self.set_hover(target, hovered),
        };
        Ok(view)
    }

    fn show_quote(&mut self, quote: Quote) {
        let accent = sample_color(&mut self.rng, self.min_contrast, Color::WHITE);
        debug!("Showing quote {} with accent {}", quote.id, accent);
        self.view.current_quote = Some(quote);
        self.view.accent_color = accent;
    }
}
