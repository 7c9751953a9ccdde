//! UI-agnostic view state
//!
//! Snapshots handed to the presentation layer. They never reference UI
//! framework types, so any front end can render them.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::quote::Quote;

/// Interactive elements that track hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverTarget {
    QuoteButton,
    ShareButton,
    CreatorLink,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverState {
    pub quote_button: bool,
    pub share_button: bool,
    pub creator_link: bool,
}

impl HoverState {
    pub fn get(&self, target: HoverTarget) -> bool {
        match target {
            HoverTarget::QuoteButton => self.quote_button,
            HoverTarget::ShareButton => self.share_button,
            HoverTarget::CreatorLink => self.creator_link,
        }
    }

    pub fn set(&mut self, target: HoverTarget, hovered: bool) {
        match target {
            HoverTarget::QuoteButton => self.quote_button = hovered,
            HoverTarget::ShareButton => self.share_button = hovered,
            HoverTarget::CreatorLink => self.creator_link = hovered,
        }
    }
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// `None` until the first quote arrives.
    pub current_quote: Option<Quote>,
    pub accent_color: Color,
    pub panel_open: bool,
    pub hover: HoverState,
}

impl ViewState {
    pub fn is_empty(&self) -> bool {
        self.current_quote.is_none()
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_quote.as_ref().map(|q| q.id.as_str())
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_quote: None,
            accent_color: Color::DEFAULT_ACCENT,
            panel_open: false,
            hover: HoverState::default(),
        }
    }
}
