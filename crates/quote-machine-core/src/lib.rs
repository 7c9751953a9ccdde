pub mod color;
pub mod config;
pub mod error;
pub mod favorites;
pub mod machine;
pub mod quote;
pub mod state;
pub mod storage;

// Re-export main types for convenience
pub use color::{contrast_ratio, highest_contrast, sample_accent, sample_color, Color};
pub use config::Config;
pub use error::{AppError, ParseColorError, PersistenceError, QuoteError};
pub use favorites::FavoritesStore;
pub use machine::{Intent, QuoteMachine, RequestTicket, Resolution};
pub use quote::{Quote, QuoteClient, DEFAULT_ENDPOINT};
pub use state::{HoverState, HoverTarget, ViewState};
pub use storage::{FileStorage, MemoryStorage, Storage};
