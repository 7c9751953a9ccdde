//! Saved quotes, unique by id, in the order they were saved.

use std::cell::OnceCell;

use log::{debug, warn};

use crate::error::PersistenceError;
use crate::quote::Quote;
use crate::storage::Storage;

/// Storage key holding the JSON-encoded favorites list.
pub const FAVORITES_KEY: &str = "quotes";

pub struct FavoritesStore {
    storage: Box<dyn Storage>,
    key: String,
    quotes: OnceCell<Vec<Quote>>,
}

impl FavoritesStore {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self::with_key(storage, FAVORITES_KEY)
    }

    pub fn with_key(storage: impl Storage + 'static, key: &str) -> Self {
        Self {
            storage: Box::new(storage),
            key: key.to_string(),
            quotes: OnceCell::new(),
        }
    }

    /// Current favorites, loaded from storage on first access.
    pub fn list(&self) -> &[Quote] {
        self.quotes.get_or_init(|| self.load())
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.list().iter().any(|q| q.id == id)
    }

    /// Append `quote` unless one with the same id is already saved.
    pub fn add(&mut self, quote: Quote) -> Result<(), PersistenceError> {
        if self.contains(&quote.id) {
            return Ok(());
        }
        debug!("Saving quote {}", quote.id);
        self.update(|quotes| quotes.push(quote));
        self.persist()
    }

    /// Remove the quote with `id`, if present.
    pub fn remove(&mut self, id: &str) -> Result<(), PersistenceError> {
        if !self.contains(id) {
            return Ok(());
        }
        self.update(|quotes| quotes.retain(|q| q.id != id));
        debug!("Removed quote {}", id);
        self.persist()
    }

    /// Remove the quote if saved, save it otherwise.
    ///
    /// Returns whether the quote is saved afterwards.
    pub fn toggle(&mut self, quote: &Quote) -> Result<bool, PersistenceError> {
        if self.contains(&quote.id) {
            self.remove(&quote.id).map(|_| false)
        } else {
            self.add(quote.clone()).map(|_| true)
        }
    }

    /// Mutate the in-memory list, loading it first if nothing has read it yet.
    fn update(&mut self, f: impl FnOnce(&mut Vec<Quote>)) {
        let mut quotes = self.quotes.take().unwrap_or_else(|| self.load());
        f(&mut quotes);
        self.quotes = OnceCell::from(quotes);
    }

    fn load(&self) -> Vec<Quote> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read '{}' from storage, starting empty: {}", self.key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Quote>>(&raw) {
            Ok(mut quotes) => {
                // Older writers could store duplicates; keep the first of each id
                let mut seen = std::collections::HashSet::new();
                quotes.retain(|q| seen.insert(q.id.clone()));
                debug!("Loaded {} saved quote(s)", quotes.len());
                quotes
            }
            Err(e) => {
                warn!("Ignoring unreadable '{}' entry: {}", self.key, e);
                Vec::new()
            }
        }
    }

    fn persist(&mut self) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_string(self.list()).map_err(|source| PersistenceError::Encode {
            key: self.key.clone(),
            source,
        })?;

        self.storage.set(&self.key, &encoded).map_err(|source| {
            warn!("Failed to persist '{}': {}", self.key, source);
            PersistenceError::Io {
                key: self.key.clone(),
                source,
            }
        })
    }
}
