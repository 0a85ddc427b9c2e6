//! # API Facade
//!
//! The single entry point for every operation, regardless of the UI
//! driving it. The facade owns the storage backend, dispatches to the
//! command layer and returns structured results — no stdout, no
//! terminal assumptions. Generic over [`StorageBackend`] so tests run
//! against [`crate::store::memory::InMemoryStore`] while the CLI runs
//! against [`crate::store::fs::FileStore`].

use crate::client::PlacesClient;
use crate::commands::{self, bookmark::ToggleOutcome, search::SearchOutcome, CmdResult};
use crate::error::Result;
use crate::model::{Category, LocationContext, Place, SearchFilters};
use crate::store::StorageBackend;

pub struct CompassApi<S: StorageBackend> {
    store: S,
}

impl<S: StorageBackend> CompassApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    /// The current collection, migrated if the blob was old.
    pub fn categories(&self) -> Vec<Category> {
        commands::decode::load(&self.store)
    }

    pub fn is_favorite(&self, uri: &str) -> bool {
        commands::bookmark::is_favorite(&self.categories(), uri)
    }

    /// Global favorite toggle. [`ToggleOutcome::NeedsCategory`] means
    /// nothing was persisted and the caller should ask where to file
    /// the place, then call [`Self::add_to_category`].
    pub fn toggle_favorite(&mut self, place: &Place) -> Result<ToggleOutcome> {
        commands::bookmark::toggle(&mut self.store, place)
    }

    pub fn add_to_category(&mut self, category_id: &str, place: Place) -> Result<CmdResult> {
        commands::bookmark::add(&mut self.store, category_id, place)
    }

    pub fn remove_item(&mut self, category_id: &str, uri: &str) -> Result<CmdResult> {
        commands::bookmark::remove(&mut self.store, category_id, uri)
    }

    pub fn move_item(&mut self, from_id: &str, to_id: &str, uri: &str) -> Result<CmdResult> {
        commands::bookmark::move_item(&mut self.store, from_id, to_id, uri)
    }

    pub fn create_category(&mut self, name: &str, initial: Option<Place>) -> Result<CmdResult> {
        commands::category::create(&mut self.store, name, initial)
    }

    pub fn rename_category(&mut self, id: &str, new_name: &str) -> Result<CmdResult> {
        commands::category::rename(&mut self.store, id, new_name)
    }

    pub fn delete_category(&mut self, id: &str, skip_confirm: bool) -> Result<CmdResult> {
        commands::category::delete(&mut self.store, id, skip_confirm)
    }

    pub fn toggle_collapsed(&mut self, id: &str) -> Result<CmdResult> {
        commands::category::toggle_collapsed(&mut self.store, id)
    }

    pub fn search<C: PlacesClient>(
        &self,
        client: &C,
        filters: &SearchFilters,
        location: &LocationContext,
    ) -> Result<SearchOutcome> {
        commands::search::run(client, filters, location)
    }
}
