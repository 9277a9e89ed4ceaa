//! Session: the single state object every user event goes through.
//!
//! [`UiState`] is the serializable part (search box and theme). The
//! [`Session`] adds the record store and the copy tracker, and recomputes the
//! visible installers on every [`Session::view`] call; nothing derived is
//! cached.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::display::{cap, is_truncated};
use crate::installers::{Installer, RecordStore};
use crate::interaction::{
    ClipboardWriter, CopyField, CopyKey, CopyScheduled, CopyTracker, Theme, TimerHandle,
};
use crate::search::{filter, SearchField, SearchState};
use crate::InteractionError;

/// Discrete user events that change [`UiState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetTerm(String),
    SetField(SearchField),
    /// Empty the search box and go back to searching by location.
    Clear,
    ToggleTheme,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub search: SearchState,
    pub theme: Theme,
}

impl UiState {
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetTerm(term) => self.search.term = term,
            Action::SetField(field) => self.search.field = field,
            Action::Clear => {
                self.search.term.clear();
                self.search.field = SearchField::Location;
            }
            Action::ToggleTheme => self.theme = self.theme.toggled(),
        }
    }
}

/// Everything the renderer needs for one frame, minus copy flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    pub visible: Vec<&'a Installer>,
    /// Matches before the display cap.
    pub total_matches: usize,
    pub truncated: bool,
    pub search: &'a SearchState,
    pub theme: Theme,
}

impl View<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[derive(Debug)]
pub struct Session {
    store: RecordStore,
    state: UiState,
    copies: CopyTracker,
}

impl Session {
    #[must_use]
    pub fn new(store: RecordStore) -> Self {
        Self::with_tracker(store, CopyTracker::new())
    }

    #[must_use]
    pub fn with_tracker(store: RecordStore, copies: CopyTracker) -> Self {
        Self {
            store,
            state: UiState::default(),
            copies,
        }
    }

    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    #[must_use]
    pub fn copies(&self) -> &CopyTracker {
        &self.copies
    }

    /// Apply one event.
    ///
    /// Copy flags of installers that drop out of the visible set are
    /// cancelled; their timers are returned so the caller can abort them.
    pub fn apply(&mut self, action: Action) -> Vec<(CopyKey, TimerHandle)> {
        let search_changed = !matches!(action, Action::ToggleTheme);
        self.state.apply(action);
        if !search_changed || self.copies.active_count() == 0 {
            return Vec::new();
        }

        let view = self.view();
        let visible: HashSet<String> = view.visible.iter().map(|r| r.siret.clone()).collect();
        let cancelled = self.copies.retain_records(|siret| visible.contains(siret));
        if !cancelled.is_empty() {
            tracing::debug!(count = cancelled.len(), "cancelled copy flags of hidden installers");
        }
        cancelled
    }

    #[must_use]
    pub fn view(&self) -> View<'_> {
        let search = &self.state.search;
        let filtered = filter(self.store.records(), &search.term, search.field);
        let visible = cap(&filtered, &search.term).to_vec();
        View {
            total_matches: filtered.len(),
            truncated: is_truncated(filtered.len(), &search.term),
            visible,
            search,
            theme: self.state.theme,
        }
    }

    /// Copy one field of the installer `siret` to `clipboard`.
    ///
    /// # Errors
    ///
    /// [`InteractionError::UnknownRecord`] if no installer has that SIRET;
    /// otherwise whatever the clipboard reports.
    pub fn request_copy<C>(
        &mut self,
        clipboard: &mut C,
        siret: &str,
        field: CopyField,
    ) -> Result<CopyScheduled, InteractionError>
    where
        C: ClipboardWriter + ?Sized,
    {
        let installer = self
            .store
            .get(siret)
            .ok_or_else(|| InteractionError::UnknownRecord(siret.to_string()))?;
        let value = field.value_of(installer).to_string();
        self.copies
            .request_copy(clipboard, CopyKey::new(siret, field), &value)
    }

    #[must_use]
    pub fn is_copied(&self, siret: &str, field: CopyField) -> bool {
        self.copies.is_copied(siret, field)
    }

    /// Deliver a timer expiry. Stale handles are ignored.
    pub fn expire_copy(&mut self, key: &CopyKey, handle: TimerHandle) -> bool {
        self.copies.expire(key, handle)
    }

    /// Reset flags whose deadline already passed, whatever their timers did.
    pub fn expire_due(&mut self) -> Vec<CopyKey> {
        self.copies.expire_due()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
