use std::collections::BTreeSet;

use kgdir_core::types::{FilterState, Quadrant};

/// Owner of the current [`FilterState`] for a presentation layer.
///
/// Readers take a [`FilterStore::snapshot`] and pass it to the matcher.
/// `revision` moves on every effective change, so a caller can reset
/// pagination when it differs from the one it last rendered.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    state: FilterState,
    revision: u64,
}

impl FilterStore {
    pub fn new() -> Self { Self::default() }

    pub fn state(&self) -> &FilterState { &self.state }

    pub fn snapshot(&self) -> FilterState { self.state.clone() }

    pub fn revision(&self) -> u64 { self.revision }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.update(|s| s.search_term = term);
    }

    pub fn set_selected_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: BTreeSet<String> = categories.into_iter().map(Into::into).collect();
        self.update(|s| s.selected_categories = categories);
    }

    /// Select the category if it was not selected, deselect it otherwise.
    /// Returns whether it is selected afterwards.
    pub fn toggle_category(&mut self, category: &str) -> bool {
        let mut selected = false;
        self.update(|s| {
            if !s.selected_categories.remove(category) {
                s.selected_categories.insert(category.to_string());
                selected = true;
            }
        });
        selected
    }

    pub fn set_selected_quadrants(&mut self, quadrants: impl IntoIterator<Item = Quadrant>) {
        let quadrants: BTreeSet<String> = quadrants.into_iter().map(|q| q.label().to_string()).collect();
        self.update(|s| s.selected_quadrants = quadrants);
    }

    pub fn toggle_quadrant(&mut self, quadrant: Quadrant) -> bool {
        let label = quadrant.label();
        let mut selected = false;
        self.update(|s| {
            if !s.selected_quadrants.remove(label) {
                s.selected_quadrants.insert(label.to_string());
                selected = true;
            }
        });
        selected
    }

    pub fn clear_all(&mut self) {
        self.update(|s| *s = FilterState::default());
    }

    pub fn has_active_filters(&self) -> bool { !self.state.is_empty() }

    fn update(&mut self, change: impl FnOnce(&mut FilterState)) {
        let before = self.state.clone();
        change(&mut self.state);
        if self.state != before {
            self.revision += 1;
        }
    }
}
