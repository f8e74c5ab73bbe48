//! Debounced, database-backed autocomplete.
//!
//! [`AutoSuggest`] attaches to a text input owned by the host: the host
//! forwards text mutations to [`AutoSuggest::notify_text_changed`], polls
//! [`AutoSuggest::poll`] from its event loop, routes navigation keys to the
//! selection methods, and renders [`AutoSuggest::dropdown`] with the
//! `SuggestionDropdown` widget. After a quiet period the component queries
//! the bound table for rows whose search columns contain the typed text and
//! presents them; committing a row writes its label back into the input and
//! reports `(id, label)` to the on-select callback.

mod debounce;
mod query;

pub use debounce::{Debounce, DEBOUNCE_DELAY_MS};
pub use query::{
    suggestions_from, Suggestion, SuggestionQuery, LABEL_SEPARATOR, SUGGESTION_LIMIT,
};

use crate::db::DatabaseClient;
use crate::tui::app::InputState;
use ratatui::style::Style;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Default popup width in terminal cells.
pub const DEFAULT_POPUP_WIDTH: u16 = 40;

/// Default popup height in terminal cells, borders included.
pub const DEFAULT_POPUP_HEIGHT: u16 = 8;

/// Callback invoked when a suggestion is committed, with the row id (if the
/// id column was non-NULL) and the committed label.
pub type OnSelect = Box<dyn FnMut(Option<&str>, &str)>;

/// Describes which table and columns a component searches.
///
/// Table and column names are trusted configuration; they are interpolated
/// into statement text. Only the typed term is ever bound as a parameter.
#[derive(Debug, Clone)]
pub struct SuggestBinding {
    /// Table to search.
    pub table: String,

    /// Columns matched against the typed text and joined into the label.
    /// Must contain at least one column.
    pub search_columns: Vec<String>,

    /// Column identifying the selected row.
    pub id_column: String,

    /// Optional glyph rendered as a row prefix in the dropdown. Never used
    /// in matching.
    pub icon: Option<String>,
}

impl SuggestBinding {
    /// Creates a binding for the given table and columns.
    pub fn new(
        table: impl Into<String>,
        search_columns: Vec<String>,
        id_column: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            search_columns,
            id_column: id_column.into(),
            icon: None,
        }
    }

    /// Sets the dropdown row prefix glyph.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Popup presentation settings, adjustable while the component runs.
///
/// Changes never touch a hidden popup; they take effect the next time the
/// popup renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupSettings {
    /// Popup width in cells, borders included.
    pub width: u16,

    /// Popup height in cells, borders included.
    pub height: u16,

    /// Style applied to suggestion text.
    pub style: Style,
}

impl Default for PopupSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_POPUP_WIDTH,
            height: DEFAULT_POPUP_HEIGHT,
            style: Style::default(),
        }
    }
}

/// Presenter state for the suggestion popup.
///
/// The label -> id map is captured when a result set is shown; commits
/// resolve ids against that capture. Duplicate labels keep the last row's
/// id.
#[derive(Debug, Default)]
pub struct DropdownState {
    visible: bool,
    items: Vec<Suggestion>,
    ids: HashMap<String, Option<String>>,
    selected: usize,
}

impl DropdownState {
    /// Replaces the contents with a fresh result set, pre-selecting the
    /// first row. An empty set hides the popup.
    pub(crate) fn show(&mut self, items: Vec<Suggestion>) {
        if items.is_empty() {
            self.hide();
            return;
        }

        self.ids.clear();
        for item in &items {
            self.ids.insert(item.label.clone(), item.id.clone());
        }
        self.items = items;
        self.selected = 0;
        self.visible = true;
    }

    /// Hides the popup and clears items, map and selection.
    pub(crate) fn hide(&mut self) {
        self.visible = false;
        self.items.clear();
        self.ids.clear();
        self.selected = 0;
    }

    /// Returns true while the popup is showing.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the suggestions in display order.
    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    /// Returns the number of suggestions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when no suggestions are held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the highlighted row index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Returns the highlighted suggestion, if any.
    pub fn selected_item(&self) -> Option<&Suggestion> {
        self.items.get(self.selected)
    }

    /// Moves the highlight down one row. Does not wrap.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    /// Moves the highlight up one row. Does not wrap.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the highlight to `index` when it is in range.
    pub fn select(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    /// Resolves a label against the map captured at display time.
    pub fn id_for(&self, label: &str) -> Option<String> {
        self.ids.get(label).cloned().flatten()
    }
}

/// A committed selection, as reported to the callback.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub id: Option<String>,
    pub label: String,
}

/// The autocomplete component.
pub struct AutoSuggest {
    db: Arc<dyn DatabaseClient>,
    binding: SuggestBinding,
    debounce: Debounce,
    dropdown: DropdownState,
    settings: PopupSettings,
    on_select: Option<OnSelect>,
}

impl AutoSuggest {
    /// Creates a component bound to `binding`, fetching through `db`.
    pub fn new(db: Arc<dyn DatabaseClient>, binding: SuggestBinding) -> Self {
        Self {
            db,
            binding,
            debounce: Debounce::default(),
            dropdown: DropdownState::default(),
            settings: PopupSettings::default(),
            on_select: None,
        }
    }

    /// Installs the callback invoked on every committed selection.
    pub fn with_on_select(mut self, callback: OnSelect) -> Self {
        self.on_select = Some(callback);
        self
    }

    /// Overrides the debounce quiet period.
    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce = Debounce::new(delay);
        self
    }

    /// Returns the binding configuration.
    pub fn binding(&self) -> &SuggestBinding {
        &self.binding
    }

    /// Returns the popup presenter state.
    pub fn dropdown(&self) -> &DropdownState {
        &self.dropdown
    }

    /// Returns the presentation settings.
    pub fn settings(&self) -> &PopupSettings {
        &self.settings
    }

    /// Returns the debounce timer.
    pub fn debounce(&self) -> &Debounce {
        &self.debounce
    }

    /// Returns true while the popup is showing.
    pub fn is_visible(&self) -> bool {
        self.dropdown.is_visible()
    }

    /// Sets the style suggestion rows render with.
    pub fn set_suggestion_style(&mut self, style: Style) {
        self.settings.style = style;
    }

    /// Sets the popup dimensions in terminal cells.
    pub fn set_popup_size(&mut self, width: u16, height: u16) {
        self.settings.width = width;
        self.settings.height = height;
    }

    /// Input watcher entry point. The host calls this after every text
    /// mutation of the bound input; each call restarts the quiet period, so
    /// only the latest mutation's deadline can fire.
    pub fn notify_text_changed(&mut self, now: Instant) {
        self.debounce.restart(now);
    }

    /// Fires the pending fetch once the quiet period has elapsed, using the
    /// input's value at fire time. Call from the host's event loop tick.
    pub async fn poll(&mut self, input: &InputState, now: Instant) {
        if self.debounce.ready(now) {
            self.refresh_suggestions(&input.text).await;
        }
    }

    /// Moves the highlight down one row.
    pub fn select_next(&mut self) {
        self.dropdown.select_next();
    }

    /// Moves the highlight up one row.
    pub fn select_previous(&mut self) {
        self.dropdown.select_previous();
    }

    /// Moves the highlight to `index` when it is in range.
    pub fn select(&mut self, index: usize) {
        self.dropdown.select(index);
    }

    /// Commits the highlighted suggestion.
    ///
    /// Writes the label into `input` (a text mutation, so the debounce
    /// re-arms), resolves the id captured at display time, invokes the
    /// callback with `(id, label)`, and hides the popup. Returns what was
    /// applied, or None when nothing is highlighted.
    pub fn commit_selection(
        &mut self,
        input: &mut InputState,
        now: Instant,
    ) -> Option<Applied> {
        let label = self.dropdown.selected_item()?.label.clone();
        let id = self.dropdown.id_for(&label);

        input.replace(&label);
        self.debounce.restart(now);

        if let Some(callback) = self.on_select.as_mut() {
            callback(id.as_deref(), &label);
        }

        self.dropdown.hide();
        Some(Applied { id, label })
    }

    /// Hides the popup without committing. No callback fires.
    pub fn dismiss(&mut self) {
        self.dropdown.hide();
    }

    async fn refresh_suggestions(&mut self, text: &str) {
        let term = text.trim();
        if term.is_empty() {
            self.dropdown.hide();
            return;
        }

        let query = SuggestionQuery::build(&self.binding, term, self.db.param_style());

        match self.db.query_with_params(&query.sql, &query.params).await {
            Ok(result) => {
                let items = suggestions_from(&result);
                debug!(
                    "Fetched {} suggestions for '{term}' in {:?}",
                    items.len(),
                    result.execution_time
                );
                self.dropdown.show(items);
            }
            Err(e) => {
                error!("Suggestion query failed: {e}");
                self.dropdown.hide();
            }
        }
    }
}
