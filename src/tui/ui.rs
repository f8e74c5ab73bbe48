//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components. The layout function is
//! pure so mouse hit-testing in the app can reuse it and always agree with
//! what was drawn.

use super::app::{App, Focus};
use super::widgets::dropdown::SuggestionDropdown;
use super::widgets::{header, input, selection};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// The screen regions of the main layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppAreas {
    pub header: Rect,
    pub input: Rect,
    pub content: Rect,
}

/// Splits the screen into header bar, search field and content panel.
///
/// The field sits directly under the header so the dropdown has room to
/// open below it.
pub fn layout(area: Rect) -> AppAreas {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Search field
            Constraint::Min(0),    // Content
        ])
        .split(area);

    AppAreas {
        header: main_layout[0],
        input: main_layout[1],
        content: main_layout[2],
    }
}

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let areas = layout(frame.area());

    render_header(frame, areas.header, app);
    render_input(frame, areas.input, app);
    render_selection(frame, areas.content, app);

    // The dropdown overlays the content, so it renders last.
    render_dropdown(frame, areas.input, app);
}

/// Renders the header bar.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let widget = header::Header::new(
        app.connection_info.as_deref(),
        &app.suggest.binding().table,
    );
    frame.render_widget(widget, area);
}

/// Renders the search field.
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Input;
    let widget = input::InputBar::new(&app.input.text, app.input.cursor, focused);
    frame.render_widget(widget, area);

    // Position cursor in the field when focused
    if focused {
        // Account for border (1) and prompt "> " (2). Cursor and scroll
        // offset both count characters, so the difference is the column.
        let available_width = area.width.saturating_sub(5) as usize;
        let scroll_offset = input::calculate_scroll_offset(app.input.cursor, available_width);
        let cursor_x = area.x + 1 + 2 + (app.input.cursor - scroll_offset) as u16;
        let cursor_y = area.y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Renders the last-selection panel.
fn render_selection(frame: &mut Frame, area: Rect, app: &App) {
    let widget = selection::SelectionPanel::new(app.last_selection.as_ref());
    frame.render_widget(widget, area);
}

/// Renders the suggestion dropdown anchored under the search field.
fn render_dropdown(frame: &mut Frame, input_area: Rect, app: &App) {
    if !app.suggest.is_visible() {
        return;
    }

    let area = SuggestionDropdown::popup_area(input_area, app.suggest.settings(), frame.area());
    let widget = SuggestionDropdown::new(
        app.suggest.dropdown(),
        app.suggest.settings(),
        app.suggest.binding().icon.as_deref(),
    );
    frame.render_widget(widget, area);
}
