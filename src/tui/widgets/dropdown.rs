//! Suggestion dropdown widget.
//!
//! Renders the autocomplete popup anchored to the bottom-left corner of the
//! input field. The scroll and hit-test math lives here so rendering and
//! mouse handling cannot disagree about which row is where.

use crate::suggest::{DropdownState, PopupSettings};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Widget},
};

/// Suggestion dropdown popup widget.
pub struct SuggestionDropdown<'a> {
    state: &'a DropdownState,
    settings: &'a PopupSettings,
    icon: Option<&'a str>,
}

impl<'a> SuggestionDropdown<'a> {
    /// Creates a new dropdown widget over the given presenter state.
    pub fn new(
        state: &'a DropdownState,
        settings: &'a PopupSettings,
        icon: Option<&'a str>,
    ) -> Self {
        Self {
            state,
            settings,
            icon,
        }
    }

    /// Computes where the popup goes: anchored to the bottom-left corner of
    /// `input_area`, sized from the settings, clipped to the screen.
    pub fn popup_area(input_area: Rect, settings: &PopupSettings, screen: Rect) -> Rect {
        let x = input_area.x;
        let y = input_area.bottom();
        Rect::new(x, y, settings.width, settings.height).intersection(screen)
    }

    /// Returns the index of the first visible row so the selected row stays
    /// on screen.
    pub fn scroll_offset(selected: usize, visible_rows: usize) -> usize {
        if visible_rows == 0 || selected < visible_rows {
            0
        } else {
            selected + 1 - visible_rows
        }
    }

    /// Maps a screen position to a suggestion index, if it lands on a row.
    pub fn row_at(area: Rect, state: &DropdownState, x: u16, y: u16) -> Option<usize> {
        if !state.is_visible() {
            return None;
        }

        let inner = Block::default().borders(Borders::ALL).inner(area);
        if x < inner.x || x >= inner.right() || y < inner.y || y >= inner.bottom() {
            return None;
        }

        let skip = Self::scroll_offset(state.selected(), inner.height as usize);
        let index = skip + (y - inner.y) as usize;
        (index < state.len()).then_some(index)
    }
}

impl Widget for SuggestionDropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.state.is_visible() || self.state.is_empty() || area.height < 3 {
            return;
        }

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Suggestions ");
        let inner = block.inner(area);
        block.render(area, buf);

        let visible_rows = inner.height as usize;
        let skip = Self::scroll_offset(self.state.selected(), visible_rows);

        let selected_style = self
            .settings
            .style
            .patch(Style::default().bg(Color::DarkGray).fg(Color::White));

        for (i, item) in self
            .state
            .items()
            .iter()
            .enumerate()
            .skip(skip)
            .take(visible_rows)
        {
            let y = inner.y + (i - skip) as u16;
            let is_selected = i == self.state.selected();
            let style = if is_selected {
                selected_style
            } else {
                self.settings.style
            };

            if is_selected {
                for x in inner.x..inner.right() {
                    buf[(x, y)].set_style(style);
                }
            }

            let text = match self.icon {
                Some(icon) => format!("{icon} {}", item.label),
                None => item.label.clone(),
            };
            buf.set_stringn(inner.x, y, &text, inner.width as usize, style);
        }
    }
}
