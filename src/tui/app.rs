//! Application state for the TUI.
//!
//! Contains the main App struct wiring the autocomplete component to the
//! input field, plus the focus and event routing around them.

use crate::suggest::{Applied, AutoSuggest};
use crate::tui::widgets::dropdown::SuggestionDropdown;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::Instant;

/// Which element currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The text field. Typing edits and re-arms the debounce.
    #[default]
    Input,
    /// The suggestion list. Typing is ignored; Up/Down/Enter act on it.
    Dropdown,
}

/// Input state for text editing.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current input text.
    pub text: String,
    /// Cursor position (character index).
    pub cursor: usize,
}

impl InputState {
    /// Creates a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    /// Returns true if the text changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
            true
        } else {
            false
        }
    }

    /// Deletes the character at the cursor (delete key).
    /// Returns true if the text changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
            true
        } else {
            false
        }
    }

    /// Moves the cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the start of the input.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end of the input.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Replaces the whole text, placing the cursor at the end.
    pub fn replace(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_count();
    }

    /// Returns true if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the number of characters in the input.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Maps the character index to a byte offset into `text`.
    ///
    /// `String` edits take byte offsets; multi-byte characters make the two
    /// units diverge, so every edit converts through here.
    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .map(|(at, _)| at)
            .nth(char_idx)
            .unwrap_or(self.text.len())
    }
}

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// Current keyboard focus.
    pub focus: Focus,
    /// The search field the component is bound to.
    pub input: InputState,
    /// The autocomplete component.
    pub suggest: AutoSuggest,
    /// Most recently committed selection, for the demo panel.
    pub last_selection: Option<Applied>,
    /// Database connection info for the header.
    pub connection_info: Option<String>,
    /// Terminal size from the last draw, for mouse hit-testing.
    pub viewport: Rect,
}

impl App {
    /// Creates a new App around a configured component.
    pub fn new(suggest: AutoSuggest, connection_info: Option<String>) -> Self {
        Self {
            running: true,
            focus: Focus::default(),
            input: InputState::new(),
            suggest,
            last_selection: None,
            connection_info,
            viewport: Rect::default(),
        }
    }

    /// Records the terminal size used for the current frame.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Handles an event and updates application state.
    pub fn handle_event(&mut self, event: super::Event, now: Instant) {
        use super::Event;

        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Resize(width, height) => {
                self.viewport = Rect::new(0, 0, width, height);
            }
            Event::Tick => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Exit commands work regardless of focus.
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.running = false;
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key, now),
            Focus::Dropdown => self.handle_dropdown_key(key, now),
        }
    }

    /// Handles key events while the text field has focus.
    fn handle_input_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(c) => {
                self.input.insert(c);
                self.suggest.notify_text_changed(now);
            }
            KeyCode::Backspace => {
                if self.input.backspace() {
                    self.suggest.notify_text_changed(now);
                }
            }
            KeyCode::Delete => {
                if self.input.delete() {
                    self.suggest.notify_text_changed(now);
                }
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            // Down moves focus into a visible suggestion list.
            KeyCode::Down => {
                if self.suggest.is_visible() {
                    self.focus = Focus::Dropdown;
                }
            }
            KeyCode::Esc => {
                if self.suggest.is_visible() {
                    self.suggest.dismiss();
                }
            }
            _ => {}
        }
    }

    /// Handles key events while the suggestion list has focus.
    ///
    /// Printable keys are deliberately ignored here: they must not edit the
    /// field or re-arm the debounce.
    fn handle_dropdown_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Up => self.suggest.select_previous(),
            KeyCode::Down => self.suggest.select_next(),
            KeyCode::Enter => {
                if let Some(applied) = self.suggest.commit_selection(&mut self.input, now) {
                    self.last_selection = Some(applied);
                }
                self.focus = Focus::Input;
            }
            KeyCode::Esc => {
                self.suggest.dismiss();
                self.focus = Focus::Input;
            }
            _ => {}
        }
    }

    /// Handles mouse events: a left click on a suggestion row commits it, a
    /// click anywhere else dismisses a visible popup.
    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if !self.suggest.is_visible() {
            return;
        }

        let areas = super::ui::layout(self.viewport);
        let popup =
            SuggestionDropdown::popup_area(areas.input, self.suggest.settings(), self.viewport);

        match SuggestionDropdown::row_at(popup, self.suggest.dropdown(), mouse.column, mouse.row)
        {
            Some(row) => {
                self.suggest.select(row);
                if let Some(applied) = self.suggest.commit_selection(&mut self.input, now) {
                    self.last_selection = Some(applied);
                }
                self.focus = Focus::Input;
            }
            None => {
                self.suggest.dismiss();
                self.focus = Focus::Input;
            }
        }
    }

    /// Drives the debounce from the event loop and keeps focus consistent
    /// when a refresh empties or hides the popup.
    pub async fn poll_suggestions(&mut self, now: Instant) {
        self.suggest.poll(&self.input, now).await;

        if self.focus == Focus::Dropdown && !self.suggest.is_visible() {
            self.focus = Focus::Input;
        }
    }
}
