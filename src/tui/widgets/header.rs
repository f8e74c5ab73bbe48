//! Header widget for the TUI.
//!
//! Displays the application name, version, and the searched table.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Header bar widget.
pub struct Header<'a> {
    connection_info: Option<&'a str>,
    table: &'a str,
}

impl<'a> Header<'a> {
    /// Creates a new header widget.
    pub fn new(connection_info: Option<&'a str>, table: &'a str) -> Self {
        Self {
            connection_info,
            table,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        // Left side: app name and version
        let left_text = format!(" dbsuggest v{}", env!("CARGO_PKG_VERSION"));
        buf.set_stringn(area.x, area.y, &left_text, area.width as usize, style);

        // Right side: connection info and searched table
        let right_text = match self.connection_info {
            Some(info) => format!(" [db: {}] [table: {}] ", info, self.table),
            None => format!(" [table: {}] ", self.table),
        };
        let right_width = right_text.len() as u16;
        if right_width < area.width {
            let right_x = area.right().saturating_sub(right_width);
            buf.set_string(right_x, area.y, &right_text, style);
        }
    }
}
