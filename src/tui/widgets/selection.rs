//! Selection panel widget.
//!
//! Shows the most recently committed suggestion and the key bindings, so
//! the demo makes the callback payload visible.

use crate::suggest::Applied;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Panel displaying the last committed selection.
pub struct SelectionPanel<'a> {
    last: Option<&'a Applied>,
}

impl<'a> SelectionPanel<'a> {
    /// Creates a new selection panel.
    pub fn new(last: Option<&'a Applied>) -> Self {
        Self { last }
    }
}

impl Widget for SelectionPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Last selection ");

        let label_style = Style::default().add_modifier(Modifier::BOLD);
        let hint_style = Style::default().fg(Color::DarkGray);

        let mut lines = match self.last {
            Some(applied) => vec![
                Line::from(vec![
                    Span::raw("label: "),
                    Span::styled(applied.label.clone(), label_style),
                ]),
                Line::from(vec![
                    Span::raw("id:    "),
                    Span::styled(
                        applied.id.clone().unwrap_or_else(|| "(null)".to_string()),
                        label_style,
                    ),
                ]),
            ],
            None => vec![Line::from("Nothing committed yet.")],
        };

        lines.push(Line::default());
        lines.push(Line::styled(
            "Type to search.  Down focuses the list, Enter or click commits.",
            hint_style,
        ));
        lines.push(Line::styled(
            "Esc dismisses.  Ctrl+C quits.",
            hint_style,
        ));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
